//! Token layer of the minter.
//!
//! Collections group token data, token data is the template a token is
//! minted from, and balances track who holds how many units of which token.
//! Every token id is known to the CIS-2 interface of the contract holding the
//! store.
use super::*;

/// Which fields of a collection can be changed after creation.
#[derive(Debug, Serialize, SchemaType, Clone, Copy, PartialEq, Eq)]
pub struct CollectionMutabilityConfig {
    pub description: bool,
    pub uri: bool,
    pub maximum: bool,
}

/// Which fields of a token data can be changed after creation.
#[derive(Debug, Serialize, SchemaType, Clone, Copy, PartialEq, Eq)]
pub struct TokenMutabilityConfig {
    pub maximum: bool,
    pub uri: bool,
    pub royalty: bool,
    pub description: bool,
    pub properties: bool,
}

#[derive(Debug, Serialize, SchemaType, Clone, PartialEq, Eq)]
pub struct CollectionData {
    pub name: String,
    pub description: String,
    pub uri: String,
    /// Maximum number of token data in the collection. Zero means untracked.
    pub maximum: u64,
    /// Number of token data created in the collection.
    pub supply: u64,
    pub mutability: CollectionMutabilityConfig,
}

/// Royalty paid to `payee`, as the fraction `numerator / denominator`.
#[derive(Debug, Serialize, SchemaType, Clone, Copy, PartialEq, Eq)]
pub struct Royalty {
    pub payee: Address,
    pub numerator: u64,
    pub denominator: u64,
}

/// Custom typed property attached to a token data.
#[derive(Debug, Serialize, SchemaType, Clone, PartialEq, Eq)]
pub struct Property {
    pub key: String,
    pub value: Vec<u8>,
    pub kind: String,
}

/// Token data as requested by its creator.
#[derive(Debug, Serialize, SchemaType, Clone, PartialEq, Eq)]
pub struct TokenDataParams {
    pub collection: String,
    pub name: String,
    pub description: String,
    /// Maximum number of units that can be minted. Zero means unlimited.
    pub maximum: u64,
    pub uri: String,
    pub royalty: Royalty,
    pub mutability: TokenMutabilityConfig,
    pub properties: Vec<Property>,
}

/// Token data as kept by the store.
#[derive(Debug, Serialize, SchemaType, Clone, PartialEq, Eq)]
pub struct TokenData {
    /// The only address allowed to mint units of this token.
    pub creator: Address,
    pub collection: String,
    pub name: String,
    pub description: String,
    pub maximum: u64,
    /// Number of units minted so far.
    pub supply: u64,
    pub uri: String,
    pub royalty: Royalty,
    pub mutability: TokenMutabilityConfig,
    pub properties: Vec<Property>,
}

/// Unique name of a token data.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct TokenDataId {
    pub collection: String,
    pub name: String,
}

/// Tokens and operators of a single address.
#[derive(Serial, DeserialWithState, Deletable)]
#[concordium(state_parameter = "S")]
pub struct HolderState<S: HasStateApi> {
    /// Units held per token.
    pub owned_tokens: StateMap<ContractTokenId, ContractTokenAmount, S>,
    /// The address which are currently enabled as operators for this address.
    pub operators: StateSet<Address, S>,
}

impl<S: HasStateApi> HolderState<S> {
    fn empty(state_builder: &mut StateBuilder<S>) -> Self {
        Self {
            owned_tokens: state_builder.new_map(),
            operators: state_builder.new_set(),
        }
    }
}

#[derive(Serial, DeserialWithState)]
#[concordium(state_parameter = "S")]
pub struct TokenStore<S: HasStateApi> {
    collections: StateMap<String, CollectionData, S>,
    token_ids: StateMap<TokenDataId, ContractTokenId, S>,
    token_data: StateMap<ContractTokenId, TokenData, S>,
    holders: StateMap<Address, HolderState<S>, S>,
    next_token_id: u32,
}

impl<S: HasStateApi> TokenStore<S> {
    /// Creates an empty store with no collections.
    pub fn new(state_builder: &mut StateBuilder<S>) -> Self {
        Self {
            collections: state_builder.new_map(),
            token_ids: state_builder.new_map(),
            token_data: state_builder.new_map(),
            holders: state_builder.new_map(),
            next_token_id: 0,
        }
    }

    pub fn create_collection(
        &mut self,
        name: String,
        description: String,
        uri: String,
        maximum: u64,
        mutability: CollectionMutabilityConfig,
    ) -> ContractResult<()> {
        match self.collections.entry(name.clone()) {
            Entry::Vacant(hole) => {
                hole.insert(CollectionData {
                    name,
                    description,
                    uri,
                    maximum,
                    supply: 0,
                    mutability,
                });
                Ok(())
            }
            Entry::Occupied(_) => Err(CustomContractError::CollectionAlreadyExists.into()),
        }
    }

    pub fn collection(&self, name: &str) -> Option<CollectionData> {
        self.collections
            .get(&String::from(name))
            .map(|data| data.clone())
    }

    /// Register new token data in one of the collections, with `signer` as
    /// its creator. Returns the id the token will be minted under.
    pub fn create_token_data(
        &mut self,
        signer: &Signer,
        params: TokenDataParams,
    ) -> ContractResult<ContractTokenId> {
        ensure!(
            params.royalty.denominator != 0
                && params.royalty.numerator <= params.royalty.denominator,
            CustomContractError::InvalidRoyalty.into()
        );

        let data_id = TokenDataId {
            collection: params.collection.clone(),
            name: params.name.clone(),
        };
        ensure!(
            self.token_ids.get(&data_id).is_none(),
            CustomContractError::TokenDataAlreadyExists.into()
        );

        let token_id = TokenIdU32(self.next_token_id);
        let next_token_id = self
            .next_token_id
            .checked_add(1)
            .ok_or(CustomContractError::TokenIdsExhausted)?;

        {
            let mut collection = self
                .collections
                .entry(params.collection.clone())
                .occupied_or(CustomContractError::CollectionNotFound)?;
            ensure!(
                collection.maximum == 0 || collection.supply < collection.maximum,
                CustomContractError::CollectionMaximumReached.into()
            );
            collection.supply += 1;
        }

        self.next_token_id = next_token_id;

        self.token_ids.insert(data_id, token_id);
        self.token_data.insert(
            token_id,
            TokenData {
                creator: signer.address(),
                collection: params.collection,
                name: params.name,
                description: params.description,
                maximum: params.maximum,
                supply: 0,
                uri: params.uri,
                royalty: params.royalty,
                mutability: params.mutability,
                properties: params.properties,
            },
        );

        Ok(token_id)
    }

    /// Mint `amount` units of an existing token to the signer, who must be the
    /// creator of the token data.
    pub fn mint_token(
        &mut self,
        signer: &Signer,
        token_id: &ContractTokenId,
        amount: ContractTokenAmount,
        state_builder: &mut StateBuilder<S>,
    ) -> ContractResult<MintEvent<ContractTokenId, ContractTokenAmount>> {
        let owner = signer.address();
        {
            let mut data = self
                .token_data
                .entry(*token_id)
                .occupied_or(ContractError::InvalidTokenId)?;
            ensure_eq!(
                data.creator,
                owner,
                CustomContractError::NoMintCapability.into()
            );

            let supply = data
                .supply
                .checked_add(amount.0)
                .ok_or(CustomContractError::MintExceedsMaximum)?;
            ensure!(
                data.maximum == 0 || supply <= data.maximum,
                CustomContractError::MintExceedsMaximum.into()
            );
            data.supply = supply;
        }

        self.credit(owner, token_id, amount, state_builder);

        Ok(MintEvent {
            token_id: *token_id,
            amount,
            owner,
        })
    }

    /// Transfer units held by the signer to `receiver`.
    pub fn direct_transfer(
        &mut self,
        signer: &Signer,
        receiver: Address,
        token_id: &ContractTokenId,
        amount: ContractTokenAmount,
        state_builder: &mut StateBuilder<S>,
    ) -> ContractResult<TransferEvent<ContractTokenId, ContractTokenAmount>> {
        let from = signer.address();
        self.transfer(token_id, amount, &from, receiver, state_builder)?;

        Ok(TransferEvent {
            token_id: *token_id,
            amount,
            from,
            to: receiver,
        })
    }

    /// Update the store with a transfer of some token.
    /// Results in an error if the token ID does not exist in the store or if
    /// the from address have insufficient tokens to do the transfer.
    pub fn transfer(
        &mut self,
        token_id: &ContractTokenId,
        amount: ContractTokenAmount,
        from: &Address,
        to: Address,
        state_builder: &mut StateBuilder<S>,
    ) -> ContractResult<()> {
        ensure!(self.contains_token(token_id), ContractError::InvalidTokenId);

        // A zero transfer does not modify the state.
        if amount == 0.into() {
            return Ok(());
        }

        self.debit(from, token_id, amount)?;
        self.credit(to, token_id, amount, state_builder);

        Ok(())
    }

    /// Check that the token ID currently exists in this store.
    #[inline(always)]
    pub fn contains_token(&self, token_id: &ContractTokenId) -> bool {
        self.token_data.get(token_id).is_some()
    }

    pub fn token_data(&self, token_id: &ContractTokenId) -> Option<TokenData> {
        self.token_data.get(token_id).map(|data| data.clone())
    }

    /// Id of the token data named `name` in `collection`.
    pub fn token_id(&self, collection: &str, name: &str) -> Option<ContractTokenId> {
        self.token_ids
            .get(&TokenDataId {
                collection: String::from(collection),
                name: String::from(name),
            })
            .map(|token_id| *token_id)
    }

    /// Metadata URL of a token, which is the URI of its token data.
    pub fn token_metadata(&self, token_id: &ContractTokenId) -> ContractResult<MetadataUrl> {
        let data = self
            .token_data
            .get(token_id)
            .ok_or(ContractError::InvalidTokenId)?;

        Ok(MetadataUrl {
            url: data.uri.clone(),
            hash: None,
        })
    }

    /// Get the current balance of a given token ID for a given address.
    /// Results in an error if the token ID does not exist in the store.
    pub fn balance(
        &self,
        token_id: &ContractTokenId,
        address: &Address,
    ) -> ContractResult<ContractTokenAmount> {
        ensure!(self.contains_token(token_id), ContractError::InvalidTokenId);

        Ok(self.holders.get(address).map_or(0.into(), |holder| {
            holder
                .owned_tokens
                .get(token_id)
                .map_or(0.into(), |amount| *amount)
        }))
    }

    /// Add a new operator for the given address.
    ///
    /// Succeeds even if the `operator` is already an operator for the `owner`.
    pub fn add_operator(
        &mut self,
        owner: &Address,
        operator: &Address,
        state_builder: &mut StateBuilder<S>,
    ) {
        let mut holder = self
            .holders
            .entry(*owner)
            .or_insert_with(|| HolderState::empty(state_builder));
        holder.operators.insert(*operator);
    }

    /// Update the state removing an operator for a given address.
    /// Succeeds even if the `operator` is _not_ an operator for the `address`.
    pub fn remove_operator(&mut self, owner: &Address, operator: &Address) {
        self.holders
            .get_mut(owner)
            .map(|mut holder| holder.operators.remove(operator));
    }

    /// Check if `address` is an operator for `owner`.
    pub fn is_operator(&self, owner: &Address, address: &Address) -> bool {
        self.holders
            .get(owner)
            .map(|holder| holder.operators.contains(address))
            .unwrap_or(false)
    }

    fn credit(
        &mut self,
        owner: Address,
        token_id: &ContractTokenId,
        amount: ContractTokenAmount,
        state_builder: &mut StateBuilder<S>,
    ) {
        let mut holder = self
            .holders
            .entry(owner)
            .or_insert_with(|| HolderState::empty(state_builder));
        holder
            .owned_tokens
            .entry(*token_id)
            .and_modify(|balance| *balance += amount)
            .or_insert_with(|| amount);
    }

    fn debit(
        &mut self,
        owner: &Address,
        token_id: &ContractTokenId,
        amount: ContractTokenAmount,
    ) -> ContractResult<()> {
        let mut holder = self
            .holders
            .entry(*owner)
            .occupied_or(ContractError::InsufficientFunds)?;
        let mut balance = holder
            .owned_tokens
            .entry(*token_id)
            .occupied_or(ContractError::InsufficientFunds)?;
        ensure!(*balance >= amount, ContractError::InsufficientFunds);
        *balance -= amount;

        Ok(())
    }
}

#[concordium_cfg_test]
mod tests {
    use super::*;
    use concordium_std::test_infrastructure::*;

    const CREATOR: ContractAddress = ContractAddress {
        index: 1,
        subindex: 0,
    };
    const USER_1: AccountAddress = AccountAddress([16; 32]);
    const USER_2: AccountAddress = AccountAddress([17; 32]);

    const COLLECTION: &str = "Collection";

    fn no_mutation() -> CollectionMutabilityConfig {
        CollectionMutabilityConfig {
            description: false,
            uri: false,
            maximum: false,
        }
    }

    fn token_params(name: &str, maximum: u64) -> TokenDataParams {
        TokenDataParams {
            collection: String::from(COLLECTION),
            name: String::from(name),
            description: String::new(),
            maximum,
            uri: String::from(name),
            royalty: Royalty {
                payee: Address::Account(USER_1),
                numerator: 1,
                denominator: 1,
            },
            mutability: TokenMutabilityConfig {
                maximum: false,
                uri: false,
                royalty: false,
                description: false,
                properties: true,
            },
            properties: Vec::new(),
        }
    }

    fn creator() -> Signer {
        Signer::for_test(Address::Contract(CREATOR))
    }

    fn default_store(
        state_builder: &mut StateBuilder<TestStateApi>,
        maximum: u64,
    ) -> TokenStore<TestStateApi> {
        let mut store = TokenStore::new(state_builder);
        let result = store.create_collection(
            String::from(COLLECTION),
            String::from("Description"),
            String::from("https://collection"),
            maximum,
            no_mutation(),
        );
        claim_eq!(result, Ok(()));
        store
    }

    #[concordium_test]
    fn test_create_collection() {
        let mut state_builder = TestStateBuilder::new();
        let mut store = default_store(&mut state_builder, 0);

        claim_eq!(
            store.collection(COLLECTION),
            Some(CollectionData {
                name: String::from(COLLECTION),
                description: String::from("Description"),
                uri: String::from("https://collection"),
                maximum: 0,
                supply: 0,
                mutability: no_mutation(),
            })
        );

        let result = store.create_collection(
            String::from(COLLECTION),
            String::new(),
            String::new(),
            0,
            no_mutation(),
        );
        claim_eq!(
            result,
            Err(CustomContractError::CollectionAlreadyExists.into())
        );
    }

    #[concordium_test]
    fn test_create_token_data() {
        let mut state_builder = TestStateBuilder::new();
        let mut store = default_store(&mut state_builder, 0);

        let first = store.create_token_data(&creator(), token_params("a.jpg", 1));
        let second = store.create_token_data(&creator(), token_params("b.jpg", 1));
        claim_eq!(first, Ok(TokenIdU32(0)));
        claim_eq!(second, Ok(TokenIdU32(1)));
        claim_eq!(store.token_id(COLLECTION, "b.jpg"), Some(TokenIdU32(1)));

        let data = store
            .token_data(&TokenIdU32(0))
            .expect_report("Token data should exist");
        claim_eq!(data.creator, Address::Contract(CREATOR));
        claim_eq!(data.supply, 0);
        claim_eq!(
            store
                .collection(COLLECTION)
                .map(|collection| collection.supply),
            Some(2)
        );

        // Names are unique per collection
        let result = store.create_token_data(&creator(), token_params("a.jpg", 1));
        claim_eq!(
            result,
            Err(CustomContractError::TokenDataAlreadyExists.into())
        );
    }

    #[concordium_test]
    fn test_create_token_data_rejects() {
        let mut state_builder = TestStateBuilder::new();
        let mut store = default_store(&mut state_builder, 1);

        let mut params = token_params("a.jpg", 1);
        params.collection = String::from("Unknown");
        claim_eq!(
            store.create_token_data(&creator(), params),
            Err(CustomContractError::CollectionNotFound.into())
        );

        let mut params = token_params("a.jpg", 1);
        params.royalty.numerator = 2;
        claim_eq!(
            store.create_token_data(&creator(), params),
            Err(CustomContractError::InvalidRoyalty.into())
        );

        let mut params = token_params("a.jpg", 1);
        params.royalty.denominator = 0;
        params.royalty.numerator = 0;
        claim_eq!(
            store.create_token_data(&creator(), params),
            Err(CustomContractError::InvalidRoyalty.into())
        );

        // Collection is tracked with a maximum of one token data
        claim!(store
            .create_token_data(&creator(), token_params("a.jpg", 1))
            .is_ok());
        claim_eq!(
            store.create_token_data(&creator(), token_params("b.jpg", 1)),
            Err(CustomContractError::CollectionMaximumReached.into())
        );
    }

    #[concordium_test]
    fn test_create_token_data_ids_exhausted() {
        let mut state_builder = TestStateBuilder::new();
        let mut store = default_store(&mut state_builder, 0);
        store.next_token_id = u32::MAX - 1;

        claim_eq!(
            store.create_token_data(&creator(), token_params("a.jpg", 1)),
            Ok(TokenIdU32(u32::MAX - 1))
        );

        claim_eq!(
            store.create_token_data(&creator(), token_params("b.jpg", 1)),
            Err(CustomContractError::TokenIdsExhausted.into())
        );
        claim!(store.token_id(COLLECTION, "b.jpg").is_none());
        claim_eq!(
            store
                .collection(COLLECTION)
                .map(|collection| collection.supply),
            Some(1)
        );
        claim_eq!(
            store
                .token_data(&TokenIdU32(u32::MAX - 1))
                .map(|data| data.name),
            Some(String::from("a.jpg"))
        );
    }

    #[concordium_test]
    fn test_mint_token() {
        let mut state_builder = TestStateBuilder::new();
        let mut store = default_store(&mut state_builder, 0);
        let token_id = store
            .create_token_data(&creator(), token_params("a.jpg", 1))
            .expect_report("Failed to create token data");

        // Only the creator may mint
        let stranger = Signer::for_test(Address::Account(USER_1));
        let result = store.mint_token(&stranger, &token_id, 1.into(), &mut state_builder);
        claim_eq!(result, Err(CustomContractError::NoMintCapability.into()));

        let event = store
            .mint_token(&creator(), &token_id, 1.into(), &mut state_builder)
            .expect_report("Failed to mint");
        claim_eq!(event.token_id, token_id);
        claim_eq!(event.amount, 1.into());
        claim_eq!(event.owner, Address::Contract(CREATOR));
        claim_eq!(
            store.balance(&token_id, &Address::Contract(CREATOR)),
            Ok(1.into())
        );

        // Maximum of one unit
        let result = store.mint_token(&creator(), &token_id, 1.into(), &mut state_builder);
        claim_eq!(result, Err(CustomContractError::MintExceedsMaximum.into()));

        let result = store.mint_token(&creator(), &TokenIdU32(7), 1.into(), &mut state_builder);
        claim_eq!(result, Err(ContractError::InvalidTokenId));
    }

    #[concordium_test]
    fn test_direct_transfer() {
        let mut state_builder = TestStateBuilder::new();
        let mut store = default_store(&mut state_builder, 0);
        let token_id = store
            .create_token_data(&creator(), token_params("a.jpg", 1))
            .expect_report("Failed to create token data");
        store
            .mint_token(&creator(), &token_id, 1.into(), &mut state_builder)
            .expect_report("Failed to mint");

        let event = store
            .direct_transfer(
                &creator(),
                Address::Account(USER_1),
                &token_id,
                1.into(),
                &mut state_builder,
            )
            .expect_report("Failed to transfer");
        claim_eq!(event.token_id, token_id);
        claim_eq!(event.amount, 1.into());
        claim_eq!(event.from, Address::Contract(CREATOR));
        claim_eq!(event.to, Address::Account(USER_1));
        claim_eq!(
            store.balance(&token_id, &Address::Contract(CREATOR)),
            Ok(0.into())
        );
        claim_eq!(
            store.balance(&token_id, &Address::Account(USER_1)),
            Ok(1.into())
        );

        // Nothing left to send
        let result = store.direct_transfer(
            &creator(),
            Address::Account(USER_2),
            &token_id,
            1.into(),
            &mut state_builder,
        );
        claim_eq!(result, Err(ContractError::InsufficientFunds));
    }

    #[concordium_test]
    fn test_transfer() {
        let mut state_builder = TestStateBuilder::new();
        let mut store = default_store(&mut state_builder, 0);
        let token_id = store
            .create_token_data(&creator(), token_params("a.jpg", 1))
            .expect_report("Failed to create token data");
        store
            .mint_token(&creator(), &token_id, 1.into(), &mut state_builder)
            .expect_report("Failed to mint");

        // Zero transfers are accepted without touching balances
        let result = store.transfer(
            &token_id,
            0.into(),
            &Address::Account(USER_1),
            Address::Account(USER_2),
            &mut state_builder,
        );
        claim_eq!(result, Ok(()));

        let result = store.transfer(
            &token_id,
            1.into(),
            &Address::Account(USER_1),
            Address::Account(USER_2),
            &mut state_builder,
        );
        claim_eq!(result, Err(ContractError::InsufficientFunds));

        let result = store.transfer(
            &TokenIdU32(3),
            1.into(),
            &Address::Contract(CREATOR),
            Address::Account(USER_2),
            &mut state_builder,
        );
        claim_eq!(result, Err(ContractError::InvalidTokenId));

        let result = store.transfer(
            &token_id,
            1.into(),
            &Address::Contract(CREATOR),
            Address::Account(USER_2),
            &mut state_builder,
        );
        claim_eq!(result, Ok(()));
        claim_eq!(
            store.balance(&token_id, &Address::Account(USER_2)),
            Ok(1.into())
        );
    }

    #[concordium_test]
    fn test_token_metadata() {
        let mut state_builder = TestStateBuilder::new();
        let mut store = default_store(&mut state_builder, 0);
        let token_id = store
            .create_token_data(&creator(), token_params("ipfs://a.jpg", 1))
            .expect_report("Failed to create token data");

        let metadata = store
            .token_metadata(&token_id)
            .expect_report("Token metadata should exist");
        claim_eq!(metadata.url, String::from("ipfs://a.jpg"));
        claim!(metadata.hash.is_none());

        claim_eq!(
            store.token_metadata(&TokenIdU32(9)).map(|metadata| metadata.url),
            Err(ContractError::InvalidTokenId)
        );
    }

    #[concordium_test]
    fn test_operators() {
        let mut state_builder = TestStateBuilder::new();
        let mut store = default_store(&mut state_builder, 0);
        let owner = Address::Account(USER_1);
        let operator = Address::Account(USER_2);

        claim!(!store.is_operator(&owner, &operator));

        store.add_operator(&owner, &operator, &mut state_builder);
        claim!(store.is_operator(&owner, &operator));
        claim!(!store.is_operator(&operator, &owner));

        store.remove_operator(&owner, &operator);
        claim!(!store.is_operator(&owner, &operator));

        // Removing a missing operator is not an error
        store.remove_operator(&operator, &owner);
    }
}
