use commons::*;
use concordium_std::*;

/// The contract state: one module record per instance.
#[derive(Serial, DeserialWithState)]
#[concordium(state_parameter = "S")]
pub struct State<S: HasStateApi> {
    /// Lets the instance sign for itself when minting.
    pub signer_cap: SignerCapability,
    /// The only address allowed to manage the media pool and toggle minting.
    pub admin: Address,
    /// Collection every token is minted in.
    pub collection_name: String,
    pub minting_enabled: bool,
    /// URIs not minted yet.
    pub available_media_uris: Vec<MediaUri>,
    /// Collections, token data, balances and operators.
    pub tokens: TokenStore<S>,
}

impl<S: HasStateApi> State<S> {
    /// Creates a new state with minting disabled and an empty pool.
    pub fn new(
        signer_cap: SignerCapability,
        admin: AccountAddress,
        collection_name: String,
        tokens: TokenStore<S>,
    ) -> Self {
        Self {
            signer_cap,
            admin: Address::Account(admin),
            collection_name,
            minting_enabled: false,
            available_media_uris: Vec::new(),
            tokens,
        }
    }

    pub fn ensure_admin(&self, sender: &Address) -> ContractResult<()> {
        ensure_eq!(
            sender,
            &self.admin,
            CustomContractError::NotAuthorized.into()
        );
        Ok(())
    }

    pub fn add_media(&mut self, media_uris: impl IntoIterator<Item = MediaUri>) {
        self.available_media_uris.extend(media_uris);
    }

    /// Take the URI at `seed` modulo the pool size out of the pool.
    /// Later entries shift down by one.
    pub fn take_media(&mut self, seed: u64) -> ContractResult<MediaUri> {
        ensure!(
            self.minting_enabled,
            CustomContractError::MintingDisabled.into()
        );
        ensure!(
            !self.available_media_uris.is_empty(),
            CustomContractError::NoAvailableUris.into()
        );

        let index = (seed % self.available_media_uris.len() as u64) as usize;
        Ok(self.available_media_uris.remove(index))
    }
}

#[concordium_cfg_test]
mod tests {
    use super::*;
    use concordium_std::test_infrastructure::*;

    const ADMIN: AccountAddress = AccountAddress([1; 32]);
    const USER: AccountAddress = AccountAddress([16; 32]);

    fn uris(names: &[&str]) -> Vec<MediaUri> {
        names.iter().map(|name| name.as_bytes().to_vec()).collect()
    }

    fn new_state(state_builder: &mut StateBuilder<TestStateApi>) -> State<TestStateApi> {
        let mut ctx = TestInitContext::empty();
        ctx.set_init_origin(ADMIN);
        let tokens = TokenStore::new(state_builder);
        State::new(
            SignerCapability::retrieve(&ctx),
            ADMIN,
            String::from("Collection"),
            tokens,
        )
    }

    #[concordium_test]
    fn test_ensure_admin() {
        let mut state_builder = TestStateBuilder::new();
        let state = new_state(&mut state_builder);

        claim_eq!(state.ensure_admin(&Address::Account(ADMIN)), Ok(()));
        claim_eq!(
            state.ensure_admin(&Address::Account(USER)),
            Err(CustomContractError::NotAuthorized.into())
        );
        claim_eq!(
            state.ensure_admin(&Address::Contract(ContractAddress {
                index: 1,
                subindex: 0
            })),
            Err(CustomContractError::NotAuthorized.into())
        );
    }

    #[concordium_test]
    fn test_take_media_guards() {
        let mut state_builder = TestStateBuilder::new();
        let mut state = new_state(&mut state_builder);

        // Disabled wins over an empty pool
        claim_eq!(
            state.take_media(0),
            Err(CustomContractError::MintingDisabled.into())
        );

        state.add_media(uris(&["a.jpg"]));
        claim_eq!(
            state.take_media(0),
            Err(CustomContractError::MintingDisabled.into())
        );

        state.minting_enabled = true;
        state.available_media_uris.clear();
        claim_eq!(
            state.take_media(0),
            Err(CustomContractError::NoAvailableUris.into())
        );
    }

    #[concordium_test]
    fn test_take_media_removes_by_position() {
        let mut state_builder = TestStateBuilder::new();
        let mut state = new_state(&mut state_builder);
        state.minting_enabled = true;
        state.add_media(uris(&["a.jpg", "b.jpg", "c.jpg", "d.jpg"]));

        // 6 mod 4 = 2
        claim_eq!(state.take_media(6), Ok(b"c.jpg".to_vec()));
        claim_eq!(state.available_media_uris, uris(&["a.jpg", "b.jpg", "d.jpg"]));

        // 3 mod 3 = 0
        claim_eq!(state.take_media(3), Ok(b"a.jpg".to_vec()));
        claim_eq!(state.available_media_uris, uris(&["b.jpg", "d.jpg"]));

        claim_eq!(state.take_media(u64::MAX), Ok(b"d.jpg".to_vec()));
        claim_eq!(state.take_media(u64::MAX), Ok(b"b.jpg".to_vec()));
        claim_eq!(
            state.take_media(u64::MAX),
            Err(CustomContractError::NoAvailableUris.into())
        );
    }
}
