use commons::*;
use concordium_cis2::*;
use concordium_std::*;

use crate::constants::*;
use crate::events::*;
use crate::external::*;
use crate::state::State;

/// Initialize the minter with its collection, minting disabled and an empty
/// media pool.
///
/// It rejects if:
/// - Fails to parse parameter.
/// - Fails to create the collection.
/// - Fails to log `CollectionCreated` event.
#[init(contract = "MediaMinter", parameter = "InitParams", enable_logger)]
fn init<S: HasStateApi>(
    ctx: &impl HasInitContext,
    state_builder: &mut StateBuilder<S>,
    logger: &mut impl HasLogger,
) -> InitResult<State<S>> {
    let params = InitParams::deserial(&mut ctx.parameter_cursor())?;

    let mut tokens = TokenStore::new(state_builder);
    tokens.create_collection(
        String::from(COLLECTION_NAME),
        String::from(COLLECTION_DESCRIPTION),
        String::from(COLLECTION_URI),
        0,
        CollectionMutabilityConfig {
            description: false,
            uri: false,
            maximum: false,
        },
    )?;

    logger.log(&CustomEvent::CollectionCreated(CollectionCreatedEvent {
        name: String::from(COLLECTION_NAME),
        maximum: 0,
    }))?;

    // Construct the initial contract state.
    let state = State::new(
        SignerCapability::retrieve(ctx),
        params.admin,
        String::from(COLLECTION_NAME),
        tokens,
    );
    Ok(state)
}

/// Append a single media URI to the pool.
///
/// It rejects if:
/// - Sender is not the admin.
/// - Fails to parse parameter.
/// - Fails to log `MediaAdded` event.
#[receive(
    mutable,
    contract = "MediaMinter",
    name = "addAvailableMedia",
    parameter = "String",
    enable_logger
)]
fn add_available_media<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let state = host.state_mut();
    state.ensure_admin(&ctx.sender())?;

    let media_uri = String::deserial(&mut ctx.parameter_cursor())?;
    state.add_media(Some(media_uri.into_bytes()));

    logger.log(&CustomEvent::MediaAdded(MediaAddedEvent {
        added: 1,
        available: state.available_media_uris.len() as u64,
    }))?;

    Ok(())
}

/// Append media URIs to the pool, keeping their order.
///
/// It rejects if:
/// - Sender is not the admin.
/// - Fails to parse parameter.
/// - Fails to log `MediaAdded` event.
#[receive(
    mutable,
    contract = "MediaMinter",
    name = "batchAddAvailableMedia",
    parameter = "BatchAddMediaParams",
    enable_logger
)]
fn batch_add_available_media<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let state = host.state_mut();
    state.ensure_admin(&ctx.sender())?;

    let params = BatchAddMediaParams::deserial(&mut ctx.parameter_cursor())?;
    let added = params.media_uris.len() as u64;
    state.add_media(params.media_uris);

    logger.log(&CustomEvent::MediaAdded(MediaAddedEvent {
        added,
        available: state.available_media_uris.len() as u64,
    }))?;

    Ok(())
}

/// Switch minting on or off.
///
/// It rejects if:
/// - Sender is not the admin.
/// - Fails to parse parameter.
/// - Fails to log `MintingUpdated` event.
#[receive(
    mutable,
    contract = "MediaMinter",
    name = "setMintingEnabled",
    parameter = "bool",
    enable_logger
)]
fn set_minting_enabled<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let state = host.state_mut();
    state.ensure_admin(&ctx.sender())?;

    let enabled = bool::deserial(&mut ctx.parameter_cursor())?;
    state.minting_enabled = enabled;

    logger.log(&CustomEvent::MintingUpdated(MintingUpdatedEvent { enabled }))?;

    Ok(())
}

/// Mint one token from the media pool to the sending account.
/// The URI at index `slot time (ms) % pool size` is removed from the pool and
/// becomes the token name, its metadata URL and its `media_uri` property.
/// The token is minted by the instance itself and then transferred.
/// Logs a `Mint`, a `TokenMetadata` and a `Transfer` event.
///
/// It rejects if:
/// - The sender is a contract.
/// - Minting is disabled.
/// - The pool is empty.
/// - The selected URI is not valid UTF-8.
/// - Any of the token operations fails.
/// - Fails to log any of the events.
#[receive(mutable, contract = "MediaMinter", name = "mintNft", enable_logger)]
fn mint_nft<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    // Only accounts can receive a minted token.
    let receiver = ctx.sender();
    ensure!(
        matches!(receiver, Address::Account(_)),
        CustomContractError::OnlyAccount.into()
    );
    let seed = ctx.metadata().slot_time().timestamp_millis();
    let (state, state_builder) = host.state_and_builder();

    let media_uri = state.take_media(seed)?;
    let token_name = String::from_utf8(media_uri.clone())
        .map_err(|_| CustomContractError::InvalidMediaUri)?;

    let signer = state.signer_cap.create_signer(ctx);
    let token_id = state.tokens.create_token_data(
        &signer,
        TokenDataParams {
            collection: state.collection_name.clone(),
            name: token_name.clone(),
            description: String::new(),
            maximum: 1,
            uri: token_name,
            royalty: Royalty {
                payee: state.admin,
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
            properties: vec![Property {
                key: String::from(MEDIA_URI_PROPERTY),
                value: media_uri,
                kind: String::from(MEDIA_URI_PROPERTY_TYPE),
            }],
        },
    )?;

    let mint_event = state
        .tokens
        .mint_token(&signer, &token_id, 1.into(), state_builder)?;
    let metadata_url = state.tokens.token_metadata(&token_id)?;
    let transfer_event =
        state
            .tokens
            .direct_transfer(&signer, receiver, &token_id, 1.into(), state_builder)?;

    // Event for minted NFT.
    logger.log(&ContractCis2Event::Mint(mint_event))?;

    // Metadata URL for the NFT.
    logger.log(&ContractCis2Event::TokenMetadata(TokenMetadataEvent {
        token_id,
        metadata_url,
    }))?;

    // Event for handing the NFT over to the receiver.
    logger.log(&ContractCis2Event::Transfer(transfer_event))?;

    Ok(())
}

/// Execute a list of token transfers, in the order of the list.
///
/// Logs a `Transfer` event for each transfer in the list.
/// Produces an action which sends a message to each contract which are the
/// receiver of a transfer.
///
/// It rejects if:
/// - It fails to parse the parameter.
/// - Any of the transfers fail to be executed, which could be if:
///     - The `token_id` does not exist.
///     - The sender is not the owner of the token, or an operator for this
///       specific `token_id` and `from` address.
///     - The token is not owned by the `from`.
/// - Fails to log event.
/// - Any of the messages sent to contracts receiving a transfer choose to
///   reject.
#[receive(
    contract = "MediaMinter",
    name = "transfer",
    parameter = "TransferParameter",
    mutable,
    enable_logger
)]
fn transfer<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    // Parse the parameter.
    let TransferParams(transfers): TransferParameter = ctx.parameter_cursor().get()?;
    // Get the sender who invoked this contract function.
    let sender = ctx.sender();

    for transfer in transfers {
        let (state, state_builder) = host.state_and_builder();
        // Authenticate the sender for this transfer
        ensure!(
            transfer.from == sender || state.tokens.is_operator(&transfer.from, &sender),
            ContractError::Unauthorized
        );

        let to_address = transfer.to.address();
        // Update the contract state
        state.tokens.transfer(
            &transfer.token_id,
            transfer.amount,
            &transfer.from,
            to_address,
            state_builder,
        )?;

        // Log transfer event
        logger.log(&ContractCis2Event::Transfer(TransferEvent {
            token_id: transfer.token_id,
            amount: transfer.amount,
            from: transfer.from,
            to: to_address,
        }))?;

        // If the receiver is a contract, we add sending it a message to the list of
        // actions.
        if let Receiver::Contract(address, entrypoint_name) = transfer.to {
            let parameter = OnReceivingCis2Params {
                token_id: transfer.token_id,
                amount: transfer.amount,
                from: transfer.from,
                data: transfer.data,
            };

            host.invoke_contract(
                &address,
                &parameter,
                entrypoint_name.as_entrypoint_name(),
                Amount::zero(),
            )?;
        }
    }

    Ok(())
}

/// Enable or disable addresses as operators of the sender address.
/// Logs an `UpdateOperator` event.
///
/// It rejects if:
/// - It fails to parse the parameter.
/// - Fails to log event.
#[receive(
    contract = "MediaMinter",
    name = "updateOperator",
    parameter = "UpdateOperatorParams",
    mutable,
    enable_logger
)]
fn update_operator<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    // Parse the parameter.
    let UpdateOperatorParams(params) = ctx.parameter_cursor().get()?;
    // Get the sender who invoked this contract function.
    let sender = ctx.sender();

    let (state, state_builder) = host.state_and_builder();
    for param in params {
        // Update the operator in the state.
        match param.update {
            OperatorUpdate::Add => {
                state
                    .tokens
                    .add_operator(&sender, &param.operator, state_builder)
            }
            OperatorUpdate::Remove => state.tokens.remove_operator(&sender, &param.operator),
        }

        // Log the appropriate event
        logger.log(&ContractCis2Event::UpdateOperator(UpdateOperatorEvent {
            owner: sender,
            operator: param.operator,
            update: param.update,
        }))?;
    }

    Ok(())
}

/// Takes a list of queries. Each query is an owner address and some address to
/// check as an operator of the owner address.
///
/// It rejects if:
/// - It fails to parse the parameter.
#[receive(
    contract = "MediaMinter",
    name = "operatorOf",
    parameter = "OperatorOfQueryParams",
    return_value = "OperatorOfQueryResponse"
)]
fn operator_of<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<OperatorOfQueryResponse> {
    // Parse the parameter.
    let params: OperatorOfQueryParams = ctx.parameter_cursor().get()?;
    // Build the response.
    let mut response = Vec::with_capacity(params.queries.len());
    let state = host.state();
    for query in params.queries {
        // Query the state for address being an operator of owner.
        let is_operator = state.tokens.is_operator(&query.owner, &query.address);
        response.push(is_operator);
    }

    Ok(OperatorOfQueryResponse::from(response))
}

/// Get the balance of given token IDs and addresses.
///
/// It rejects if:
/// - It fails to parse the parameter.
/// - Any of the queried `token_id` does not exist.
#[receive(
    contract = "MediaMinter",
    name = "balanceOf",
    parameter = "ContractBalanceOfQueryParams",
    return_value = "ContractBalanceOfQueryResponse"
)]
fn balance_of<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<ContractBalanceOfQueryResponse> {
    // Parse the parameter.
    let params: ContractBalanceOfQueryParams = ctx.parameter_cursor().get()?;
    // Build the response.
    let mut response = Vec::with_capacity(params.queries.len());
    let state = host.state();
    for query in params.queries {
        // Query the state for balance.
        let amount = state.tokens.balance(&query.token_id, &query.address)?;
        response.push(amount);
    }

    Ok(ContractBalanceOfQueryResponse::from(response))
}

/// Get the metadata URLs of the given token IDs, which are the minted media
/// URIs.
///
/// It rejects if:
/// - It fails to parse the parameter.
/// - Any of the queried `token_id` does not exist.
#[receive(
    contract = "MediaMinter",
    name = "tokenMetadata",
    parameter = "ContractTokenMetadataQueryParams",
    return_value = "TokenMetadataQueryResponse"
)]
fn token_metadata<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<TokenMetadataQueryResponse> {
    // Parse the parameter.
    let params: ContractTokenMetadataQueryParams = ctx.parameter_cursor().get()?;
    // Build the response.
    let mut response = Vec::with_capacity(params.queries.len());
    let state = host.state();
    for token_id in params.queries {
        response.push(state.tokens.token_metadata(&token_id)?);
    }

    Ok(TokenMetadataQueryResponse::from(response))
}

/// Report which of the queried standards this contract implements.
///
/// It rejects if:
/// - It fails to parse the parameter.
#[receive(
    contract = "MediaMinter",
    name = "supports",
    parameter = "SupportsQueryParams",
    return_value = "SupportsQueryResponse"
)]
fn supports<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    _host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<SupportsQueryResponse> {
    // Parse the parameter.
    let params: SupportsQueryParams = ctx.parameter_cursor().get()?;

    let response = params
        .queries
        .iter()
        .map(|std_id| {
            if SUPPORTS_STANDARDS.contains(&std_id.as_standard_identifier()) {
                SupportResult::Support
            } else {
                SupportResult::NoSupport
            }
        })
        .collect::<Vec<_>>();

    Ok(SupportsQueryResponse::from(response))
}

/// View the module record.
#[receive(contract = "MediaMinter", name = "view", return_value = "ViewState")]
fn view<S: HasStateApi>(
    _ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<ViewState> {
    let state = host.state();

    Ok(ViewState {
        admin: state.admin,
        collection_name: state.collection_name.clone(),
        minting_enabled: state.minting_enabled,
        available_media_uris: state.available_media_uris.clone(),
    })
}

/// View the token data a token was minted from.
#[receive(
    contract = "MediaMinter",
    name = "viewTokenData",
    parameter = "ContractTokenId",
    return_value = "Option<TokenData>"
)]
fn view_token_data<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<Option<TokenData>> {
    let token_id = ContractTokenId::deserial(&mut ctx.parameter_cursor())?;
    Ok(host.state().tokens.token_data(&token_id))
}

#[concordium_cfg_test]
mod tests {
    use super::*;
    use concordium_std::test_infrastructure::*;

    const ADMIN: AccountAddress = AccountAddress([1; 32]);

    const USER_1: AccountAddress = AccountAddress([16; 32]);
    const USER_2: AccountAddress = AccountAddress([17; 32]);

    const SELF_ADDRESS: ContractAddress = ContractAddress {
        index: 10,
        subindex: 0,
    };

    const CONTRACT_1: ContractAddress = ContractAddress {
        index: 16,
        subindex: 16,
    };

    fn slot_time(millis: u64) -> Timestamp {
        Timestamp::from_timestamp_millis(millis)
    }

    fn uris(names: &[&str]) -> Vec<MediaUri> {
        names.iter().map(|name| name.as_bytes().to_vec()).collect()
    }

    fn parse_and_check_mock<D: Deserial, S>(check: impl Fn(&D) -> bool + 'static) -> MockFn<S> {
        MockFn::new(move |parameter, _, _, _state| {
            let value =
                D::deserial(&mut Cursor::new(parameter)).map_err(|_| CallContractError::Trap)?;
            if !check(&value) {
                return Err(CallContractError::Trap);
            };
            Ok((false, Some(())))
        })
    }

    /// Test helper function which creates a contract state with the admin set
    /// to `ADMIN`, minting disabled and an empty pool.
    fn default_host() -> TestHost<State<TestStateApi>> {
        let mut ctx = TestInitContext::empty();
        let bytes = to_bytes(&InitParams { admin: ADMIN });
        ctx.set_init_origin(USER_2).set_parameter(&bytes);
        let mut state_builder = TestStateBuilder::new();
        let mut logger = TestLogger::init();

        // Call the init method.
        let state = init(&ctx, &mut state_builder, &mut logger)
            .expect_report("Failed during init_MediaMinter");

        TestHost::new(state, state_builder)
    }

    fn add_media(
        host: &mut TestHost<State<TestStateApi>>,
        sender: Address,
        media_uri: &str,
    ) -> ContractResult<()> {
        let mut ctx = TestReceiveContext::empty();
        let bytes = to_bytes(&String::from(media_uri));
        ctx.set_sender(sender).set_parameter(&bytes);
        let mut logger = TestLogger::init();

        add_available_media(&ctx, host, &mut logger)
    }

    fn batch_add_media(
        host: &mut TestHost<State<TestStateApi>>,
        sender: Address,
        media_uris: Vec<MediaUri>,
    ) -> ContractResult<()> {
        let mut ctx = TestReceiveContext::empty();
        let bytes = to_bytes(&BatchAddMediaParams { media_uris });
        ctx.set_sender(sender).set_parameter(&bytes);
        let mut logger = TestLogger::init();

        batch_add_available_media(&ctx, host, &mut logger)
    }

    fn set_enabled(
        host: &mut TestHost<State<TestStateApi>>,
        sender: Address,
        enabled: bool,
    ) -> ContractResult<()> {
        let mut ctx = TestReceiveContext::empty();
        let bytes = to_bytes(&enabled);
        ctx.set_sender(sender).set_parameter(&bytes);
        let mut logger = TestLogger::init();

        set_minting_enabled(&ctx, host, &mut logger)
    }

    fn mint(
        host: &mut TestHost<State<TestStateApi>>,
        sender: Address,
        millis: u64,
        logger: &mut TestLogger,
    ) -> ContractResult<()> {
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(sender)
            .set_self_address(SELF_ADDRESS)
            .set_metadata_slot_time(slot_time(millis));

        mint_nft(&ctx, host, logger)
    }

    /// Host with `a.jpg` and `b.jpg` in the pool and minting enabled.
    fn enabled_host() -> TestHost<State<TestStateApi>> {
        let mut host = default_host();
        let result = batch_add_media(
            &mut host,
            Address::Account(ADMIN),
            uris(&["a.jpg", "b.jpg"]),
        );
        claim_eq!(result, Ok(()));
        let result = set_enabled(&mut host, Address::Account(ADMIN), true);
        claim_eq!(result, Ok(()));
        host
    }

    #[concordium_test]
    fn test_init() {
        let mut ctx = TestInitContext::empty();
        let bytes = to_bytes(&InitParams { admin: ADMIN });
        ctx.set_init_origin(USER_2).set_parameter(&bytes);
        let mut state_builder = TestStateBuilder::new();
        let mut logger = TestLogger::init();

        let state = init(&ctx, &mut state_builder, &mut logger)
            .expect_report("Failed during init_MediaMinter");

        // Assert properties
        claim_eq!(state.admin, Address::Account(ADMIN));
        claim_eq!(state.collection_name, String::from(COLLECTION_NAME));
        claim!(!state.minting_enabled);
        claim!(state.available_media_uris.is_empty());
        claim_eq!(state.signer_cap.origin(), USER_2);

        let collection = state
            .tokens
            .collection(COLLECTION_NAME)
            .expect_report("Collection should be created");
        claim_eq!(collection.description, String::from(COLLECTION_DESCRIPTION));
        claim_eq!(collection.uri, String::from(COLLECTION_URI));
        claim_eq!(collection.maximum, 0);
        claim_eq!(collection.supply, 0);
        claim_eq!(
            collection.mutability,
            CollectionMutabilityConfig {
                description: false,
                uri: false,
                maximum: false,
            }
        );

        claim_eq!(
            logger.logs,
            vec![to_bytes(&CustomEvent::CollectionCreated(
                CollectionCreatedEvent {
                    name: String::from(COLLECTION_NAME),
                    maximum: 0,
                }
            ))]
        );
    }

    #[concordium_test]
    fn test_add_available_media() {
        let mut host = default_host();

        let mut ctx = TestReceiveContext::empty();
        let bytes = to_bytes(&String::from("a.jpg"));
        ctx.set_sender(Address::Account(ADMIN))
            .set_parameter(&bytes);
        let mut logger = TestLogger::init();

        let result = add_available_media(&ctx, &mut host, &mut logger);

        claim_eq!(result, Ok(()));
        claim_eq!(host.state().available_media_uris, uris(&["a.jpg"]));
        claim_eq!(
            logger.logs,
            vec![to_bytes(&CustomEvent::MediaAdded(MediaAddedEvent {
                added: 1,
                available: 1,
            }))]
        );
    }

    #[concordium_test]
    fn test_media_adds_compose() {
        let mut host = default_host();
        let admin = Address::Account(ADMIN);

        claim_eq!(add_media(&mut host, admin, "a.jpg"), Ok(()));
        claim_eq!(
            batch_add_media(&mut host, admin, uris(&["b.jpg", "c.jpg", "d.jpg"])),
            Ok(())
        );
        claim_eq!(batch_add_media(&mut host, admin, Vec::new()), Ok(()));
        claim_eq!(add_media(&mut host, admin, "e.jpg"), Ok(()));

        claim_eq!(
            host.state().available_media_uris,
            uris(&["a.jpg", "b.jpg", "c.jpg", "d.jpg", "e.jpg"])
        );
    }

    #[concordium_test]
    fn test_batch_add_logs_once() {
        let mut host = default_host();
        claim_eq!(
            add_media(&mut host, Address::Account(ADMIN), "a.jpg"),
            Ok(())
        );

        let mut ctx = TestReceiveContext::empty();
        let bytes = to_bytes(&BatchAddMediaParams {
            media_uris: uris(&["b.jpg", "c.jpg"]),
        });
        ctx.set_sender(Address::Account(ADMIN))
            .set_parameter(&bytes);
        let mut logger = TestLogger::init();

        let result = batch_add_available_media(&ctx, &mut host, &mut logger);

        claim_eq!(result, Ok(()));
        claim_eq!(
            logger.logs,
            vec![to_bytes(&CustomEvent::MediaAdded(MediaAddedEvent {
                added: 2,
                available: 3,
            }))]
        );
    }

    #[concordium_test]
    fn test_only_admin_manages_pool() {
        let mut host = default_host();
        claim_eq!(
            add_media(&mut host, Address::Account(ADMIN), "a.jpg"),
            Ok(())
        );

        let result = add_media(&mut host, Address::Account(USER_1), "b.jpg");
        claim_eq!(result, Err(CustomContractError::NotAuthorized.into()));

        let result = batch_add_media(
            &mut host,
            Address::Contract(CONTRACT_1),
            uris(&["c.jpg", "d.jpg"]),
        );
        claim_eq!(result, Err(CustomContractError::NotAuthorized.into()));

        let result = set_enabled(&mut host, Address::Account(USER_1), true);
        claim_eq!(result, Err(CustomContractError::NotAuthorized.into()));

        // State is left untouched
        claim_eq!(host.state().available_media_uris, uris(&["a.jpg"]));
        claim!(!host.state().minting_enabled);
    }

    #[concordium_test]
    fn test_set_minting_enabled() {
        let mut host = default_host();

        let mut ctx = TestReceiveContext::empty();
        let bytes = to_bytes(&true);
        ctx.set_sender(Address::Account(ADMIN))
            .set_parameter(&bytes);
        let mut logger = TestLogger::init();

        claim_eq!(set_minting_enabled(&ctx, &mut host, &mut logger), Ok(()));
        claim!(host.state().minting_enabled);

        // Setting the same value again changes nothing
        claim_eq!(set_minting_enabled(&ctx, &mut host, &mut logger), Ok(()));
        claim!(host.state().minting_enabled);
        claim_eq!(
            logger.logs,
            vec![
                to_bytes(&CustomEvent::MintingUpdated(MintingUpdatedEvent {
                    enabled: true
                })),
                to_bytes(&CustomEvent::MintingUpdated(MintingUpdatedEvent {
                    enabled: true
                })),
            ]
        );

        claim_eq!(set_enabled(&mut host, Address::Account(ADMIN), false), Ok(()));
        claim!(!host.state().minting_enabled);
    }

    #[concordium_test]
    fn test_mint_disabled() {
        let mut host = default_host();
        claim_eq!(
            add_media(&mut host, Address::Account(ADMIN), "a.jpg"),
            Ok(())
        );

        let mut logger = TestLogger::init();
        let result = mint(&mut host, Address::Account(USER_1), 4, &mut logger);

        claim_eq!(result, Err(CustomContractError::MintingDisabled.into()));
        claim_eq!(host.state().available_media_uris, uris(&["a.jpg"]));
        claim!(logger.logs.is_empty());
    }

    #[concordium_test]
    fn test_mint_empty_pool() {
        let mut host = default_host();
        claim_eq!(set_enabled(&mut host, Address::Account(ADMIN), true), Ok(()));

        let mut logger = TestLogger::init();
        let result = mint(&mut host, Address::Account(USER_1), 4, &mut logger);

        claim_eq!(result, Err(CustomContractError::NoAvailableUris.into()));
        claim!(logger.logs.is_empty());
    }

    #[concordium_test]
    fn test_mint_nft() {
        let mut host = enabled_host();
        let receiver = Address::Account(USER_1);

        let mut logger = TestLogger::init();
        // 4 mod 2 = 0
        let result = mint(&mut host, receiver, 4, &mut logger);
        claim_eq!(result, Ok(()));

        let state = host.state();
        claim_eq!(state.available_media_uris, uris(&["b.jpg"]));

        let token_id = state
            .tokens
            .token_id(COLLECTION_NAME, "a.jpg")
            .expect_report("Token data should exist");
        claim_eq!(token_id, TokenIdU32(0));
        claim_eq!(state.tokens.balance(&token_id, &receiver), Ok(1.into()));
        claim_eq!(
            state
                .tokens
                .balance(&token_id, &Address::Contract(SELF_ADDRESS)),
            Ok(0.into())
        );

        let data = state
            .tokens
            .token_data(&token_id)
            .expect_report("Token data should exist");
        claim_eq!(data.creator, Address::Contract(SELF_ADDRESS));
        claim_eq!(data.name, String::from("a.jpg"));
        claim_eq!(data.uri, String::from("a.jpg"));
        claim_eq!(data.maximum, 1);
        claim_eq!(data.supply, 1);
        claim_eq!(
            data.royalty,
            Royalty {
                payee: Address::Account(ADMIN),
                numerator: 1,
                denominator: 1,
            }
        );
        claim_eq!(
            data.properties,
            vec![Property {
                key: String::from(MEDIA_URI_PROPERTY),
                value: b"a.jpg".to_vec(),
                kind: String::from(MEDIA_URI_PROPERTY_TYPE),
            }]
        );

        claim_eq!(logger.logs.len(), 3, "Exactly three events should be logged");
        claim!(
            logger.logs.contains(&to_bytes(&ContractCis2Event::Mint(MintEvent {
                token_id,
                amount: 1.into(),
                owner: Address::Contract(SELF_ADDRESS),
            }))),
            "Missing event for minting the token"
        );
        claim!(
            logger
                .logs
                .contains(&to_bytes(&ContractCis2Event::TokenMetadata(
                    TokenMetadataEvent {
                        token_id,
                        metadata_url: MetadataUrl {
                            url: String::from("a.jpg"),
                            hash: None,
                        },
                    }
                ))),
            "Missing event with metadata for the token"
        );
        claim!(
            logger
                .logs
                .contains(&to_bytes(&ContractCis2Event::Transfer(TransferEvent {
                    token_id,
                    amount: 1.into(),
                    from: Address::Contract(SELF_ADDRESS),
                    to: receiver,
                }))),
            "Missing event for handing the token over"
        );
    }

    #[concordium_test]
    fn test_mint_consumes_each_uri_once() {
        let mut host = default_host();
        let admin = Address::Account(ADMIN);
        let all = ["a.jpg", "b.jpg", "c.jpg"];
        claim_eq!(batch_add_media(&mut host, admin, uris(&all)), Ok(()));
        claim_eq!(set_enabled(&mut host, admin, true), Ok(()));

        // Slot times that keep hitting the same index
        for (minted, millis) in [3u64, 6, 9].iter().enumerate() {
            let mut logger = TestLogger::init();
            let result = mint(&mut host, Address::Account(USER_1), *millis, &mut logger);
            claim_eq!(result, Ok(()));
            claim_eq!(
                host.state().available_media_uris.len(),
                all.len() - minted - 1
            );
        }

        // 3 mod 3 = 0, 6 mod 2 = 0, 9 mod 1 = 0
        for name in all.iter() {
            let token_id = host.state().tokens.token_id(COLLECTION_NAME, name);
            claim!(token_id.is_some(), "Every URI should be minted once");
        }

        let mut logger = TestLogger::init();
        let result = mint(&mut host, Address::Account(USER_2), 12, &mut logger);
        claim_eq!(result, Err(CustomContractError::NoAvailableUris.into()));

        // Replenishing the pool makes minting available again
        claim_eq!(add_media(&mut host, admin, "d.jpg"), Ok(()));
        let result = mint(&mut host, Address::Account(USER_2), 12, &mut logger);
        claim_eq!(result, Ok(()));
        claim!(host.state().available_media_uris.is_empty());
    }

    #[concordium_test]
    fn test_mint_from_contract() {
        let mut host = enabled_host();

        let mut logger = TestLogger::init();
        let result = mint(&mut host, Address::Contract(CONTRACT_1), 4, &mut logger);

        claim_eq!(result, Err(CustomContractError::OnlyAccount.into()));
        claim_eq!(host.state().available_media_uris, uris(&["a.jpg", "b.jpg"]));
        claim!(host
            .state()
            .tokens
            .token_id(COLLECTION_NAME, "a.jpg")
            .is_none());
        claim!(logger.logs.is_empty());
    }

    #[concordium_test]
    fn test_mint_invalid_media_uri() {
        let mut host = default_host();
        let admin = Address::Account(ADMIN);
        claim_eq!(
            batch_add_media(&mut host, admin, vec![vec![0xff, 0xfe]]),
            Ok(())
        );
        claim_eq!(set_enabled(&mut host, admin, true), Ok(()));

        let mut logger = TestLogger::init();
        let result = mint(&mut host, Address::Account(USER_1), 0, &mut logger);

        claim_eq!(result, Err(CustomContractError::InvalidMediaUri.into()));
        claim!(logger.logs.is_empty());
    }

    #[concordium_test]
    fn test_transfer_to_account() {
        let mut host = enabled_host();
        let mut logger = TestLogger::init();
        claim_eq!(
            mint(&mut host, Address::Account(USER_1), 4, &mut logger),
            Ok(())
        );

        let mut ctx = TestReceiveContext::empty();
        let params = TransferParams::from(vec![Transfer {
            token_id: TokenIdU32(0),
            amount: 1.into(),
            from: Address::Account(USER_1),
            to: Receiver::from_account(USER_2),
            data: AdditionalData::empty(),
        }]);
        let bytes = to_bytes(&params);
        ctx.set_sender(Address::Account(USER_1))
            .set_parameter(&bytes);
        let mut logger = TestLogger::init();

        let result = transfer(&ctx, &mut host, &mut logger);

        claim_eq!(result, Ok(()));
        claim_eq!(
            host.state()
                .tokens
                .balance(&TokenIdU32(0), &Address::Account(USER_2)),
            Ok(1.into())
        );
        claim_eq!(
            logger.logs,
            vec![to_bytes(&ContractCis2Event::Transfer(TransferEvent {
                token_id: TokenIdU32(0),
                amount: 1.into(),
                from: Address::Account(USER_1),
                to: Address::Account(USER_2),
            }))]
        );
    }

    #[concordium_test]
    fn test_transfer_not_authorized() {
        let mut host = enabled_host();
        let mut logger = TestLogger::init();
        claim_eq!(
            mint(&mut host, Address::Account(USER_1), 4, &mut logger),
            Ok(())
        );

        let mut ctx = TestReceiveContext::empty();
        let params = TransferParams::from(vec![Transfer {
            token_id: TokenIdU32(0),
            amount: 1.into(),
            from: Address::Account(USER_1),
            to: Receiver::from_account(USER_2),
            data: AdditionalData::empty(),
        }]);
        let bytes = to_bytes(&params);
        ctx.set_sender(Address::Account(USER_2))
            .set_parameter(&bytes);
        let mut logger = TestLogger::init();

        let result = transfer(&ctx, &mut host, &mut logger);

        claim_eq!(result, Err(ContractError::Unauthorized));
        claim_eq!(
            host.state()
                .tokens
                .balance(&TokenIdU32(0), &Address::Account(USER_1)),
            Ok(1.into())
        );
    }

    #[concordium_test]
    fn test_operator_transfer() {
        let mut host = enabled_host();
        let mut logger = TestLogger::init();
        claim_eq!(
            mint(&mut host, Address::Account(USER_1), 4, &mut logger),
            Ok(())
        );

        // USER_1 makes USER_2 an operator
        let mut ctx = TestReceiveContext::empty();
        let params = UpdateOperatorParams(vec![UpdateOperator {
            update: OperatorUpdate::Add,
            operator: Address::Account(USER_2),
        }]);
        let bytes = to_bytes(&params);
        ctx.set_sender(Address::Account(USER_1))
            .set_parameter(&bytes);
        let mut logger = TestLogger::init();

        let result = update_operator(&ctx, &mut host, &mut logger);

        claim_eq!(result, Ok(()));
        claim_eq!(
            logger.logs,
            vec![to_bytes(&ContractCis2Event::UpdateOperator(
                UpdateOperatorEvent {
                    owner: Address::Account(USER_1),
                    operator: Address::Account(USER_2),
                    update: OperatorUpdate::Add,
                }
            ))]
        );

        let mut ctx = TestReceiveContext::empty();
        let bytes = to_bytes(&OperatorOfQueryParams {
            queries: vec![
                OperatorOfQuery {
                    owner: Address::Account(USER_1),
                    address: Address::Account(USER_2),
                },
                OperatorOfQuery {
                    owner: Address::Account(USER_2),
                    address: Address::Account(USER_1),
                },
            ],
        });
        ctx.set_parameter(&bytes);
        let result = operator_of(&ctx, &host).expect_report("Failed to query operators");
        claim_eq!(result.0, vec![true, false]);

        // USER_2 moves the token of USER_1 to itself
        let mut ctx = TestReceiveContext::empty();
        let params = TransferParams::from(vec![Transfer {
            token_id: TokenIdU32(0),
            amount: 1.into(),
            from: Address::Account(USER_1),
            to: Receiver::from_account(USER_2),
            data: AdditionalData::empty(),
        }]);
        let bytes = to_bytes(&params);
        ctx.set_sender(Address::Account(USER_2))
            .set_parameter(&bytes);
        let mut logger = TestLogger::init();

        let result = transfer(&ctx, &mut host, &mut logger);

        claim_eq!(result, Ok(()));
        claim_eq!(
            host.state()
                .tokens
                .balance(&TokenIdU32(0), &Address::Account(USER_2)),
            Ok(1.into())
        );
    }

    #[concordium_test]
    fn test_transfer_to_contract() {
        let mut host = enabled_host();
        let mut logger = TestLogger::init();
        claim_eq!(
            mint(&mut host, Address::Account(USER_1), 4, &mut logger),
            Ok(())
        );

        let mut ctx = TestReceiveContext::empty();
        let params = TransferParams::from(vec![Transfer {
            token_id: TokenIdU32(0),
            amount: 1.into(),
            from: Address::Account(USER_1),
            to: Receiver::Contract(
                CONTRACT_1,
                OwnedEntrypointName::new_unchecked("onReceivingCIS2".into()),
            ),
            data: AdditionalData::empty(),
        }]);
        let bytes = to_bytes(&params);
        ctx.set_sender(Address::Account(USER_1))
            .set_parameter(&bytes);

        host.setup_mock_entrypoint(
            CONTRACT_1,
            OwnedEntrypointName::new_unchecked("onReceivingCIS2".into()),
            parse_and_check_mock::<OnReceivingCis2Params<ContractTokenId, ContractTokenAmount>, _>(
                |params| params.token_id == TokenIdU32(0) && params.from == Address::Account(USER_1),
            ),
        );

        let mut logger = TestLogger::init();

        let result = transfer(&ctx, &mut host, &mut logger);

        claim_eq!(result, Ok(()));
        claim_eq!(
            host.state()
                .tokens
                .balance(&TokenIdU32(0), &Address::Contract(CONTRACT_1)),
            Ok(1.into())
        );
    }

    #[concordium_test]
    fn test_balance_of() {
        let mut host = enabled_host();
        let mut logger = TestLogger::init();
        claim_eq!(
            mint(&mut host, Address::Account(USER_1), 4, &mut logger),
            Ok(())
        );

        let mut ctx = TestReceiveContext::empty();
        let bytes = to_bytes(&ContractBalanceOfQueryParams {
            queries: vec![
                BalanceOfQuery {
                    token_id: TokenIdU32(0),
                    address: Address::Account(USER_1),
                },
                BalanceOfQuery {
                    token_id: TokenIdU32(0),
                    address: Address::Account(USER_2),
                },
            ],
        });
        ctx.set_parameter(&bytes);

        let result = balance_of(&ctx, &host).expect_report("Failed to query balances");
        claim_eq!(result.0, vec![1.into(), 0.into()]);

        // Unknown token
        let mut ctx = TestReceiveContext::empty();
        let bytes = to_bytes(&ContractBalanceOfQueryParams {
            queries: vec![BalanceOfQuery {
                token_id: TokenIdU32(1),
                address: Address::Account(USER_1),
            }],
        });
        ctx.set_parameter(&bytes);

        let result = balance_of(&ctx, &host).map(|response| response.0);
        claim_eq!(result, Err(ContractError::InvalidTokenId));
    }

    #[concordium_test]
    fn test_token_metadata() {
        let mut host = enabled_host();
        let mut logger = TestLogger::init();
        // 5 mod 2 = 1
        claim_eq!(
            mint(&mut host, Address::Account(USER_1), 5, &mut logger),
            Ok(())
        );

        let mut ctx = TestReceiveContext::empty();
        let bytes = to_bytes(&ContractTokenMetadataQueryParams {
            queries: vec![TokenIdU32(0)],
        });
        ctx.set_parameter(&bytes);

        let result = token_metadata(&ctx, &host).expect_report("Failed to query metadata");
        claim_eq!(result.0.len(), 1);
        claim_eq!(result.0[0].url, String::from("b.jpg"));
    }

    #[concordium_test]
    fn test_supports() {
        let host = default_host();

        let mut ctx = TestReceiveContext::empty();
        let bytes = to_bytes(&SupportsQueryParams {
            queries: vec![
                StandardIdentifierOwned::new_unchecked("CIS-0".into()),
                StandardIdentifierOwned::new_unchecked("CIS-2".into()),
                StandardIdentifierOwned::new_unchecked("CIS-1".into()),
            ],
        });
        ctx.set_parameter(&bytes);

        let result = supports(&ctx, &host).expect_report("Failed to query standards");
        claim_eq!(
            to_bytes(&result),
            to_bytes(&SupportsQueryResponse::from(vec![
                SupportResult::Support,
                SupportResult::Support,
                SupportResult::NoSupport,
            ]))
        );
    }

    #[concordium_test]
    fn test_view() {
        let mut host = enabled_host();
        let mut logger = TestLogger::init();
        claim_eq!(
            mint(&mut host, Address::Account(USER_1), 4, &mut logger),
            Ok(())
        );

        let ctx = TestReceiveContext::empty();
        let result = view(&ctx, &host).expect_report("Failed to view state");
        claim_eq!(
            result,
            ViewState {
                admin: Address::Account(ADMIN),
                collection_name: String::from(COLLECTION_NAME),
                minting_enabled: true,
                available_media_uris: uris(&["b.jpg"]),
            }
        );

        let mut ctx = TestReceiveContext::empty();
        let bytes = to_bytes(&TokenIdU32(0));
        ctx.set_parameter(&bytes);
        let result = view_token_data(&ctx, &host).expect_report("Failed to view token data");
        claim_eq!(result.map(|data| data.name), Some(String::from("a.jpg")));

        let mut ctx = TestReceiveContext::empty();
        let bytes = to_bytes(&TokenIdU32(1));
        ctx.set_parameter(&bytes);
        let result = view_token_data(&ctx, &host).expect_report("Failed to view token data");
        claim!(result.is_none());
    }
}
