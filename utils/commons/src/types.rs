use super::*;

pub type ContractResult<A> = Result<A, ContractError>;

/// Contract token ID type.
/// Token ids are handed out sequentially by the token store, so a `u32` is
/// plenty.
pub type ContractTokenId = TokenIdU32;

/// Contract token amount type.
pub type ContractTokenAmount = TokenAmountU64;

/// Wrapping the custom errors in a type with CIS2 errors.
pub type ContractError = Cis2Error<CustomContractError>;

/// Raw bytes of a media URI waiting in the pool.
pub type MediaUri = Vec<u8>;

pub type TransferParameter = TransferParams<ContractTokenId, ContractTokenAmount>;

/// Parameter type for the CIS-2 function `balanceOf` specialized to the subset
/// of TokenIDs used by this contract.
pub type ContractBalanceOfQueryParams = BalanceOfQueryParams<ContractTokenId>;

/// Response type for the CIS-2 function `balanceOf` specialized to the subset
/// of TokenAmounts used by this contract.
pub type ContractBalanceOfQueryResponse = BalanceOfQueryResponse<ContractTokenAmount>;

/// Parameter type for the CIS-2 function `tokenMetadata` specialized to the
/// subset of TokenIDs used by this contract.
pub type ContractTokenMetadataQueryParams = TokenMetadataQueryParams<ContractTokenId>;

pub type ContractCis2Event = Cis2Event<ContractTokenId, ContractTokenAmount>;
