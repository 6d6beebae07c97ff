use super::*;

/// The custom errors the contract can produce.
///
/// The first three codes are part of the public interface of the minter and
/// must keep their position.
#[derive(Serialize, Debug, PartialEq, Eq, Reject, SchemaType)]
pub enum CustomContractError {
    /// Sender is not the admin of the minter (Error code: -1).
    NotAuthorized,
    /// Minting is currently disabled (Error code: -2).
    MintingDisabled,
    /// The media pool is empty (Error code: -3).
    NoAvailableUris,
    /// Failed parsing the parameter (Error code: -4).
    #[from(ParseError)]
    ParseParams,
    /// Failed logging: Log is full (Error code: -5).
    LogFull,
    /// Failed logging: Log is malformed (Error code: -6).
    LogMalformed,
    /// Selected media URI is not valid UTF-8 (Error code: -7).
    InvalidMediaUri,
    /// A collection with this name already exists (Error code: -8).
    CollectionAlreadyExists,
    /// Unknown collection (Error code: -9).
    CollectionNotFound,
    /// Collection supply reached its maximum (Error code: -10).
    CollectionMaximumReached,
    /// Token data with this name already exists in the collection
    /// (Error code: -11).
    TokenDataAlreadyExists,
    /// Only the creator of a token can mint it (Error code: -12).
    NoMintCapability,
    /// Minting would exceed the token maximum (Error code: -13).
    MintExceedsMaximum,
    /// Royalty numerator exceeds denominator or denominator is zero
    /// (Error code: -14).
    InvalidRoyalty,
    /// Failed to invoke a contract (Error code: -15).
    InvokeContractError,
    /// Only accounts can mint (Error code: -16).
    OnlyAccount,
    /// Every token id has been handed out (Error code: -17).
    TokenIdsExhausted,
}

/// Mapping the logging errors to CustomContractError.
impl From<LogError> for CustomContractError {
    fn from(le: LogError) -> Self {
        match le {
            LogError::Full => Self::LogFull,
            LogError::Malformed => Self::LogMalformed,
        }
    }
}

/// Mapping errors related to contract invocations to CustomContractError.
impl<T> From<CallContractError<T>> for CustomContractError {
    fn from(_cce: CallContractError<T>) -> Self {
        Self::InvokeContractError
    }
}

/// Mapping CustomContractError to ContractError
impl From<CustomContractError> for ContractError {
    fn from(c: CustomContractError) -> Self {
        Cis2Error::Custom(c)
    }
}

#[concordium_cfg_test]
mod tests {
    use super::*;

    #[concordium_test]
    fn test_public_reject_codes() {
        let reject =
            |error: CustomContractError| Reject::from(ContractError::from(error)).error_code.get();

        claim_eq!(reject(CustomContractError::NotAuthorized), -1);
        claim_eq!(reject(CustomContractError::MintingDisabled), -2);
        claim_eq!(reject(CustomContractError::NoAvailableUris), -3);
        claim_eq!(reject(CustomContractError::OnlyAccount), -16);
        claim_eq!(reject(CustomContractError::TokenIdsExhausted), -17);
    }
}
