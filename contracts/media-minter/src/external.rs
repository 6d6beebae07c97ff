use commons::MediaUri;
use concordium_std::*;

#[derive(Serialize, SchemaType)]
pub struct InitParams {
    /// The only account allowed to manage the media pool and toggle minting.
    pub admin: AccountAddress,
}

/// The parameter type for the contract function `batchAddAvailableMedia`.
#[derive(Debug, Serialize, SchemaType)]
pub struct BatchAddMediaParams {
    /// Media URIs appended to the pool, in order.
    pub media_uris: Vec<MediaUri>,
}

/// The return type for the contract function `view`.
#[derive(Debug, Serialize, SchemaType, PartialEq, Eq)]
pub struct ViewState {
    pub admin: Address,
    pub collection_name: String,
    pub minting_enabled: bool,
    pub available_media_uris: Vec<MediaUri>,
}
