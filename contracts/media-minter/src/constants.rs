use concordium_cis2::*;

/// Name of the collection created on initialization.
pub const COLLECTION_NAME: &str = "Media Pool";

pub const COLLECTION_DESCRIPTION: &str = "NFTs minted from a curated pool of media URIs";

pub const COLLECTION_URI: &str = "https://media-pool.io/collection";

/// Key of the token property holding the minted media URI.
pub const MEDIA_URI_PROPERTY: &str = "media_uri";

/// Type of the token property holding the minted media URI.
pub const MEDIA_URI_PROPERTY_TYPE: &str = "vector<u8>";

/// Standards this contract implements.
pub const SUPPORTS_STANDARDS: [StandardIdentifier<'static>; 2] =
    [CIS0_STANDARD_IDENTIFIER, CIS2_STANDARD_IDENTIFIER];
