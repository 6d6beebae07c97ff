/// Tag for the CollectionCreated event.
pub const COLLECTION_CREATED_TAG: u8 = u8::MAX - 5;

/// Tag for the MediaAdded event.
pub const MEDIA_ADDED_TAG: u8 = u8::MAX - 6;

/// Tag for the MintingUpdated event.
pub const MINTING_UPDATED_TAG: u8 = u8::MAX - 7;
