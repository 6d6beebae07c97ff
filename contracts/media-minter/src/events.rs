use commons::{COLLECTION_CREATED_TAG, MEDIA_ADDED_TAG, MINTING_UPDATED_TAG};
use concordium_std::*;

/// An untagged event of the collection being created on initialization.
#[derive(Debug, Serialize, SchemaType, PartialEq, Eq)]
pub struct CollectionCreatedEvent {
    pub name: String,
    /// Maximum number of tokens in the collection. Zero means untracked.
    pub maximum: u64,
}

/// An untagged event of media URIs being appended to the pool.
#[derive(Debug, Serialize, SchemaType, PartialEq, Eq)]
pub struct MediaAddedEvent {
    /// Number of URIs appended by the call.
    pub added: u64,
    /// Pool size after the call.
    pub available: u64,
}

/// An untagged event of the admin setting the minting flag.
#[derive(Debug, Serialize, SchemaType, PartialEq, Eq)]
pub struct MintingUpdatedEvent {
    pub enabled: bool,
}

/// Tagged Custom event to be serialized for the event log.
#[derive(Debug, PartialEq, Eq)]
pub enum CustomEvent {
    CollectionCreated(CollectionCreatedEvent),
    MediaAdded(MediaAddedEvent),
    MintingUpdated(MintingUpdatedEvent),
}

impl Serial for CustomEvent {
    fn serial<W: Write>(&self, out: &mut W) -> Result<(), W::Err> {
        match self {
            CustomEvent::CollectionCreated(event) => {
                out.write_u8(COLLECTION_CREATED_TAG)?;
                event.serial(out)
            }
            CustomEvent::MediaAdded(event) => {
                out.write_u8(MEDIA_ADDED_TAG)?;
                event.serial(out)
            }
            CustomEvent::MintingUpdated(event) => {
                out.write_u8(MINTING_UPDATED_TAG)?;
                event.serial(out)
            }
        }
    }
}

impl Deserial for CustomEvent {
    fn deserial<R: Read>(source: &mut R) -> ParseResult<Self> {
        let tag = source.read_u8()?;
        match tag {
            COLLECTION_CREATED_TAG => {
                CollectionCreatedEvent::deserial(source).map(CustomEvent::CollectionCreated)
            }
            MEDIA_ADDED_TAG => MediaAddedEvent::deserial(source).map(CustomEvent::MediaAdded),
            MINTING_UPDATED_TAG => {
                MintingUpdatedEvent::deserial(source).map(CustomEvent::MintingUpdated)
            }
            _ => Err(ParseError::default()),
        }
    }
}
