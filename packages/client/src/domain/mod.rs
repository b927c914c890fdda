//! Domain layer for the WhatsApp client.
//!
//! Types and pure logic independent of HTTP and storage. Traits here are the
//! seams the infrastructure layer plugs into.

pub mod cache;
pub mod error;
pub mod message;
pub mod response;
pub mod room;
pub mod transport;
pub mod validation;

pub use cache::{CACHEABLE_ENDPOINTS, CacheStore, cache_key, should_cache};
pub use error::{TransportError, ValidationError};
pub use message::{Location, MessageContent, MessageMedia, Options, Poll};
pub use response::ApiResponse;
pub use room::{LastMessage, Room, RoomFilter, RoomSort, RoomSortKey, RoomType, SortOrder};
pub use transport::{HttpMethod, HttpRequest, HttpTransport, RawResponse, RequestBody};
