//! UseCase 層
//!
//! 複数の API 呼び出しを組み合わせる処理を実装するレイヤー。
//! CLI やサーバーの UI 層から呼び出され、`WhatsAppClient` を操作します。

pub mod broadcast_message;
pub mod error;
pub mod list_rooms;
pub mod send_message;

pub use broadcast_message::{BroadcastMessageUseCase, BroadcastOutcome, DEFAULT_BROADCAST_DELAY};
pub use error::ListRoomsError;
pub use list_rooms::{
    DEFAULT_PER_PAGE, ListRoomsUseCase, MAX_PER_PAGE, RoomPage, RoomQuery, paginate,
};
pub use send_message::{SendMessageUseCase, TextFormat, format_text};
