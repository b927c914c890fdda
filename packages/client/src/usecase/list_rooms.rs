//! UseCase: ルーム一覧の取得
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ListRoomsUseCase::execute() / fetch_rooms() メソッド
//! - チャット一覧 → Room 変換 → フィルタ → ソート → ページングの流れ
//!
//! ### なぜこのテストが必要か
//! - フィルタ条件が AND で評価されることを保証
//! - ページ番号・ページサイズの範囲外指定が丸められることを確認
//! - API がチャット一覧を拒否した場合にエラーとして扱われることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：フィルタとソートを指定した一覧取得
//! - 異常系：API が 500 を返す
//! - エッジケース：0 件、最終ページを超えるページ番号

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;
use wwebjs_shared::time::now_unix_seconds;

use crate::{
    WhatsAppClient,
    domain::{Options, Room, RoomFilter, RoomSort},
};

use super::error::ListRoomsError;

pub const DEFAULT_PER_PAGE: usize = 20;
pub const MAX_PER_PAGE: usize = 50;

/// 一覧取得の条件
#[derive(Debug, Clone, PartialEq)]
pub struct RoomQuery {
    pub filter: RoomFilter,
    pub sort: RoomSort,
    /// 1 始まりのページ番号
    pub page: usize,
    pub per_page: usize,
    pub session_id: Option<String>,
}

impl Default for RoomQuery {
    fn default() -> Self {
        Self {
            filter: RoomFilter::default(),
            sort: RoomSort::default(),
            page: 1,
            per_page: DEFAULT_PER_PAGE,
            session_id: None,
        }
    }
}

/// ページングされた一覧
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomPage {
    pub items: Vec<Room>,
    pub total_count: usize,
    pub page_count: usize,
    pub current_page: usize,
    pub per_page: usize,
}

/// ルーム一覧取得のユースケース
pub struct ListRoomsUseCase {
    client: Arc<WhatsAppClient>,
}

impl ListRoomsUseCase {
    /// 新しい ListRoomsUseCase を作成
    pub fn new(client: Arc<WhatsAppClient>) -> Self {
        Self { client }
    }

    /// フィルタ・ソート・ページングを適用した一覧を返す
    ///
    /// # Returns
    ///
    /// * `Ok(RoomPage)` - 条件に一致したルームの 1 ページ分
    /// * `Err(ListRoomsError)` - チャット一覧の取得失敗
    pub async fn execute(&self, query: &RoomQuery) -> Result<RoomPage, ListRoomsError> {
        // 1. フィルタ済みのルームを取得
        let mut rooms = self
            .fetch_rooms(&query.filter, query.session_id.as_deref())
            .await?;

        // 2. ソート
        query.sort.apply(&mut rooms);

        // 3. ページング
        Ok(paginate(rooms, query.page, query.per_page))
    }

    /// フィルタのみを適用したルームを API の並び順のまま返す
    pub async fn fetch_rooms(
        &self,
        filter: &RoomFilter,
        session_id: Option<&str>,
    ) -> Result<Vec<Room>, ListRoomsError> {
        let response = self.client.get_chats(Options::new(), session_id).await?;
        if !response.is_successful() {
            return Err(ListRoomsError::ChatsUnavailable(
                response.error_message().unwrap_or_default(),
            ));
        }

        let now = now_unix_seconds();
        let rooms: Vec<Room> = response
            .list("chats")
            .iter()
            .map(|record| Room::from_record_at(record, now))
            .filter(|room| room.matches(filter))
            .collect();
        debug!(count = rooms.len(), "Rooms matched filter");
        Ok(rooms)
    }
}

/// `rooms` の 1 ページ分を切り出す
///
/// ページサイズは 1..=50 に、ページ番号は 1..=最終ページに丸める。
pub fn paginate(rooms: Vec<Room>, page: usize, per_page: usize) -> RoomPage {
    let per_page = per_page.clamp(1, MAX_PER_PAGE);
    let total_count = rooms.len();
    let page_count = total_count.div_ceil(per_page);
    let current_page = page.clamp(1, page_count.max(1));

    let items = rooms
        .into_iter()
        .skip((current_page - 1) * per_page)
        .take(per_page)
        .collect();

    RoomPage {
        items,
        total_count,
        page_count,
        current_page,
        per_page,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::ClientConfig,
        domain::{HttpMethod, RawResponse, RoomSortKey, SortOrder, transport::MockHttpTransport},
    };
    use serde_json::{Value, json};

    fn client_returning(status: u16, body: Value) -> Arc<WhatsAppClient> {
        let mut transport = MockHttpTransport::new();
        transport
            .expect_send()
            .withf(|request| {
                request.method == HttpMethod::Get
                    && request.url == "http://wwebjs.test/client/getChats/default"
            })
            .times(1)
            .returning(move |_| {
                Ok(RawResponse {
                    status,
                    body: body.clone(),
                })
            });
        Arc::new(
            WhatsAppClient::new(
                ClientConfig::new("http://wwebjs.test"),
                Arc::new(transport),
                None,
            )
            .unwrap(),
        )
    }

    fn chats() -> Value {
        json!({"success": true, "result": [
            {"id": {"_serialized": "g1@g.us"}, "name": "Team", "isGroup": true, "unreadCount": 5,
             "lastMessage": {"body": "hi", "timestamp": 300}},
            {"id": {"_serialized": "111@c.us"}, "name": "Alice", "isGroup": false, "unreadCount": 0,
             "lastMessage": {"body": "yo", "timestamp": 100}},
            {"id": {"_serialized": "g2@g.us"}, "name": "Family", "isGroup": true, "unreadCount": 1,
             "lastMessage": {"body": "dinner", "timestamp": 200}}
        ]})
    }

    fn rooms(n: usize) -> Vec<Room> {
        (0..n)
            .map(|i| Room::from_record_at(&json!({"id": format!("{i}@c.us"), "name": format!("room {i}")}), 0))
            .collect()
    }

    #[tokio::test]
    async fn test_execute_filters_and_sorts_by_timestamp_desc() {
        // テスト項目: グループのみを抽出し、最新のアクティビティ順に並べる
        // given (前提条件):
        let usecase = ListRoomsUseCase::new(client_returning(200, chats()));
        let query = RoomQuery {
            filter: RoomFilter {
                is_group: Some(true),
                ..Default::default()
            },
            ..Default::default()
        };

        // when (操作):
        let page = usecase.execute(&query).await.unwrap();

        // then (期待する結果):
        let ids: Vec<&str> = page.items.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["g1@g.us", "g2@g.us"]);
        assert_eq!(page.total_count, 2);
        assert_eq!(page.page_count, 1);
        assert_eq!(page.current_page, 1);
        assert_eq!(page.per_page, DEFAULT_PER_PAGE);
    }

    #[tokio::test]
    async fn test_execute_with_threshold_and_name_sort() {
        // テスト項目: minUnreadCount と名前の昇順ソートを組み合わせる
        let usecase = ListRoomsUseCase::new(client_returning(200, chats()));
        let query = RoomQuery {
            filter: RoomFilter {
                min_unread_count: Some(1),
                ..Default::default()
            },
            sort: RoomSort {
                key: RoomSortKey::Name,
                order: SortOrder::Asc,
            },
            ..Default::default()
        };

        let page = usecase.execute(&query).await.unwrap();

        let names: Vec<&str> = page.items.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Family", "Team"]);
    }

    #[tokio::test]
    async fn test_fetch_rooms_keeps_api_order() {
        let usecase = ListRoomsUseCase::new(client_returning(200, chats()));

        let rooms = usecase.fetch_rooms(&RoomFilter::default(), None).await.unwrap();

        let ids: Vec<&str> = rooms.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["g1@g.us", "111@c.us", "g2@g.us"]);
    }

    #[tokio::test]
    async fn test_rejected_chat_listing_is_an_error() {
        // テスト項目: API がチャット一覧を拒否した場合はエラーメッセージ付きで失敗する
        // given (前提条件):
        let usecase = ListRoomsUseCase::new(client_returning(
            500,
            json!({"error": "session not connected"}),
        ));

        // when (操作):
        let result = usecase.execute(&RoomQuery::default()).await;

        // then (期待する結果):
        match result {
            Err(ListRoomsError::ChatsUnavailable(message)) => {
                assert_eq!(message, "session not connected")
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_paginate_splits_pages() {
        // テスト項目: 45 件を 20 件ずつに分けると 3 ページになる
        let page = paginate(rooms(45), 3, 20);

        assert_eq!(page.total_count, 45);
        assert_eq!(page.page_count, 3);
        assert_eq!(page.current_page, 3);
        assert_eq!(page.items.len(), 5);
        assert_eq!(page.items[0].id, "40@c.us");
    }

    #[test]
    fn test_paginate_clamps_out_of_range_values() {
        // テスト項目: 範囲外のページ番号とページサイズは丸められる
        let beyond_last = paginate(rooms(10), 9, 4);
        let zero_page = paginate(rooms(10), 0, 4);
        let huge_page_size = paginate(rooms(60), 1, 500);
        let zero_page_size = paginate(rooms(3), 1, 0);

        assert_eq!(beyond_last.current_page, 3);
        assert_eq!(beyond_last.items.len(), 2);
        assert_eq!(zero_page.current_page, 1);
        assert_eq!(huge_page_size.per_page, MAX_PER_PAGE);
        assert_eq!(huge_page_size.items.len(), 50);
        assert_eq!(zero_page_size.per_page, 1);
        assert_eq!(zero_page_size.page_count, 3);
    }

    #[test]
    fn test_paginate_empty_list() {
        let page = paginate(Vec::new(), 2, 20);

        assert!(page.items.is_empty());
        assert_eq!(page.total_count, 0);
        assert_eq!(page.page_count, 0);
        assert_eq!(page.current_page, 1);
    }
}
