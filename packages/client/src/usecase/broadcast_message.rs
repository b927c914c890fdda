//! UseCase: 複数チャットへの一斉送信
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - BroadcastMessageUseCase::execute() メソッド
//!
//! ### なぜこのテストが必要か
//! - 送信は 1 件ずつ順番に行われ、宛先ごとに結果が 1 つ記録されることを保証
//! - 途中の宛先が失敗しても残りの宛先への送信が続くことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：全宛先への送信成功
//! - 異常系：一部の宛先で API が失敗を返す、または検証エラー

use std::{sync::Arc, time::Duration};

use serde::Serialize;
use tracing::{info, warn};

use crate::{
    WhatsAppClient,
    domain::{MessageContent, Options},
};

/// 宛先間の待ち時間（API のレート制限対策）
pub const DEFAULT_BROADCAST_DELAY: Duration = Duration::from_millis(500);

/// 宛先 1 件分の送信結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BroadcastOutcome {
    pub chat_id: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// 一斉送信のユースケース
pub struct BroadcastMessageUseCase {
    client: Arc<WhatsAppClient>,
    delay: Duration,
}

impl BroadcastMessageUseCase {
    /// 新しい BroadcastMessageUseCase を作成
    pub fn new(client: Arc<WhatsAppClient>) -> Self {
        Self {
            client,
            delay: DEFAULT_BROADCAST_DELAY,
        }
    }

    /// 宛先間の待ち時間を変更
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// 一斉送信を実行
    ///
    /// # Returns
    ///
    /// 宛先と同じ順序の送信結果。個々の失敗で処理は中断しない。
    pub async fn execute(
        &self,
        chat_ids: &[String],
        content: &MessageContent,
        options: &Options,
        session_id: Option<&str>,
    ) -> Vec<BroadcastOutcome> {
        let mut outcomes = Vec::with_capacity(chat_ids.len());

        for (index, chat_id) in chat_ids.iter().enumerate() {
            if index > 0 && !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }

            let result = self
                .client
                .send_message(chat_id, content.clone(), options.clone(), session_id)
                .await;
            let outcome = match result {
                Ok(response) if response.is_successful() => BroadcastOutcome {
                    chat_id: chat_id.clone(),
                    success: true,
                    error: None,
                },
                Ok(response) => BroadcastOutcome {
                    chat_id: chat_id.clone(),
                    success: false,
                    error: response.error_message(),
                },
                Err(e) => BroadcastOutcome {
                    chat_id: chat_id.clone(),
                    success: false,
                    error: Some(e.to_string()),
                },
            };
            if !outcome.success {
                warn!(chat_id = %chat_id, "Broadcast delivery failed: {:?}", outcome.error);
            }
            outcomes.push(outcome);
        }

        let delivered = outcomes.iter().filter(|o| o.success).count();
        info!(delivered, total = chat_ids.len(), "Broadcast finished");
        outcomes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::ClientConfig,
        domain::{RawResponse, RequestBody, transport::MockHttpTransport},
    };
    use serde_json::json;

    fn client(transport: MockHttpTransport) -> Arc<WhatsAppClient> {
        Arc::new(
            WhatsAppClient::new(
                ClientConfig::new("http://wwebjs.test"),
                Arc::new(transport),
                None,
            )
            .unwrap(),
        )
    }

    #[tokio::test]
    async fn test_broadcast_continues_after_failure() {
        // テスト項目: 失敗した宛先があっても残りの宛先に送信を続ける
        // given (前提条件):
        let mut transport = MockHttpTransport::new();
        transport.expect_send().times(3).returning(|request| {
            let status = match &request.body {
                RequestBody::Json(body) if body["chatId"] == "2@c.us" => 500,
                _ => 200,
            };
            Ok(RawResponse {
                status,
                body: if status == 200 {
                    json!({"success": true})
                } else {
                    json!({"error": "chat not found"})
                },
            })
        });
        let usecase = BroadcastMessageUseCase::new(client(transport)).with_delay(Duration::ZERO);
        let chat_ids: Vec<String> = ["1@c.us", "2@c.us", "3@c.us"].map(String::from).into();

        // when (操作):
        let outcomes = usecase
            .execute(&chat_ids, &"Hello all".into(), &Options::new(), None)
            .await;

        // then (期待する結果):
        let flags: Vec<bool> = outcomes.iter().map(|o| o.success).collect();
        assert_eq!(flags, vec![true, false, true]);
        assert_eq!(outcomes[1].chat_id, "2@c.us");
        assert_eq!(outcomes[1].error.as_deref(), Some("chat not found"));
    }

    #[tokio::test]
    async fn test_blank_chat_id_is_recorded_without_request() {
        // テスト項目: 空の宛先は送信せずに失敗として記録される
        let mut transport = MockHttpTransport::new();
        transport.expect_send().times(1).returning(|_| {
            Ok(RawResponse {
                status: 200,
                body: json!({"success": true}),
            })
        });
        let usecase = BroadcastMessageUseCase::new(client(transport)).with_delay(Duration::ZERO);
        let chat_ids = vec![String::new(), "1@c.us".to_string()];

        let outcomes = usecase
            .execute(&chat_ids, &"Hi".into(), &Options::new(), None)
            .await;

        assert!(!outcomes[0].success);
        assert_eq!(outcomes[0].error.as_deref(), Some("chat ID cannot be empty"));
        assert!(outcomes[1].success);
    }

    #[tokio::test]
    async fn test_delay_between_targets() {
        let mut transport = MockHttpTransport::new();
        transport.expect_send().times(2).returning(|_| {
            Ok(RawResponse {
                status: 200,
                body: json!({"success": true}),
            })
        });
        let usecase = BroadcastMessageUseCase::new(client(transport))
            .with_delay(Duration::from_millis(30));
        let chat_ids = vec!["1@c.us".to_string(), "2@c.us".to_string()];

        let started = std::time::Instant::now();
        usecase
            .execute(&chat_ids, &"Hi".into(), &Options::new(), None)
            .await;

        assert!(started.elapsed() >= Duration::from_millis(30));
    }
}
