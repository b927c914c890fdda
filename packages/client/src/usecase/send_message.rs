//! UseCase: メッセージ送信の組み合わせ処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - 書式付きテキスト、メンション付き送信
//! - 送信後の既読化、入力中表示を挟んだ送信
//!
//! ### なぜこのテストが必要か
//! - 既読化は送信が成功した場合にのみ行われることを保証
//! - 入力中表示 → 送信の順序を確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：各ヘルパーの送信成功
//! - 異常系：送信が API に拒否された場合は既読化しない

use std::{sync::Arc, time::Duration};

use serde_json::json;
use tracing::{debug, warn};

use crate::{
    WhatsAppClient,
    domain::{ApiResponse, MessageContent, Options},
    error::ClientError,
};

/// テキストに適用する WhatsApp の書式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextFormat {
    pub bold: bool,
    pub italic: bool,
    pub monospace: bool,
}

/// 太字 `*x*`、斜体 `_x_`、等幅 ```` ```x``` ```` の順に書式を重ねる
pub fn format_text(text: &str, format: TextFormat) -> String {
    let mut formatted = text.to_string();
    if format.bold {
        formatted = format!("*{formatted}*");
    }
    if format.italic {
        formatted = format!("_{formatted}_");
    }
    if format.monospace {
        formatted = format!("```{formatted}```");
    }
    formatted
}

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    client: Arc<WhatsAppClient>,
}

impl SendMessageUseCase {
    /// 新しい SendMessageUseCase を作成
    pub fn new(client: Arc<WhatsAppClient>) -> Self {
        Self { client }
    }

    /// メッセージ送信を実行
    pub async fn execute(
        &self,
        chat_id: &str,
        content: MessageContent,
        options: Options,
        session_id: Option<&str>,
    ) -> Result<ApiResponse, ClientError> {
        self.client
            .send_message(chat_id, content, options, session_id)
            .await
    }

    pub async fn send_formatted_text(
        &self,
        chat_id: &str,
        text: &str,
        format: TextFormat,
        options: Options,
        session_id: Option<&str>,
    ) -> Result<ApiResponse, ClientError> {
        self.client
            .send_text_message(chat_id, &format_text(text, format), options, session_id)
            .await
    }

    /// `mentions` を options に設定してテキストを送信
    pub async fn send_text_with_mentions(
        &self,
        chat_id: &str,
        text: &str,
        mentions: &[String],
        mut options: Options,
        session_id: Option<&str>,
    ) -> Result<ApiResponse, ClientError> {
        options.insert("mentions".to_string(), json!(mentions));
        self.client
            .send_text_message(chat_id, text, options, session_id)
            .await
    }

    /// 送信し、成功した場合のみチャットを既読にする
    ///
    /// # Returns
    ///
    /// 送信の結果。既読化の結果は返さず、既読化の失敗はログに残すだけ。
    pub async fn send_and_mark_seen(
        &self,
        chat_id: &str,
        content: MessageContent,
        options: Options,
        session_id: Option<&str>,
    ) -> Result<ApiResponse, ClientError> {
        let response = self.execute(chat_id, content, options, session_id).await?;
        if response.is_successful() {
            match self.client.mark_chat_as_seen(chat_id, session_id).await {
                Ok(seen) => debug!(chat_id, seen = seen.is_successful(), "Marked chat as seen"),
                Err(e) => warn!(chat_id, "Message sent but marking the chat as seen failed: {}", e),
            }
        }
        Ok(response)
    }

    /// 入力中表示を出し、`typing_for` 待ってから送信する
    pub async fn send_with_typing(
        &self,
        chat_id: &str,
        content: MessageContent,
        typing_for: Duration,
        options: Options,
        session_id: Option<&str>,
    ) -> Result<ApiResponse, ClientError> {
        self.client.send_typing(chat_id, session_id).await?;
        tokio::time::sleep(typing_for).await;
        self.execute(chat_id, content, options, session_id).await
    }
}
