use async_trait::async_trait;

use crate::{
    domain::{ChatId, MessageRef},
    Result,
};

/// Cross-messenger port.
///
/// Telegram is the first implementation; the shape leaves room for other
/// adapters behind the same interface. Replies carry markdown-like
/// formatting (`*bold*`) that the transport interprets, not the core.
#[async_trait]
pub trait MessagingPort: Send + Sync {
    async fn send_markdown(&self, chat_id: ChatId, text: &str) -> Result<MessageRef>;
}
