//! Telegram update handlers.
//!
//! Each inbound message is translated into a core dispatch call; the reply
//! text comes back formatted and is sent through the messenger. Send
//! failures are logged and swallowed so one bad message can never take
//! down the polling loop.

use std::sync::Arc;

use teloxide::{prelude::*, types::Message};

use tracing::error;

use wotd_core::domain::{ChatId, UserId};
use wotd_core::router::dispatch;

use crate::router::AppState;

pub async fn handle_message(_bot: Bot, msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let Some(user) = msg.from() else {
        // Channel posts and service messages carry no sender; nothing to do.
        return Ok(());
    };
    let Some(text) = msg.text() else {
        return Ok(());
    };

    let user_id = UserId(user.id.0 as i64);
    let chat_id = ChatId(msg.chat.id.0);

    // Mutation happens under the lock; the outbound send does not.
    let reply = {
        let mut bot_state = state.bot_state.lock().await;
        dispatch(&mut bot_state, user_id, text)
    };

    // `None` means the core skipped the request (invalid user id).
    let Some(reply) = reply else {
        return Ok(());
    };

    if let Err(e) = state.messenger.send_markdown(chat_id, &reply).await {
        error!(chat_id = chat_id.0, "failed to send reply: {e}");
    }

    Ok(())
}
