use std::sync::Arc;

use teloxide::{dispatching::Dispatcher, dptree, prelude::*};

use tokio::sync::Mutex;

use wotd_core::{config::Config, messaging::MessagingPort, router::BotState};

use crate::handlers;
use crate::TelegramMessenger;

/// Shared state handed to every update handler. `BotState` sits behind one
/// mutex: each message takes the lock, mutates to completion and releases
/// before the outbound send, so handlers never race on the word cycle or
/// the profile map.
#[derive(Clone)]
pub struct AppState {
    pub cfg: Arc<Config>,
    pub bot_state: Arc<Mutex<BotState>>,
    pub messenger: Arc<dyn MessagingPort>,
}

pub async fn run_polling(cfg: Arc<Config>, bot_state: BotState) -> anyhow::Result<()> {
    if !cfg.use_polling {
        anyhow::bail!("only long polling is supported; set TELEGRAM_POLLING=true");
    }

    let bot = Bot::new(cfg.telegram_bot_token.clone());

    // Basic startup info.
    if let Ok(me) = bot.get_me().await {
        println!("wotd bot started: @{}", me.username());
    }
    {
        let progress = bot_state.selector.progress();
        println!("Word catalog: {} words loaded", progress.total);
    }

    let messenger: Arc<dyn MessagingPort> = Arc::new(TelegramMessenger::new(bot.clone()));

    let state = Arc::new(AppState {
        cfg,
        bot_state: Arc::new(Mutex::new(bot_state)),
        messenger,
    });

    let handler = dptree::entry().branch(Update::filter_message().endpoint(handlers::handle_message));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .build()
        .dispatch()
        .await;

    Ok(())
}
