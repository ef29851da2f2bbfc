use std::sync::Arc;

use wotd_core::{catalog, config::Config, router::BotState};

#[tokio::main]
async fn main() -> Result<(), wotd_core::Error> {
    wotd_core::logging::init("wotd");

    let cfg = Arc::new(Config::load()?);

    // A broken or empty word source falls back to the built-in set; the
    // only fatal startup paths are config-level (bad token, etc).
    let words = catalog::load_or_fallback(&cfg.words_file);
    let mut state = BotState::new(words);
    state.history_display_limit = cfg.history_display_limit;

    wotd_telegram::router::run_polling(cfg, state)
        .await
        .map_err(|e| wotd_core::Error::External(format!("telegram bot failed: {e}")))?;

    Ok(())
}
