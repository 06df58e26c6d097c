//! Telegram presentation layer: command routing, keyboards, formatting.
//!
//! This layer only parses updates and renders texts; all price resolution
//! lives in [`crate::rates`].

pub mod format;
pub mod handlers;
pub mod keyboards;

use crate::rates::service::RateService;
use std::sync::Arc;
use teloxide::error_handlers::LoggingErrorHandler;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase")]
pub enum Command {
    #[command(description = "начать работу с ботом")]
    Start,
    #[command(description = "показать меню")]
    Menu,
    #[command(description = "помощь")]
    Help,
    #[command(description = "текущий курс TON")]
    Price,
    #[command(description = "конвертировать TON в рубли")]
    Convert(String),
}

/// Run the dispatcher until Ctrl-C / SIGTERM.
pub async fn run(bot: Bot, service: Arc<RateService>) {
    let handler = dptree::entry()
        .branch(
            Update::filter_message()
                .filter_command::<Command>()
                .endpoint(handlers::command),
        )
        .branch(Update::filter_callback_query().endpoint(handlers::callback))
        .branch(Update::filter_message().endpoint(handlers::text));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![service])
        // Telegram transport hiccups are logged and swallowed, never
        // surfaced to the user.
        .error_handler(LoggingErrorHandler::with_custom_text(
            "Error while handling update",
        ))
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}
