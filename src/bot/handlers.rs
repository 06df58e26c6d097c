//! Update handlers: commands, inline-button callbacks, reply-keyboard text.

use crate::bot::{format, keyboards, Command};
use crate::rates::service::{parse_amount, RateService};
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::{ChatAction, ParseMode};

pub(crate) type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

pub(crate) async fn command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    service: Arc<RateService>,
) -> HandlerResult {
    match cmd {
        Command::Start => start(&bot, &msg).await,
        Command::Menu => send_html(&bot, msg.chat.id, format::MENU_TEXT).await,
        Command::Help => send_html(&bot, msg.chat.id, format::HELP_TEXT).await,
        Command::Price => send_price(&bot, msg.chat.id, &service).await,
        Command::Convert(args) => convert(&bot, msg.chat.id, &service, args.trim()).await,
    }
}

pub(crate) async fn callback(
    bot: Bot,
    query: CallbackQuery,
    service: Arc<RateService>,
) -> HandlerResult {
    bot.answer_callback_query(query.id.clone()).await?;

    let Some(message) = query.message else {
        return Ok(());
    };
    let chat_id = message.chat().id;

    match query.data.as_deref() {
        Some(keyboards::CB_GET_PRICE) => send_price(&bot, chat_id, &service).await,
        Some(keyboards::CB_SOURCES) => send_html(&bot, chat_id, format::SOURCES_TEXT).await,
        _ => Ok(()),
    }
}

/// Reply-keyboard buttons arrive as plain text messages.
pub(crate) async fn text(bot: Bot, msg: Message, service: Arc<RateService>) -> HandlerResult {
    let Some(text) = msg.text() else {
        return Ok(());
    };

    match text {
        keyboards::BTN_PRICE => send_price(&bot, msg.chat.id, &service).await,
        keyboards::BTN_CONVERT => send_html(&bot, msg.chat.id, format::CONVERT_PROMPT_TEXT).await,
        keyboards::BTN_MENU => send_html(&bot, msg.chat.id, format::MENU_TEXT).await,
        keyboards::BTN_HELP => send_html(&bot, msg.chat.id, format::HELP_TEXT).await,
        _ => Ok(()),
    }
}

async fn start(bot: &Bot, msg: &Message) -> HandlerResult {
    let first_name = msg
        .from
        .as_ref()
        .map(|user| user.first_name.as_str())
        .unwrap_or("друг");

    bot.send_message(msg.chat.id, format::welcome_text(first_name))
        .parse_mode(ParseMode::Html)
        .reply_markup(keyboards::main_inline_keyboard())
        .await?;

    bot.send_message(msg.chat.id, format::QUICK_COMMANDS_TEXT)
        .parse_mode(ParseMode::Html)
        .reply_markup(keyboards::main_reply_keyboard())
        .await?;

    Ok(())
}

async fn send_price(bot: &Bot, chat_id: ChatId, service: &RateService) -> HandlerResult {
    bot.send_chat_action(chat_id, ChatAction::Typing).await?;

    let quote = service.ton_quote().await;
    send_html(bot, chat_id, format::price_text(quote.as_ref())).await
}

async fn convert(bot: &Bot, chat_id: ChatId, service: &RateService, args: &str) -> HandlerResult {
    bot.send_chat_action(chat_id, ChatAction::Typing).await?;

    if args.is_empty() {
        return send_html(bot, chat_id, format::CONVERT_USAGE_TEXT).await;
    }

    let amount = match parse_amount(args) {
        Ok(amount) => amount,
        Err(err) => {
            tracing::debug!("Rejected conversion amount: {err}");
            return send_html(bot, chat_id, format::INVALID_AMOUNT_TEXT).await;
        }
    };

    match service.convert(amount).await {
        Some(conversion) => send_html(bot, chat_id, format::conversion_text(&conversion)).await,
        None => send_html(bot, chat_id, format::CONVERT_UNAVAILABLE_TEXT).await,
    }
}

async fn send_html(bot: &Bot, chat_id: ChatId, text: impl Into<String>) -> HandlerResult {
    bot.send_message(chat_id, text.into())
        .parse_mode(ParseMode::Html)
        .await?;
    Ok(())
}
