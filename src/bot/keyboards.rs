//! Reply and inline keyboards.

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton, KeyboardMarkup};

pub(crate) const BTN_PRICE: &str = "💰 Узнать курс";
pub(crate) const BTN_CONVERT: &str = "🧮 Конвертировать";
pub(crate) const BTN_MENU: &str = "📋 Меню";
pub(crate) const BTN_HELP: &str = "🆘 Помощь";

pub(crate) const CB_GET_PRICE: &str = "get_price";
pub(crate) const CB_SOURCES: &str = "sources";

/// Persistent reply keyboard under the input field.
pub(crate) fn main_reply_keyboard() -> KeyboardMarkup {
    KeyboardMarkup::new([
        [KeyboardButton::new(BTN_PRICE), KeyboardButton::new(BTN_CONVERT)],
        [KeyboardButton::new(BTN_MENU), KeyboardButton::new(BTN_HELP)],
    ])
    .resize_keyboard()
}

/// Inline keyboard attached to the welcome message.
pub(crate) fn main_inline_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new([
        vec![InlineKeyboardButton::callback(
            "💰 Узнать курс TON",
            CB_GET_PRICE,
        )],
        vec![InlineKeyboardButton::switch_inline_query_current_chat(
            "🧮 Конвертировать",
            "/convert ",
        )],
        vec![InlineKeyboardButton::callback(
            "📊 Источники данных",
            CB_SOURCES,
        )],
    ])
}
