//! User-facing message texts (Russian, Telegram HTML).

use crate::rates::service::{Conversion, TonQuote};

/// `value` with comma thousands grouping, e.g. `1651.38` → `"1,651.38"`.
pub(crate) fn fmt_grouped(value: f64, decimals: usize) -> String {
    let formatted = format!("{value:.decimals$}");
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (formatted.as_str(), None),
    };

    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", int_part),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

pub(crate) fn welcome_text(first_name: &str) -> String {
    format!(
        "👋 <b>Добро пожаловать, {first_name}!</b>\n\n\
         💎 <b>TON Price Bot</b> поможет отслеживать актуальный курс TON\n\
         на основе реальных P2P-сделок в рублях.\n\n\
         🚀 <b>Выберите действие:</b>\n\
         • <b>Узнать курс</b> - текущая цена TON\n\
         • <b>Конвертировать</b> - перевести TON в рубли\n\
         • <b>Меню</b> - информация о командах\n\n\
         📊 <i>Данные обновляются в реальном времени</i>\n\n\
         💡 <i>Используйте кнопки ниже для быстрого доступа</i>"
    )
}

pub(crate) const QUICK_COMMANDS_TEXT: &str = "⌨️ <b>Быстрые команды:</b>";

pub(crate) const MENU_TEXT: &str = "📋 <b>Меню TON Price Bot</b>\n\n\
     💎 <b>О боте:</b>\n\
     Я анализирую рынок P2P-торговли на крупнейших биржах\n\
     и показываю реальную стоимость TON в рублях.\n\n\
     🚀 <b>Доступные команды:</b>\n\
     • <b>/start</b> - начать работу с ботом\n\
     • <b>/menu</b> - показать это меню\n\
     • <b>/price</b> - текущий курс TON\n\
     • <b>/convert</b> - конвертировать TON в рубли\n\n\
     💡 <b>Примеры:</b>\n\
     <code>/convert 5.5</code> - посчитать стоимость 5.5 TON\n\n\
     📊 <i>Данные обновляются в реальном времени</i>";

pub(crate) const HELP_TEXT: &str = "🆘 <b>Помощь по TON Price Bot</b>\n\n\
     💎 <b>Как использовать:</b>\n\
     • Нажмите <b>💰 Узнать курс</b> для получения текущей цены\n\
     • Нажмите <b>🧮 Конвертировать</b> для перевода TON в рубли\n\
     • Или используйте команды:\n\
     \u{20}\u{20}<code>/price</code> - курс TON\n\
     \u{20}\u{20}<code>/convert 10</code> - конвертация 10 TON\n\n\
     🔧 <b>Источники данных:</b>\n\
     • P2P Binance (основной)\n\
     • Spot Binance (резервный)\n\
     • CoinGecko (аварийный)\n\n\
     📞 <b>Если возникли проблемы:</b>\n\
     Перезапустите бота командой /start";

pub(crate) const SOURCES_TEXT: &str = "📊 <b>Источники данных:</b>\n\n\
     • <b>P2P Binance</b> - основные данные с P2P-площадки\n\
     • <b>Spot Binance</b> - биржевые данные (резерв)\n\
     • <b>CoinGecko</b> - агрегатор цен (аварийный источник)\n\n\
     💡 Бот автоматически выбирает самый надежный источник";

pub(crate) const PRICE_UNAVAILABLE_TEXT: &str = "😕 <b>Не удалось получить данные</b>\n\n\
     Попробуйте снова через несколько минут.\n\
     Если проблема сохраняется, используйте /help";

pub(crate) const CONVERT_USAGE_TEXT: &str = "🧮 <b>Конвертация TON в рубли</b>\n\n\
     💡 <i>Введите количество TON после команды:</i>\n\
     <code>/convert 5.5</code>\n\n\
     📝 <i>Или просто напишите число после нажатия кнопки \"Конвертировать\"</i>";

pub(crate) const INVALID_AMOUNT_TEXT: &str =
    "❌ <b>Ошибка!</b> Пожалуйста, укажите корректное положительное число.\n\n\
     <i>Пример:</i> <code>/convert 5.5</code>";

pub(crate) const CONVERT_PROMPT_TEXT: &str = "💡 Введите количество TON для конвертации:\n\n\
     <i>Пример:</i> <code>5.5</code> или <code>/convert 5.5</code>";

pub(crate) const CONVERT_UNAVAILABLE_TEXT: &str =
    "😕 <b>Не удалось получить данные для конвертации</b>\n\n\
     Попробуйте снова через несколько минут.\n\
     Используйте /price для проверки доступности данных";

pub(crate) fn price_text(quote: Option<&TonQuote>) -> String {
    let Some(quote) = quote else {
        return PRICE_UNAVAILABLE_TEXT.to_string();
    };

    format!(
        "💎 <b>Актуальный курс TON</b>\n\n\
         • <b>1 TON</b> = <b>{ton_rub} ₽</b>\n\
         • 1 USDT = {usdt_rub} ₽ ({source})\n\
         • 1 TON = {ton_usdt} $\n\n\
         📊 <i>Обновлено: {source}</i>\n\
         🔄 <i>Используйте /convert для расчетов</i>",
        ton_rub = fmt_grouped(quote.ton_rub, 2),
        usdt_rub = fmt_grouped(quote.usdt_rub, 2),
        ton_usdt = fmt_grouped(quote.ton_usdt, 4),
        source = quote.source,
    )
}

pub(crate) fn conversion_text(conversion: &Conversion) -> String {
    format!(
        "🧮 <b>Конвертация TON</b>\n\n\
         • <b>{amount} TON</b> = <b>{total} ₽</b>\n\
         • Курс: 1 TON = {ton_usdt} $\n\
         • Курс: 1 USDT = {usdt_rub} ₽\n\
         • Источник: {source}\n\n\
         💡 <i>Для актуального курса используйте /price</i>",
        amount = conversion.amount,
        total = fmt_grouped(conversion.total_rub, 2),
        ton_usdt = fmt_grouped(conversion.quote.ton_usdt, 4),
        usdt_rub = fmt_grouped(conversion.quote.usdt_rub, 2),
        source = conversion.quote.source,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote() -> TonQuote {
        TonQuote {
            ton_rub: 300.25,
            usdt_rub: 97.4,
            ton_usdt: 3.0826,
            source: "P2P Binance",
        }
    }

    #[test]
    fn grouping() {
        assert_eq!(fmt_grouped(1651.375, 2), "1,651.38");
        assert_eq!(fmt_grouped(97.4, 2), "97.40");
        assert_eq!(fmt_grouped(1234567.0, 2), "1,234,567.00");
        assert_eq!(fmt_grouped(3.0826, 4), "3.0826");
        assert_eq!(fmt_grouped(999.0, 0), "999");
        assert_eq!(fmt_grouped(-1651.375, 2), "-1,651.38");
    }

    #[test]
    fn price_text_shows_all_legs_and_source() {
        let text = price_text(Some(&quote()));
        assert!(text.contains("300.25 ₽"));
        assert!(text.contains("97.40 ₽ (P2P Binance)"));
        assert!(text.contains("3.0826 $"));
    }

    #[test]
    fn price_text_without_quote_is_the_unavailable_message() {
        assert_eq!(price_text(None), PRICE_UNAVAILABLE_TEXT);
    }

    #[test]
    fn conversion_text_shows_total_and_rate() {
        let conversion = Conversion {
            amount: 5.5,
            total_rub: 1651.375,
            quote: quote(),
        };
        let text = conversion_text(&conversion);
        assert!(text.contains("5.5 TON"));
        assert!(text.contains("1,651.38 ₽"));
        assert!(text.contains("Источник: P2P Binance"));
    }
}
