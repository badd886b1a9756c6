//! Emergency weather information scraped from meteoinfo.ru.

use crate::bot::dispatcher::AppState;
use crate::models::TextMessage;
use crate::utils::html::{ExtraInfo, parse_extrainfo_page};

const PAGE_URL: &str = "https://meteoinfo.ru/extrainfopage";
const MAX_ENTRIES: usize = 7;

pub const FETCH_FAILED: &str = "Ошибка при получении данных: страница недоступна.";

fn render(info: &ExtraInfo) -> String {
    let headline = info.headline.as_deref().unwrap_or("Экстренная информация");
    let entries = if info.entries.is_empty() {
        "Нет экстренной информации.".to_string()
    } else {
        info.entries
            .iter()
            .take(MAX_ENTRIES)
            .cloned()
            .collect::<Vec<_>>()
            .join("\n")
    };
    let additional = if info.additional.is_empty() {
        "Нет дополнительной информации.".to_string()
    } else {
        info.additional.join("\n")
    };

    format!("⚠️ {} ⚠️\n{}\n— — —\n{}", headline, entries, additional)
}

pub async fn extrainfo(state: &AppState, msg: &TextMessage) -> anyhow::Result<()> {
    let Some(page) = state.provider.fetch_text(PAGE_URL).await else {
        state.say(msg.peer, FETCH_FAILED).await;
        return Ok(());
    };

    state.say(msg.peer, render(&parse_extrainfo_page(&page))).await;
    Ok(())
}
