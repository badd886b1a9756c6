//! Weather-station lookup: region first, then a station in that region.

use super::{DialogKind, StationStage, Transition};
use crate::bot::dispatcher::AppState;
use crate::catalog::{region_code, station_code};
use crate::models::TextMessage;
use crate::utils::html::{StationReport, parse_station_page};

pub const REGION_PROMPT: &str = "Введите регион (например, Московская область):";
pub const REGION_NOT_FOUND: &str = "регион не найден. Проверьте правильность написания.";
pub const STATION_PROMPT: &str = "Введите название станции (например, Клин):";
pub const STATION_NOT_FOUND: &str = "Станция не найдена. Проверьте правильность написания.";
const NO_TABLE: &str = "Не удалось найти данные о погоде для указанной станции.";
const FETCH_FAILED: &str = "Ошибка при получении данных: страница станции недоступна.";
const NO_DATA: &str = "Нет данных";

pub async fn start(state: &AppState, msg: &TextMessage) -> anyhow::Result<()> {
    state.say(msg.peer, REGION_PROMPT).await;
    state.session.await_input(
        msg.identity,
        DialogKind::StationLookup(StationStage::Region),
        false,
    );
    Ok(())
}

pub async fn step(state: &AppState, msg: &TextMessage, stage: &StationStage) -> anyhow::Result<Transition> {
    match stage {
        StationStage::Region => region(state, msg).await,
        StationStage::Station { region_code } => station(state, msg, region_code).await,
    }
}

async fn region(state: &AppState, msg: &TextMessage) -> anyhow::Result<Transition> {
    let Some(code) = region_code(&msg.text) else {
        state.say(msg.peer, REGION_NOT_FOUND).await;
        return Ok(Transition::Stay);
    };

    state.say(msg.peer, STATION_PROMPT).await;
    Ok(Transition::Advance {
        dialog: DialogKind::StationLookup(StationStage::Station { region_code: code }),
        once: false,
    })
}

async fn station(state: &AppState, msg: &TextMessage, region: &str) -> anyhow::Result<Transition> {
    let name = msg.text.trim().to_lowercase();
    let Some(code) = station_code(&name) else {
        state.say(msg.peer, STATION_NOT_FOUND).await;
        return Ok(Transition::Stay);
    };

    let url = format!("https://meteoinfo.ru/pogoda/russia/{}/{}", region, code);
    let reply = match state.provider.fetch_text(&url).await {
        None => FETCH_FAILED.to_string(),
        Some(html) => match parse_station_page(&html) {
            Some(report) => render(&name, &report),
            None => NO_TABLE.to_string(),
        },
    };
    state.say(msg.peer, reply).await;
    Ok(Transition::Finish)
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn render(name: &str, report: &StationReport) -> String {
    let value = |key: &str| report.get(key).unwrap_or(NO_DATA);
    format!(
        "📍 Погода для станции: {}\n\
         🕒 Обновлено: {}\n\
         🌡️ Температура воздуха: {} °C\n\
         🌬️ Средняя скорость ветра: {} м/с\n\
         ➡️ Направление ветра: {}\n\
         🔽 Атмосферное давление: {} мм рт.ст.\n\
         💧 Относительная влажность: {} %\n\
         🌫️ Горизонтальная видимость: {} км\n\
         ☁️ Балл общей облачности: {}\n\
         🌨️ Осадки за 12 часов: {} мм\n\
         ❄️ Высота снежного покрова: {} см\n\
         Данные предоставлены Гидрометцентром России",
        capitalize(name),
        report.updated.as_deref().unwrap_or("Нет данных о времени обновления"),
        value("Температура воздуха, °C"),
        value("Средняя скорость ветра, м/с"),
        value("Направление ветра"),
        value("Атмосферное давление на уровне станции, мм рт.ст."),
        value("Относительная влажность, %"),
        value("Горизонтальная видимость, км"),
        value("Балл общей облачности"),
        value("Осадки за 12 часов, мм"),
        value("Высота снежного покрова, см"),
    )
}
