//! Meteoweb forecast maps: one request line, validated, up to ten maps.

use chrono::{DateTime, Duration, Timelike, Utc};
use thiserror::Error;

use super::{DialogKind, Transition};
use crate::bot::dispatcher::AppState;
use crate::catalog::{MAP_TYPES, MapType, map_type};
use crate::models::{Attachment, OutgoingMessage, TextMessage};

pub const INSTRUCTIONS: &str = "🌍 Команда /get_meteoweb — ваш помощник для получения прогнозных карт погоды от Meteoweb!\n\
📝 Как использовать:\n\
Введите параметры карты в формате:\n\
время_прогона начальный_час конечный_час тип_карты\n\n\
🔍 Примеры запросов:\n\
• 00 003 027 prec — карта осадков с 3 по 27 час прогноза.\n\
• 12 006 036 temp — карта температуры у поверхности с 6 по 36 час.\n\
• 00 003 024 temp8 — карта температуры на уровне 850 гПа с 3 по 24 час.\n\n\
📊 Доступные типы карт:\n\
• prec — осадки 🌧️\n\
• temp — температура у поверхности 🌡️\n\
• temp8 — температура на уровне 850 гПа 🗻\n\
• cloudst — общая облачность ☁️\n\
• cloudsh — высокая облачность 🌫️\n\
• wind — ветер 🌬️\n\
• licape — индекс неустойчивости (LICAPE) ⚡\n\
• snd — снежный покров ❄️\n\
• tef — температура эффективная 🌡️\n\n\
⚠️ Важные ограничения:\n\
• За один запрос можно получить не более 10 карт.\n\
• Если нужно больше карт, повторите команду.";

const RUNS: [&str; 4] = ["00", "06", "12", "18"];
const MAX_MAPS: usize = 10;

/// Why a request line was rejected. The message is shown to the user.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestError {
    #[error("Неверное количество параметров. Ожидается: время прогона, начальный час, конечный час, тип карты.")]
    Arity,
    #[error("Неверное время прогона. Допустимые значения: 00, 06, 12, 18.")]
    Run,
    #[error("Некорректное начальное время прогноза. Время должно быть от 003 до 384 с шагом в 3 часа.")]
    StartHour,
    #[error("Некорректное конечное время прогноза. Время должно быть от 003 до 384 с шагом в 3 часа.")]
    EndHour,
    #[error("Начальное время не может быть больше конечного.")]
    Order,
    #[error("Неверный тип карты. Допустимые значения: {0}.")]
    MapType(String),
    #[error("⚠️ Запрос превышает лимит: можно получить только {0} карт за один запрос. Попробуйте уменьшить диапазон времени.")]
    TooMany(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapRequest {
    pub run: &'static str,
    pub start_hour: u32,
    pub end_hour: u32,
    pub map: &'static MapType,
}

fn valid_hour(hour: u32) -> bool {
    (3..=384).contains(&hour) && hour % 3 == 0
}

impl MapRequest {
    pub fn parse(line: &str) -> Result<Self, RequestError> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let [run, start, end, kind] = parts[..] else {
            return Err(RequestError::Arity);
        };

        let run = RUNS
            .iter()
            .copied()
            .find(|r| *r == run)
            .ok_or(RequestError::Run)?;
        let start_hour = start
            .parse::<u32>()
            .ok()
            .filter(|h| valid_hour(*h))
            .ok_or(RequestError::StartHour)?;
        let end_hour = end
            .parse::<u32>()
            .ok()
            .filter(|h| valid_hour(*h))
            .ok_or(RequestError::EndHour)?;
        if start_hour > end_hour {
            return Err(RequestError::Order);
        }
        let map = map_type(kind).ok_or_else(|| {
            let codes: Vec<&str> = MAP_TYPES.iter().map(|m| m.code).collect();
            RequestError::MapType(codes.join(", "))
        })?;

        let request = Self {
            run,
            start_hour,
            end_hour,
            map,
        };
        if request.hours().count() > MAX_MAPS {
            return Err(RequestError::TooMany(MAX_MAPS));
        }
        Ok(request)
    }

    pub fn hours(&self) -> impl Iterator<Item = u32> {
        (self.start_hour..=self.end_hour).step_by(3)
    }

    pub fn urls(&self) -> Vec<String> {
        self.hours()
            .map(|hour| format!("http://fmeteo.ru/gfs/{}/{}_{:03}.png", self.run, self.map.code, hour))
            .collect()
    }
}

/// Validity time of a forecast hour for the latest run at `run_hour` UTC.
pub fn valid_time(run_hour: u32, forecast_hour: u32, now: DateTime<Utc>) -> String {
    let mut run = now
        .with_hour(run_hour)
        .and_then(|t| t.with_minute(0))
        .and_then(|t| t.with_second(0))
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(now);
    if now.hour() < run_hour {
        run -= Duration::days(1);
    }
    (run + Duration::hours(i64::from(forecast_hour)))
        .format("%Y-%m-%d %H:%M UTC")
        .to_string()
}

pub async fn start(state: &AppState, msg: &TextMessage) -> anyhow::Result<()> {
    state.say(msg.peer, INSTRUCTIONS).await;
    state.session.await_input(msg.identity, DialogKind::Meteoweb, true);
    Ok(())
}

pub async fn step(state: &AppState, msg: &TextMessage) -> anyhow::Result<Transition> {
    let request = match MapRequest::parse(&msg.text) {
        Ok(request) => request,
        Err(RequestError::TooMany(n)) => {
            state.say(msg.peer, RequestError::TooMany(n).to_string()).await;
            return Ok(Transition::Finish);
        }
        Err(e) => {
            state.say(msg.peer, format!("Произошла ошибка: {}", e)).await;
            return Ok(Transition::Finish);
        }
    };

    let mut reply = OutgoingMessage::default();
    for url in request.urls() {
        if let Some(bytes) = state.provider.fetch_bytes(&url).await {
            let file_name = url.rsplit('/').next().unwrap_or("map.png").to_string();
            reply = reply.attach(Attachment::document(file_name, bytes));
        }
    }

    if reply.attachments.is_empty() {
        state.say(msg.peer, "Не удалось загрузить изображения.").await;
        return Ok(Transition::Finish);
    }

    let run_hour = request.run.parse::<u32>()?;
    let now = Utc::now();
    reply.text = format!(
        "📅 Прогноз погоды с {} по {}\nТип карты: {}",
        valid_time(run_hour, request.start_hour, now),
        valid_time(run_hour, request.end_hour, now),
        request.map.title
    );
    state.reply(msg.peer, reply).await;
    Ok(Transition::Finish)
}
