//! Weather reports for the stored city: now, 3-day forecast, air quality, alerts.
//!
//! Each handler re-checks the flood guard keyed on the identity alone before
//! touching the provider.

use tracing::debug;

use crate::bot::dispatcher::AppState;
use crate::models::{OutgoingMessage, TextMessage};
use crate::plugins::info::donation_keyboard;
use crate::session::FloodKey;
use crate::utils::format::{
    clothing_recommendations, condition_emoji, kph_to_mps, russian_alert_time, russian_date,
    russian_datetime, wind_direction,
};

pub const FLOOD_NOTICE: &str = "⚠️ Вы заблокированы на 1 минуту из-за частых запросов.";
pub const NO_CITY: &str = "Город не установлен. Пожалуйста, сначала используйте команду /setcity, чтобы установить город.";
pub const NO_DATA: &str = "Не удалось получить данные о погоде для данного города. Пожалуйста, попробуйте еще раз или укажите другой город.";
pub const NO_AIR_QUALITY: &str = "Ошибка получения данных о качестве воздуха. Пожалуйста, попробуйте еще раз или укажите другой город.";

/// Flood re-check and city lookup shared by all four reports.
/// `None` means the user has already been answered.
async fn stored_city(state: &AppState, msg: &TextMessage) -> anyhow::Result<Option<String>> {
    if state.session.flood.check(FloodKey::identity(msg.identity)).is_blocked() {
        state.say(msg.peer, FLOOD_NOTICE).await;
        return Ok(None);
    }

    let city = state.cities.load_city(msg.identity).await?;
    if city.is_none() {
        debug!(identity = %msg.identity, "No city stored");
        state.say(msg.peer, NO_CITY).await;
    }
    Ok(city)
}

fn localized(raw: &str, parse: fn(&str) -> Option<String>) -> String {
    parse(raw).unwrap_or_else(|| raw.to_string())
}

pub async fn now(state: &AppState, msg: &TextMessage) -> anyhow::Result<()> {
    let Some(city) = stored_city(state, msg).await? else {
        return Ok(());
    };

    let provider = state.provider.as_ref();
    let (data, astro) = tokio::join!(
        state.weather.current(provider, &city),
        state.weather.astronomy(provider, &city)
    );

    let Some((data, condition)) = data.and_then(|d| {
        let condition = d.current.condition.clone()?;
        Some((d, condition))
    }) else {
        state.say(msg.peer, NO_DATA).await;
        return Ok(());
    };

    let current = &data.current;
    let pressure = current.pressure_mb as i64;
    let sunrise = astro.sunrise.as_deref().unwrap_or("Неизвестно").replace("AM", "Утра");
    let sunset = astro.sunset.as_deref().unwrap_or("Неизвестно").replace("PM", "Вечера");

    let report = format!(
        "🏙️Погода в городе: {}\n\
         🗓️Время и дата: {}\n\
         🔄Данные обновлены: {}\n\n\
         {} {}\n\
         🌡️Температура: {}°C\n\
         🤗По ощущениям: {}°C\n\
         💨Скорость ветра: {:.1} м/с\n\
         👉🏻Направление ветра: {}\n\
         💧Влажность: {} %\n\
         ☁️Облачность: {} %\n\
         🕗Давление: {} гПа\n\
         🕶️Видимость: {} км\n\
         😎UV индекс: {}\n\
         🌅Восход солнца: {}\n\
         🌇Закат солнца: {}\n\n\
         Рекомендации по одежде:\n{}",
        data.location.label(),
        localized(&data.location.localtime, russian_datetime),
        localized(&current.last_updated, russian_datetime),
        condition_emoji(condition.code),
        condition.text,
        current.temp_c,
        current.feelslike_c,
        kph_to_mps(current.wind_kph),
        wind_direction(&current.wind_dir),
        current.humidity,
        current.cloud,
        pressure,
        current.vis_km,
        current.uv as i64,
        sunrise,
        sunset,
        clothing_recommendations(current.temp_c, current.wind_kph, current.humidity, pressure),
    );

    state
        .reply(msg.peer, OutgoingMessage::text(report).keyboard(Some(donation_keyboard())))
        .await;
    Ok(())
}

pub async fn forecast(state: &AppState, msg: &TextMessage) -> anyhow::Result<()> {
    let Some(city) = stored_city(state, msg).await? else {
        return Ok(());
    };

    let Some(data) = state.weather.forecast(state.provider.as_ref(), &city, 3).await else {
        state.say(msg.peer, NO_DATA).await;
        return Ok(());
    };

    let mut report = format!("🏙️Прогноз погоды в городе: {}\n", data.location.label());
    for day in &data.forecast.forecastday {
        let summary = &day.day;
        report.push_str(&format!(
            "🗓️Дата: {}\n\n\
             ☔Погодные условия: {}{}\n\
             🌡️Температура: Днем {}°C Ночью {}°C\n\
             💨Ветер: {:.1} м/с\n\
             💦Общая сумма осадков за день: {} мм\n",
            localized(&day.date, russian_date),
            condition_emoji(summary.condition.code),
            summary.condition.text,
            summary.maxtemp_c,
            summary.mintemp_c,
            kph_to_mps(summary.maxwind_kph),
            summary.totalprecip_mm,
        ));
    }

    state.say(msg.peer, report).await;
    Ok(())
}

fn reading(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "н/д".to_string())
}

pub async fn air_quality(state: &AppState, msg: &TextMessage) -> anyhow::Result<()> {
    let Some(city) = stored_city(state, msg).await? else {
        return Ok(());
    };

    let data = state.weather.air_quality(state.provider.as_ref(), &city).await;
    let Some((location, aq)) = data.and_then(|d| Some((d.location, d.current.air_quality?))) else {
        state.say(msg.peer, NO_AIR_QUALITY).await;
        return Ok(());
    };
    let Some(index) = aq.us_epa_index else {
        state.say(msg.peer, NO_AIR_QUALITY).await;
        return Ok(());
    };

    let report = format!(
        "🏙️Качество воздуха в городе: {}\n\
         🌿Уровень индекса: ( {} )\n\
         🏭🔥Среднее значение CO: {}\n\
         🚗🚢Среднее значение NO2: {}\n\
         🌇Среднее значение O3: {}\n\
         🏭🌋Среднее значение SO2: {}\n\
         🏭🚜Среднее значение PM2.5: {}\n\
         🏭🚜Среднее значение PM10: {}",
        location.label(),
        index,
        reading(aq.co),
        reading(aq.no2),
        reading(aq.o3),
        reading(aq.so2),
        reading(aq.pm2_5),
        reading(aq.pm10),
    );
    state.say(msg.peer, report).await;
    Ok(())
}

pub async fn alerts(state: &AppState, msg: &TextMessage) -> anyhow::Result<()> {
    let Some(city) = stored_city(state, msg).await? else {
        return Ok(());
    };

    let Some(data) = state.weather.alerts(state.provider.as_ref(), &city).await else {
        state.say(msg.peer, NO_DATA).await;
        return Ok(());
    };

    let mut report = format!(
        "🏙️Предупреждения в городе: {}\n🗓️Время и дата: {}\n",
        data.location.label(),
        localized(&data.location.localtime, russian_datetime)
    );

    if data.alerts.alert.is_empty() {
        report.push_str("✅ Активных предупреждений нет.");
    }
    for alert in &data.alerts.alert {
        let time = |raw: &Option<String>| {
            raw.as_deref()
                .map(|t| localized(t, russian_alert_time))
                .unwrap_or_else(|| "Неизвестно".to_string())
        };
        report.push_str(&format!(
            "⚠️Предупреждение: {}\n📝Описание: {}\n🕙Начальное время: {}\n🕓Конечное время: {}\n",
            alert.event.as_deref().unwrap_or("Неизвестное событие"),
            alert.desc.as_deref().unwrap_or("Нет описания"),
            time(&alert.effective),
            time(&alert.expires),
        ));
    }

    state.say(msg.peer, report).await;
    Ok(())
}
