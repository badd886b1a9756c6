//! Text formatting helpers for weather reports.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Timelike};

/// Month names in the genitive case, as used in dates ("5 Мая").
const MONTHS: [&str; 12] = [
    "Января", "Февраля", "Марта", "Апреля", "Мая", "Июня", "Июля", "Августа", "Сентября",
    "Октября", "Ноября", "Декабря",
];

pub fn kph_to_mps(kph: f64) -> f64 {
    kph * 1000.0 / 3600.0
}

/// Russian name of a 16-point compass abbreviation.
pub fn wind_direction(code: &str) -> &'static str {
    match code {
        "N" => "Северный",
        "NNE" => "Северо-северо-восточный",
        "NE" => "Северо-восточный",
        "ENE" => "Восточно-северо-восточный",
        "E" => "Восточный",
        "ESE" => "Восточно-юго-восточный",
        "SE" => "Юго-восточный",
        "SSE" => "Юго-юго-восточный",
        "S" => "Южный",
        "SSW" => "Юго-юго-западный",
        "SW" => "Юго-западный",
        "WSW" => "Западно-юго-западный",
        "W" => "Западный",
        "WNW" => "Западно-северо-западный",
        "NW" => "Северо-западный",
        "NNW" => "Северо-северо-западный",
        _ => "Неизвестное направление",
    }
}

fn month_name(month: u32) -> &'static str {
    MONTHS[(month as usize).saturating_sub(1) % 12]
}

/// `2024-05-01 14:30` -> `01 Мая 2024 14:30`.
pub fn russian_datetime(raw: &str) -> Option<String> {
    let dt = NaiveDateTime::parse_from_str(raw.trim(), "%Y-%m-%d %H:%M").ok()?;
    Some(format!(
        "{:02} {} {} {:02}:{:02}",
        dt.day(),
        month_name(dt.month()),
        dt.year(),
        dt.hour(),
        dt.minute()
    ))
}

/// `2024-05-01` -> `01 Мая 2024`.
pub fn russian_date(raw: &str) -> Option<String> {
    let date = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()?;
    Some(format!("{:02} {} {}", date.day(), month_name(date.month()), date.year()))
}

/// RFC 3339 alert timestamps, rendered in the zone they were issued in.
pub fn russian_alert_time(raw: &str) -> Option<String> {
    let dt = DateTime::parse_from_str(raw.trim(), "%Y-%m-%dT%H:%M:%S%z").ok()?;
    Some(format!(
        "{:02} {} {} {:02}:{:02} (МСК)",
        dt.day(),
        month_name(dt.month()),
        dt.year(),
        dt.hour(),
        dt.minute()
    ))
}

/// Emoji for a weather condition code.
pub fn condition_emoji(code: i64) -> &'static str {
    match code {
        1000 => "☀️",
        1003 => "🌤️",
        1006 | 1009 => "☁️",
        1030 | 1135 => "🌫️",
        1063 => "🌦️",
        1066 | 1210 | 1213 | 1216 | 1219 | 1222 | 1225 | 1255 | 1258 | 1276 | 1279 | 1282 => "❄️",
        1069 | 1204 | 1207 | 1237 | 1240 | 1243 | 1246 | 1249 | 1252 | 1261 | 1264 => "🌨️",
        1072 => "☔",
        1087 => "🌩️",
        1114 | 1117 => "❄️🌬️",
        1147 => "🌫️🥶",
        1150 | 1153 | 1168 | 1171 | 1180 | 1183 | 1186 | 1189 | 1192 | 1195 => "🌧️",
        1198 | 1201 => "🌧️❄️",
        1273 => "⛈️",
        _ => "✖️",
    }
}

/// Clothing advice from temperature, wind (km/h), humidity (%) and pressure (hPa).
pub fn clothing_recommendations(temp_c: f64, wind_kph: f64, humidity: f64, pressure_mb: i64) -> String {
    let mut advice = String::new();

    advice.push_str(if temp_c < -10.0 {
        "❄️ Сильный мороз: Наденьте термобелье, утепленные штаны, пуховик или шубу, шапку-ушанку, шарф, теплые перчатки и зимнюю обувь с мехом.\n"
    } else if temp_c < 0.0 {
        "❄️ Мороз: Наденьте теплое пальто или пуховик, шапку, шарф, перчатки и утепленную обувь.\n"
    } else if temp_c < 10.0 {
        "🧥 Прохладно: Наденьте теплую куртку, свитер, джинсы или утепленные брюки, легкую шапку или капюшон.\n"
    } else if temp_c < 15.0 {
        "🧥 Легкая прохлада: Наденьте ветровку, джинсовку или толстовку, брюки или джинсы.\n"
    } else if temp_c < 20.0 {
        "👕 Комфортно: Наденьте легкую куртку или кардиган, футболку или рубашку, джинсы или брюки.\n"
    } else if temp_c < 25.0 {
        "👕 Тепло: Наденьте футболку, шорты или легкие брюки, можно взять с собой легкую кофту на случай ветра.\n"
    } else {
        "🔥 Жарко: Наденьте легкую одежду из дышащих тканей, шорты, майку или сарафан. Не забудьте головной убор и солнцезащитные очки.\n"
    });

    if wind_kph >= 40.0 {
        advice.push_str("🌬️ Сильный ветер: Рекомендуем надеть ветровку, плотную куртку и плотные брюки.\n");
    } else if wind_kph >= 20.0 {
        advice.push_str("💨 Умеренный ветер: Наденьте легкую блузку, рубашку или футболку и брюки.\n");
    }

    if humidity >= 90.0 {
        advice.push_str("🌧️ Очень высокая влажность: Наденьте водонепроницаемую куртку, непромокаемые штаны и резиновые сапоги. Возьмите зонт.\n");
    } else if humidity >= 80.0 {
        advice.push_str("🌧️ Высокая влажность: Наденьте водонепроницаемую куртку и непромокаемую обувь.\n");
    } else if humidity >= 60.0 {
        advice.push_str("💦 Повышенная влажность: Наденьте дышащую одежду и обувь, которая не промокает.\n");
    }

    if pressure_mb <= 970 {
        advice.push_str("🌪️ Очень низкое давление: Наденьте непромокаемую одежду, возьмите зонт и дополнительный слой одежды на случай резких изменений погоды.\n");
    } else if pressure_mb <= 990 {
        advice.push_str("🌫️ Низкое давление: Возьмите с собой легкую куртку или свитер, чтобы утеплиться в случае похолодания.\n");
    } else if pressure_mb >= 1030 {
        advice.push_str("☀️ Высокое давление: Наденьте легкую одежду, так как погода, скорее всего, будет ясной и теплой.\n");
    }

    advice
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_wind_speed() {
        assert!((kph_to_mps(36.0) - 10.0).abs() < f64::EPSILON);
        assert_eq!(wind_direction("SSW"), "Юго-юго-западный");
        assert_eq!(wind_direction("X"), "Неизвестное направление");
    }

    #[test]
    fn formats_russian_dates() {
        assert_eq!(russian_datetime("2024-05-01 14:30").as_deref(), Some("01 Мая 2024 14:30"));
        assert_eq!(russian_date("2023-12-31").as_deref(), Some("31 Декабря 2023"));
        assert_eq!(
            russian_alert_time("2024-01-15T09:00:00+03:00").as_deref(),
            Some("15 Января 2024 09:00 (МСК)")
        );
        assert!(russian_datetime("yesterday").is_none());
    }

    #[test]
    fn clothing_combines_conditions() {
        let advice = clothing_recommendations(-15.0, 45.0, 95.0, 960);
        assert!(advice.starts_with("❄️ Сильный мороз"));
        assert!(advice.contains("Сильный ветер"));
        assert!(advice.contains("Очень высокая влажность"));
        assert!(advice.contains("Очень низкое давление"));

        let mild = clothing_recommendations(17.0, 5.0, 40.0, 1013);
        assert_eq!(mild.lines().count(), 1);
    }

    #[test]
    fn unknown_condition_has_fallback_icon() {
        assert_eq!(condition_emoji(1000), "☀️");
        assert_eq!(condition_emoji(42), "✖️");
    }
}
