//! Static text commands: start, help, support, share, donate, useful websites.

use crate::bot::dispatcher::AppState;
use crate::models::{InlineButton, Keyboard, OutgoingMessage, TextMessage};
use crate::plugins::main_keyboard;

pub const WELCOME: &str = "Привет! Я - бот погоды PogodaRadar. Спроси меня о погоде в своем городе или любом другом месте, которое тебя интересует!😊🌦️";

pub const HELP: &str = "(Техпомощь)\n\n\
1) ⚙️Команда /start - Начало работы с ботом\n\
2) 🚨Команда /help - Справка о работе с ботом\n\
3) 🛠️Команда /support - Связаться с техподдержкой бота\n\
(Погода)\n\n\
4) ✏️Команда /setcity - Изменить город\n\
5) ⛅Команда /nowweather - Текущая погода в городе\n\
6) 📆Команда /forecastweather - Прогноз погоды на 3 дня в городе\n\
7) ✈️Команда /weatherairports - Погода в аэропортах мира\n\
8) 🗺️Команда /radarmap - Радар осадков\n\
9) ⚠️Команда /alerts - Предупреждения о непогоде в городах по всему миру\n\
10) 🌫️Команда /aqi - Качество воздуха в городе\n\
11) ☔Команда /precipitationmap - Карта интенсивности осадков\n\
12) 🌡️Команда /anomaltempmap - Карта аномалии среднесуточной температуры за 5 суток\n\
13) 🌡️Команда /tempwatermap - Прогноз температуры воды в Черном море\n\
14) 📈Команда /verticaltemplayer - Вертикальное распределение температуры в нижнем 1-километровом слое\n\
15) 📊Команда /meteograms - Просмотр метеограмм по городам России и Беларуси\n\
16) 🌐Команда /weatherwebsites - Полезные сайты для просмотра информации о погоде\n\
17) 🔥Команда /firehazard_map - Карта пожароопасности по РФ\n\
18) ❗Команда /extrainfo - Экстренная информация об ухудшении погодных условий\n\
19) 🚩Команда /stations - Информация о погоде с метеостанций РФ (бета-версия)\n\
20) 🌍Команда /get_meteoweb - Прогнозные карты погоды Meteoweb\n\
21) 📍Команда /location - Определить город по геопозиции\n\
(Доп.настройки)\n\n\
22) 📢Команда /share - Поделиться ботом\n\
23) 🎁Команда /donate - Поддержать разработчика\n\
(Развлечения)\n\n\
24) 🎮Команда /guess_temp - Угадай загаданную температуру";

const SUPPORT: &str = "🛠️ Для связи с техподдержкой напишите на нашу электронную почту: pogoda.radar@inbox.ru";

const DONATE: &str = "Вы можете поддержать PogodaRadar по ссылкам:\n\
1) 🎁DonationAlerts:  https://donationalerts.com/r/pogodaradar \n\
2) 💶CloudTips: https://pay.cloudtips.ru/p/317d7868 \n\
3) 💳YooMoney: https://yoomoney.ru/to/410018154591956 ";

const WEBSITES: &str = "Полезные сайты для просмотра погоды:\n\
1) ⚡Система грозопеленгации для отслеживания молний по всему миру: https://map.blitzortung.org/#5.13/56.37/40.11\n\
2) 🛰️Просмотр архивных спутниковых снимков по Европе и России:  https://zelmeteo.ru\n\
3) 📊Сайт для просмотра прогноза погоды прогностических моделей по всему миру: https://meteologix.com";

const SHARE_URL: &str = "https://t.me/share/url?url=https://t.me/pogodaradar_bot";

/// Donation links as URL buttons, attached to the current-weather report.
pub fn donation_keyboard() -> Keyboard {
    Keyboard::Inline(vec![
        vec![InlineButton::url("🎁DonationAlerts", "https://www.donationalerts.com/r/pogodaradar")],
        vec![InlineButton::url("💶CloudTips", "https://pay.cloudtips.ru/p/317d7868")],
        vec![InlineButton::url("💳YooMoney", "https://yoomoney.ru/to/410018154591956")],
    ])
}

pub async fn start(state: &AppState, msg: &TextMessage) -> anyhow::Result<()> {
    state
        .reply(msg.peer, OutgoingMessage::text(WELCOME).keyboard(main_keyboard(msg.peer)))
        .await;
    Ok(())
}

pub async fn help(state: &AppState, msg: &TextMessage) -> anyhow::Result<()> {
    state.say(msg.peer, HELP).await;
    Ok(())
}

pub async fn support(state: &AppState, msg: &TextMessage) -> anyhow::Result<()> {
    state.say(msg.peer, SUPPORT).await;
    Ok(())
}

pub async fn share(state: &AppState, msg: &TextMessage) -> anyhow::Result<()> {
    let keyboard = Keyboard::Inline(vec![vec![InlineButton::url("Поделиться ботом", SHARE_URL)]]);
    state
        .reply(
            msg.peer,
            OutgoingMessage::text("PogodaRadar в Telegram").keyboard(Some(keyboard)),
        )
        .await;
    Ok(())
}

pub async fn donate(state: &AppState, msg: &TextMessage) -> anyhow::Result<()> {
    state.say(msg.peer, DONATE).await;
    Ok(())
}

pub async fn websites(state: &AppState, msg: &TextMessage) -> anyhow::Result<()> {
    state.say(msg.peer, WEBSITES).await;
    Ok(())
}
