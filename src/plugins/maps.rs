//! Static map images relayed from meteoinfo.ru.

use tracing::warn;

use crate::bot::dispatcher::AppState;
use crate::models::{Attachment, AttachmentKind, OutgoingMessage, TextMessage};

pub const DOWNLOAD_FAILED: &str = "Не удалось загрузить изображение.";

/// A published image and how to present it.
struct StaticMap {
    url: &'static str,
    caption: &'static str,
    file_name: &'static str,
    kind: AttachmentKind,
}

const RADAR: StaticMap = StaticMap {
    url: "https://meteoinfo.ru/hmc-output/rmap/phenomena.gif",
    caption: "Радар осадков:",
    file_name: "radar.gif",
    // Animated; photos would flatten it.
    kind: AttachmentKind::Document,
};

const PRECIPITATION: StaticMap = StaticMap {
    url: "https://meteoinfo.ru/hmc-input/mapsynop/Precip.png",
    caption: "Карта осадков за прошедшие сутки:",
    file_name: "precip.png",
    kind: AttachmentKind::Photo,
};

const ANOMALY: StaticMap = StaticMap {
    url: "https://meteoinfo.ru/images/vasiliev/anom2_6/anom2_6.gif",
    caption: "Карта аномалии температуры:",
    file_name: "anom2_6.gif",
    kind: AttachmentKind::Photo,
};

const WATER_TEMPERATURE: StaticMap = StaticMap {
    url: "https://meteoinfo.ru/res/230/web/esimo/black/sst/black.png",
    caption: "Температура воды в Черном море:",
    file_name: "black.png",
    kind: AttachmentKind::Photo,
};

const VERTICAL_PROFILE: StaticMap = StaticMap {
    url: "https://meteoinfo.ru/hmc-input/profiler/cao/image1.jpg",
    caption: "Измерения проведены с помощью оборудования компании НПО АТТЕХ. Координаты профилемера: \
              ФГБУ Центральная аэрологическая обсерватория, Московская обл., г. Долгопрудный, ул. Первомайская, 3 \
              (55°55´32´´N, 37°31´23´´E)",
    file_name: "profiler.jpg",
    kind: AttachmentKind::Photo,
};

const FIRE_HAZARD: StaticMap = StaticMap {
    url: "https://meteoinfo.ru/images/vasiliev/plazma_ppo3.gif",
    caption: "Карта пожароопасности по РФ:",
    file_name: "plazma_ppo3.gif",
    kind: AttachmentKind::Photo,
};

async fn relay(state: &AppState, msg: &TextMessage, map: &StaticMap) -> anyhow::Result<()> {
    let Some(bytes) = state.provider.fetch_bytes(map.url).await else {
        warn!(url = map.url, "Map image unavailable");
        state.say(msg.peer, DOWNLOAD_FAILED).await;
        return Ok(());
    };

    let attachment = match map.kind {
        AttachmentKind::Photo => Attachment::photo(map.file_name, bytes),
        AttachmentKind::Document => Attachment::document(map.file_name, bytes),
    };
    state
        .reply(msg.peer, OutgoingMessage::text(map.caption).attach(attachment))
        .await;
    Ok(())
}

pub async fn radar(state: &AppState, msg: &TextMessage) -> anyhow::Result<()> {
    relay(state, msg, &RADAR).await
}

pub async fn precipitation(state: &AppState, msg: &TextMessage) -> anyhow::Result<()> {
    relay(state, msg, &PRECIPITATION).await
}

pub async fn anomaly(state: &AppState, msg: &TextMessage) -> anyhow::Result<()> {
    relay(state, msg, &ANOMALY).await
}

pub async fn water_temperature(state: &AppState, msg: &TextMessage) -> anyhow::Result<()> {
    relay(state, msg, &WATER_TEMPERATURE).await
}

pub async fn vertical_profile(state: &AppState, msg: &TextMessage) -> anyhow::Result<()> {
    relay(state, msg, &VERTICAL_PROFILE).await
}

pub async fn fire_hazard(state: &AppState, msg: &TextMessage) -> anyhow::Result<()> {
    relay(state, msg, &FIRE_HAZARD).await
}
