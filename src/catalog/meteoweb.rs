/// A forecast map product published per model run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapType {
    pub code: &'static str,
    pub title: &'static str,
}

pub const MAP_TYPES: &[MapType] = &[
    MapType { code: "prec", title: "🌧️ Осадки" },
    MapType { code: "temp", title: "🌡️ Температура у поверхности 2м" },
    MapType { code: "temp8", title: "🌡️ Температура на уровне 850 гПа" },
    MapType { code: "cloudst", title: "☁️ Низкая-средняя облачность" },
    MapType { code: "cloudsh", title: "☁️ Верхняя облачность" },
    MapType { code: "wind", title: "💨 Ветер" },
    MapType { code: "licape", title: "⚡ Параметры неустойчивости" },
    MapType { code: "snd", title: "❄️ Высота снежного покрова" },
    MapType { code: "tef", title: "🌡️ Эффективная температура" },
];

pub fn map_type(code: &str) -> Option<&'static MapType> {
    let code = code.to_lowercase();
    MAP_TYPES.iter().find(|m| m.code == code)
}
