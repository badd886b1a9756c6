//! Weather API client: typed responses over `DataProvider::fetch_json`.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use super::DataProvider;

#[derive(Debug, Clone, Deserialize)]
pub struct Location {
    pub name: String,
    pub country: String,
    #[serde(default)]
    pub localtime: String,
}

impl Location {
    /// `City, Country`
    pub fn label(&self) -> String {
        format!("{}, {}", self.name, self.country)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Condition {
    pub text: String,
    pub code: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AirQuality {
    #[serde(rename = "us-epa-index")]
    pub us_epa_index: Option<i64>,
    pub co: Option<f64>,
    pub no2: Option<f64>,
    pub o3: Option<f64>,
    pub so2: Option<f64>,
    pub pm2_5: Option<f64>,
    pub pm10: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Current {
    #[serde(default)]
    pub last_updated: String,
    pub temp_c: f64,
    #[serde(default)]
    pub feelslike_c: f64,
    #[serde(default)]
    pub wind_kph: f64,
    #[serde(default)]
    pub wind_dir: String,
    #[serde(default)]
    pub humidity: f64,
    #[serde(default)]
    pub cloud: f64,
    #[serde(default)]
    pub pressure_mb: f64,
    #[serde(default)]
    pub uv: f64,
    #[serde(default)]
    pub vis_km: f64,
    pub condition: Option<Condition>,
    pub air_quality: Option<AirQuality>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CurrentResponse {
    pub location: Location,
    pub current: Current,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Astro {
    pub sunrise: Option<String>,
    pub sunset: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct AstronomyBody {
    #[serde(default)]
    astro: Astro,
}

#[derive(Debug, Clone, Deserialize)]
struct AstronomyResponse {
    #[serde(default)]
    astronomy: AstronomyBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DaySummary {
    pub maxtemp_c: f64,
    pub mintemp_c: f64,
    pub maxwind_kph: f64,
    pub totalprecip_mm: f64,
    pub condition: Condition,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastDay {
    pub date: String,
    pub day: DaySummary,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Forecast {
    pub forecastday: Vec<ForecastDay>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Alert {
    pub event: Option<String>,
    pub desc: Option<String>,
    pub effective: Option<String>,
    pub expires: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Alerts {
    #[serde(default)]
    pub alert: Vec<Alert>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastResponse {
    pub location: Location,
    pub forecast: Forecast,
    #[serde(default)]
    pub alerts: Alerts,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchHit {
    pub name: String,
}

/// Endpoints of the weather API used by the bot.
#[derive(Debug, Clone)]
pub struct WeatherApi {
    base_url: String,
    key: String,
}

impl WeatherApi {
    pub fn new(base_url: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            key: key.into(),
        }
    }

    pub fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), endpoint)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        provider: &dyn DataProvider,
        endpoint: &str,
        query: &str,
        extra: &[(&'static str, &str)],
    ) -> Option<T> {
        let mut params = vec![("key", self.key.clone()), ("q", query.to_string())];
        params.extend(extra.iter().map(|(k, v)| (*k, v.to_string())));

        let value = provider.fetch_json(&self.url(endpoint), &params).await?;
        serde_json::from_value(value)
            .map_err(|e| warn!(endpoint, "Unexpected weather payload: {}", e))
            .ok()
    }

    pub async fn current(&self, provider: &dyn DataProvider, city: &str) -> Option<CurrentResponse> {
        self.get(provider, "current.json", city, &[("lang", "ru")]).await
    }

    pub async fn air_quality(&self, provider: &dyn DataProvider, city: &str) -> Option<CurrentResponse> {
        self.get(provider, "current.json", city, &[("aqi", "yes"), ("lang", "ru")])
            .await
    }

    /// Sunrise and sunset; missing data yields empty values.
    pub async fn astronomy(&self, provider: &dyn DataProvider, city: &str) -> Astro {
        self.get::<AstronomyResponse>(provider, "astronomy.json", city, &[("lang", "ru")])
            .await
            .map(|r| r.astronomy.astro)
            .unwrap_or_default()
    }

    pub async fn forecast(&self, provider: &dyn DataProvider, city: &str, days: u8) -> Option<ForecastResponse> {
        let days = days.to_string();
        self.get(provider, "forecast.json", city, &[("days", days.as_str()), ("lang", "ru")])
            .await
    }

    pub async fn alerts(&self, provider: &dyn DataProvider, city: &str) -> Option<ForecastResponse> {
        self.get(
            provider,
            "forecast.json",
            city,
            &[("days", "1"), ("alerts", "yes"), ("lang", "ru")],
        )
        .await
    }

    /// Reverse geocoding: `lat,lon` -> nearest places.
    pub async fn search(&self, provider: &dyn DataProvider, query: &str) -> Option<Vec<SearchHit>> {
        self.get(provider, "search.json", query, &[]).await
    }
}
