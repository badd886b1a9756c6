//! In-memory collaborators for exercising handlers without a network.

use std::collections::HashMap;
use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use crate::bot::dispatcher::AppState;
use crate::bot::transport::{Transport, TransportError};
use crate::config::FloodLimits;
use crate::models::{CallbackEvent, Identity, OutgoingMessage, Peer, TextMessage};
use crate::provider::{DataProvider, WeatherApi};
use crate::session::SessionManager;
use crate::storage::{
    ActivityLog, ActivityRecord, ActivitySummary, CityStore, MeteogramCatalog, MeteogramCity,
    StorageError, summarize,
};

pub const ADMIN: Identity = Identity(1);

/// Records every outbound message and acknowledgement.
#[derive(Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<(Peer, OutgoingMessage)>>,
    acks: Mutex<Vec<String>>,
}

impl RecordingTransport {
    pub fn sent(&self) -> Vec<(Peer, OutgoingMessage)> {
        self.sent.lock().clone()
    }

    pub fn last(&self) -> OutgoingMessage {
        match self.sent.lock().last() {
            Some((_, message)) => message.clone(),
            None => panic!("nothing was sent"),
        }
    }

    pub fn last_text(&self) -> String {
        self.last().text
    }

    pub fn acknowledged(&self) -> Vec<String> {
        self.acks.lock().clone()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, peer: Peer, message: OutgoingMessage) -> Result<(), TransportError> {
        self.sent.lock().push((peer, message));
        Ok(())
    }

    async fn acknowledge_callback(&self, event: &CallbackEvent) -> Result<(), TransportError> {
        self.acks.lock().push(event.event_id.clone());
        Ok(())
    }
}

/// Answers from canned responses keyed by URL; anything else is unavailable.
#[derive(Default)]
pub struct ScriptedProvider {
    json: Mutex<HashMap<String, Value>>,
    text: Mutex<HashMap<String, String>>,
    bytes: Mutex<HashMap<String, Vec<u8>>>,
}

impl ScriptedProvider {
    pub fn json(&self, url: &str, value: Value) {
        self.json.lock().insert(url.to_string(), value);
    }

    pub fn text(&self, url: &str, body: impl Into<String>) {
        self.text.lock().insert(url.to_string(), body.into());
    }

    pub fn bytes(&self, url: &str, body: Vec<u8>) {
        self.bytes.lock().insert(url.to_string(), body);
    }
}

#[async_trait]
impl DataProvider for ScriptedProvider {
    async fn fetch_json(&self, url: &str, _params: &[(&str, String)]) -> Option<Value> {
        self.json.lock().get(url).cloned()
    }

    async fn fetch_text(&self, url: &str) -> Option<String> {
        self.text.lock().get(url).cloned()
    }

    async fn fetch_bytes(&self, url: &str) -> Option<Vec<u8>> {
        self.bytes.lock().get(url).cloned()
    }
}

#[derive(Default)]
pub struct MemoryCities {
    cities: Mutex<HashMap<Identity, String>>,
    fail: AtomicBool,
}

impl MemoryCities {
    pub fn city(&self, identity: Identity) -> Option<String> {
        self.cities.lock().get(&identity).cloned()
    }

    pub fn set_city(&self, identity: Identity, city: &str) {
        self.cities.lock().insert(identity, city.to_string());
    }

    /// Make every later save fail.
    pub fn fail_saves(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl CityStore for MemoryCities {
    async fn load_city(&self, identity: Identity) -> Result<Option<String>, StorageError> {
        Ok(self.city(identity))
    }

    async fn save_city(&self, identity: Identity, city: &str) -> Result<(), StorageError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(StorageError::Io {
                path: "cities.csv".to_string(),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "read-only"),
            });
        }
        self.set_city(identity, city);
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryActivity {
    records: Mutex<Vec<ActivityRecord>>,
    fail: AtomicBool,
}

impl MemoryActivity {
    pub fn actions(&self) -> Vec<(Identity, String)> {
        self.records
            .lock()
            .iter()
            .filter_map(|r| Some((Identity(r.user_id.parse().ok()?), r.action.clone())))
            .collect()
    }

    /// Make every later summary read fail.
    pub fn fail_reads(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl ActivityLog for MemoryActivity {
    async fn log_activity(&self, identity: Identity, display_name: &str, action: &str) -> Result<(), StorageError> {
        let mut records = self.records.lock();
        let user_id = identity.to_string();
        if records.iter().any(|r| r.user_id == user_id && r.action == action) {
            return Ok(());
        }
        records.push(ActivityRecord {
            user_id,
            username: display_name.to_string(),
            action: action.to_string(),
            timestamp: "2024-01-01 00:00:00".to_string(),
        });
        Ok(())
    }

    async fn summary(&self) -> Result<ActivitySummary, StorageError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(StorageError::Io {
                path: "/srv/pogodaradar/user_statistics.csv".to_string(),
                source: io::Error::new(io::ErrorKind::NotFound, "missing"),
            });
        }
        Ok(summarize(self.records.lock().clone()))
    }
}

/// Application state wired to the in-memory collaborators above.
pub struct Harness {
    pub state: AppState,
    pub transport: Arc<RecordingTransport>,
    pub provider: Arc<ScriptedProvider>,
    pub cities: Arc<MemoryCities>,
    pub activity: Arc<MemoryActivity>,
}

impl Harness {
    pub fn new() -> Self {
        let transport = Arc::new(RecordingTransport::default());
        let provider = Arc::new(ScriptedProvider::default());
        let cities = Arc::new(MemoryCities::default());
        let activity = Arc::new(MemoryActivity::default());

        let meteograms = MeteogramCatalog::new(vec![
            MeteogramCity {
                eng_name: "Moscow".to_string(),
                rus_name: "Москва".to_string(),
                url: "https://maps.test/moscow.png".to_string(),
            },
            MeteogramCity {
                eng_name: "Tver".to_string(),
                rus_name: "Тверь".to_string(),
                url: "https://maps.test/tver.png".to_string(),
            },
        ]);

        let state = AppState {
            transport: transport.clone(),
            provider: provider.clone(),
            weather: WeatherApi::new("http://weather.test/v1", "test-key"),
            cities: cities.clone(),
            activity: activity.clone(),
            meteograms: Arc::new(meteograms),
            session: Arc::new(SessionManager::new(
                FloodLimits::default(),
                Some(Duration::from_secs(900)),
            )),
            admin_id: ADMIN,
        };

        Self {
            state,
            transport,
            provider,
            cities,
            activity,
        }
    }
}

/// A text message from `identity` in `peer`.
pub fn text(identity: Identity, peer: Peer, body: &str) -> TextMessage {
    TextMessage {
        identity,
        peer,
        display_name: format!("@user{}", identity.0),
        text: body.to_string(),
        location: None,
    }
}

/// A button press; the event id is `cb-<identity>`.
pub fn callback(identity: Identity, peer: Peer, payload: &str) -> CallbackEvent {
    CallbackEvent {
        identity,
        peer,
        event_id: format!("cb-{}", identity.0),
        payload: payload.to_string(),
    }
}
