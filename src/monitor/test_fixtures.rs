//! Shared mocks for pipeline and monitor tests.
//!
//! Every mock is a cheap clone over shared state, so a test can keep one
//! copy for assertions after moving another into a [`Pipeline`].

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use super::Pipeline;
use crate::display::{IconRef, IconSink, IconTheme};
use crate::lookup::{AddressResolver, GeoInfo, GeoResolver, LookupFailure};
use crate::notify::{Notification, Notifier};

/// Address resolver replaying scripted results.
///
/// When the script runs out the last successful address is repeated.
#[derive(Debug, Clone, Default)]
pub struct ScriptedAddress {
    script: Arc<Mutex<VecDeque<Result<String, LookupFailure>>>>,
    last: Arc<Mutex<Option<String>>>,
    calls: Arc<Mutex<usize>>,
}

impl ScriptedAddress {
    pub fn new(script: Vec<Result<&str, LookupFailure>>) -> Self {
        let script = script
            .into_iter()
            .map(|r| r.map(ToString::to_string))
            .collect();
        Self {
            script: Arc::new(Mutex::new(script)),
            ..Self::default()
        }
    }

    pub fn returning(addresses: &[&str]) -> Self {
        Self::new(addresses.iter().map(|a| Ok(*a)).collect())
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

impl AddressResolver for ScriptedAddress {
    async fn resolve(&self) -> Result<String, LookupFailure> {
        *self.calls.lock().unwrap() += 1;
        let next = self.script.lock().unwrap().pop_front();
        match next {
            Some(Ok(addr)) => {
                *self.last.lock().unwrap() = Some(addr.clone());
                Ok(addr)
            }
            Some(Err(e)) => Err(e),
            None => self
                .last
                .lock()
                .unwrap()
                .clone()
                .ok_or_else(|| LookupFailure::Malformed("script exhausted".to_string())),
        }
    }
}

/// Geo resolver replaying scripted results and recording requested addresses.
///
/// When the script runs out every lookup returns empty geo info.
#[derive(Debug, Clone, Default)]
pub struct ScriptedGeo {
    script: Arc<Mutex<VecDeque<Result<GeoInfo, LookupFailure>>>>,
    requested: Arc<Mutex<Vec<String>>>,
}

impl ScriptedGeo {
    pub fn new(script: Vec<Result<GeoInfo, LookupFailure>>) -> Self {
        Self {
            script: Arc::new(Mutex::new(script.into())),
            ..Self::default()
        }
    }

    pub fn returning(geo: &[(&str, &str)]) -> Self {
        Self::new(
            geo.iter()
                .map(|(name, code)| Ok(GeoInfo::new(*name, code)))
                .collect(),
        )
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

impl GeoResolver for ScriptedGeo {
    async fn resolve(&self, address: &str) -> Result<GeoInfo, LookupFailure> {
        self.requested.lock().unwrap().push(address.to_string());
        let next = self.script.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Ok(GeoInfo::default()))
    }
}

/// Notifier recording every notification.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    seen: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingNotifier {
    pub fn notifications(&self) -> Vec<Notification> {
        self.seen.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    async fn notify(&self, notification: &Notification) {
        self.seen.lock().unwrap().push(notification.clone());
    }
}

/// Icon sink recording every icon set.
#[derive(Debug, Clone, Default)]
pub struct RecordingIcons {
    seen: Arc<Mutex<Vec<IconRef>>>,
}

impl RecordingIcons {
    pub fn icons(&self) -> Vec<IconRef> {
        self.seen.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<IconRef> {
        self.seen.lock().unwrap().last().cloned()
    }
}

impl IconSink for RecordingIcons {
    fn set_icon(&self, icon: &IconRef) {
        self.seen.lock().unwrap().push(icon.clone());
    }
}

/// A pipeline over the given mocks plus handles to observe them.
pub struct Harness {
    pub address: ScriptedAddress,
    pub geo: ScriptedGeo,
    pub notifier: RecordingNotifier,
    pub icons: RecordingIcons,
}

pub type MockPipeline = Pipeline<ScriptedAddress, ScriptedGeo, RecordingNotifier, RecordingIcons>;

impl Harness {
    pub fn new(address: ScriptedAddress, geo: ScriptedGeo) -> Self {
        Self {
            address,
            geo,
            notifier: RecordingNotifier::default(),
            icons: RecordingIcons::default(),
        }
    }

    pub fn pipeline(&self) -> MockPipeline {
        Pipeline::new(
            self.address.clone(),
            self.geo.clone(),
            self.notifier.clone(),
            self.icons.clone(),
        )
        .with_theme(IconTheme::default())
    }
}

/// Lets detached notification tasks run before a test inspects them.
pub async fn settle() {
    for _ in 0..4 {
        tokio::task::yield_now().await;
    }
}

/// A failure the address or geo service could produce.
pub fn unavailable() -> LookupFailure {
    LookupFailure::Status {
        status: http::StatusCode::SERVICE_UNAVAILABLE,
        body: None,
    }
}
