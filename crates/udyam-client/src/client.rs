//! # Demo Data Client
//!
//! [`DemoDataClient`] stands in for the portal backend during demos and
//! local development. It keeps one draft in memory, accepts submissions,
//! and answers PIN/IFSC reference lookups from fixed directories.
//!
//! Every call sleeps for a configurable [`Latency`] before answering, so
//! a UI wired to it exhibits realistic spinners and debounce behavior.
//! Construct with [`DemoDataClient::instant`] in tests to skip the
//! delays.

use std::time::Duration;

use chrono::{DateTime, Datelike, Utc};
use parking_lot::RwLock;
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::directory::{IFSC_DIRECTORY, PIN_DIRECTORY};

// ─── Latency ─────────────────────────────────────────────────────────

/// Per-operation simulated latency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Latency {
    /// Delay before a draft save completes.
    pub save: Duration,
    /// Delay before a draft load completes.
    pub load: Duration,
    /// Delay before a submission completes.
    pub submit: Duration,
    /// Delay before a PIN lookup answers.
    pub pin_lookup: Duration,
    /// Delay before an IFSC lookup answers.
    pub ifsc_lookup: Duration,
}

impl Default for Latency {
    /// The portal's original delays.
    fn default() -> Self {
        Self {
            save: Duration::from_millis(500),
            load: Duration::from_millis(200),
            submit: Duration::from_millis(2000),
            pin_lookup: Duration::from_millis(800),
            ifsc_lookup: Duration::from_millis(1000),
        }
    }
}

impl Latency {
    /// No delays at all.
    pub fn none() -> Self {
        Self {
            save: Duration::ZERO,
            load: Duration::ZERO,
            submit: Duration::ZERO,
            pin_lookup: Duration::ZERO,
            ifsc_lookup: Duration::ZERO,
        }
    }
}

// ─── Responses ───────────────────────────────────────────────────────

/// A draft as held by the client: the raw form values plus when they
/// were saved, for "last saved" displays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedDraft {
    /// The flat form value map.
    pub data: Map<String, Value>,
    /// When the draft was stored.
    pub saved_at: DateTime<Utc>,
}

/// Receipt returned for an accepted submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    /// Acknowledgement reference, `UR{year}{6 digits}`.
    pub reference: String,
}

/// Result of a PIN code lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinLookup {
    /// State the PIN belongs to.
    pub state: String,
    /// District the PIN belongs to.
    pub district: String,
}

/// Result of an IFSC lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IfscLookup {
    /// Bank the code belongs to.
    pub bank: String,
    /// Branch the code identifies.
    pub branch: String,
}

// ─── Client ──────────────────────────────────────────────────────────

/// In-memory stand-in for the portal backend.
///
/// Thread-safe behind `&self`; share it across tasks with an `Arc`. The
/// draft slot lock is never held across an await point.
#[derive(Debug)]
pub struct DemoDataClient {
    latency: Latency,
    draft: RwLock<Option<SavedDraft>>,
}

impl Default for DemoDataClient {
    fn default() -> Self {
        Self::new()
    }
}

impl DemoDataClient {
    /// A client with the portal's original latencies.
    pub fn new() -> Self {
        Self::with_latency(Latency::default())
    }

    /// A client with custom latencies.
    pub fn with_latency(latency: Latency) -> Self {
        Self {
            latency,
            draft: RwLock::new(None),
        }
    }

    /// A client that answers immediately, for tests.
    pub fn instant() -> Self {
        Self::with_latency(Latency::none())
    }

    /// Store `data` as the current draft, replacing any earlier one.
    /// Returns the save timestamp.
    pub async fn save_draft(&self, data: Map<String, Value>) -> DateTime<Utc> {
        tokio::time::sleep(self.latency.save).await;
        let saved_at = Utc::now();
        let fields = data.len();
        *self.draft.write() = Some(SavedDraft { data, saved_at });
        tracing::debug!(fields, "draft saved");
        saved_at
    }

    /// The saved draft values, or `None` when nothing was saved.
    pub async fn load_draft(&self) -> Option<Map<String, Value>> {
        tokio::time::sleep(self.latency.load).await;
        self.draft.read().as_ref().map(|d| d.data.clone())
    }

    /// The full saved draft including its timestamp. Immediate; meant
    /// for "last saved at" displays, not the restore path.
    pub fn saved_draft(&self) -> Option<SavedDraft> {
        self.draft.read().clone()
    }

    /// Drop the saved draft, if any.
    pub fn clear_draft(&self) {
        *self.draft.write() = None;
    }

    /// Accept a submission: clears the draft and returns a receipt with
    /// a fresh acknowledgement reference.
    pub async fn submit(&self, data: &Map<String, Value>) -> SubmissionReceipt {
        tokio::time::sleep(self.latency.submit).await;
        self.clear_draft();
        let serial = rand::thread_rng().gen_range(0..1_000_000);
        let reference = make_reference(Utc::now().year(), serial);
        tracing::info!(fields = data.len(), %reference, "demo submission accepted");
        SubmissionReceipt { reference }
    }

    /// Resolve a PIN code to its state and district.
    pub async fn lookup_pin(&self, pin: &str) -> Option<PinLookup> {
        tokio::time::sleep(self.latency.pin_lookup).await;
        PIN_DIRECTORY
            .iter()
            .find(|(known, _, _)| *known == pin)
            .map(|(_, state, district)| PinLookup {
                state: state.to_string(),
                district: district.to_string(),
            })
    }

    /// Resolve an IFSC to its bank and branch. Case-insensitive, since
    /// the canonical IFSC form is uppercase.
    pub async fn lookup_ifsc(&self, ifsc: &str) -> Option<IfscLookup> {
        tokio::time::sleep(self.latency.ifsc_lookup).await;
        let wanted = ifsc.to_ascii_uppercase();
        IFSC_DIRECTORY
            .iter()
            .find(|(known, _, _)| *known == wanted)
            .map(|(_, bank, branch)| IfscLookup {
                bank: bank.to_string(),
                branch: branch.to_string(),
            })
    }
}

/// `UR{year}{serial:06}`, the acknowledgement reference format.
fn make_reference(year: i32, serial: u32) -> String {
    format!("UR{year}{serial:06}")
}

// ─── Tests ───────────────────────────────────────────────────────────
