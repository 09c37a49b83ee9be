//! # udyam-client
//!
//! The demo data client behind the registration form: an in-memory
//! backend stand-in with simulated latency, plus the debouncer that
//! paces auto-save.
//!
//! [`DemoDataClient`] persists one draft, issues submission receipts,
//! and resolves PIN codes and IFSCs against small fixed directories.
//! Pair it with a form session: the session reports lookup triggers and
//! the client answers them.

pub mod client;
pub mod debounce;
mod directory;

pub use client::{
    DemoDataClient, IfscLookup, Latency, PinLookup, SavedDraft, SubmissionReceipt,
};
pub use debounce::Debouncer;
