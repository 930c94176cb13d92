//! Performance evaluation for the taskdesk dashboards.
//!
//! The [`performance`] module holds the pure scoring engine and the snapshot decoding that feeds
//! it; the remaining modules carry the configuration, telemetry, and error plumbing shared with the
//! `taskdesk-api` service.

pub mod config;
pub mod error;
pub mod performance;
pub mod telemetry;
