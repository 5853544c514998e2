//! Core domain logic for Nebula Field.
//!
//! This crate holds the intent scorer, the fixed demo catalogs the panels
//! render, and small display helpers. Everything here is synchronous and
//! free of IO.

pub mod catalog;
mod display;
pub mod scorer;

pub use catalog::{
    FeedEntry, INTENT_FEED, INTENT_PRESETS, PresetCycle, StepStatus, TRACE_STEPS, TraceStep,
    TrustTier, VALIDATORS, ValidatorProfile, validator_consensus,
};
pub use display::{
    format_address, format_block_latency, format_causality_risk, format_decentralization,
};
pub use scorer::{compute_intent, derive_metrics, score_intent};
