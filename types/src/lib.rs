//! Core domain types for Nebula Field.
//!
//! This crate contains pure domain types with no IO, no async, and minimal dependencies.
//! Everything here can be used from any layer of the application.

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory

pub mod ui;

use serde::Serialize;
use thiserror::Error;

// ============================================================================
// Intent Score
// ============================================================================

/// Upper bound of the intent score scale.
pub const MAX_INTENT_SCORE: u8 = 100;

/// An intent score, always within `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct IntentScore(u8);

impl IntentScore {
    /// Score shown before any emission has been revealed.
    pub const BASELINE: Self = Self(55);

    /// Clamp a raw (possibly out of range) tally into the score scale.
    #[must_use]
    pub fn clamped(raw: i32) -> Self {
        Self(raw.clamp(0, i32::from(MAX_INTENT_SCORE)) as u8)
    }

    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for IntentScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Node complexity bucket derived from the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Complexity {
    Low,
    Medium,
    High,
}

impl Complexity {
    #[must_use]
    pub fn from_score(score: IntentScore) -> Self {
        match score.get() {
            s if s > 75 => Complexity::High,
            s if s > 50 => Complexity::Medium,
            _ => Complexity::Low,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Complexity::Low => "Low",
            Complexity::Medium => "Medium",
            Complexity::High => "High",
        }
    }
}

/// Display metrics shown by the dashboard panels.
///
/// Every field is a function of the score it was derived from; the panels
/// never edit them independently.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentMetrics {
    pub mutation: u8,
    pub similarity: u8,
    pub complexity: Complexity,
    /// Percentage, one decimal place.
    pub decentralization: f64,
    /// Percentage, two decimal places.
    pub causality_risk: f64,
    pub block_latency: u8,
    pub validators: [u8; 4],
    pub latency_ms: u8,
    pub nodes_text: &'static str,
    pub trust: u8,
}

impl IntentMetrics {
    /// Metrics displayed before the first emission completes.
    #[must_use]
    pub fn baseline() -> Self {
        Self {
            mutation: 32,
            similarity: 68,
            complexity: Complexity::High,
            decentralization: 96.2,
            causality_risk: 0.01,
            block_latency: 2,
            validators: [98, 84, 82, 94],
            latency_ms: 12,
            nodes_text: "8/12",
            trust: 96,
        }
    }
}

impl Default for IntentMetrics {
    fn default() -> Self {
        Self::baseline()
    }
}

/// Output of the intent scorer: the score and everything derived from it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreResult {
    pub score: IntentScore,
    #[serde(flatten)]
    pub metrics: IntentMetrics,
}

/// Result object published at the end of an emission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentResult {
    pub score: IntentScore,
    pub summary_lines: Vec<String>,
}

const SUMMARY_LINES: [&str; 2] = [
    "Signal synchronized with intent analysis.",
    "Ecosystem response updated.",
];

impl IntentResult {
    #[must_use]
    pub fn synchronized(score: IntentScore) -> Self {
        Self {
            score,
            summary_lines: SUMMARY_LINES.iter().map(ToString::to_string).collect(),
        }
    }
}

// ============================================================================
// Wallet Address
// ============================================================================

/// Required prefix for an emit-able wallet address.
pub const WALLET_PREFIX: &str = "0x";

/// Validation outcome for the wallet field, shown verbatim to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WalletWarning {
    #[error("Please enter a wallet address (starting with 0x).")]
    Missing,
    #[error("Wallet address must start with 0x.")]
    MissingPrefix,
}

/// A trimmed wallet address that starts with [`WALLET_PREFIX`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct WalletAddress(String);

impl WalletAddress {
    pub fn parse(raw: &str) -> Result<Self, WalletWarning> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(WalletWarning::Missing);
        }
        if !trimmed.starts_with(WALLET_PREFIX) {
            return Err(WalletWarning::MissingPrefix);
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for WalletAddress {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Wallet providers offered by the connect modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum ProviderKind {
    #[default]
    MetaMask,
    SomniaWallet,
    WalletConnect,
}

impl ProviderKind {
    pub const ALL: [Self; 3] = [Self::MetaMask, Self::SomniaWallet, Self::WalletConnect];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            ProviderKind::MetaMask => "MetaMask",
            ProviderKind::SomniaWallet => "Somnia Wallet",
            ProviderKind::WalletConnect => "WalletConnect",
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            ProviderKind::MetaMask => "Browser extension wallet",
            ProviderKind::SomniaWallet => "Native Somnia wallet",
            ProviderKind::WalletConnect => "Scan with a mobile wallet",
        }
    }
}

// ============================================================================
// Emission
// ============================================================================

/// Where an emission currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EmissionPhase {
    #[default]
    Idle,
    /// Wallet shape is being checked; never observable after `emit` returns.
    Validating,
    /// Scored internally, nothing revealed yet.
    Emitting,
    /// Score and metrics revealed.
    Scored,
    /// Emitting visuals finished; the active glow is winding down.
    Settled,
}

impl EmissionPhase {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            EmissionPhase::Idle => "IDLE",
            EmissionPhase::Validating => "VALIDATING",
            EmissionPhase::Emitting => "EMITTING",
            EmissionPhase::Scored => "SCORED",
            EmissionPhase::Settled => "SETTLED",
        }
    }
}

/// Generation counter attached to every emission.
///
/// Timer events carrying an epoch other than the current one are stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Epoch(u64);

impl Epoch {
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

// ============================================================================
// Tests
// ============================================================================
