//! Engine for Nebula Field - emission sequencing and app state.
//!
//! This crate contains the App state machine without TUI dependencies.

mod app;
pub mod sequencer;
mod ui;
pub mod wallet;

pub use app::App;
pub use sequencer::{EmissionState, RevealStage, Sequencer, TimerEvent, Transition};
pub use ui::{DraftInput, IntentForm};
pub use wallet::{DemoWallet, WalletConnector, WalletError};

pub use nebula_config::{EmissionTimings, NebulaConfig};
pub use nebula_types::ui::{
    FocusField, PanelTab, UiOptions,
};
pub use nebula_types::{
    Complexity, EmissionPhase, Epoch, IntentMetrics, IntentResult, IntentScore, ProviderKind,
    ScoreResult, WalletWarning,
};
