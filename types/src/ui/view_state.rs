//! View state for rendering.
//!
//! Groups everything the renderer reads that is not part of the emission
//! itself: theme options, the active panel tab and input focus.

use std::time::Instant;

/// UI configuration options derived from config/environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiOptions {
    pub ascii_only: bool,
    pub high_contrast: bool,
    pub reduced_motion: bool,
}

/// Tabs of the validation panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelTab {
    #[default]
    Validator,
    Trace,
}

impl PanelTab {
    #[must_use]
    pub const fn toggle(self) -> Self {
        match self {
            PanelTab::Validator => PanelTab::Trace,
            PanelTab::Trace => PanelTab::Validator,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            PanelTab::Validator => "VALIDATOR",
            PanelTab::Trace => "TRACE",
        }
    }
}

/// Which input field receives typed characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusField {
    #[default]
    Narrative,
    Wallet,
}

impl FocusField {
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            FocusField::Narrative => FocusField::Wallet,
            FocusField::Wallet => FocusField::Narrative,
        }
    }
}

#[derive(Debug)]
pub struct ViewState {
    pub ui_options: UiOptions,
    pub panel_tab: PanelTab,
    /// Coarse animation counter (~10Hz), drives spinners and the waveform.
    pub tick: usize,
    pub last_ui_tick: Instant,
}

impl Default for ViewState {
    fn default() -> Self {
        let now = Instant::now();
        Self {
            ui_options: UiOptions::default(),
            panel_tab: PanelTab::default(),
            tick: 0,
            last_ui_tick: now,
        }
    }
}

impl ViewState {
    #[must_use]
    pub fn new(ui_options: UiOptions) -> Self {
        Self {
            ui_options,
            ..Self::default()
        }
    }
}
