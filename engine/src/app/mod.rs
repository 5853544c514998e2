//! Application state: the intent form, the emission sequencer, the wallet
//! connector and everything the renderer reads.
//!
//! The TUI calls the action methods from key handlers, `tick()` once per
//! frame, and `process_wallet_requests().await` after input so connector
//! futures run on the frame loop's task.

use std::time::{Duration, Instant};

use tracing::debug;

use nebula_config::{EmissionTimings, NebulaConfig};
use nebula_core::PresetCycle;
use nebula_types::ProviderKind;
use nebula_types::ui::{FocusField, PanelTab, UiOptions, ViewState};

use crate::sequencer::{EmissionState, Sequencer};
use crate::ui::IntentForm;
use crate::wallet::{DemoWallet, WalletConnector};

const UI_TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Wallet work queued by a key handler, run by `process_wallet_requests`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WalletRequest {
    Connect(ProviderKind),
    Disconnect,
}

pub struct App<W: WalletConnector = DemoWallet> {
    form: IntentForm,
    sequencer: Sequencer,
    wallet: W,
    view: ViewState,
    presets: PresetCycle,
    /// Highlighted row in the wallet modal.
    modal_selected: usize,
    wallet_request: Option<WalletRequest>,
    /// Connector address last mirrored into the wallet field.
    synced_address: Option<String>,
    should_quit: bool,
}

impl App<DemoWallet> {
    /// Build the app from an optional config file, with the demo connector.
    #[must_use]
    pub fn new(config: Option<&NebulaConfig>) -> Self {
        let timings = config.map_or_else(EmissionTimings::default, NebulaConfig::emission_timings);
        let ui_options = config.map_or_else(
            || NebulaConfig::default().ui_options(),
            NebulaConfig::ui_options,
        );
        Self::with_wallet(DemoWallet::new(), timings, ui_options)
    }
}

impl<W: WalletConnector> App<W> {
    #[must_use]
    pub fn with_wallet(wallet: W, timings: EmissionTimings, ui_options: UiOptions) -> Self {
        Self {
            form: IntentForm::default(),
            sequencer: Sequencer::new(timings),
            wallet,
            view: ViewState::new(ui_options),
            presets: PresetCycle::default(),
            modal_selected: 0,
            wallet_request: None,
            synced_address: None,
            should_quit: false,
        }
    }

    // ========================================================================
    // Read access for rendering
    // ========================================================================

    #[must_use]
    pub fn form(&self) -> &IntentForm {
        &self.form
    }

    #[must_use]
    pub fn emission(&self) -> &EmissionState {
        self.sequencer.state()
    }

    #[must_use]
    pub fn wallet(&self) -> &W {
        &self.wallet
    }

    #[must_use]
    pub fn ui_options(&self) -> UiOptions {
        self.view.ui_options
    }

    #[must_use]
    pub fn panel_tab(&self) -> PanelTab {
        self.view.panel_tab
    }

    #[must_use]
    pub fn tick_count(&self) -> usize {
        self.view.tick
    }

    #[must_use]
    pub fn is_wallet_modal_open(&self) -> bool {
        self.wallet.is_modal_open()
    }

    #[must_use]
    pub fn modal_selected(&self) -> usize {
        self.modal_selected
    }

    /// Emit is available once either field has content and no emission is
    /// running.
    #[must_use]
    pub fn can_emit(&self) -> bool {
        self.form.has_any_input() && !self.sequencer.state().is_emitting()
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    // ========================================================================
    // Intent panel actions
    // ========================================================================

    pub fn emit(&mut self) {
        if !self.can_emit() {
            debug!("Emit ignored: no input or emission in progress");
            return;
        }
        let outcome = self
            .sequencer
            .emit(self.form.wallet.text(), self.form.narrative.text());
        if let Ok(score) = outcome {
            debug!(score = score.get(), "Intent emitted");
        }
    }

    /// Clear both fields and all emission output.
    pub fn reset(&mut self) {
        self.form.clear();
        self.sequencer.reset();
    }

    /// Replace the narrative with the next preset.
    pub fn suggest(&mut self) {
        let preset = self.presets.next_preset();
        self.form.narrative.set_text(preset);
    }

    /// Move focus to the other field. Landing on an empty narrative fills
    /// it with the next preset.
    pub fn focus_next(&mut self) {
        self.form.focus = self.form.focus.next();
        if self.form.focus == FocusField::Narrative && self.form.narrative.is_blank() {
            self.suggest();
        }
    }

    #[must_use]
    pub fn focus(&self) -> FocusField {
        self.form.focus
    }

    pub fn enter_char(&mut self, c: char) {
        self.form.focused_mut().enter_char(c);
    }

    pub fn enter_text(&mut self, text: &str) {
        self.form.focused_mut().enter_text(text);
    }

    pub fn delete_char(&mut self) {
        self.form.focused_mut().delete_char();
    }

    pub fn delete_char_forward(&mut self) {
        self.form.focused_mut().delete_char_forward();
    }

    pub fn delete_word_backwards(&mut self) {
        self.form.focused_mut().delete_word_backwards();
    }

    pub fn move_cursor_left(&mut self) {
        self.form.focused_mut().move_cursor_left();
    }

    pub fn move_cursor_right(&mut self) {
        self.form.focused_mut().move_cursor_right();
    }

    pub fn move_cursor_home(&mut self) {
        self.form.focused_mut().move_cursor_home();
    }

    pub fn move_cursor_end(&mut self) {
        self.form.focused_mut().move_cursor_end();
    }

    pub fn toggle_panel_tab(&mut self) {
        self.view.panel_tab = self.view.panel_tab.toggle();
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    // ========================================================================
    // Wallet modal
    // ========================================================================

    pub fn open_wallet_modal(&mut self) {
        self.wallet.open_modal();
        self.modal_selected = 0;
    }

    pub fn close_wallet_modal(&mut self) {
        self.wallet.clear_error();
        self.wallet.close_modal();
    }

    pub fn modal_select_next(&mut self) {
        self.modal_selected = (self.modal_selected + 1) % ProviderKind::ALL.len();
    }

    pub fn modal_select_prev(&mut self) {
        self.modal_selected = self
            .modal_selected
            .checked_sub(1)
            .unwrap_or(ProviderKind::ALL.len() - 1);
    }

    /// Queue a connect through the highlighted provider.
    pub fn modal_confirm(&mut self) {
        let kind = ProviderKind::ALL[self.modal_selected % ProviderKind::ALL.len()];
        self.wallet_request = Some(WalletRequest::Connect(kind));
    }

    /// Queue a disconnect; ignored when nothing is connected.
    pub fn modal_disconnect(&mut self) {
        if self.wallet.is_connected() {
            self.wallet_request = Some(WalletRequest::Disconnect);
        }
    }

    /// Run queued wallet work and mirror the connected address into the
    /// wallet field.
    pub async fn process_wallet_requests(&mut self) {
        match self.wallet_request.take() {
            Some(WalletRequest::Connect(kind)) => {
                if let Err(err) = self.wallet.connect(kind).await {
                    debug!(%err, "Wallet connect rejected");
                }
            }
            Some(WalletRequest::Disconnect) => {
                self.wallet.disconnect();
                self.close_wallet_modal();
            }
            None => {}
        }
        self.sync_wallet_field();
    }

    fn sync_wallet_field(&mut self) {
        let current = self.wallet.address();
        if current == self.synced_address.as_deref() {
            return;
        }
        match current {
            Some(address) => self.form.wallet.set_text(address),
            None => self.form.wallet.clear(),
        }
        self.synced_address = current.map(ToString::to_string);
    }

    // ========================================================================
    // Frame loop
    // ========================================================================

    /// Apply fired emission stages and advance the animation counter.
    pub fn tick(&mut self) {
        self.sequencer.poll();

        let now = Instant::now();

        // Coarse animation cadence (~10Hz), independent of render FPS.
        if now.duration_since(self.view.last_ui_tick) >= UI_TICK_INTERVAL {
            self.view.last_ui_tick = now;
            self.view.tick = self.view.tick.wrapping_add(1);
        }
    }
}

#[cfg(test)]
mod tests;
