//! Unit tests for the app state.

use std::time::Duration;

use tokio::time::sleep;

use super::App;
use crate::wallet::{DemoWallet, WalletConnector};
use nebula_config::EmissionTimings;
use nebula_core::INTENT_PRESETS;
use nebula_types::ui::{FocusField, PanelTab, UiOptions};
use nebula_types::{EmissionPhase, IntentScore, WalletWarning};

fn test_app() -> App {
    App::with_wallet(
        DemoWallet::new(),
        EmissionTimings::default(),
        UiOptions::default(),
    )
}

fn type_into(app: &mut App, field: FocusField, text: &str) {
    while app.focus() != field {
        app.focus_next();
    }
    app.form.focused_mut().clear();
    app.enter_text(text);
}

#[test]
fn emit_requires_some_input() {
    let mut app = test_app();
    assert!(!app.can_emit());
    app.emit();
    assert_eq!(app.emission().phase(), EmissionPhase::Idle);
    assert_eq!(app.emission().warning(), None);
}

#[test]
fn narrative_only_emit_warns_about_missing_wallet() {
    let mut app = test_app();
    type_into(&mut app, FocusField::Narrative, "route it");
    app.emit();
    assert_eq!(app.emission().warning(), Some(WalletWarning::Missing));
    assert!(!app.emission().is_emitting());
}

#[test]
fn unprefixed_wallet_is_rejected_without_touching_metrics() {
    let mut app = test_app();
    let before = app.emission().metrics().clone();
    type_into(&mut app, FocusField::Wallet, "abc123");
    app.emit();
    assert_eq!(app.emission().warning(), Some(WalletWarning::MissingPrefix));
    assert_eq!(app.emission().metrics(), &before);
    assert_eq!(app.emission().intent_score(), IntentScore::BASELINE);
}

#[test]
fn suggest_cycles_presets() {
    let mut app = test_app();
    app.suggest();
    assert_eq!(app.form().narrative.text(), INTENT_PRESETS[0]);
    app.suggest();
    assert_eq!(app.form().narrative.text(), INTENT_PRESETS[1]);
}

#[test]
fn focusing_empty_narrative_injects_preset() {
    let mut app = test_app();
    assert_eq!(app.focus(), FocusField::Narrative);
    app.focus_next();
    assert_eq!(app.focus(), FocusField::Wallet);
    assert!(app.form().narrative.text().is_empty());
    app.focus_next();
    assert_eq!(app.form().narrative.text(), INTENT_PRESETS[0]);

    // A narrative with content is left alone.
    app.focus_next();
    app.focus_next();
    assert_eq!(app.form().narrative.text(), INTENT_PRESETS[0]);
}

#[test]
fn panel_tab_toggles() {
    let mut app = test_app();
    assert_eq!(app.panel_tab(), PanelTab::Validator);
    app.toggle_panel_tab();
    assert_eq!(app.panel_tab(), PanelTab::Trace);
}

#[test]
fn modal_selection_wraps_both_ways() {
    let mut app = test_app();
    app.open_wallet_modal();
    assert!(app.is_wallet_modal_open());
    app.modal_select_prev();
    assert_eq!(app.modal_selected(), 2);
    app.modal_select_next();
    assert_eq!(app.modal_selected(), 0);
}

#[test]
fn reopening_modal_resets_selection() {
    let mut app = test_app();
    app.open_wallet_modal();
    app.modal_select_next();
    app.close_wallet_modal();
    assert!(!app.is_wallet_modal_open());
    app.open_wallet_modal();
    assert_eq!(app.modal_selected(), 0);
}

#[tokio::test(start_paused = true)]
async fn emit_runs_full_sequence_through_tick() {
    let mut app = test_app();
    type_into(&mut app, FocusField::Wallet, "0xabc");
    type_into(
        &mut app,
        FocusField::Narrative,
        "please analyze liquidation risk and suggest a routing path",
    );
    app.emit();
    assert!(app.emission().is_emitting());
    assert!(!app.can_emit());

    sleep(Duration::from_millis(2001)).await;
    app.tick();
    assert_eq!(app.emission().wave_score().map(IntentScore::get), Some(88));
    assert_eq!(app.emission().intent_score().get(), 88);

    sleep(Duration::from_millis(3400)).await;
    app.tick();
    assert_eq!(app.emission().phase(), EmissionPhase::Idle);
    assert!(app.emission().intent_result().is_some());
    // Fields survive the settle.
    assert_eq!(app.form().wallet.text(), "0xabc");
    assert!(app.can_emit());
}

#[tokio::test(start_paused = true)]
async fn reset_clears_fields_and_output() {
    let mut app = test_app();
    type_into(&mut app, FocusField::Wallet, "0x1");
    app.emit();
    sleep(Duration::from_millis(2700)).await;
    app.tick();
    assert!(app.emission().intent_result().is_some());

    app.reset();
    assert!(app.form().wallet.text().is_empty());
    assert!(app.form().narrative.text().is_empty());
    assert!(app.emission().intent_result().is_none());
    assert!(!app.emission().intent_active());

    sleep(Duration::from_millis(5000)).await;
    app.tick();
    assert!(app.emission().intent_result().is_none());
    assert_eq!(app.emission().wave_score(), None);
}

#[tokio::test]
async fn connect_prefills_wallet_field_and_disconnect_clears_it() {
    let mut app = test_app();
    app.open_wallet_modal();
    app.modal_confirm();
    app.process_wallet_requests().await;

    let address = app
        .wallet()
        .address()
        .map(ToString::to_string)
        .expect("connected");
    assert_eq!(app.form().wallet.text(), address);
    assert!(!app.is_wallet_modal_open());

    app.open_wallet_modal();
    app.modal_disconnect();
    app.process_wallet_requests().await;
    assert!(!app.wallet().is_connected());
    assert!(app.form().wallet.text().is_empty());
    assert!(!app.is_wallet_modal_open());
}

#[tokio::test]
async fn failed_connect_keeps_modal_open_with_error() {
    let mut app = test_app();
    app.open_wallet_modal();
    app.modal_select_prev();
    app.modal_confirm();
    app.process_wallet_requests().await;

    assert!(app.is_wallet_modal_open());
    assert!(app.wallet().error().is_some());
    assert!(!app.wallet().is_connected());

    app.close_wallet_modal();
    assert!(app.wallet().error().is_none());
}

#[tokio::test]
async fn disconnect_without_connection_is_ignored() {
    let mut app = test_app();
    type_into(&mut app, FocusField::Wallet, "0xmanual");
    app.modal_disconnect();
    app.process_wallet_requests().await;
    assert_eq!(app.form().wallet.text(), "0xmanual");
}
