//! Wallet connector flows through the app.

use nebula_core::format_address;
use nebula_engine::{App, DemoWallet, EmissionTimings, UiOptions, WalletConnector};

use crate::common::demo_app;

#[tokio::test]
async fn connected_address_prefills_and_can_emit() {
    let mut app = demo_app();
    app.open_wallet_modal();
    app.modal_select_next();
    app.modal_confirm();
    app.process_wallet_requests().await;

    let address = app.wallet().address().expect("connected").to_string();
    assert!(address.starts_with("0x"));
    assert_eq!(address.len(), 42);
    assert_eq!(app.form().wallet.text(), address);
    assert_eq!(format_address(&address).len(), 13);
    assert!(app.can_emit());
}

#[tokio::test]
async fn walletconnect_error_is_shown_until_modal_closes() {
    let mut app = demo_app();
    app.open_wallet_modal();
    app.modal_select_prev();
    app.modal_confirm();
    app.process_wallet_requests().await;

    assert_eq!(
        app.wallet().error(),
        Some("WalletConnect is not available in this demo. Choose MetaMask or Somnia Wallet.")
    );
    assert!(app.form().wallet.text().is_empty());

    app.close_wallet_modal();
    assert_eq!(app.wallet().error(), None);
}

#[tokio::test(start_paused = true)]
async fn slow_handshake_completes_before_prefill() {
    let mut app = App::with_wallet(
        DemoWallet::with_handshake(std::time::Duration::from_millis(250)),
        EmissionTimings::default(),
        UiOptions::default(),
    );
    app.open_wallet_modal();
    app.modal_confirm();
    let start = tokio::time::Instant::now();
    app.process_wallet_requests().await;
    assert!(start.elapsed() >= std::time::Duration::from_millis(250));
    assert!(app.wallet().is_connected());
}
