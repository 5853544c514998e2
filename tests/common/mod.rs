//! Shared test utilities and fixtures.

#![allow(dead_code)]

use std::time::Duration;

use nebula_engine::{App, DemoWallet, EmissionTimings, FocusField, UiOptions};

/// Narrative that scores 88 with any `0x` wallet.
pub const ROUTING_NARRATIVE: &str = "please analyze liquidation risk and suggest a routing path";

/// App with the demo wallet, default timings and plain UI options.
pub fn demo_app() -> App {
    App::with_wallet(
        DemoWallet::new(),
        EmissionTimings::default(),
        UiOptions::default(),
    )
}

/// Focus `field`, clear it and type `text`.
pub fn fill(app: &mut App, field: FocusField, text: &str) {
    while app.focus() != field {
        app.focus_next();
    }
    app.move_cursor_end();
    while !app.form().focused().text().is_empty() {
        app.delete_char();
    }
    app.enter_text(text);
}

/// Advance paused tokio time and let the app apply fired stages.
pub async fn advance(app: &mut App, by: Duration) {
    tokio::time::sleep(by).await;
    app.tick();
}

pub fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}
