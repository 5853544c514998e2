//! Emission sequencing driven through `App`, with paused tokio time.

use nebula_engine::{
    EmissionPhase, EmissionTimings, FocusField, IntentScore, Sequencer, WalletWarning,
};

use crate::common::{ROUTING_NARRATIVE, advance, demo_app, fill, ms};

#[tokio::test(start_paused = true)]
async fn stages_reveal_in_order() {
    let mut app = demo_app();
    fill(&mut app, FocusField::Wallet, "0xabc");
    fill(&mut app, FocusField::Narrative, ROUTING_NARRATIVE);
    app.emit();
    assert_eq!(app.emission().phase(), EmissionPhase::Emitting);
    assert_eq!(app.emission().wave_score(), None);

    advance(&mut app, ms(1999)).await;
    assert_eq!(app.emission().wave_score(), None);

    advance(&mut app, ms(2)).await;
    assert_eq!(app.emission().phase(), EmissionPhase::Scored);
    assert_eq!(app.emission().wave_score().map(IntentScore::get), Some(88));
    assert!(app.emission().intent_result().is_none());

    advance(&mut app, ms(600)).await;
    assert!(app.emission().intent_result().is_some());
    assert!(app.emission().is_emitting());

    advance(&mut app, ms(1900)).await;
    assert!(!app.emission().is_emitting());
    assert!(app.emission().intent_active());

    advance(&mut app, ms(800)).await;
    assert!(!app.emission().intent_active());
    assert_eq!(app.emission().phase(), EmissionPhase::Idle);
}

#[tokio::test(start_paused = true)]
async fn reset_mid_emission_leaves_no_stale_output() {
    let mut app = demo_app();
    fill(&mut app, FocusField::Wallet, "0xabc");
    app.emit();
    advance(&mut app, ms(1000)).await;
    app.reset();

    advance(&mut app, ms(10_000)).await;
    let state = app.emission();
    assert_eq!(state.wave_score(), None);
    assert!(state.intent_result().is_none());
    assert!(!state.is_emitting());
    assert!(!state.intent_active());
}

#[tokio::test(start_paused = true)]
async fn reemit_supersedes_running_emission() {
    let mut sequencer = Sequencer::new(EmissionTimings::default());
    sequencer.emit("0xabc", ROUTING_NARRATIVE).expect("valid");
    tokio::time::sleep(ms(1500)).await;
    sequencer.poll();

    let first_epoch = sequencer.state().epoch();
    sequencer.emit("0xabc", "vote").expect("valid");
    assert!(sequencer.state().epoch() > first_epoch);

    // The first emission would have revealed at 2000ms.
    tokio::time::sleep(ms(600)).await;
    sequencer.poll();
    assert_eq!(sequencer.state().wave_score(), None);

    tokio::time::sleep(ms(1500)).await;
    sequencer.poll();
    assert_eq!(sequencer.state().wave_score().map(IntentScore::get), Some(71));
}

#[tokio::test(start_paused = true)]
async fn rejected_wallet_never_starts_emission() {
    let mut app = demo_app();
    fill(&mut app, FocusField::Wallet, "abc");
    let before = app.emission().metrics().clone();
    app.emit();
    assert_eq!(app.emission().warning(), Some(WalletWarning::MissingPrefix));
    assert_eq!(app.emission().phase(), EmissionPhase::Idle);

    advance(&mut app, ms(6000)).await;
    assert_eq!(app.emission().metrics(), &before);
    assert_eq!(app.emission().wave_score(), None);
}

#[tokio::test(start_paused = true)]
async fn custom_timings_are_honored() {
    let timings = EmissionTimings {
        reveal_score: ms(100),
        reveal_result: ms(200),
        end_emitting: ms(300),
        settle: ms(50),
    };
    let mut sequencer = Sequencer::new(timings);
    sequencer.emit("0x1", "").expect("valid");

    tokio::time::sleep(ms(101)).await;
    sequencer.poll();
    assert_eq!(sequencer.state().wave_score().map(IntentScore::get), Some(65));

    tokio::time::sleep(ms(300)).await;
    sequencer.poll();
    assert_eq!(sequencer.state().phase(), EmissionPhase::Idle);
    assert_eq!(sequencer.pending_timers(), 0);
}
