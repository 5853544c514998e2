//! Scorer behavior through the public API.

use nebula_core::{
    compute_intent, format_address, format_block_latency, format_causality_risk,
    format_decentralization,
};
use insta::assert_snapshot;
use nebula_types::Complexity;

use crate::common::ROUTING_NARRATIVE;

#[test]
fn documented_scores() {
    assert_eq!(compute_intent("0x1", "").score.get(), 65);
    assert_eq!(compute_intent("0xabc", &"x".repeat(50)).score.get(), 75);
    assert_eq!(compute_intent("0xabc", &"x".repeat(130)).score.get(), 80);
    assert_eq!(compute_intent("0xabc", ROUTING_NARRATIVE).score.get(), 88);
}

#[test]
fn wallet_prefix_only_matters_when_present() {
    let with = compute_intent("0xabc", "vote").score.get();
    let without = compute_intent("abc", "vote").score.get();
    assert_eq!(with - without, 10);
}

#[test]
fn keyword_groups_count_once_each() {
    let once = compute_intent("", "risk").score.get();
    let twice = compute_intent("", "risk risk liquidation").score.get();
    assert_eq!(once, twice);
}

#[test]
fn derived_metrics_match_display_rounding() {
    let result = compute_intent("0xabc", ROUTING_NARRATIVE);
    let metrics = &result.metrics;
    assert_eq!(metrics.complexity, Complexity::High);
    assert!(metrics.block_latency >= 1);
    assert_eq!(format_decentralization(metrics), "97.6%");
    assert_eq!(format_causality_risk(metrics), "0.15%");
    assert_eq!(format_block_latency(metrics), "2 blocks");
}

#[test]
fn score_command_output() {
    let json = serde_json::to_string_pretty(&compute_intent("0x1", "")).expect("serializes");
    assert_snapshot!(json, @r#"
    {
      "score": 65,
      "mutation": 33,
      "similarity": 65,
      "complexity": "Medium",
      "decentralization": 93.0,
      "causalityRisk": 0.24,
      "blockLatency": 5,
      "validators": [
        70,
        45,
        50,
        95
      ],
      "latencyMs": 55,
      "nodesText": "8/12",
      "trust": 92
    }
    "#);
}

#[test]
fn address_formatting() {
    assert_eq!(
        format_address("0x1234567890abcdef1234"),
        "0x1234...1234"
    );
    assert_eq!(format_address("0xabc"), "0xabc");
}
