//! Intent scorer.
//!
//! Maps a (wallet, narrative) pair to an [`IntentScore`] and the display
//! metrics derived from it. Total: every input, including empty strings,
//! yields a clamped result.

use nebula_types::{
    Complexity, IntentMetrics, IntentScore, MAX_INTENT_SCORE, ScoreResult, WALLET_PREFIX,
};

const BASE_SCORE: i32 = 55;
const WALLET_PREFIX_BONUS: i32 = 10;

const LONG_NARRATIVE_CHARS: usize = 40;
const LONG_NARRATIVE_BONUS: i32 = 10;
const VERY_LONG_NARRATIVE_CHARS: usize = 120;
const VERY_LONG_NARRATIVE_BONUS: i32 = 5;

/// Keyword groups; a group contributes its bonus once if any keyword matches.
const KEYWORD_BONUSES: [(&[&str], i32); 3] = [
    (&["risk", "liquidation"], 5),
    (&["route", "routing", "path"], 8),
    (&["governance", "vote"], 6),
];

/// Score an intent and derive its display metrics.
#[must_use]
pub fn compute_intent(wallet: &str, narrative: &str) -> ScoreResult {
    let score = score_intent(wallet, narrative);
    ScoreResult {
        score,
        metrics: derive_metrics(score),
    }
}

/// The raw scoring tally, clamped to `0..=100`.
#[must_use]
pub fn score_intent(wallet: &str, narrative: &str) -> IntentScore {
    let wallet = wallet.trim();
    let narrative = narrative.trim().to_lowercase();

    let mut tally = BASE_SCORE;

    if wallet.starts_with(WALLET_PREFIX) {
        tally += WALLET_PREFIX_BONUS;
    }

    let length = narrative.chars().count();
    if length > LONG_NARRATIVE_CHARS {
        tally += LONG_NARRATIVE_BONUS;
    }
    if length > VERY_LONG_NARRATIVE_CHARS {
        tally += VERY_LONG_NARRATIVE_BONUS;
    }

    for (keywords, bonus) in KEYWORD_BONUSES {
        if keywords.iter().any(|keyword| narrative.contains(keyword)) {
            tally += bonus;
        }
    }

    IntentScore::clamped(tally)
}

/// Derive every panel metric from a score.
#[must_use]
pub fn derive_metrics(score: IntentScore) -> IntentMetrics {
    let s = u32::from(score.get());

    let block_latency = div_round(110 - s, 10).max(1);

    let validators = [
        (s + 5).min(99),
        s.saturating_sub(20).max(10),
        s.saturating_sub(15).max(5),
        (110 - 3 * block_latency).min(100),
    ];

    let nodes_text = match s {
        s if s > 70 => "9/12",
        s if s > 50 => "8/12",
        _ => "6/12",
    };

    IntentMetrics {
        mutation: div_round(s, 2) as u8,
        similarity: score.get(),
        complexity: Complexity::from_score(score),
        // 80 + 0.2 * s, in tenths
        decentralization: f64::from(800 + 2 * s) / 10.0,
        // 0.5 - 0.004 * s, in thousandths, rounded to hundredths
        causality_risk: f64::from(div_round(500 - 4 * s, 10)) / 100.0,
        block_latency: block_latency as u8,
        validators: validators.map(|v| v as u8),
        latency_ms: (120 - s).max(4) as u8,
        nodes_text,
        trust: (70 + div_round(s, 3)).min(u32::from(MAX_INTENT_SCORE)) as u8,
    }
}

/// Integer division rounding half away from zero (operands are non-negative).
fn div_round(numerator: u32, denominator: u32) -> u32 {
    (2 * numerator + denominator) / (2 * denominator)
}

#[cfg(test)]
mod tests {
    use super::{compute_intent, derive_metrics, div_round};
    use nebula_types::{Complexity, IntentScore};

    fn score_of(wallet: &str, narrative: &str) -> u8 {
        compute_intent(wallet, narrative).score.get()
    }

    #[test]
    fn prefixed_wallet_alone_scores_65() {
        assert_eq!(score_of("0x1", ""), 65);
    }

    #[test]
    fn empty_input_scores_base() {
        assert_eq!(score_of("", ""), 55);
        assert_eq!(score_of("   ", "   "), 55);
    }

    #[test]
    fn length_bonuses_stack() {
        assert_eq!(score_of("0xabc", &"x".repeat(40)), 65);
        assert_eq!(score_of("0xabc", &"x".repeat(50)), 75);
        assert_eq!(score_of("0xabc", &"x".repeat(120)), 75);
        assert_eq!(score_of("0xabc", &"x".repeat(130)), 80);
    }

    #[test]
    fn length_ignores_surrounding_whitespace() {
        let padded = format!("   {}   ", "x".repeat(40));
        assert_eq!(score_of("0xabc", &padded), 65);
    }

    #[test]
    fn keyword_narrative_scores_88() {
        let narrative = "please analyze liquidation risk and suggest a routing path";
        assert_eq!(narrative.chars().count(), 58);
        assert_eq!(score_of("0xabc", narrative), 88);
    }

    #[test]
    fn keywords_are_case_insensitive_and_counted_once_per_group() {
        assert_eq!(score_of("0x", "RISK"), 70);
        assert_eq!(score_of("0x", "risk liquidation risk"), 70);
        assert_eq!(score_of("0x", "vote on governance"), 71);
        assert_eq!(score_of("", "path"), 63);
    }

    #[test]
    fn all_bonuses_clamp_to_100() {
        let narrative = format!(
            "risk routing governance {}",
            "lorem ipsum dolor sit amet ".repeat(6)
        );
        // 55 + 10 + 15 + 5 + 8 + 6 = 99; still within range
        assert_eq!(score_of("0xdeadbeef", &narrative), 99);
    }

    #[test]
    fn metrics_for_65() {
        let m = derive_metrics(IntentScore::clamped(65));
        assert_eq!(m.mutation, 33);
        assert_eq!(m.similarity, 65);
        assert_eq!(m.complexity, Complexity::Medium);
        assert_eq!(format!("{:.1}", m.decentralization), "93.0");
        assert_eq!(format!("{:.2}", m.causality_risk), "0.24");
        assert_eq!(m.block_latency, 5);
        assert_eq!(m.validators, [70, 45, 50, 95]);
        assert_eq!(m.latency_ms, 55);
        assert_eq!(m.nodes_text, "8/12");
        assert_eq!(m.trust, 92);
    }

    #[test]
    fn metrics_for_88() {
        let m = derive_metrics(IntentScore::clamped(88));
        assert_eq!(m.mutation, 44);
        assert_eq!(m.complexity, Complexity::High);
        assert_eq!(format!("{:.1}", m.decentralization), "97.6");
        assert_eq!(format!("{:.2}", m.causality_risk), "0.15");
        assert_eq!(m.block_latency, 2);
        assert_eq!(m.validators, [93, 68, 73, 100]);
        assert_eq!(m.nodes_text, "9/12");
        assert_eq!(m.trust, 99);
    }

    #[test]
    fn metrics_at_extremes() {
        let top = derive_metrics(IntentScore::clamped(100));
        assert_eq!(top.block_latency, 1);
        assert_eq!(top.validators, [99, 80, 85, 100]);
        assert_eq!(top.trust, 100);
        assert_eq!(top.latency_ms, 20);
        assert_eq!(format!("{:.2}", top.causality_risk), "0.10");

        let bottom = derive_metrics(IntentScore::clamped(0));
        assert_eq!(bottom.block_latency, 11);
        assert_eq!(bottom.validators, [5, 10, 5, 77]);
        assert_eq!(bottom.complexity, Complexity::Low);
        assert_eq!(bottom.nodes_text, "6/12");
        assert_eq!(format!("{:.1}", bottom.decentralization), "80.0");
        assert_eq!(format!("{:.2}", bottom.causality_risk), "0.50");
    }

    #[test]
    fn derived_invariants_hold_for_every_score() {
        for raw in 0..=100 {
            let score = IntentScore::clamped(raw);
            let m = derive_metrics(score);
            assert!(m.block_latency >= 1);
            assert!(m.latency_ms >= 4);
            assert!(m.trust <= 100);
            assert_eq!(
                i32::from(m.validators[3]),
                (110 - 3 * i32::from(m.block_latency)).min(100)
            );
            let expected = match raw {
                r if r > 75 => Complexity::High,
                r if r > 50 => Complexity::Medium,
                _ => Complexity::Low,
            };
            assert_eq!(m.complexity, expected);
        }
    }

    #[test]
    fn div_round_rounds_half_up() {
        assert_eq!(div_round(45, 10), 5);
        assert_eq!(div_round(44, 10), 4);
        assert_eq!(div_round(65, 2), 33);
        assert_eq!(div_round(0, 3), 0);
    }
}
