//! Text formatting shared by the TUI and the CLI.

use nebula_types::IntentMetrics;

/// Shorten an address to `0x1234...abcd`; short inputs pass through.
#[must_use]
pub fn format_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 10 {
        return address.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

#[must_use]
pub fn format_decentralization(metrics: &IntentMetrics) -> String {
    format!("{:.1}%", metrics.decentralization)
}

#[must_use]
pub fn format_causality_risk(metrics: &IntentMetrics) -> String {
    format!("{:.2}%", metrics.causality_risk)
}

#[must_use]
pub fn format_block_latency(metrics: &IntentMetrics) -> String {
    if metrics.block_latency == 1 {
        "1 block".to_string()
    } else {
        format!("{} blocks", metrics.block_latency)
    }
}
