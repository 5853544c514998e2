//! Fixed demo content: narrative presets, the validator roster, the trace
//! pipeline and the intent feed.

/// Narrative prompts offered by the "Suggest" action, in cycling order.
pub const INTENT_PRESETS: [&str; 10] = [
    "Simulate liquidation risk for this address over the next 30 blocks.",
    "Suggest optimal routing pathways for this wallet cluster based on live intent activity.",
    "Analyze validator behavior for anomalous patterns across this node set.",
    "Forecast entropy spikes based on current transaction velocity.",
    "Evaluate exit-risk probability for this address cluster.",
    "Generate a risk-adjusted pathway for near-term state transitions.",
    "Analyze cross-shard propagation consistency for this wallet group.",
    "Predict trust-weighted node relationships over the next 20 blocks.",
    "Model Somnia-native gas impact if this wallet initiates multi-intent bursts.",
    "Score validator quorum resilience after proposed governance fork.",
];

/// Round-robin cursor over [`INTENT_PRESETS`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PresetCycle {
    index: usize,
}

impl PresetCycle {
    /// Return the preset under the cursor and advance, wrapping at the end.
    pub fn next_preset(&mut self) -> &'static str {
        let preset = INTENT_PRESETS[self.index % INTENT_PRESETS.len()];
        self.index = (self.index + 1) % INTENT_PRESETS.len();
        tracing::debug!(index = self.index, "Advanced preset cycle");
        preset
    }

    /// The placeholder shown in an empty narrative field.
    #[must_use]
    pub const fn placeholder() -> &'static str {
        INTENT_PRESETS[0]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatorProfile {
    pub id: &'static str,
    pub name: &'static str,
    /// Trust shown when no metric is available for this slot.
    pub fallback_trust: u8,
    pub comment: &'static str,
    pub kind: &'static str,
}

impl ValidatorProfile {
    /// Numeric suffix of the id, used as the badge.
    #[must_use]
    pub fn badge(&self) -> &'static str {
        self.id.split_once('-').map_or(self.id, |(_, n)| n)
    }
}

pub const VALIDATORS: [ValidatorProfile; 4] = [
    ValidatorProfile {
        id: "VAL-13",
        name: "Obsidian Guard",
        fallback_trust: 98,
        comment: "Intent normalized cleanly. Protocol adheres to strict causality.",
        kind: "Strict",
    },
    ValidatorProfile {
        id: "VAL-07",
        name: "Chaos Weaver",
        fallback_trust: 41,
        comment: "High liquidation volatility detected. Entropy exceeds safe threshold.",
        kind: "Risk",
    },
    ValidatorProfile {
        id: "VAL-22",
        name: "Aether Stream",
        fallback_trust: 82,
        comment: "Two alternate safe routes remain available. Latency optimal.",
        kind: "Flow",
    },
    ValidatorProfile {
        id: "VAL-99",
        name: "Silent Witness",
        fallback_trust: 94,
        comment: "State transition is atomic. Consistently stable.",
        kind: "Stability",
    },
];

/// Color bucket for a validator's trust percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrustTier {
    High,
    Mid,
    Low,
}

impl TrustTier {
    #[must_use]
    pub fn from_trust(trust: u8) -> Self {
        if trust > 90 {
            TrustTier::High
        } else if trust < 60 {
            TrustTier::Low
        } else {
            TrustTier::Mid
        }
    }
}

/// Pair each roster entry with the trust published for its slot.
#[must_use]
pub fn validator_consensus(trust: &[u8]) -> Vec<(ValidatorProfile, u8, TrustTier)> {
    VALIDATORS
        .iter()
        .enumerate()
        .map(|(i, profile)| {
            let value = trust.get(i).copied().unwrap_or(profile.fallback_trust);
            (*profile, value, TrustTier::from_trust(value))
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Complete,
    Processing,
    Pending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceStep {
    pub label: &'static str,
    pub desc: &'static str,
    pub status: StepStatus,
}

pub const TRACE_STEPS: [TraceStep; 5] = [
    TraceStep {
        label: "INGESTION",
        desc: "Secure payload tokenization.",
        status: StepStatus::Complete,
    },
    TraceStep {
        label: "GENESIS FORK",
        desc: "Isolated state cloning.",
        status: StepStatus::Complete,
    },
    TraceStep {
        label: "PARALLEL SIMULATION",
        desc: "Causality branch execution.",
        status: StepStatus::Complete,
    },
    TraceStep {
        label: "VALIDATION",
        desc: "Consensus & risk assessment.",
        status: StepStatus::Processing,
    },
    TraceStep {
        label: "COMMITMENT",
        desc: "Finalizing transaction hash.",
        status: StepStatus::Pending,
    },
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeedEntry {
    pub address: &'static str,
    pub kind: &'static str,
    pub score: f32,
    /// Seconds ago.
    pub age_secs: u32,
}

pub const INTENT_FEED: [FeedEntry; 6] = [
    FeedEntry { address: "0x7a89...8f2b", kind: "Swap Intent", score: 4.8, age_secs: 5 },
    FeedEntry { address: "0x1c34...c4d0", kind: "Liquidity Rebalance", score: 4.9, age_secs: 7 },
    FeedEntry { address: "0x9e01...a2f7", kind: "Governance Vote", score: 4.7, age_secs: 12 },
    FeedEntry { address: "0x3f5b...d8e1", kind: "Risk Hedge Protocol", score: 4.9, age_secs: 18 },
    FeedEntry { address: "0x5d2a...b6c9", kind: "Cross-Chain Bridge", score: 4.6, age_secs: 24 },
    FeedEntry { address: "0x6e7c...f3a4", kind: "Lending Pool Deposit", score: 4.8, age_secs: 30 },
];
