#![allow(dead_code)]

use prosaic::config::RewriteConfig;
use prosaic::models::RewriteOutcome;
use prosaic::services::Rewriter;
use rand::rngs::StdRng;
use rand::SeedableRng;

pub fn config(hedging: f64, combine: f64, transitions: f64) -> RewriteConfig {
    RewriteConfig {
        hedging_probability: hedging,
        sentence_combine_probability: combine,
        transition_probability: transitions,
        ..Default::default()
    }
}

/// Hedging only, forced to fire on every eligible sentence.
pub fn hedge_only() -> RewriteConfig {
    config(1.0, 0.0, 0.0)
}

/// Combining only, forced to fire on every eligible pair.
pub fn combine_only() -> RewriteConfig {
    config(0.0, 1.0, 0.0)
}

/// Every gate open.
pub fn everything() -> RewriteConfig {
    config(1.0, 1.0, 1.0)
}

pub fn rewrite(config: RewriteConfig, text: &str, seed: u64) -> RewriteOutcome {
    Rewriter::new(config)
        .expect("valid config")
        .rewrite(text, &mut StdRng::seed_from_u64(seed))
        .expect("rewrite succeeds")
}

/// Hedging forced to a single strategy by zeroing the other weights.
/// `slot` indexes the catalog order (modal-replacement first).
pub fn forced_strategy(slot: usize) -> RewriteConfig {
    let mut weights = [0u32; 5];
    weights[slot] = 1;
    RewriteConfig {
        strategy_weights: weights,
        ..hedge_only()
    }
}
