use lancard_core::DrillOrder;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DrillConfig {
    /// Challenge selection policy
    pub order: DrillOrder,
    /// Fixed RNG seed, random when unset
    pub seed: Option<u64>,
}

impl DrillConfig {
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let order = lookup("LANCARD_DRILL_ORDER")
            .and_then(|v| match v.trim().parse() {
                Ok(order) => Some(order),
                Err(e) => {
                    tracing::warn!("Ignoring LANCARD_DRILL_ORDER: {}", e);
                    None
                }
            })
            .unwrap_or_default();

        let seed = lookup("LANCARD_SEED").and_then(|v| v.trim().parse().ok());

        Self { order, seed }
    }
}
