//! Service configuration read from the environment.

use serde::{Deserialize, Serialize};

/// Environment variable holding the id given to the first created order.
pub const FIRST_ORDER_ID_VAR: &str = "TAXI_FIRST_ORDER_ID";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TaxiConfig {
    /// Id of the first order; later orders count up from it.
    pub first_order_id: u32,
}

impl TaxiConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unparsable values fall back to the
    /// default with a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup(FIRST_ORDER_ID_VAR) {
            match raw.trim().parse::<u32>() {
                Ok(id) => config.first_order_id = id,
                Err(err) => tracing::warn!(
                    var = FIRST_ORDER_ID_VAR,
                    value = %raw,
                    error = %err,
                    "invalid order id start; using default"
                ),
            }
        }

        config
    }
}
