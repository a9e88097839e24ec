//! Declared price-per-million-token schedule used to derive enrichment
//! cost. Defaults mirror a Claude-3.5-Sonnet era schedule, confirmed
//! against the reference implementation's own cost-accounting tests.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    pub price_per_million_input: f64,
    pub price_per_million_output: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            price_per_million_input: 3.0,
            price_per_million_output: 15.0,
        }
    }
}

impl PricingConfig {
    pub fn cost_for(&self, input_tokens: u64, output_tokens: u64) -> f64 {
        (input_tokens as f64) * self.price_per_million_input / 1_000_000.0
            + (output_tokens as f64) * self.price_per_million_output / 1_000_000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_schedule_matches_claude_3_5_sonnet() {
        let pricing = PricingConfig::default();
        assert_eq!(pricing.price_per_million_input, 3.0);
        assert_eq!(pricing.price_per_million_output, 15.0);
    }

    #[test]
    fn cost_formula_is_linear_in_tokens() {
        let pricing = PricingConfig::default();
        let cost = pricing.cost_for(1_000_000, 1_000_000);
        assert!((cost - 18.0).abs() < 1e-9);
    }
}
