use super::traits::ConfigSection;
use crate::error::{Result, RulevoError};
use serde::{Deserialize, Serialize};

/// Fitness-assessment settings handed through to the evaluator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationConfig {
    /// Episodes played per fitness assessment.
    pub num_rollouts: usize,
    /// Per-step reward discount, in (0, 1].
    pub discount: f64,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            num_rollouts: 30,
            discount: 0.95,
        }
    }
}

impl ConfigSection for EvaluationConfig {
    fn section_name() -> &'static str {
        "evaluation"
    }

    fn validate(&self) -> Result<()> {
        if self.num_rollouts == 0 {
            return Err(RulevoError::Configuration(
                "Rollout count must be at least 1".to_string(),
            ));
        }
        if self.discount <= 0.0 || self.discount > 1.0 {
            return Err(RulevoError::Configuration(
                "Discount must be in (0, 1]".to_string(),
            ));
        }
        Ok(())
    }
}
