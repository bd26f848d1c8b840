//! Tunables for a field evaluation.

use serde::{Deserialize, Serialize};

/// Options that change how a batch is evaluated, but never what is computed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationConfig {
    /// Minimum number of batch entries handled by one rayon task.
    ///
    /// Small batches are cheaper to evaluate on the calling thread, so this should be large
    /// enough to amortise the cost of splitting the work.
    pub batch_size: usize,

    /// Relative tolerance used to decide that an observer lies on an edge, a wire or
    /// the supporting line of a current segment, where the field is set to zero.
    pub edge_tolerance: f64,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        EvaluationConfig {
            batch_size: 1024,
            edge_tolerance: 1.0e-12,
        }
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: EvaluationConfig = serde_yaml::from_str("batch_size: 16").unwrap();
        assert_eq!(config.batch_size, 16);
        assert_eq!(config.edge_tolerance, EvaluationConfig::default().edge_tolerance);
    }
}
