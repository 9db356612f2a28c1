//! Hyperparameter bundle for the t-SNE engine
//!
//! Mirrors the engine's knobs one-to-one plus the runner-side settings
//! (thread count, verbosity). The only derived value is the learning
//! rate, which falls back to a mode-dependent default when no override
//! is supplied.

use serde::Serialize;
use thiserror::Error;

/// Learning rate used in standard mode when no override is given.
pub const STANDARD_LEARNING_RATE: f32 = 200.0;

/// Validation failures caught before the engine runs
#[derive(Debug, Error)]
pub enum ParamsError {
    #[error("--n_iter must be at least 1")]
    ZeroIterations,

    #[error("--n_iter_early_exag ({early}) cannot exceed --n_iter ({total})")]
    EarlyExagBudget { early: usize, total: usize },

    #[error("--perp must be positive, got {0}")]
    NonPositivePerplexity(f32),

    #[error("--early_exaggeration must be positive, got {0}")]
    NonPositiveExaggeration(f32),

    #[error("Perplexity {perplexity} too large for {rows} observations: need at least {required} rows")]
    PerplexityTooLarge {
        perplexity: f32,
        rows: usize,
        required: usize,
    },
}

/// Flat hyperparameter bundle forwarded to the engine
#[derive(Debug, Clone, Serialize)]
pub struct TsneParams {
    pub n_threads: usize,
    pub learning_rate: f32,
    pub n_iter: usize,
    pub n_iter_early_exag: usize,
    pub perplexity: f32,
    pub theta: f32,
    pub optsne: bool,
    pub optsne_end: f32,
    pub early_exaggeration: f32,
    pub seed: u64,
    pub verbose: u32,
}

impl TsneParams {
    /// Check the bundle against a dataset of `rows` observations.
    pub fn validate(&self, rows: usize) -> Result<(), ParamsError> {
        if self.n_iter == 0 {
            return Err(ParamsError::ZeroIterations);
        }
        if self.n_iter_early_exag > self.n_iter {
            return Err(ParamsError::EarlyExagBudget {
                early: self.n_iter_early_exag,
                total: self.n_iter,
            });
        }
        if self.perplexity <= 0.0 {
            return Err(ParamsError::NonPositivePerplexity(self.perplexity));
        }
        if self.early_exaggeration <= 0.0 {
            return Err(ParamsError::NonPositiveExaggeration(self.early_exaggeration));
        }

        // The engine partitions each point's neighborhood over
        // 3 * perplexity neighbors, so it needs that many other rows.
        let required = (3.0 * self.perplexity).ceil() as usize + 1;
        if rows < required {
            return Err(ParamsError::PerplexityTooLarge {
                perplexity: self.perplexity,
                rows,
                required,
            });
        }
        Ok(())
    }
}

/// Resolve the effective learning rate: an explicit override wins;
/// otherwise standard mode uses the fixed constant and auto-stop mode
/// derives the rate from the dataset size.
pub fn resolve_learning_rate(
    override_rate: Option<f32>,
    optsne: bool,
    rows: usize,
    early_exaggeration: f32,
) -> f32 {
    match override_rate {
        Some(rate) => rate,
        None if optsne => rows as f32 / early_exaggeration,
        None => STANDARD_LEARNING_RATE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> TsneParams {
        TsneParams {
            n_threads: 1,
            learning_rate: 200.0,
            n_iter: 1000,
            n_iter_early_exag: 250,
            perplexity: 30.0,
            theta: 0.5,
            optsne: false,
            optsne_end: 5000.0,
            early_exaggeration: 12.0,
            seed: 42,
            verbose: 25,
        }
    }

    #[test]
    fn test_learning_rate_standard_default() {
        assert_eq!(resolve_learning_rate(None, false, 20_000, 12.0), 200.0);
    }

    #[test]
    fn test_learning_rate_optsne_derived() {
        assert_eq!(resolve_learning_rate(None, true, 24_000, 12.0), 2000.0);
    }

    #[test]
    fn test_learning_rate_override_wins() {
        assert_eq!(resolve_learning_rate(Some(350.0), true, 24_000, 12.0), 350.0);
        assert_eq!(resolve_learning_rate(Some(350.0), false, 24_000, 12.0), 350.0);
    }

    #[test]
    fn test_validate_ok() {
        assert!(params().validate(200).is_ok());
    }

    #[test]
    fn test_validate_zero_iterations() {
        let mut p = params();
        p.n_iter = 0;
        p.n_iter_early_exag = 0;
        assert!(matches!(p.validate(200), Err(ParamsError::ZeroIterations)));
    }

    #[test]
    fn test_validate_early_exag_exceeds_total() {
        let mut p = params();
        p.n_iter = 100;
        p.n_iter_early_exag = 250;
        assert!(matches!(
            p.validate(200),
            Err(ParamsError::EarlyExagBudget {
                early: 250,
                total: 100
            })
        ));
    }

    #[test]
    fn test_validate_non_positive_perplexity() {
        let mut p = params();
        p.perplexity = 0.0;
        assert!(matches!(
            p.validate(200),
            Err(ParamsError::NonPositivePerplexity(_))
        ));
    }

    #[test]
    fn test_validate_perplexity_needs_enough_rows() {
        let p = params();
        // perplexity 30 needs 91 rows
        let err = p.validate(50).unwrap_err();
        match err {
            ParamsError::PerplexityTooLarge { required, rows, .. } => {
                assert_eq!(required, 91);
                assert_eq!(rows, 50);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_params_serialize_for_debug_dump() {
        let json = serde_json::to_string(&params()).unwrap();
        assert!(json.contains("\"perplexity\":30.0"));
        assert!(json.contains("\"n_iter\":1000"));
    }
}
