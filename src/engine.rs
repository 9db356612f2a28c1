//! Boundary to the external t-SNE engine
//!
//! The embedding itself is delegated to the `bhtsne` crate; this module
//! only marshals the hyperparameter bundle into the engine's builder,
//! bounds its parallelism with a dedicated rayon pool, and reshapes the
//! flat result into ordered 2-D points.

use crate::dataset::Dataset;
use crate::params::TsneParams;
use anyhow::{Context, Result};
use tracing::{debug, warn};

/// Output dimensionality; the runner always embeds into the plane.
const EMBEDDING_DIM: u8 = 2;

/// Early-exaggeration factor baked into the backend.
const BACKEND_EXAGGERATION: f32 = 12.0;

/// Ordered 2-D embedding, one point per input observation
#[derive(Debug, Clone, PartialEq)]
pub struct Embedding {
    points: Vec<[f32; 2]>,
}

impl Embedding {
    /// Reshape the engine's flat `[x0, y0, x1, y1, ...]` output.
    fn from_flat(flat: Vec<f32>) -> Self {
        let points = flat.chunks_exact(2).map(|xy| [xy[0], xy[1]]).collect();
        Self { points }
    }

    pub fn points(&self) -> &[[f32; 2]] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Run the external engine over the dataset with the given bundle.
///
/// The engine parallelizes over rayon, so installing it inside a pool of
/// `n_threads` workers bounds its concurrency; `n_threads == 0` hands the
/// sizing decision back to rayon (all cores).
pub fn embed(dataset: &Dataset, params: &TsneParams) -> Result<Embedding> {
    report_unforwardable(params);

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(params.n_threads)
        .build()
        .context("Failed to build the engine thread pool")?;

    let samples = dataset.row_slices();
    let flat = pool.install(|| {
        let mut tsne = bhtsne::tSNE::new(&samples);
        tsne.embedding_dim(EMBEDDING_DIM)
            .epochs(params.n_iter)
            .perplexity(params.perplexity)
            .learning_rate(params.learning_rate)
            // The momentum switch is coupled to the end of early
            // exaggeration.
            .stop_lying_epoch(params.n_iter_early_exag)
            .momentum_switch_epoch(params.n_iter_early_exag);

        if params.theta > 0.0 {
            tsne.barnes_hut(params.theta, |a, b| euclidean(a, b)).embedding()
        } else {
            tsne.exact(|a, b| euclidean(a, b)).embedding()
        }
    });

    Ok(Embedding::from_flat(flat))
}

fn euclidean(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f32>()
        .sqrt()
}

/// Surface the knobs the backend has no counterpart for. They keep their
/// runner-side effects (the opt-SNE learning-rate derivation has already
/// happened by this point) but cannot change the engine's behavior.
fn report_unforwardable(params: &TsneParams) {
    if params.optsne {
        warn!(
            threshold = f64::from(params.optsne_end),
            n_iter = params.n_iter,
            "backend has no auto-stop heuristic; running the fixed iteration budget"
        );
    }
    if (params.early_exaggeration - BACKEND_EXAGGERATION).abs() > f32::EPSILON {
        warn!(
            requested = f64::from(params.early_exaggeration),
            backend = f64::from(BACKEND_EXAGGERATION),
            "backend uses a fixed early-exaggeration factor"
        );
    }
    debug!(
        seed = params.seed,
        "backend does not expose seeding; embedding initialization is unseeded"
    );
}
