use anyhow::Result;
use clap::Parser;
use reducir::{cli, cli::Cli, dataset, engine, output, params};
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Load the dataset and optional class labels, then apply the `n_obs`
/// truncation to both in lockstep.
fn load_inputs(args: &Cli) -> Result<(dataset::Dataset, Option<Vec<f32>>)> {
    let mut data = dataset::Dataset::from_csv(&args.data)?;

    let mut classes = match &args.classes {
        Some(path) => {
            let labels = dataset::load_classes(path)?;
            dataset::check_labels(&labels, data.rows())?;
            Some(labels)
        }
        None => None,
    };

    data.truncate(args.n_obs);
    if let Some(labels) = &mut classes {
        let keep = dataset::effective_rows(args.n_obs, labels.len());
        labels.truncate(keep);
    }

    Ok((data, classes))
}

fn main() -> Result<()> {
    let args = Cli::parse();

    // Initialize tracing if --debug flag is set
    init_tracing(args.debug);

    let (data, classes) = load_inputs(&args)?;

    let learning_rate = params::resolve_learning_rate(
        args.learning_rate,
        args.optsne,
        data.rows(),
        args.early_exaggeration,
    );

    let params = params::TsneParams {
        n_threads: args.n_threads,
        learning_rate,
        n_iter: args.n_iter,
        n_iter_early_exag: args.n_iter_early_exag,
        perplexity: args.perp,
        theta: args.theta,
        optsne: args.optsne,
        optsne_end: args.optsne_end,
        early_exaggeration: args.early_exaggeration,
        seed: args.seed,
        verbose: args.verbose,
    };
    params.validate(data.rows())?;
    tracing::debug!(
        params = %serde_json::to_string(&params)?,
        rows = data.rows(),
        cols = data.cols(),
        "resolved hyperparameters"
    );

    let verbose = args.verbose > 0;
    if verbose {
        let cores = std::thread::available_parallelism().map_or(1, usize::from);
        println!("Available CPU cores detected: {}", cores);
    }

    let embedding = engine::embed(&data, &params)?;

    output::write_with_fallback(
        &args.outfile,
        Path::new(cli::DEFAULT_RESULT_PATH),
        &embedding,
        classes.as_deref(),
        verbose,
    )?;

    Ok(())
}
