//! CLI argument parsing for Reducir

use clap::Parser;
use std::path::PathBuf;

/// Fixed fallback destination used when `--outfile` is not writable.
pub const DEFAULT_RESULT_PATH: &str = "tsne_results.csv";

#[derive(Parser, Debug)]
#[command(name = "reducir")]
#[command(version)]
#[command(about = "Barnes-Hut t-SNE embedding runner", long_about = None)]
pub struct Cli {
    /// Path to the input dataset (comma-delimited, one header row)
    #[arg(long = "data", value_name = "PATH")]
    pub data: PathBuf,

    /// Optional class-label file (comma-delimited, one header row, one label per observation)
    #[arg(long = "classes", value_name = "PATH")]
    pub classes: Option<PathBuf>,

    /// Number of engine threads (0 = all available cores)
    #[arg(long = "n_threads", value_name = "N", default_value = "1")]
    pub n_threads: usize,

    /// Learning rate; when omitted it is derived from the dataset size and mode
    #[arg(long = "learning_rate", value_name = "RATE")]
    pub learning_rate: Option<f32>,

    /// Number of iterations out of the total to spend in early exaggeration
    #[arg(long = "n_iter_early_exag", value_name = "N", default_value = "250")]
    pub n_iter_early_exag: usize,

    /// Total number of iterations
    #[arg(long = "n_iter", value_name = "N", default_value = "1000")]
    pub n_iter: usize,

    /// Perplexity of the conditional distribution
    #[arg(long = "perp", value_name = "PERP", default_value = "30.0")]
    pub perp: f32,

    /// Barnes-Hut angle; values <= 0 select the exact method
    #[arg(long = "theta", value_name = "THETA", default_value = "0.5")]
    pub theta: f32,

    /// Request opt-SNE auto-stop mode (affects learning-rate derivation)
    #[arg(long = "optsne")]
    pub optsne: bool,

    /// Auto-stop threshold divisor: halt when (KLDn-1 - KLDn) < KLDn / X
    #[arg(long = "optsne_end", value_name = "X", default_value = "5000")]
    pub optsne_end: f32,

    /// Early exaggeration factor
    #[arg(long = "early_exaggeration", value_name = "FACTOR", default_value = "12")]
    pub early_exaggeration: f32,

    /// How many leading observations to use (-1 = all)
    #[arg(
        long = "n_obs",
        value_name = "N",
        default_value = "-1",
        allow_hyphen_values = true
    )]
    pub n_obs: i64,

    /// Random seed requested for the engine
    #[arg(long = "seed", value_name = "SEED", default_value = "42")]
    pub seed: u64,

    /// Progress interval in iterations; 0 silences status output
    #[arg(long = "verbose", value_name = "N", default_value = "25")]
    pub verbose: u32,

    /// Relative or absolute filepath at which to save the results CSV
    #[arg(long = "outfile", value_name = "PATH", default_value = DEFAULT_RESULT_PATH)]
    pub outfile: PathBuf,

    /// Enable tracing diagnostics on stderr
    #[arg(long = "debug")]
    pub debug: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_requires_data() {
        let result = Cli::try_parse_from(["reducir"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["reducir", "--data", "in.csv"]);
        assert_eq!(cli.n_threads, 1);
        assert_eq!(cli.learning_rate, None);
        assert_eq!(cli.n_iter_early_exag, 250);
        assert_eq!(cli.n_iter, 1000);
        assert_eq!(cli.perp, 30.0);
        assert_eq!(cli.theta, 0.5);
        assert!(!cli.optsne);
        assert_eq!(cli.optsne_end, 5000.0);
        assert_eq!(cli.early_exaggeration, 12.0);
        assert_eq!(cli.n_obs, -1);
        assert_eq!(cli.seed, 42);
        assert_eq!(cli.verbose, 25);
        assert_eq!(cli.outfile, PathBuf::from(DEFAULT_RESULT_PATH));
        assert!(!cli.debug);
    }

    #[test]
    fn test_cli_optsne_flag() {
        let cli = Cli::parse_from(["reducir", "--data", "in.csv", "--optsne"]);
        assert!(cli.optsne);
    }

    #[test]
    fn test_cli_learning_rate_override() {
        let cli = Cli::parse_from(["reducir", "--data", "in.csv", "--learning_rate", "150.5"]);
        assert_eq!(cli.learning_rate, Some(150.5));
    }

    #[test]
    fn test_cli_negative_n_obs() {
        let cli = Cli::parse_from(["reducir", "--data", "in.csv", "--n_obs", "-1"]);
        assert_eq!(cli.n_obs, -1);
    }

    #[test]
    fn test_cli_classes_optional() {
        let cli = Cli::parse_from(["reducir", "--data", "in.csv"]);
        assert!(cli.classes.is_none());

        let cli = Cli::parse_from(["reducir", "--data", "in.csv", "--classes", "labels.csv"]);
        assert_eq!(cli.classes, Some(PathBuf::from("labels.csv")));
    }

    #[test]
    fn test_cli_outfile_custom() {
        let cli = Cli::parse_from(["reducir", "--data", "in.csv", "--outfile", "out/embed.csv"]);
        assert_eq!(cli.outfile, PathBuf::from("out/embed.csv"));
    }
}
