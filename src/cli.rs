/// Command-line surface.
///
/// `Cli` only collects raw inputs. [`Cli::experiment_config`] turns them
/// into an [`ExperimentConfig`], which is where mode precedence, weight
/// validation and seeding happen.
use crate::error::{QecError, Result};
use crate::qec::{CorrectionScheme, ErrorAssignment, RunMode};
use crate::runtime::{ExperimentConfig, DEFAULT_SHOTS};
use clap::{ArgAction, Parser};
use rand::Rng;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "bell-qec")]
#[command(about = "Bell state circuit with error correction, simulated exactly")]
pub struct Cli {
    /// The type of correction to use
    #[arg(value_enum)]
    pub correction: CorrectionScheme,

    /// Print the circuit with symbolic error slots and exit
    #[arg(long)]
    pub print_circuit: bool,

    /// Simulate every single-error configuration
    #[arg(long)]
    pub try_all: bool,

    /// Number of random error configurations [default: 1]
    #[arg(short, long)]
    pub iterations: Option<usize>,

    /// Relative weights of the i, x and z errors [default: uniform]
    #[arg(
        short,
        long,
        num_args = 3,
        value_names = ["P_I", "P_X", "P_Z"],
        allow_negative_numbers = true
    )]
    pub probabilities: Option<Vec<f64>>,

    /// Seed for error and shot sampling; drawn at random if omitted
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Apply one explicit error per logical qubit (overrides other modes)
    #[arg(
        short,
        long,
        num_args = 4,
        value_names = ["SITE_1", "GATE_1", "SITE_2", "GATE_2"],
        allow_hyphen_values = true
    )]
    pub error: Option<Vec<String>>,

    /// Write the final histogram to this JSON file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Shots per simulated run
    #[arg(long, default_value_t = DEFAULT_SHOTS)]
    pub shots: u64,

    /// Include the per-error breakdown in the JSON output
    #[arg(long, requires = "output")]
    pub details: bool,

    /// More log output (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn experiment_config(&self) -> Result<ExperimentConfig> {
        let fixed = self
            .error
            .as_deref()
            .map(|coords| ErrorAssignment::parse(coords, self.correction))
            .transpose()?;
        let weights = self
            .probabilities
            .as_deref()
            .map(|p| {
                <[f64; 3]>::try_from(p).map_err(|_| {
                    QecError::InvalidWeights(format!("expected 3 weights, got {}", p.len()))
                })
            })
            .transpose()?;
        let mode = RunMode::resolve(fixed, self.try_all, self.iterations, weights)?;

        let seed = match self.seed {
            Some(seed) => seed,
            None => {
                let seed: u64 = rand::thread_rng().gen();
                info!(seed, "no seed given, rerun with --seed {seed} to reproduce");
                seed
            }
        };
        Ok(ExperimentConfig::new(self.correction, mode)
            .with_shots(self.shots)
            .with_seed(seed))
    }

    /// Default log filter for the requested verbosity.
    pub fn log_directive(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ErrorType, ErrorWeights};
    use crate::qec::SiteError;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("bell-qec").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&["shor"]);
        assert_eq!(cli.correction, CorrectionScheme::Shor);
        assert_eq!(cli.shots, 1000);
        assert!(!cli.try_all && !cli.print_circuit);
        assert_eq!(cli.log_directive(), "info");
    }

    #[test]
    fn test_unknown_scheme_rejected() {
        assert!(Cli::try_parse_from(["bell-qec", "steane"]).is_err());
    }

    #[test]
    fn test_explicit_error_wins() {
        let cli = parse(&["repetition_simple", "--try-all", "-e", "2", "x", "1", "z", "-s", "4"]);
        let config = cli.experiment_config().unwrap();
        let expected = ErrorAssignment::new(
            SiteError::new(2, ErrorType::BitFlip),
            SiteError::new(1, ErrorType::PhaseFlip),
        );
        assert_eq!(config.mode, RunMode::Fixed(expected));
        assert_eq!(config.seed, 4);
    }

    #[test]
    fn test_probabilistic_config() {
        let cli = parse(&["simple", "-i", "7", "-p", "2", "1", "1", "--shots", "50", "-vv"]);
        let config = cli.experiment_config().unwrap();
        assert_eq!(
            config.mode,
            RunMode::Probabilistic {
                iterations: 7,
                weights: ErrorWeights::new(0.5, 0.25, 0.25).unwrap()
            }
        );
        assert_eq!(config.shots, 50);
        assert_eq!(cli.log_directive(), "trace");
    }

    #[test]
    fn test_bad_error_site_is_configuration_error() {
        let cli = parse(&["shor", "-e", "-1", "x", "0", "i"]);
        let err = cli.experiment_config().unwrap_err();
        assert!(matches!(err, QecError::InvalidSiteFormat(_)));
        assert!(err.is_configuration());
    }

    #[test]
    fn test_negative_weight_rejected() {
        let cli = parse(&["no_correction", "-p", "-1", "1", "1"]);
        assert!(matches!(cli.experiment_config(), Err(QecError::InvalidWeights(_))));
    }

    #[test]
    fn test_repeated_probabilities_rejected() {
        let cli = parse(&["no_correction", "-i", "5", "-p", "1", "0", "0", "-p", "0", "1", "0"]);
        assert_eq!(cli.probabilities.as_ref().map(Vec::len), Some(6));
        match cli.experiment_config() {
            Err(QecError::InvalidWeights(msg)) => assert!(msg.contains("got 6"), "{msg}"),
            other => panic!("expected InvalidWeights, got {other:?}"),
        }
    }

    #[test]
    fn test_details_requires_output() {
        assert!(Cli::try_parse_from(["bell-qec", "shor", "--details"]).is_err());
        assert!(Cli::try_parse_from(["bell-qec", "shor", "--details", "-o", "out.json"]).is_ok());
    }
}
