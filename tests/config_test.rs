use bell_qec::cli::Cli;
use bell_qec::runtime::{self, CancelToken, ExperimentConfig};
use bell_qec::{CorrectionScheme, ErrorWeights, QecError, RunMode};
use clap::Parser;
use std::fs;

fn cli(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("bell-qec").chain(args.iter().copied())).unwrap()
}

#[test]
fn out_of_range_site_fails_for_every_scheme() {
    for scheme in CorrectionScheme::ALL {
        let past_end = (scheme.ancillas_per_group() + 1).to_string();
        let parsed = cli(&[scheme.name(), "-e", past_end.as_str(), "x", "0", "i"]);
        match parsed.experiment_config() {
            Err(QecError::InvalidSite { group: 0, site, max }) => {
                assert_eq!(site, scheme.ancillas_per_group() + 1);
                assert_eq!(max, scheme.ancillas_per_group());
            }
            other => panic!("{scheme}: expected InvalidSite, got {other:?}"),
        }
    }
}

#[test]
fn unknown_gate_fails_for_every_scheme() {
    for scheme in CorrectionScheme::ALL {
        let parsed = cli(&[scheme.name(), "-e", "0", "i", "0", "y"]);
        let err = parsed.experiment_config().unwrap_err();
        assert!(matches!(err, QecError::UnknownGate(ref g) if g == "y"), "{scheme}: {err}");
        assert!(err.is_configuration());
    }
}

#[test]
fn explicit_error_runs_once() {
    let parsed = cli(&["no_correction", "-e", "0", "z", "0", "x", "--shots", "300", "-s", "3"]);
    let report = runtime::run(&parsed.experiment_config().unwrap(), &CancelToken::new()).unwrap();
    assert_eq!(report.runs, 1);
    assert_eq!(report.counts.get("11"), 300);
}

#[test]
fn simple_ancilla_error_is_moved_to_data_qubit() {
    let parsed = cli(&["simple", "-e", "1", "z", "1", "x", "-s", "3"]);
    let report = runtime::run(&parsed.experiment_config().unwrap(), &CancelToken::new()).unwrap();
    assert!(report.by_error.contains_key("[(0, z), (0, x)]"));
    assert_eq!(report.counts.get("00"), 1000);
}

#[test]
fn seeded_probabilistic_runs_repeat() {
    let run = |seed: u64| {
        let mode = RunMode::Probabilistic {
            iterations: 40,
            weights: ErrorWeights::new(0.2, 0.4, 0.4).unwrap(),
        };
        let config = ExperimentConfig::new(CorrectionScheme::NoCorrection, mode)
            .with_shots(50)
            .with_seed(seed);
        runtime::run(&config, &CancelToken::new()).unwrap()
    };
    let a = run(77);
    let b = run(77);
    assert_eq!(a, b);
    assert_eq!(a.counts.total(), 40 * 50);
}

#[test]
fn json_output_written_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("counts.json");
    let config = ExperimentConfig::new(CorrectionScheme::Repetition, RunMode::Exhaustive).with_shots(10);
    let report = runtime::run(&config, &CancelToken::new()).unwrap();

    report.write_json(fs::File::create(&path).unwrap(), false).unwrap();
    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(value, serde_json::json!({ "00": 810 }));

    report.write_json(fs::File::create(&path).unwrap(), true).unwrap();
    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(value["counts"]["00"], 810);
    assert_eq!(value["by_error"].as_object().unwrap().len(), 81);
}

#[test]
fn cancelled_run_stops() {
    let cancel = CancelToken::new();
    cancel.cancel();
    let config = ExperimentConfig::new(CorrectionScheme::Shor, RunMode::Exhaustive);
    assert!(matches!(runtime::run(&config, &cancel), Err(QecError::Cancelled)));
}
