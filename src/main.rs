use bell_qec::cli::Cli;
use bell_qec::runtime::{self, CancelToken, RunReport};
use bell_qec::{Circuit, CorrectionScheme, QecError};
use clap::Parser;
use std::fs::File;
use std::io::BufWriter;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.log_directive());

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            if e.is_configuration() {
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

/// Logs go to stderr so stdout only carries results.
fn init_tracing(default_directive: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> Result<(), QecError> {
    if cli.print_circuit {
        info!("printing circuit, simulation skipped");
        print_circuit(cli.correction, &cli.correction.symbolic_circuit());
        return Ok(());
    }

    let config = cli.experiment_config()?;
    let report = runtime::run(&config, &CancelToken::new())?;
    print_report(&report);

    if let Some(path) = &cli.output {
        info!(path = %path.display(), details = cli.details, "writing histogram");
        let writer = BufWriter::new(File::create(path)?);
        report.write_json(writer, cli.details)?;
    }
    Ok(())
}

// ── Output ────────────────────────────────────────────────────────────────

fn print_circuit(scheme: CorrectionScheme, circuit: &Circuit) {
    println!("━━━ {scheme} ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    print!("{circuit}");
    println!();
    println!(
        "Circuit: {} gate(s) | {} measurement(s) | {} qubit(s)",
        circuit.gate_count(),
        circuit.measure_count(),
        circuit.num_qubits()
    );
}

fn print_report(report: &RunReport) {
    println!("{report}");
    if report.configurations() > 1 {
        let corrected = report
            .by_error
            .values()
            .filter(|h| h.total() > 0 && h.get("00") == h.total())
            .count();
        println!();
        println!(
            "Bell state recovered in {corrected} of {} configuration(s)",
            report.configurations()
        );
    }
}
