/// Experiment runner.
///
/// Runs are planned lazily from the seed alone: each planned run draws its
/// error assignment and then its own shot seed from one master `StdRng`.
/// The plan is consumed in chunks of [`PLAN_CHUNK`] runs, and each chunk
/// goes through two passes:
///
///   1. every assignment not simulated yet is simulated once, in parallel,
///      to an exact [`Distribution`] that is kept for later chunks
///   2. shots are drawn for every run of the chunk in plan order, each from
///      an RNG seeded with that run's shot seed
///
/// Memory stays bounded by the chunk size and the number of distinct
/// assignments, whatever the iteration count. The result depends only on
/// the configuration, never on thread count or scheduling. Cancellation is
/// checked before every simulation and every sampling step.
use super::report::RunReport;
use crate::core::{Distribution, Simulator};
use crate::error::{QecError, Result};
use crate::qec::{exhaustive, CorrectionScheme, ErrorAssignment, ErrorSampler, RunMode};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

/// Shots drawn per run unless configured otherwise.
pub const DEFAULT_SHOTS: u64 = 1000;

/// Planned runs taken from the plan per execution pass.
pub const PLAN_CHUNK: usize = 4096;

// ── Configuration ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct ExperimentConfig {
    pub scheme: CorrectionScheme,
    pub mode: RunMode,
    pub shots: u64,
    pub seed: u64,
}

impl ExperimentConfig {
    pub fn new(scheme: CorrectionScheme, mode: RunMode) -> Self {
        Self { scheme, mode, shots: DEFAULT_SHOTS, seed: 0 }
    }

    pub fn with_shots(mut self, shots: u64) -> Self {
        self.shots = shots;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// Shared cancellation flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<()> {
        if self.is_cancelled() { Err(QecError::Cancelled) } else { Ok(()) }
    }
}

// ── Planning ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannedRun {
    pub assignment: ErrorAssignment,
    pub shot_seed: u64,
}

/// Where a plan takes its assignments from.
#[derive(Debug)]
enum Source {
    Listed(std::vec::IntoIter<ErrorAssignment>),
    Sampled { sampler: ErrorSampler, remaining: usize },
}

/// Ordered runs of one experiment, produced on demand.
#[derive(Debug)]
pub struct Plan {
    master: StdRng,
    source: Source,
}

impl Iterator for Plan {
    type Item = PlannedRun;

    fn next(&mut self) -> Option<PlannedRun> {
        let assignment = match &mut self.source {
            Source::Listed(assignments) => assignments.next()?,
            Source::Sampled { sampler, remaining } => {
                if *remaining == 0 {
                    return None;
                }
                *remaining -= 1;
                sampler.sample(&mut self.master)
            }
        };
        Some(PlannedRun { assignment, shot_seed: self.master.gen() })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = match &self.source {
            Source::Listed(assignments) => assignments.len(),
            Source::Sampled { remaining, .. } => *remaining,
        };
        (n, Some(n))
    }
}

impl ExactSizeIterator for Plan {}

/// Ordered runs for `config`.
pub fn plan(config: &ExperimentConfig) -> Result<Plan> {
    let source = match &config.mode {
        RunMode::Fixed(assignment) => Source::Listed(vec![assignment.resolve_for(config.scheme)?].into_iter()),
        RunMode::Exhaustive => Source::Listed(exhaustive(config.scheme).into_iter()),
        RunMode::Probabilistic { iterations, weights } => Source::Sampled {
            sampler: ErrorSampler::new(config.scheme, weights)?,
            remaining: *iterations,
        },
    };
    Ok(Plan { master: StdRng::seed_from_u64(config.seed), source })
}

// ── Execution ─────────────────────────────────────────────────────────────

/// Simulate every assignment in `runs` that `cache` does not hold yet.
fn simulate_missing(
    scheme: CorrectionScheme,
    runs: &[PlannedRun],
    cache: &mut HashMap<ErrorAssignment, Distribution>,
    cancel: &CancelToken,
) -> Result<()> {
    let mut seen = HashSet::new();
    let missing: Vec<ErrorAssignment> = runs
        .iter()
        .map(|r| r.assignment)
        .filter(|a| !cache.contains_key(a) && seen.insert(*a))
        .collect();
    if missing.is_empty() {
        return Ok(());
    }
    debug!(missing = missing.len(), cached = cache.len(), "simulating configurations");

    let simulated: Vec<(ErrorAssignment, Distribution)> = missing
        .par_iter()
        .map(|assignment| {
            cancel.check()?;
            let circuit = scheme.circuit(assignment)?;
            let distribution = Simulator::execute(&circuit)?;
            debug!(
                %assignment,
                outcomes = ?distribution.outcomes(),
                "configuration simulated"
            );
            Ok((*assignment, distribution))
        })
        .collect::<Result<_>>()?;
    cache.extend(simulated);
    Ok(())
}

/// Run the experiment described by `config`.
pub fn run(config: &ExperimentConfig, cancel: &CancelToken) -> Result<RunReport> {
    info!(
        scheme = %config.scheme,
        mode = %config.mode,
        shots = config.shots,
        seed = config.seed,
        "starting experiment"
    );
    let mut runs = plan(config)?;
    let mut distributions = HashMap::new();
    let mut report = RunReport::new(config.scheme, config.shots);
    let mut chunk = Vec::with_capacity(PLAN_CHUNK.min(runs.len()));

    loop {
        chunk.clear();
        chunk.extend(runs.by_ref().take(PLAN_CHUNK));
        if chunk.is_empty() {
            break;
        }
        simulate_missing(config.scheme, &chunk, &mut distributions, cancel)?;
        for run in &chunk {
            cancel.check()?;
            let distribution = &distributions[&run.assignment];
            let mut rng = StdRng::seed_from_u64(run.shot_seed);
            let histogram = distribution.sample(config.shots, &mut rng)?;
            report.record(&run.assignment, &histogram);
        }
        debug!(runs = report.runs, "chunk sampled");
    }

    info!(
        runs = report.runs,
        configurations = report.configurations(),
        total = report.counts.total(),
        "experiment finished"
    );
    Ok(report)
}
