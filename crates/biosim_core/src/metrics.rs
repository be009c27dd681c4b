//! Logging setup and run-level counters.
//!
//! Each year already logs its own summary; [`RunMetrics`] accumulates those
//! summaries so a driver can report totals for a whole run.

use std::time::{Duration, Instant};

use tracing_subscriber::EnvFilter;

use crate::world::YearSummary;

/// Totals over the years of one run.
#[derive(Debug, Clone)]
pub struct RunMetrics {
    years: u64,
    births: u64,
    deaths: u64,
    eaten: u64,
    peak_population: usize,
    last: Option<YearSummary>,
    step_time: Duration,
    start_time: Instant,
}

impl Default for RunMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl RunMetrics {
    #[must_use]
    pub fn new() -> Self {
        Self {
            years: 0,
            births: 0,
            deaths: 0,
            eaten: 0,
            peak_population: 0,
            last: None,
            step_time: Duration::ZERO,
            start_time: Instant::now(),
        }
    }

    /// Records a completed year with the time its step took.
    pub fn record_year(&mut self, summary: &YearSummary, duration: Duration) {
        self.years += 1;
        self.births += summary.births as u64;
        self.deaths += summary.deaths as u64;
        self.eaten += summary.eaten as u64;
        self.peak_population = self.peak_population.max(summary.population);
        self.step_time += duration;
        self.last = Some(*summary);

        tracing::debug!(
            year = summary.year,
            population = summary.population,
            duration_us = duration.as_micros() as u64,
            "Step timing"
        );
    }

    #[must_use]
    pub fn years(&self) -> u64 {
        self.years
    }

    #[must_use]
    pub fn births(&self) -> u64 {
        self.births
    }

    #[must_use]
    pub fn deaths(&self) -> u64 {
        self.deaths
    }

    #[must_use]
    pub fn eaten(&self) -> u64 {
        self.eaten
    }

    #[must_use]
    pub fn peak_population(&self) -> usize {
        self.peak_population
    }

    #[must_use]
    pub fn last(&self) -> Option<&YearSummary> {
        self.last.as_ref()
    }

    /// Mean wall time of one yearly step.
    #[must_use]
    pub fn mean_step(&self) -> Duration {
        if self.years == 0 {
            return Duration::ZERO;
        }
        self.step_time / self.years as u32
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Logs the run totals.
    pub fn log_totals(&self, label: &str) {
        tracing::info!(
            run = label,
            years = self.years,
            births = self.births,
            deaths = self.deaths,
            eaten = self.eaten,
            peak_population = self.peak_population,
            final_population = self.last.map_or(0, |s| s.population),
            mean_step_us = self.mean_step().as_micros() as u64,
            "Run complete"
        );
    }
}

/// Initialize tracing subscriber for logging.
///
/// `RUST_LOG` takes precedence over `level` when set.
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_env_filter(filter)
            .with_target(false)
            .finish(),
    )
    .ok();
}
