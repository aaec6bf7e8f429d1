use std::path::PathBuf;

use crate::error::PipelineError;

/// What a successfully processed unit produced.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitSummary {
    pub feature_count: usize,
    pub written: Vec<PathBuf>,
}

#[derive(Debug)]
pub struct UnitOutcome {
    pub code: String,
    pub result: Result<UnitSummary, PipelineError>,
}

impl UnitOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Outcomes of a batch run, in processing order.
#[derive(Debug, Default)]
pub struct RunReport {
    pub outcomes: Vec<UnitOutcome>,
}

impl RunReport {
    pub fn record(&mut self, code: &str, result: Result<UnitSummary, PipelineError>) {
        self.outcomes.push(UnitOutcome {
            code: code.to_string(),
            result,
        });
    }

    pub fn succeeded(&self) -> impl Iterator<Item = &UnitOutcome> {
        self.outcomes.iter().filter(|outcome| outcome.is_success())
    }

    pub fn failed(&self) -> impl Iterator<Item = &UnitOutcome> {
        self.outcomes.iter().filter(|outcome| !outcome.is_success())
    }

    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(UnitOutcome::is_success)
    }

    pub fn log_summary(&self) {
        log::info!(
            "{} of {} units processed successfully",
            self.succeeded().count(),
            self.outcomes.len()
        );
        for outcome in self.failed() {
            if let Err(err) = &outcome.result {
                log::warn!("{} failed during {}: {}", outcome.code, err.stage(), err);
            }
        }
    }
}
