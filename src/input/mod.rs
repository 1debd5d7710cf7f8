use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::GzDecoder;

pub mod record;

pub use record::RunRecord;

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub fn open_maybe_gz(path: &Path) -> Result<Box<dyn BufRead>, InputError> {
    let file = File::open(path)?;
    if path.extension().is_some_and(|ext| ext == "gz") {
        Ok(Box::new(BufReader::new(GzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

pub fn load_run_record(path: &Path) -> Result<RunRecord, InputError> {
    let reader = open_maybe_gz(path)?;
    let record: RunRecord = serde_json::from_reader(reader)?;
    validate_record(&record)?;

    tracing::info!(
        path = %path.display(),
        samples = record.route_completion.len(),
        infractions = record.infractions.len(),
        triggers = record.scenario_triggers.len(),
        "run record loaded"
    );
    Ok(record)
}

pub fn validate_record(record: &RunRecord) -> Result<(), InputError> {
    if let Some(idx) = record.route_completion.iter().position(|v| !v.is_finite()) {
        return Err(InputError::InvalidInput(format!(
            "route_completion[{idx}] is not a finite number"
        )));
    }
    if let Some(ev) = record.infractions.iter().find(|ev| !ev.time.is_finite()) {
        return Err(InputError::InvalidInput(format!(
            "infraction {} has a non-finite timestamp",
            ev.kind
        )));
    }
    if record.route_completion.is_empty() {
        tracing::warn!("route_completion is empty; chart will have no data");
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
