use crate::constants::OPTIMIZED_DIR;
use crate::error::{ConvertError, Result};
use crate::logger;
use crate::options::TranscodeOptions;
use crate::stats::FileStatRecord;
use crate::transcode;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::{Path, PathBuf};

/// Failure detail for one skipped file.
#[derive(Debug)]
pub struct FailedFile {
    pub path: PathBuf,
    pub error: ConvertError,
}

/// One file's outcome. Failures are data, not control flow: the batch
/// collects them alongside the successes in input order.
pub type FileOutcome = std::result::Result<FileStatRecord, FailedFile>;

/// Output path for one source file:
/// `{source_dir}/optimized/{stem}.{format_extension}`.
pub fn generate_output_path(input_path: &Path, options: &TranscodeOptions) -> Result<PathBuf> {
    let file_stem = input_path.file_stem().ok_or_else(|| ConvertError::Transcode {
        path: input_path.to_path_buf(),
        reason: "invalid file name".to_string(),
    })?;

    let output_dir = input_path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(OPTIMIZED_DIR);

    let output_filename = format!(
        "{}.{}",
        file_stem.to_string_lossy(),
        options.format.extension()
    );
    Ok(output_dir.join(output_filename))
}

/// Transcodes every file in order, one at a time. A single file's failure
/// never aborts the batch; it is reported and recorded as a `FailedFile`.
/// The returned sequence preserves input order.
pub fn run_batch(files: &[PathBuf], options: &TranscodeOptions) -> Vec<FileOutcome> {
    let progress = if logger::is_quiet() {
        ProgressBar::hidden()
    } else {
        let bar = ProgressBar::new(files.len() as u64);
        bar.set_style(ProgressStyle::default_bar());
        bar
    };

    let mut outcomes = Vec::with_capacity(files.len());
    for file in files {
        let outcome = process_single_file(file, options);
        if let Err(failed) = &outcome {
            crate::error!("Failed to process {:?}: {}", failed.path, failed.error);
        }
        progress.inc(1);
        outcomes.push(outcome);
    }
    progress.finish_and_clear();

    outcomes
}

/// Splits outcomes into records and failures, both keeping input order.
pub fn partition_outcomes(outcomes: Vec<FileOutcome>) -> (Vec<FileStatRecord>, Vec<FailedFile>) {
    let mut records = Vec::new();
    let mut failures = Vec::new();
    for outcome in outcomes {
        match outcome {
            Ok(record) => records.push(record),
            Err(failed) => failures.push(failed),
        }
    }
    (records, failures)
}

fn process_single_file(input_path: &Path, options: &TranscodeOptions) -> FileOutcome {
    try_process(input_path, options).map_err(|error| FailedFile {
        path: input_path.to_path_buf(),
        error,
    })
}

fn try_process(input_path: &Path, options: &TranscodeOptions) -> Result<FileStatRecord> {
    let output_path = generate_output_path(input_path, options)?;

    // Idempotent: the sibling directory may already exist from an earlier file
    if let Some(output_dir) = output_path.parent() {
        fs::create_dir_all(output_dir)
            .map_err(|_| ConvertError::DirectoryCreationFailed(output_dir.to_path_buf()))?;
    }

    let outcome = transcode::transcode(input_path, &output_path, options).map_err(|e| {
        ConvertError::Transcode {
            path: input_path.to_path_buf(),
            reason: e.to_string(),
        }
    })?;

    Ok(FileStatRecord::from_outcome(input_path, outcome))
}
