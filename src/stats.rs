/// Per-file stat records, running totals and the final report
///
/// Everything here is pure: records come in ordered, a report string comes
/// out. No ambient state, no printing.
use crate::transcode::{ImageMeta, TranscodeOutcome};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// Result of transcoding one file. Immutable once created.
#[derive(Debug, Clone)]
pub struct FileStatRecord {
    pub original_path: PathBuf,
    pub output_path: PathBuf,
    pub original: ImageMeta,
    pub optimized: ImageMeta,
    pub savings_percent: f64,
}

impl FileStatRecord {
    pub fn from_outcome(source: &Path, outcome: TranscodeOutcome) -> Self {
        let savings_percent = savings_percent(outcome.original.bytes, outcome.optimized.bytes);
        Self {
            original_path: source.to_path_buf(),
            output_path: outcome.output_path,
            original: outcome.original,
            optimized: outcome.optimized,
            savings_percent,
        }
    }
}

/// Savings percentage `(original - optimized) / original * 100`, rounded to
/// 2 decimals. A zero-byte original is defined as 0.0 savings rather than a
/// divide fault. Negative when the output grew.
pub fn savings_percent(original_bytes: u64, optimized_bytes: u64) -> f64 {
    if original_bytes == 0 {
        return 0.0;
    }
    let raw =
        (original_bytes as f64 - optimized_bytes as f64) / original_bytes as f64 * 100.0;
    (raw * 100.0).round() / 100.0
}

/// Human-readable size with strict 1024 boundaries: bytes below 1024,
/// KB below 1 MiB, MB above, non-byte values to 2 decimal places.
pub fn format_size(bytes: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = 1024 * 1024;

    if bytes < KIB {
        format!("{} B", bytes)
    } else if bytes < MIB {
        format!("{:.2} KB", bytes as f64 / KIB as f64)
    } else {
        format!("{:.2} MB", bytes as f64 / MIB as f64)
    }
}

fn format_signed_size(bytes: i64) -> String {
    if bytes < 0 {
        format!("-{}", format_size(bytes.unsigned_abs()))
    } else {
        format_size(bytes as u64)
    }
}

/// Running sums over the batch. Single writer, read once at the end.
#[derive(Debug, Default, Clone, Copy)]
pub struct RunTotals {
    pub original_bytes: u64,
    pub saved_bytes: i64,
}

impl RunTotals {
    pub fn add(&mut self, record: &FileStatRecord) {
        self.original_bytes += record.original.bytes;
        self.saved_bytes += record.original.bytes as i64 - record.optimized.bytes as i64;
    }

    /// Identity: total optimized = total original - total saved, exactly.
    pub fn optimized_bytes(&self) -> i64 {
        self.original_bytes as i64 - self.saved_bytes
    }

    pub fn savings_percent(&self) -> f64 {
        if self.original_bytes == 0 {
            return 0.0;
        }
        let raw = self.saved_bytes as f64 / self.original_bytes as f64 * 100.0;
        (raw * 100.0).round() / 100.0
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Renders the final report: one block per record in input order, the
/// aggregate block (or a no-images message), then every distinct output
/// directory in first-appearance order.
pub fn render_report(records: &[FileStatRecord]) -> String {
    let mut out = String::new();

    for (index, record) in records.iter().enumerate() {
        let _ = writeln!(out, "📸 [{}] {}", index + 1, file_name(&record.original_path));
        let _ = writeln!(
            out,
            "   Before: {} ({}, {}x{})",
            format_size(record.original.bytes),
            record.original.format,
            record.original.width,
            record.original.height
        );
        let _ = writeln!(
            out,
            "   After:  {} ({}, {}x{})",
            format_size(record.optimized.bytes),
            record.optimized.format,
            record.optimized.width,
            record.optimized.height
        );
        let _ = writeln!(out, "   Saved:  {:.2}%", record.savings_percent);
    }

    if records.is_empty() {
        let _ = writeln!(out, "⚠️  No images were processed");
        return out;
    }

    let mut totals = RunTotals::default();
    for record in records {
        totals.add(record);
    }

    let _ = writeln!(out, "\n📊 Summary:");
    let _ = writeln!(
        out,
        "   Total original:  {}",
        format_size(totals.original_bytes)
    );
    let _ = writeln!(
        out,
        "   Total optimized: {}",
        format_signed_size(totals.optimized_bytes())
    );
    let _ = writeln!(
        out,
        "   Total saved:     {} ({:.2}%)",
        format_signed_size(totals.saved_bytes),
        totals.savings_percent()
    );

    for dir in output_directories(records) {
        let _ = writeln!(out, "📁 Output directory: {}", dir.display());
    }

    out
}

/// Distinct output directories in first-appearance order. Inputs may come
/// from several source directories, so a single representative directory
/// would under-report.
pub fn output_directories(records: &[FileStatRecord]) -> Vec<PathBuf> {
    let mut dirs: Vec<PathBuf> = Vec::new();
    for record in records {
        if let Some(parent) = record.output_path.parent() {
            if !dirs.iter().any(|d| d == parent) {
                dirs.push(parent.to_path_buf());
            }
        }
    }
    dirs
}
