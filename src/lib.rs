pub mod batch;
pub mod cli;
pub mod constants;
pub mod error;
pub mod fetch;
pub mod logger;
pub mod options;
pub mod prompt;
pub mod resolve;
pub mod stats;
pub mod transcode;

pub use batch::{generate_output_path, partition_outcomes, run_batch, FailedFile, FileOutcome};
pub use error::{ConvertError, Result};
pub use options::{clamp_quality, CropBox, OutputFormat, TranscodeOptions};
pub use resolve::{enumerate_directory, is_image_file, resolve_input, InputSpec};
pub use stats::{format_size, render_report, savings_percent, FileStatRecord, RunTotals};
pub use transcode::{transcode, ImageMeta, TranscodeOutcome};
