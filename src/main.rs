use clap::Parser;
use img_convert::batch::{partition_outcomes, run_batch};
use img_convert::cli::Args;
use img_convert::error::{ConvertError, Result};
use img_convert::options::{CropBox, OutputFormat, TranscodeOptions};
use img_convert::prompt::{run_interactive, SessionConfig};
use img_convert::resolve::{default_downloads_dir, resolve_input, InputSpec};
use img_convert::stats::render_report;
use img_convert::{error, info, logger, warn};
use std::path::PathBuf;
use std::str::FromStr;

fn main() -> Result<()> {
    let args = Args::parse();
    let verbosity = if args.quiet {
        logger::Verbosity::Quiet
    } else if args.verbose {
        logger::Verbosity::Verbose
    } else {
        logger::Verbosity::Normal
    };
    logger::set_verbosity(verbosity);

    let session = build_session(&args)?;

    info!("🚀 Converting to {} (quality {})", session.options.format, session.options.quality);
    if let Some(crop) = session.options.crop {
        info!("✂️  Cover-fit crop: {}x{}", crop.width, crop.height);
    }

    let files = resolve_all(&session.inputs);
    if files.is_empty() {
        println!("{}", render_report(&[]).trim_end());
        return Ok(());
    }

    info!("📊 Found {} image file(s) to process", files.len());

    let outcomes = run_batch(&files, &session.options);
    let (records, failures) = partition_outcomes(outcomes);

    print!("{}", render_report(&records));
    if !failures.is_empty() {
        warn!("Skipped {} file(s), see errors above", failures.len());
    }

    Ok(())
}

/// Builds the session from flags, or runs the interactive prompts when no
/// inputs were given on the command line.
fn build_session(args: &Args) -> Result<SessionConfig> {
    if args.inputs.is_empty() {
        let stdin = std::io::stdin();
        return run_interactive(&mut stdin.lock());
    }

    let format = match &args.format {
        Some(f) => OutputFormat::from_str(f)?,
        None => OutputFormat::WebP,
    };

    let crop = match (args.width, args.height) {
        (Some(width), Some(height)) => {
            if width == 0 || height == 0 {
                return Err(ConvertError::InvalidDimensions(format!(
                    "{} {}",
                    width, height
                )));
            }
            Some(CropBox { width, height })
        }
        _ => None,
    };

    Ok(SessionConfig {
        inputs: args.inputs.iter().map(|t| InputSpec::new(t)).collect(),
        options: TranscodeOptions::new(format, args.quality, crop),
    })
}

/// Resolves every input token, reporting per-token failures and continuing.
/// One bad token never aborts the others.
fn resolve_all(inputs: &[InputSpec]) -> Vec<PathBuf> {
    let downloads_dir = default_downloads_dir();
    let mut files = Vec::new();

    for spec in inputs {
        match resolve_input(spec, &downloads_dir) {
            Ok(resolved) => files.extend(resolved),
            Err(e) => error!("Skipping input {:?}: {}", spec.token, e),
        }
    }

    files
}
