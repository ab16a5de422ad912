/// Interactive prompt sequence
///
/// Reads from any `BufRead` so the whole flow is testable with a cursor.
/// Parsing is split into small pure helpers; any failure here is a setup
/// error and aborts the run before a single file is touched.
use crate::error::{ConvertError, Result};
use crate::options::{CropBox, OutputFormat, TranscodeOptions};
use crate::resolve::{parse_url, trim_token, InputSpec};
use std::io::{BufRead, Write};

/// Everything the batch stage needs, built once from validated input.
#[derive(Debug)]
pub struct SessionConfig {
    pub inputs: Vec<InputSpec>,
    pub options: TranscodeOptions,
}

fn prompt(text: &str) {
    print!("{}", text);
    let _ = std::io::stdout().flush();
}

fn read_line(input: &mut impl BufRead) -> Result<String> {
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// `1` or empty = webp, `2` = png.
pub fn parse_format_choice(input: &str) -> Result<OutputFormat> {
    match input.trim() {
        "" | "1" => Ok(OutputFormat::WebP),
        "2" => Ok(OutputFormat::Png),
        other => Err(ConvertError::UnsupportedFormat(other.to_string())),
    }
}

/// Empty means "use the default". Out-of-range values are clamped later;
/// non-numeric input is a setup error.
pub fn parse_quality(input: &str) -> Result<Option<i64>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<i64>()
        .map(Some)
        .map_err(|_| ConvertError::InvalidQuality(trimmed.to_string()))
}

pub fn parse_yes_no(input: &str) -> bool {
    matches!(input.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Runs the full prompt sequence:
/// inputs, format, quality, crop y/n (+ dimensions), then one optional
/// output-name prompt per URL token.
pub fn run_interactive(input: &mut impl BufRead) -> Result<SessionConfig> {
    prompt("Enter image paths or URLs (space-separated): ");
    let tokens: Vec<String> = read_line(input)?
        .split_whitespace()
        .map(trim_token)
        .filter(|t| !t.is_empty())
        .collect();

    prompt("Output format [1=webp, 2=png] (default: webp): ");
    let format = parse_format_choice(&read_line(input)?)?;

    prompt("Quality 0-100 (default: 80): ");
    let quality = parse_quality(&read_line(input)?)?;

    prompt("Crop images? [y/N]: ");
    let crop = if parse_yes_no(&read_line(input)?) {
        prompt("Crop dimensions as \"<width> <height>\": ");
        Some(CropBox::parse(&read_line(input)?)?)
    } else {
        None
    };

    let mut inputs = Vec::with_capacity(tokens.len());
    for token in tokens {
        let spec = InputSpec::new(&token);
        let spec = if parse_url(&spec.token).is_some() {
            prompt(&format!(
                "Output file name for {} (empty = derived from URL): ",
                spec.token
            ));
            let name = read_line(input)?;
            spec.with_name_override(Some(name))
        } else {
            spec
        };
        inputs.push(spec);
    }

    Ok(SessionConfig {
        inputs,
        options: TranscodeOptions::new(format, quality, crop),
    })
}
