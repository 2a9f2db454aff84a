//! Document loading functionality.
//!
//! This module provides functions to load documents from files or stdin,
//! parsing them into [`Value`] trees that deepquill can search. JSON, JSON
//! Lines and YAML are supported, each transparently gunzipped when needed.

use crate::document::node::Value;
use crate::document::parser::{from_json, parse_json, parse_yaml};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// A supported document format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Jsonl,
    Yaml,
}

impl FromStr for Format {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "json" => Ok(Format::Json),
            "jsonl" | "ndjson" => Ok(Format::Jsonl),
            "yaml" | "yml" => Ok(Format::Yaml),
            other => anyhow::bail!("Unknown format '{}', expected json, jsonl or yaml", other),
        }
    }
}

/// Determines the document format from a filename.
///
/// Checks the extension, handling a `.gz` suffix correctly. Anything
/// unrecognized is treated as JSON.
/// Examples:
/// - `data.jsonl` → JSONL
/// - `data.yaml.gz` → YAML
/// - `data.json.gz` → JSON
pub fn detect_format<P: AsRef<Path>>(path: P) -> Format {
    let path_str = path.as_ref().to_string_lossy();

    // Remove .gz suffix if present
    let base = path_str.strip_suffix(".gz").unwrap_or(&path_str);

    if base.ends_with(".jsonl") || base.ends_with(".ndjson") {
        Format::Jsonl
    } else if base.ends_with(".yaml") || base.ends_with(".yml") {
        Format::Yaml
    } else {
        Format::Json
    }
}

/// Loads and parses a document from the filesystem.
///
/// The format is determined from the filename; see [`detect_format`]. Files
/// ending in `.gz` are decompressed first.
///
/// # Arguments
///
/// * `path` - The path to the document to load
///
/// # Examples
///
/// ```no_run
/// use deepquill::file::loader::load_file;
///
/// let value = load_file("config.json").unwrap();
/// ```
///
/// # Errors
///
/// This function will return an error if:
/// - The file path does not exist
/// - The file cannot be read (permissions, etc.)
/// - The file contents are not valid for the detected format
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Value> {
    let path_ref = path.as_ref();
    load_file_as(path_ref, detect_format(path_ref))
}

/// Loads and parses a document with an explicit format, ignoring the
/// filename.
pub fn load_file_as<P: AsRef<Path>>(path: P, format: Format) -> Result<Value> {
    let path_ref = path.as_ref();

    // Check if file is gzipped
    let is_gzipped = path_ref
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext == "gz")
        .unwrap_or(false);

    // Read content (decompress if needed)
    let content = if is_gzipped {
        read_gzipped_file(path_ref)?
    } else {
        fs::read_to_string(path_ref).context("Failed to read file")?
    };

    parse_content(&content, format)
}

/// Parses already-read document text in the given format.
pub fn parse_content(content: &str, format: Format) -> Result<Value> {
    match format {
        Format::Json => parse_json(content),
        Format::Jsonl => parse_jsonl_content(content),
        Format::Yaml => parse_yaml(content),
    }
}

/// Parses JSONL content (newline-delimited JSON) into a list value.
///
/// Each line must be a valid JSON value. Blank lines are skipped. The lines
/// become positional entries, so matches inside line `N` report paths under
/// `root[N]`.
pub fn parse_jsonl_content(content: &str) -> Result<Value> {
    let mut lines = Vec::new();

    for (line_num, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue; // Skip blank lines
        }

        let value: serde_json::Value = serde_json::from_str(line)
            .with_context(|| format!("Invalid JSON on line {}", line_num + 1))?;

        lines.push(from_json(&value));
    }

    if lines.is_empty() {
        anyhow::bail!("No valid JSON found in JSONL content");
    }

    Ok(Value::list(lines))
}

/// Loads and parses a document from standard input.
///
/// Gzip-compressed input is detected by its magic bytes and decompressed.
/// With an explicit format the content is parsed as that format; otherwise
/// regular JSON is tried first, then JSONL. YAML is never sniffed, since
/// almost any text is valid YAML; pass the format explicitly instead.
///
/// # Examples
///
/// ```no_run
/// use deepquill::file::loader::load_stdin;
///
/// // Usage: echo '{"key": "value"}' | deepquill somewhere
/// let value = load_stdin(None).unwrap();
/// ```
///
/// # Errors
///
/// This function will return an error if:
/// - Reading from stdin fails
/// - The input contents are not valid for the requested or sniffed format
pub fn load_stdin(format: Option<Format>) -> Result<Value> {
    use std::io::{self, Read};

    let mut buffer = Vec::new();
    io::stdin()
        .read_to_end(&mut buffer)
        .context("Failed to read from stdin")?;

    // Check for gzip magic bytes (0x1f 0x8b)
    let content = if buffer.starts_with(&[0x1f, 0x8b]) {
        decompress_gzip_bytes(&buffer)?
    } else {
        String::from_utf8(buffer).context("Invalid UTF-8 in stdin")?
    };

    if let Some(format) = format {
        return parse_content(&content, format);
    }

    // Try to parse as regular JSON first
    if let Ok(value) = parse_json(&content) {
        return Ok(value);
    }

    // If regular JSON parsing fails, try JSONL format
    parse_jsonl_content(&content)
        .context("Failed to parse stdin: input is neither valid JSON nor valid JSONL")
}

/// Reads and decompresses a gzipped file.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be opened
/// - The file is not valid gzip format (corrupted)
/// - The decompressed content is not valid UTF-8
fn read_gzipped_file<P: AsRef<Path>>(path: P) -> Result<String> {
    use flate2::read::GzDecoder;
    use std::io::Read;

    let file = fs::File::open(path).context("Failed to open gzipped file")?;
    let mut decoder = GzDecoder::new(file);
    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .context("Failed to decompress gzipped file - file may be corrupted")?;
    Ok(content)
}

/// Decompresses gzip-encoded bytes to a UTF-8 string.
///
/// # Errors
///
/// Returns an error if:
/// - The bytes are not valid gzip format
/// - The decompressed content is not valid UTF-8
fn decompress_gzip_bytes(bytes: &[u8]) -> Result<String> {
    use flate2::read::GzDecoder;
    use std::io::Read;

    let mut decoder = GzDecoder::new(bytes);
    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .context("Failed to decompress gzipped stdin")?;
    Ok(content)
}
