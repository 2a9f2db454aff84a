//! File I/O operations for searchable documents.
//!
//! This module provides functionality to load JSON, JSONL and YAML documents
//! from disk or stdin, with transparent gzip decompression.

pub mod loader;

pub use loader::{detect_format, load_file, load_file_as, load_stdin, Format};
