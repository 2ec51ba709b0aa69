//! Common utilities for the doclink reference repair crates.
//!
//! This crate provides the pieces of file-system knowledge the repair
//! pass needs without depending on the documentation model:
//! - Lexical path normalization and resolution (`path`)
//! - Source map discovery and decoding (`source_map`)

// Lexical path handling (no file-system access)
pub mod path;
pub use path::{normalize_path, paths_match, resolve_path};

// Source map discovery: inline data URIs and companion `.map` files
pub mod source_map;
pub use source_map::{
    FsMapFileReader, LoadedSourceMap, MapFileReader, MapOrigin, MemoryMapFileReader, RawSourceMap,
    SourceMapError, load_source_map,
};
