//! Diagnostics for the repair pass.
//!
//! Every reference the pass gives up on is reported at `debug` level by
//! `doclink_repair::resolver`, with the reason and the reference name:
//!
//! - no analyzed file declares the symbol
//! - the candidate file has no reflection with a matching name
//! - the matching reflection has no symbol
//! - a declaration file's source map was unusable (with the decode error)
//!
//! At `trace` level the resolver also reports which declaration file or
//! source map entry selected the candidate file, and
//! `doclink_common::source_map` reports each inline or companion map it
//! decodes. `doclink_repair::pass` wraps a whole run in a `repair_project`
//! span and closes it with the summary counters.
//!
//! `DOCLINK_LOG` (falling back to `RUST_LOG`) selects what is shown;
//! `DOCLINK_LOG_FORMAT` selects `text` (default), `tree` (`tracing-tree`)
//! or `json`. Nothing is installed when neither filter variable is set.
//!
//! ```bash
//! # Why did Foo stay broken?
//! DOCLINK_LOG=doclink_repair=debug DOCLINK_LOG_FORMAT=tree doclink docs.json
//!
//! # Which maps were read, as JSON lines
//! DOCLINK_LOG=doclink_common::source_map=trace DOCLINK_LOG_FORMAT=json doclink docs.json
//! ```

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

/// Tracing output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Tree,
    Json,
}

impl LogFormat {
    /// Parse a `DOCLINK_LOG_FORMAT` value. Unrecognized values mean text.
    pub fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Filter directives to use, `DOCLINK_LOG` first. `None` disables logging.
pub fn filter_directives(doclink_log: Option<String>, rust_log: Option<String>) -> Option<String> {
    doclink_log.or(rust_log)
}

/// Install the global subscriber on stderr, keeping stdout for the
/// repaired JSON.
pub fn init_tracing() {
    let Some(directives) = filter_directives(
        std::env::var("DOCLINK_LOG").ok(),
        std::env::var("RUST_LOG").ok(),
    ) else {
        return;
    };
    let filter = EnvFilter::builder().parse_lossy(directives);
    let format = LogFormat::parse(&std::env::var("DOCLINK_LOG_FORMAT").unwrap_or_default());

    match format {
        LogFormat::Tree => {
            let tree_layer = tracing_tree::HierarchicalLayer::default()
                .with_indent_amount(2)
                .with_indent_lines(true)
                .with_deferred_spans(true)
                .with_targets(true);

            Registry::default().with(filter).with(tree_layer).init();
        }
        LogFormat::Json => {
            let json_layer = fmt::layer().json().with_writer(std::io::stderr);

            Registry::default().with(filter).with(json_layer).init();
        }
        LogFormat::Text => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}
