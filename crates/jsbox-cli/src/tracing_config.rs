//! Log output for the jsbox binary.
//!
//! Off unless `JSBOX_LOG` or `RUST_LOG` holds a filter. `JSBOX_LOG_FORMAT`
//! picks `text` (the default), `tree` or `json`:
//!
//! ```bash
//! JSBOX_LOG=jsbox_sandbox=trace JSBOX_LOG_FORMAT=tree jsbox sandbox app.json
//! ```

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};
use tracing_tree::HierarchicalLayer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Tree,
    Json,
}

impl LogFormat {
    /// Unknown names fall back to `Text`.
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("tree") {
            Self::Tree
        } else if value.eq_ignore_ascii_case("json") {
            Self::Json
        } else {
            Self::Text
        }
    }
}

/// `JSBOX_LOG` wins over `RUST_LOG`.
fn env_filter() -> Option<EnvFilter> {
    match std::env::var("JSBOX_LOG") {
        Ok(directives) => Some(EnvFilter::builder().parse_lossy(directives)),
        Err(_) if std::env::var_os(EnvFilter::DEFAULT_ENV).is_some() => {
            Some(EnvFilter::from_default_env())
        }
        Err(_) => None,
    }
}

/// Install the global subscriber, writing to stderr.
pub fn init_tracing() {
    let Some(filter) = env_filter() else {
        return;
    };
    let format = LogFormat::parse(&std::env::var("JSBOX_LOG_FORMAT").unwrap_or_default());

    let tree = (format == LogFormat::Tree).then(|| {
        HierarchicalLayer::new(2)
            .with_indent_lines(true)
            .with_targets(true)
    });
    let json = (format == LogFormat::Json)
        .then(|| fmt::layer().json().with_writer(std::io::stderr));
    let text = (format == LogFormat::Text).then(|| fmt::layer().with_writer(std::io::stderr));

    Registry::default()
        .with(filter)
        .with(tree)
        .with(json)
        .with(text)
        .init();
}
