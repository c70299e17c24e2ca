//! The optional JSON config file.
//!
//! ```json
//! { "appId": "42", "runtime": "jsbox", "wrapThis": true, "pretty": false, "keepLines": true }
//! ```
//!
//! Every key is optional. Command-line flags win over file values, which win
//! over the built-in defaults.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use jsbox_ast::RenderOptions;
use jsbox_sandbox::SandboxOptions;

use crate::args::{OutputFlags, SandboxArgs};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct JsboxConfig {
    pub app_id: Option<String>,
    pub runtime: Option<String>,
    pub wrap_this: Option<bool>,
    pub pretty: Option<bool>,
    pub keep_lines: Option<bool>,
}

pub fn parse_config(source: &str) -> Result<JsboxConfig> {
    let config = serde_json::from_str(source).context("failed to parse config JSON")?;
    Ok(config)
}

pub fn load_config(path: &Path) -> Result<JsboxConfig> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    parse_config(&source).with_context(|| format!("failed to parse config: {}", path.display()))
}

/// Load the config named on the command line, or the empty config.
pub fn load_optional(path: Option<&Path>) -> Result<JsboxConfig> {
    match path {
        Some(path) => load_config(path),
        None => Ok(JsboxConfig::default()),
    }
}

impl JsboxConfig {
    pub fn sandbox_options(&self, args: &SandboxArgs) -> SandboxOptions {
        let mut options = SandboxOptions::default();
        if let Some(app_id) = args.app_id.as_ref().or(self.app_id.as_ref()) {
            options.app_id.clone_from(app_id);
        }
        if let Some(runtime) = args.runtime.as_ref().or(self.runtime.as_ref()) {
            options.runtime.clone_from(runtime);
        }
        options.wrap_this = args.wrap_this || self.wrap_this.unwrap_or(false);
        options
    }

    pub fn render_options(&self, flags: OutputFlags) -> RenderOptions {
        let pretty = flags.pretty || self.pretty.unwrap_or(false);
        let options = if pretty {
            RenderOptions::PRETTY
        } else {
            RenderOptions::COMPACT
        };
        if flags.keep_lines || self.keep_lines.unwrap_or(false) {
            options.keep_lines()
        } else {
            options
        }
    }
}
