use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use jsbox_sandbox::DEFAULT_TRANSLATION_FUNCTION;

/// CLI arguments for the jsbox binary.
#[derive(Parser, Debug)]
#[command(
    name = "jsbox",
    version,
    about = "Sandboxing compiler for serialized JavaScript syntax trees"
)]
pub struct CliArgs {
    /// JSON config file supplying defaults for the sandbox options.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Rewrite programs so they only touch the runtime surface.
    Sandbox(SandboxArgs),
    /// Render a tree as JavaScript without rewriting it.
    Render(RenderArgs),
    /// List the globals a program introduces.
    Exports(ExportsArgs),
    /// Report translation calls whose first argument is not a string literal.
    #[command(name = "intl-check")]
    IntlCheck(IntlCheckArgs),
}

/// Output layout flags shared by the commands that render code.
#[derive(Args, Debug, Default, Clone, Copy)]
pub struct OutputFlags {
    /// Indent and space the output.
    #[arg(long)]
    pub pretty: bool,

    /// Pad the output so statements land on their input lines.
    #[arg(long = "keep-lines")]
    pub keep_lines: bool,
}

#[derive(Args, Debug)]
pub struct SandboxArgs {
    /// Key of the program's global namespace.
    #[arg(long = "app-id")]
    pub app_id: Option<String>,

    /// Name of the runtime namespace object.
    #[arg(long)]
    pub runtime: Option<String>,

    /// Route `this` through the runtime.
    #[arg(long = "wrap-this")]
    pub wrap_this: bool,

    #[command(flatten)]
    pub output: OutputFlags,

    /// Write `name.js` next to each `name.json` input into this directory.
    #[arg(long = "out-dir")]
    pub out_dir: Option<PathBuf>,

    /// Serialized programs. Standard input when empty or `-`.
    pub files: Vec<PathBuf>,
}

#[derive(Args, Debug)]
pub struct RenderArgs {
    #[command(flatten)]
    pub output: OutputFlags,

    /// Serialized tree. Standard input when missing or `-`.
    pub file: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ExportsArgs {
    /// Serialized program. Standard input when missing or `-`.
    pub file: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct IntlCheckArgs {
    /// Name of the translation function.
    #[arg(long, default_value = DEFAULT_TRANSLATION_FUNCTION)]
    pub function: String,

    /// Serialized trees. Standard input when empty or `-`.
    pub files: Vec<PathBuf>,
}
