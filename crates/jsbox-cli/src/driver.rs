//! Runs one CLI command over its inputs.
//!
//! Every input is handled on its own: a file that fails to load, fails
//! validation or trips a rewriter invariant is reported and skipped, and
//! the other inputs are still processed. Trees are rewritten on a rayon
//! pool whose threads have a stack sized for the deepest accepted tree.

use anyhow::{Context, Result, bail};
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use std::fmt;
use std::io::Read;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::path::{Path, PathBuf};
use tracing::{debug, info_span};

use jsbox_ast::{Node, RenderOptions, load_program, parse_tree, validate};
use jsbox_common::InputError;
use jsbox_common::limits::WORKER_STACK_SIZE;
use jsbox_sandbox::{
    SandboxOptions, Violation, check_translation_calls, collect_exported_globals,
    rewrite_program_with,
};

use crate::args::{CliArgs, Command, ExportsArgs, IntlCheckArgs, RenderArgs, SandboxArgs};
use crate::config::{JsboxConfig, load_optional};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_INPUT_ERROR: i32 = 1;
pub const EXIT_INTERNAL_ERROR: i32 = 2;

const STDIN_NAME: &str = "-";

// =============================================================================
// Results
// =============================================================================

/// Why one input produced no output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    /// The input could not be read.
    Io(String),
    /// The tree failed to decode or validate.
    Input(InputError),
    /// A translation call without a literal string.
    Translation(Violation),
    /// Another input already maps to the same output file.
    OutputTaken { output: PathBuf, first: PathBuf },
    /// The rewriter hit an invariant violation.
    Internal(String),
}

impl Failure {
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Io(_) | Self::Input(_) | Self::Translation(_) | Self::OutputTaken { .. } => {
                EXIT_INPUT_ERROR
            }
            Self::Internal(_) => EXIT_INTERNAL_ERROR,
        }
    }

    /// Line the failure points at, if any.
    pub fn line(&self) -> Option<u32> {
        match self {
            Self::Input(err) => err.line(),
            Self::Translation(violation) => violation.line,
            Self::Io(_) | Self::OutputTaken { .. } | Self::Internal(_) => None,
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(message) => f.write_str(message),
            Self::Input(err) => write!(f, "{err}"),
            Self::Translation(violation) => write!(
                f,
                "translation call without a string literal: {}",
                violation.call
            ),
            Self::OutputTaken { output, first } => write!(
                f,
                "{} would overwrite the output of {}",
                output.display(),
                first.display()
            ),
            Self::Internal(message) => f.write_str(message),
        }
    }
}

/// A failure together with the input it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFailure {
    /// `None` for standard input.
    pub path: Option<PathBuf>,
    pub failure: Failure,
}

impl FileFailure {
    pub fn display_path(&self) -> String {
        match &self.path {
            Some(path) => path.display().to_string(),
            None => "<stdin>".to_string(),
        }
    }
}

/// Everything a command produced.
#[derive(Debug, Default)]
pub struct RunResult {
    /// Text for standard output.
    pub stdout: String,
    pub failures: Vec<FileFailure>,
    /// Files written under `--out-dir`.
    pub written: Vec<PathBuf>,
}

impl RunResult {
    /// The most severe failure decides the exit code.
    pub fn exit_code(&self) -> i32 {
        self.failures
            .iter()
            .map(|failure| failure.failure.exit_code())
            .max()
            .unwrap_or(EXIT_SUCCESS)
    }
}

// =============================================================================
// Commands
// =============================================================================

pub fn run(args: &CliArgs) -> Result<RunResult> {
    let config = load_optional(args.config.as_deref())?;
    let pool = rayon::ThreadPoolBuilder::new()
        .stack_size(WORKER_STACK_SIZE)
        .build()
        .context("failed to start worker threads")?;

    pool.install(|| match &args.command {
        Command::Sandbox(sandbox) => run_sandbox(&config, sandbox),
        Command::Render(render) => run_render(&config, render),
        Command::Exports(exports) => run_exports(exports),
        Command::IntlCheck(intl) => run_intl_check(intl),
    })
}

fn run_sandbox(config: &JsboxConfig, args: &SandboxArgs) -> Result<RunResult> {
    let options = config.sandbox_options(args);
    let render = config.render_options(args.output);
    let inputs = input_list(&args.files);
    let _span = info_span!("sandbox", app_id = %options.app_id, inputs = inputs.len()).entered();

    let mut result = RunResult::default();
    match (&args.out_dir, inputs.as_slice()) {
        (None, [single]) => match sandbox_input(single.as_deref(), &options, render) {
            Ok(output) => result.stdout = with_newline(output),
            Err(failure) => result.failures.push(failure),
        },
        (None, _) => bail!("more than one input needs --out-dir"),
        (Some(out_dir), _) => {
            if inputs.iter().any(Option::is_none) {
                bail!("standard input cannot be written to --out-dir");
            }
            std::fs::create_dir_all(out_dir)
                .with_context(|| format!("failed to create directory {}", out_dir.display()))?;

            let mut claimed: FxHashMap<PathBuf, &Path> = FxHashMap::default();
            let mut jobs = Vec::with_capacity(inputs.len());
            for input in inputs.iter().flatten() {
                let output = output_path(out_dir, input);
                if let Some(first) = claimed.get(&output) {
                    let first = first.to_path_buf();
                    result
                        .failures
                        .push(fail(Some(input.as_path()), Failure::OutputTaken { output, first }));
                    continue;
                }
                claimed.insert(output.clone(), input.as_path());
                jobs.push((input.as_path(), output));
            }

            let outcomes: Vec<_> = jobs
                .into_par_iter()
                .map(|(input, path)| {
                    sandbox_input(Some(input), &options, render).map(|output| (path, output))
                })
                .collect();
            for outcome in outcomes {
                match outcome {
                    Ok((path, output)) => {
                        std::fs::write(&path, with_newline(output))
                            .with_context(|| format!("failed to write {}", path.display()))?;
                        result.written.push(path);
                    }
                    Err(failure) => result.failures.push(failure),
                }
            }
        }
    }
    debug!(
        written = result.written.len(),
        failed = result.failures.len(),
        "sandbox finished"
    );
    Ok(result)
}

fn run_render(config: &JsboxConfig, args: &RenderArgs) -> Result<RunResult> {
    let render = config.render_options(args.output);
    let path = single_input(args.file.as_deref());
    let mut result = RunResult::default();
    let rendered = read_input(path).and_then(|text| {
        let tree = parse_tree(&text).map_err(|err| fail(path, Failure::Input(err)))?;
        validate(&tree).map_err(|err| fail(path, Failure::Input(err)))?;
        Ok(tree.render(render))
    });
    match rendered {
        Ok(output) => result.stdout = with_newline(output),
        Err(failure) => result.failures.push(failure),
    }
    Ok(result)
}

fn run_exports(args: &ExportsArgs) -> Result<RunResult> {
    let path = single_input(args.file.as_deref());
    let mut result = RunResult::default();
    match read_input(path).and_then(|text| load(path, &text)) {
        Ok(program) => {
            for name in collect_exported_globals(&program) {
                result.stdout.push_str(&name);
                result.stdout.push('\n');
            }
        }
        Err(failure) => result.failures.push(failure),
    }
    Ok(result)
}

fn run_intl_check(args: &IntlCheckArgs) -> Result<RunResult> {
    let inputs = input_list(&args.files);
    let _span =
        info_span!("intl_check", function = %args.function, inputs = inputs.len()).entered();

    let per_input: Vec<Vec<FileFailure>> = inputs
        .par_iter()
        .map(|input| {
            let path = input.as_deref();
            let tree = read_input(path).and_then(|text| {
                let tree = parse_tree(&text).map_err(|err| fail(path, Failure::Input(err)))?;
                validate(&tree).map_err(|err| fail(path, Failure::Input(err)))?;
                Ok(tree)
            });
            match tree {
                Ok(tree) => check_translation_calls(&tree, &args.function)
                    .into_iter()
                    .map(|violation| fail(path, Failure::Translation(violation)))
                    .collect(),
                Err(failure) => vec![failure],
            }
        })
        .collect();

    let result = RunResult {
        failures: per_input.into_iter().flatten().collect(),
        ..RunResult::default()
    };
    debug!(violations = result.failures.len(), "intl check finished");
    Ok(result)
}

// =============================================================================
// Per-input pipeline
// =============================================================================

/// Load, validate, rewrite and render one input.
pub fn sandbox_input(
    path: Option<&Path>,
    options: &SandboxOptions,
    render: RenderOptions,
) -> Result<String, FileFailure> {
    let text = read_input(path)?;
    let program = load(path, &text)?;
    let output = sandbox_tree(program, options)
        .map_err(|message| fail(path, Failure::Internal(message)))?;
    Ok(output.render(render))
}

/// Rewrite `program`, turning an invariant violation into an error.
pub fn sandbox_tree(program: Node, options: &SandboxOptions) -> Result<Node, String> {
    catch_unwind(AssertUnwindSafe(|| rewrite_program_with(program, options)))
        .map_err(|payload| panic_message(payload.as_ref()))
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "rewriter panicked".to_string()
    }
}

fn load(path: Option<&Path>, text: &str) -> Result<Node, FileFailure> {
    load_program(text).map_err(|err| fail(path, Failure::Input(err)))
}

fn read_input(path: Option<&Path>) -> Result<String, FileFailure> {
    match path {
        Some(path) => std::fs::read_to_string(path).map_err(|err| {
            fail(
                Some(path),
                Failure::Io(format!("failed to read {}: {err}", path.display())),
            )
        }),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .map_err(|err| {
                    fail(
                        None,
                        Failure::Io(format!("failed to read standard input: {err}")),
                    )
                })?;
            Ok(text)
        }
    }
}

fn fail(path: Option<&Path>, failure: Failure) -> FileFailure {
    FileFailure {
        path: path.map(Path::to_path_buf),
        failure,
    }
}

// =============================================================================
// Paths
// =============================================================================

/// Inputs as paths, `None` standing for standard input.
fn input_list(files: &[PathBuf]) -> Vec<Option<PathBuf>> {
    if files.is_empty() {
        return vec![None];
    }
    files
        .iter()
        .map(|file| single_input(Some(file)).map(Path::to_path_buf))
        .collect()
}

fn single_input(file: Option<&Path>) -> Option<&Path> {
    file.filter(|file| file.as_os_str() != STDIN_NAME)
}

/// `dir/name.js` for an input `.../name.json`.
pub fn output_path(out_dir: &Path, input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map_or_else(|| input.as_os_str().to_os_string(), ToOwned::to_owned);
    let mut name = stem;
    name.push(".js");
    out_dir.join(name)
}

fn with_newline(mut text: String) -> String {
    if !text.is_empty() && !text.ends_with('\n') {
        text.push('\n');
    }
    text
}
