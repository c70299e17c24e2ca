//! Command-line driver for the jsbox sandboxing compiler.
//!
//! The `jsbox` binary reads syntax trees serialized as JSON by an external
//! parser and either sandboxes them, renders them, lists the globals they
//! introduce or lints their translation calls.

pub mod args;
pub mod config;
pub mod driver;
pub mod reporter;
pub mod tracing_config;

#[cfg(test)]
#[path = "../tests/args_tests.rs"]
mod args_tests;
#[cfg(test)]
#[path = "../tests/config_tests.rs"]
mod config_tests;
#[cfg(test)]
#[path = "../tests/driver_tests.rs"]
mod driver_tests;
#[cfg(test)]
#[path = "../tests/reporter_tests.rs"]
mod reporter_tests;
#[cfg(test)]
#[path = "../tests/tracing_config_tests.rs"]
mod tracing_config_tests;
