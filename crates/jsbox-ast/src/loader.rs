//! JSON loading of serialized trees.
//!
//! The external parser hands trees over as JSON (see [`Node`] for the
//! format). Loading happens in two steps: a byte-level scan that rejects
//! documents nested deeper than [`MAX_JSON_NESTING`] before any recursion
//! happens, then a `serde_json` decode with its own recursion limit turned
//! off (the scan has already bounded it).

use jsbox_common::limits::MAX_JSON_NESTING;
use jsbox_common::{InputError, SourceLocation};
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::node::Node;
use crate::validate::validate_program;

/// Decode a tree without checking its shape.
pub fn parse_tree(text: &str) -> Result<Node, InputError> {
    check_nesting(text)?;

    let mut deserializer = serde_json::Deserializer::from_str(text);
    deserializer.disable_recursion_limit();
    let node = Node::deserialize(&mut deserializer).map_err(decode_error)?;
    deserializer.end().map_err(decode_error)?;
    Ok(node)
}

/// Decode a program and validate its shape.
#[instrument(level = "debug", skip_all, fields(bytes = text.len()))]
pub fn load_program(text: &str) -> Result<Node, InputError> {
    let program = parse_tree(text)?;
    validate_program(&program)?;
    debug!(statements = program.len(), "program loaded");
    Ok(program)
}

/// Serialize a tree back to JSON.
pub fn to_json_string(node: &Node, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(node)
    } else {
        serde_json::to_string(node)
    }
}

fn decode_error(err: serde_json::Error) -> InputError {
    let line = u32::try_from(err.line()).unwrap_or(u32::MAX);
    let column = u32::try_from(err.column()).unwrap_or(u32::MAX);
    // serde_json appends " at line L column C"; the location is carried
    // separately.
    let message = err.to_string();
    let message = match message.rfind(" at line ") {
        Some(pos) if line > 0 => message[..pos].to_string(),
        _ => message,
    };
    InputError::parse(message, SourceLocation::new(line, column))
}

/// Maximum `{`/`[` nesting in a JSON document, ignoring brackets inside
/// strings. Fails as soon as the limit is exceeded.
fn check_nesting(text: &str) -> Result<(), InputError> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for byte in text.bytes() {
        if in_string {
            match byte {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match byte {
            b'"' => in_string = true,
            b'{' | b'[' => {
                depth += 1;
                if depth > MAX_JSON_NESTING {
                    return Err(InputError::TooDeep {
                        depth,
                        limit: MAX_JSON_NESTING,
                    });
                }
            }
            b'}' | b']' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../tests/loader.rs"]
mod tests;
