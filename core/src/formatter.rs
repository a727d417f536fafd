#![deny(missing_docs)]

//! # Formatting
//!
//! The formatter collaborator contract and a built-in implementation.
//!
//! Formatting only normalizes layout; it must be idempotent and may reject
//! text it cannot make sense of, which callers treat as a per-declaration failure.

use crate::error::{AppError, AppResult};
use serde::Deserialize;

/// Explicit formatter configuration, passed into every call.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormatOptions {
    /// Spaces per nesting level.
    pub indent_width: usize,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self { indent_width: 2 }
    }
}

/// Pretty-printer for generated declaration text.
pub trait Formatter {
    /// Formats `text`. Must satisfy `format(format(x)) == format(x)`.
    fn format(&self, text: &str, options: &FormatOptions) -> AppResult<String>;
}

/// Bracket-depth re-indenter.
///
/// - trims every line and re-indents it by bracket depth
/// - keeps a single blank line between top-level declarations, drops the rest
/// - aligns the `*` lines of block comments under the opening `/**`
/// - rejects unbalanced brackets
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultFormatter;

impl Formatter for DefaultFormatter {
    fn format(&self, text: &str, options: &FormatOptions) -> AppResult<String> {
        let indent_unit = " ".repeat(options.indent_width);
        let mut out: Vec<String> = Vec::new();
        let mut depth: usize = 0;
        let mut in_comment = false;
        let mut pending_blank = false;

        for (idx, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() {
                pending_blank = depth == 0 && !in_comment && !out.is_empty();
                continue;
            }
            if pending_blank {
                out.push(String::new());
                pending_blank = false;
            }

            if in_comment || line.starts_with("/*") {
                let aligned = if line.starts_with('*') {
                    format!(" {}", line)
                } else {
                    line.to_string()
                };
                out.push(format!("{}{}", indent_unit.repeat(depth), aligned));
                in_comment = !line.contains("*/");
                continue;
            }

            let (opens, closes, leading) = bracket_counts(line);
            let level = depth.checked_sub(leading).ok_or_else(|| unbalanced(idx))?;
            out.push(format!("{}{}", indent_unit.repeat(level), line));

            depth = (depth + opens)
                .checked_sub(closes)
                .ok_or_else(|| unbalanced(idx))?;
        }

        if depth != 0 || in_comment {
            return Err(AppError::Format(format!(
                "Unterminated {} at end of input",
                if in_comment { "comment" } else { "bracket" }
            )));
        }

        let mut formatted = out.join("\n");
        formatted.push('\n');
        Ok(formatted)
    }
}

/// Formats one declaration's text, degrading to an empty string on failure.
///
/// Failures are logged and never propagate, so sibling declarations are unaffected.
pub fn format_or_empty(
    formatter: &dyn Formatter,
    text: &str,
    options: &FormatOptions,
    declaration: &str,
) -> String {
    match formatter.format(text, options) {
        Ok(formatted) => formatted,
        Err(e) => {
            tracing::warn!(declaration, "Formatting failed, emitting empty output: {}", e);
            String::new()
        }
    }
}

fn unbalanced(line_idx: usize) -> AppError {
    AppError::Format(format!("Unbalanced closing bracket on line {}", line_idx + 1))
}

/// Counts `{[(` and `}])` outside string literals, plus the closers that lead the line.
fn bracket_counts(line: &str) -> (usize, usize, usize) {
    let mut opens = 0;
    let mut closes = 0;
    let mut leading = 0;
    let mut seen_other = false;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for c in line.chars() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            seen_other = true;
            continue;
        }
        match c {
            '"' | '\'' | '`' => {
                quote = Some(c);
                seen_other = true;
            }
            '{' | '[' | '(' => {
                opens += 1;
                seen_other = true;
            }
            '}' | ']' | ')' => {
                closes += 1;
                if !seen_other {
                    leading += 1;
                }
            }
            _ => seen_other = true,
        }
    }
    (opens, closes, leading.min(closes))
}
