//! LaTeX diagnostics for the previewer
//!
//! The renderer never fails on bad input; this module explains what the
//! preview will do with it. It can identify:
//!
//! - Unbalanced braces
//! - Built-in commands whose arguments will not parse
//! - Unbalanced or mismatched environments
//! - Commands the previewer renders as plain text
//! - The compilation error marker
//!
//! ## Example
//!
//! ```rust
//! use texhtml::diagnostics::{check_latex, DiagnosticLevel};
//!
//! let result = check_latex(r"\begin{itemize}");
//! assert!(!result.is_empty());
//! ```

use std::fmt;

use crate::core::latex2html::cleanup::{is_handled_command, strip_comments};
use crate::core::latex2html::utils::{find_command, offset_to_location};
use crate::core::latex2html::{isolate_body, parse_invocation, InvocationError};
use crate::data::constants::ERROR_MARKER;
use crate::data::macros::BUILTIN_MACROS;
use fxhash::FxHashSet;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref COMMAND: Regex = Regex::new(r"\\([A-Za-z]+)").unwrap();
    static ref ENV_DELIMITER: Regex = Regex::new(r"\\(begin|end)\s*\{([^}]*)\}").unwrap();
}

/// Diagnostic severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DiagnosticLevel {
    /// Informational note
    Info,
    /// Warning - the preview will differ from what LaTeX would produce
    Warning,
    /// Error - the preview will not be produced
    Error,
}

impl fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticLevel::Info => write!(f, "info"),
            DiagnosticLevel::Warning => write!(f, "warning"),
            DiagnosticLevel::Error => write!(f, "error"),
        }
    }
}

/// A single diagnostic message
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Severity level
    pub level: DiagnosticLevel,
    /// Human-readable message
    pub message: String,
    /// Line number (1-indexed)
    pub line: Option<usize>,
    /// Column number (1-indexed)
    pub column: Option<usize>,
    /// Suggested fix
    pub suggestion: Option<String>,
}

impl Diagnostic {
    /// Create a new diagnostic
    pub fn new(level: DiagnosticLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            line: None,
            column: None,
            suggestion: None,
        }
    }

    /// Add location information
    pub fn with_location(mut self, line: usize, column: usize) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }

    /// Add suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.level, self.message)?;

        if let (Some(line), Some(col)) = (self.line, self.column) {
            write!(f, "\n  --> line {}:{}", line, col)?;
        }

        if let Some(ref suggestion) = self.suggestion {
            write!(f, "\n  = help: {}", suggestion)?;
        }

        Ok(())
    }
}

/// Check result with summary
#[derive(Debug, Default)]
pub struct CheckResult {
    /// All diagnostics
    pub diagnostics: Vec<Diagnostic>,
    /// Number of errors
    pub errors: usize,
    /// Number of warnings
    pub warnings: usize,
    /// Number of info messages
    pub infos: usize,
}

impl CheckResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic
    pub fn add(&mut self, diag: Diagnostic) {
        match diag.level {
            DiagnosticLevel::Error => self.errors += 1,
            DiagnosticLevel::Warning => self.warnings += 1,
            DiagnosticLevel::Info => self.infos += 1,
        }
        self.diagnostics.push(diag);
    }

    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }

    /// Check if there are any issues at all
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Get summary string
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if self.errors > 0 {
            parts.push(plural(self.errors, "error"));
        }
        if self.warnings > 0 {
            parts.push(plural(self.warnings, "warning"));
        }
        if self.infos > 0 {
            parts.push(plural(self.infos, "note"));
        }
        if parts.is_empty() {
            "no issues found".to_string()
        } else {
            parts.join(", ")
        }
    }
}

fn plural(n: usize, word: &str) -> String {
    format!("{} {}{}", n, word, if n == 1 { "" } else { "s" })
}

/// Check LaTeX source for issues, using the default error marker
pub fn check_latex(input: &str) -> CheckResult {
    check_latex_with_marker(input, ERROR_MARKER)
}

/// Check LaTeX source for issues
pub fn check_latex_with_marker(input: &str, error_marker: &str) -> CheckResult {
    let mut result = CheckResult::new();
    let source = strip_comments(input);

    if !error_marker.is_empty() {
        if let Some(pos) = source.find(error_marker) {
            let (line, col) = offset_to_location(&source, pos);
            result.add(
                Diagnostic::new(
                    DiagnosticLevel::Error,
                    format!("document contains the error marker '{}'", error_marker),
                )
                .with_location(line, col)
                .with_suggestion("Remove the marker to get a preview"),
            );
        }
    }

    check_brace_balance(&source, &mut result);
    check_invocations(&source, &mut result);
    check_environment_balance(&source, &mut result);
    check_unknown_commands(&source, &mut result);

    result
}

/// Check for unbalanced braces, ignoring escaped `\{` and `\}`
fn check_brace_balance(input: &str, result: &mut CheckResult) {
    let mut open_stack: Vec<usize> = Vec::new();
    let mut prev_backslash = false;

    for (offset, c) in input.char_indices() {
        if prev_backslash {
            prev_backslash = false;
            continue;
        }
        match c {
            '\\' => prev_backslash = true,
            '{' => open_stack.push(offset),
            '}' => {
                if open_stack.pop().is_none() {
                    let (line, col) = offset_to_location(input, offset);
                    result.add(
                        Diagnostic::new(DiagnosticLevel::Warning, "unmatched closing brace '}'")
                            .with_location(line, col)
                            .with_suggestion("Check for missing opening brace"),
                    );
                }
            }
            _ => {}
        }
    }

    if let Some(&first) = open_stack.first() {
        let (line, col) = offset_to_location(input, first);
        let depth = open_stack.len();
        result.add(
            Diagnostic::new(
                DiagnosticLevel::Warning,
                format!("{} unclosed brace{}", depth, if depth == 1 { "" } else { "s" }),
            )
            .with_location(line, col)
            .with_suggestion("Check for missing closing brace '}'"),
        );
    }
}

/// Built-in commands whose arguments will not parse
fn check_invocations(input: &str, result: &mut CheckResult) {
    for spec in BUILTIN_MACROS {
        for pos in find_command(input, spec.name) {
            let after_name = pos + spec.name.len() + 1;
            // `\section*` has its own entry
            if input[after_name..].starts_with('*') {
                continue;
            }
            let (line, col) = offset_to_location(input, pos);
            match parse_invocation(input, after_name, spec.arity) {
                Ok(_) => {}
                Err(InvocationError::Unbalanced { index }) => result.add(
                    Diagnostic::new(
                        DiagnosticLevel::Warning,
                        format!(
                            "argument {} of \\{} never closes; the command will be shown as text",
                            index + 1,
                            spec.name
                        ),
                    )
                    .with_location(line, col)
                    .with_suggestion("Add the missing '}'"),
                ),
                Err(InvocationError::MissingBrace { index }) => result.add(
                    Diagnostic::new(
                        DiagnosticLevel::Info,
                        format!(
                            "\\{} expects {} argument{} but argument {} has no '{{'",
                            spec.name,
                            spec.arity,
                            if spec.arity == 1 { "" } else { "s" },
                            index + 1
                        ),
                    )
                    .with_location(line, col),
                ),
            }
        }
    }
}

/// Check for unbalanced and mismatched environments
fn check_environment_balance(input: &str, result: &mut CheckResult) {
    let mut env_stack: Vec<(String, usize)> = Vec::new();

    for caps in ENV_DELIMITER.captures_iter(input) {
        let offset = caps.get(0).map_or(0, |m| m.start());
        let (line, col) = offset_to_location(input, offset);
        let name = caps[2].trim().to_string();

        if &caps[1] == "begin" {
            env_stack.push((name, line));
            continue;
        }

        match env_stack.pop() {
            Some((open_name, open_line)) if open_name != name => {
                result.add(
                    Diagnostic::new(
                        DiagnosticLevel::Warning,
                        format!(
                            "mismatched environment: opened '{}' at line {}, closed '{}' at line {}",
                            open_name, open_line, name, line
                        ),
                    )
                    .with_location(line, col)
                    .with_suggestion(format!("Use \\end{{{}}}", open_name)),
                );
            }
            Some(_) => {}
            None => {
                result.add(
                    Diagnostic::new(DiagnosticLevel::Warning, format!("unmatched \\end{{{}}}", name))
                        .with_location(line, col)
                        .with_suggestion("Check for missing \\begin"),
                );
            }
        }
    }

    for (env_name, line) in env_stack {
        result.add(
            Diagnostic::new(
                DiagnosticLevel::Warning,
                format!("unclosed environment '{}' (opened at line {})", env_name, line),
            )
            .with_suggestion(format!("Add \\end{{{}}}", env_name)),
        );
    }
}

/// Commands in the body that the preview shows as plain text
fn check_unknown_commands(input: &str, result: &mut CheckResult) {
    let body = isolate_body(input);
    let body_offset = body.as_ptr() as usize - input.as_ptr() as usize;
    let mut seen = FxHashSet::default();

    for caps in COMMAND.captures_iter(body) {
        let name = &caps[1];
        if is_handled_command(name) || !seen.insert(name.to_string()) {
            continue;
        }
        let offset = body_offset + caps.get(0).map_or(0, |m| m.start());
        let (line, col) = offset_to_location(input, offset);
        result.add(
            Diagnostic::new(
                DiagnosticLevel::Info,
                format!("\\{} is not supported by the preview", name),
            )
            .with_location(line, col)
            .with_suggestion("It will be rendered as plain text"),
        );
    }
}

/// Format check results for terminal output
pub fn format_diagnostics(result: &CheckResult, use_color: bool) -> String {
    let mut output = String::new();

    for diag in &result.diagnostics {
        if use_color {
            let color = match diag.level {
                DiagnosticLevel::Error => "\x1b[31m",   // Red
                DiagnosticLevel::Warning => "\x1b[33m", // Yellow
                DiagnosticLevel::Info => "\x1b[34m",    // Blue
            };
            output.push_str(color);
            output.push_str(&format!("{}", diag));
            output.push_str("\x1b[0m\n\n");
        } else {
            output.push_str(&format!("{}\n\n", diag));
        }
    }

    if use_color {
        if result.has_errors() {
            output.push_str("\x1b[31m");
        } else if result.warnings > 0 {
            output.push_str("\x1b[33m");
        } else {
            output.push_str("\x1b[32m");
        }
    }

    output.push_str(&format!("Summary: {}", result.summary()));

    if use_color {
        output.push_str("\x1b[0m");
    }

    output
}
