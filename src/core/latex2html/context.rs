//! Core state and structures for LaTeX to HTML rendering
//!
//! This module contains the renderer struct, its options, and the pipeline
//! driver that every render (top-level or nested argument) goes through.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::body::{insert_title_block, isolate_body, strip_preamble_commands};
use super::cleanup::{apply_cleanup, collapse_spacing, protect_specials, strip_comments, unknown_commands};
use super::preamble::{extract_preamble, resolve_today};
use super::utils::{replace_command, restore_literal_commands};
use crate::data::constants::{COMPILATION_ERROR_MESSAGE, ERROR_MARKER};
use crate::data::macros::BUILTIN_MACROS;
use crate::utils::error::{RenderError, RenderOutput, RenderResult, RenderWarning};

// =============================================================================
// Render Options
// =============================================================================

/// Options for LaTeX to HTML rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Literal token that makes `compile` reject the document.
    /// An empty marker disables the hook.
    /// Default: `\errorcompile`
    pub error_marker: String,

    /// Render `\maketitle` as a title block; when false it is dropped
    /// Default: true
    pub title_block: bool,

    /// Drop `\begin{..}`/`\end{..}` of environments without an HTML mapping
    /// Default: true
    pub strip_unknown_environments: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            error_marker: ERROR_MARKER.to_string(),
            title_block: true,
            strip_unknown_environments: true,
        }
    }
}

impl RenderOptions {
    /// Create new options with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep unknown environment delimiters (as plain text after cleanup)
    pub fn strict() -> Self {
        Self {
            strip_unknown_environments: false,
            ..Self::default()
        }
    }

    /// Whether `source` trips the compilation hook
    pub fn triggers_error(&self, source: &str) -> bool {
        !self.error_marker.is_empty() && source.contains(&self.error_marker)
    }
}

// =============================================================================
// Renderer
// =============================================================================

/// LaTeX → HTML renderer
///
/// Holds the options, the date `\today` resolves to, and the warnings of
/// the current render. A renderer can be reused; each top-level call starts
/// with a fresh warning list.
#[derive(Debug, Clone)]
pub struct LatexRenderer {
    options: RenderOptions,
    today: NaiveDate,
    depth: usize,
    warnings: Vec<RenderWarning>,
}

impl Default for LatexRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl LatexRenderer {
    pub fn new() -> Self {
        Self::with_options(RenderOptions::default())
    }

    pub fn with_options(options: RenderOptions) -> Self {
        Self {
            options,
            today: Local::now().date_naive(),
            depth: 0,
            warnings: Vec::new(),
        }
    }

    /// Fix the date `\today` resolves to
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Nesting depth of the render in progress (0 at top level)
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Render a document or fragment to HTML
    pub fn render(&mut self, source: &str) -> String {
        self.warnings.clear();
        self.depth = 0;
        let html = self.render_source(source);
        restore_literal_commands(&html)
    }

    /// Render and collect warnings, including commands rendered as plain text
    pub fn render_with_diagnostics(&mut self, source: &str) -> RenderOutput {
        let html = self.render(source);
        let mut warnings = std::mem::take(&mut self.warnings);
        for name in unknown_commands(isolate_body(&strip_comments(source))) {
            warnings.push(
                RenderWarning::new("unsupported command rendered as plain text")
                    .for_command(name),
            );
        }
        RenderOutput::with_warnings(html, warnings)
    }

    /// Render for display, honouring the compilation hook.
    ///
    /// This is the single entry point for live preview and explicit
    /// render actions alike.
    pub fn compile(&mut self, source: &str) -> RenderResult<String> {
        if self.options.triggers_error(source) {
            debug!(marker = %self.options.error_marker, "compilation hook triggered");
            return Err(RenderError::compilation(COMPILATION_ERROR_MESSAGE));
        }
        Ok(self.render(source))
    }

    /// Warnings recorded since the last top-level render
    pub fn warnings(&self) -> &[RenderWarning] {
        &self.warnings
    }

    pub fn take_warnings(&mut self) -> Vec<RenderWarning> {
        std::mem::take(&mut self.warnings)
    }

    pub(crate) fn push_warning(&mut self, warning: RenderWarning) {
        self.warnings.push(warning);
    }

    /// Render a macro argument through the whole pipeline
    pub(crate) fn render_nested(&mut self, fragment: &str) -> String {
        self.depth += 1;
        let html = self.render_source(fragment);
        self.depth -= 1;
        html
    }

    fn render_source(&mut self, source: &str) -> String {
        let body = strip_comments(isolate_body(source));
        let preamble = extract_preamble(&strip_comments(source), self.today);
        if self.depth == 0 {
            debug!(
                body_len = body.len(),
                has_title = !preamble.title.is_empty(),
                "document body isolated"
            );
        }

        let body = if self.options.title_block {
            insert_title_block(&body, &preamble)
        } else {
            replace_command(&body, "maketitle", "")
        };
        let body = strip_preamble_commands(&body);
        let body = resolve_today(&body, self.today);
        let mut body = protect_specials(&collapse_spacing(&body));

        for spec in BUILTIN_MACROS {
            if body.contains(&spec.token()) {
                body = self.expand_macro(&body, spec);
            }
        }

        apply_cleanup(&body, &self.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn renderer() -> LatexRenderer {
        LatexRenderer::new().with_today(NaiveDate::from_ymd_opt(2024, 1, 9).unwrap())
    }

    #[test]
    fn test_nested_style_commands() {
        let html = renderer().render(r"\textbf{Hello \textit{World}}");
        assert_eq!(html, "<strong>Hello <em>World</em></strong>");
    }

    #[test]
    fn test_section_heading() {
        assert_eq!(renderer().render(r"\section{Intro}"), "<h2>Intro</h2>");
    }

    #[test]
    fn test_unbalanced_shows_literal_command() {
        let mut r = renderer();
        let html = r.render(r"\textbf{unterminated");
        assert_eq!(html, r"\textbfunterminated");
        assert_eq!(r.warnings().len(), 1);
    }

    #[test]
    fn test_maketitle_with_today() {
        let src = r"\title{Report}\date{\today}\begin{document}\maketitle\end{document}";
        let html = renderer().render(src);
        assert!(html.contains("<h1 class=\"title\">Report</h1>"));
        assert!(html.contains("<p class=\"date\">January 9, 2024</p>"));
        assert!(!html.contains("class=\"author\""));
    }

    #[test]
    fn test_title_block_disabled() {
        let options = RenderOptions {
            title_block: false,
            ..Default::default()
        };
        let html = LatexRenderer::with_options(options)
            .render(r"\title{T}\begin{document}\maketitle x\end{document}");
        assert_eq!(html, " x");
    }

    #[test]
    fn test_preamble_does_not_leak() {
        let src = "\\documentclass{article}\n\\usepackage{x}\n\\begin{document}Body\\end{document}";
        assert_eq!(renderer().render(src), "Body");
    }

    #[test]
    fn test_compile_error_marker() {
        let err = renderer().compile(r"hello \errorcompile").unwrap_err();
        assert!(err.is_compilation());
        assert_eq!(err.to_string(), COMPILATION_ERROR_MESSAGE);
    }

    #[test]
    fn test_compile_empty_marker_disables_hook() {
        let options = RenderOptions {
            error_marker: String::new(),
            ..Default::default()
        };
        let mut r = LatexRenderer::with_options(options);
        assert!(r.compile(r"\errorcompile").is_ok());
    }

    #[test]
    fn test_diagnostics_reports_unknown_commands() {
        let out = renderer().render_with_diagnostics(r"\LaTeX\ is \textbf{fun}");
        assert!(out.html.contains("<strong>fun</strong>"));
        assert!(out
            .warnings
            .iter()
            .any(|w| w.command.as_deref() == Some("LaTeX")));
    }

    #[test]
    fn test_warnings_reset_between_renders() {
        let mut r = renderer();
        r.render(r"\textbf{open");
        assert_eq!(r.warnings().len(), 1);
        r.render("fine");
        assert!(r.warnings().is_empty());
    }
}
