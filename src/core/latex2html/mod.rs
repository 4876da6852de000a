//! LaTeX to HTML rendering module
//!
//! This module turns a restricted subset of LaTeX into an HTML fragment for
//! live preview. It is a pure string transform: no I/O, no state shared
//! between renders beyond the static macro table.
//!
//! # Module Structure
//!
//! - `context`: The renderer (`LatexRenderer`), its options and the pipeline driver
//! - `preamble`: `\title`, `\author`, `\date` extraction and `\today`
//! - `body`: `\begin{document}` isolation and the `\maketitle` block
//! - `scanner`: Brace-balanced macro scanner
//! - `cleanup`: Comment/spacing stripping and the final cleanup pass
//! - `utils`: Placeholders and token replacement helpers
//!
//! # Pipeline
//!
//! 1. Isolate the body and strip `%` comments
//! 2. Extract the preamble, expand `\maketitle`, drop stray metadata commands
//! 3. Collapse spacing commands, protect `\\` and `$|$`
//! 4. One pass per built-in macro; every argument is rendered recursively
//! 5. Environments, list delimiters, size declarations, leftover stripping
//!
//! # Example
//!
//! ```rust
//! use texhtml::core::latex2html::{LatexRenderer, RenderOptions};
//!
//! let mut renderer = LatexRenderer::new();
//! let html = renderer.render(r"\textbf{Hello \textit{World}}");
//! assert_eq!(html, "<strong>Hello <em>World</em></strong>");
//!
//! let mut strict = LatexRenderer::with_options(RenderOptions::strict());
//! let _ = strict.render(r"\begin{quote}kept\end{quote}");
//! ```

// Submodules
pub mod body;
pub mod cleanup;
pub mod context;
pub mod preamble;
pub mod scanner;
pub mod utils;

// Re-export main types for convenience
pub use body::{insert_title_block, isolate_body, title_block};
pub use context::{LatexRenderer, RenderOptions};
pub use preamble::{extract_preamble, format_today, Preamble};
pub use scanner::{parse_invocation, read_braced_arg, ArgRead, InvocationError};

use crate::utils::error::{RenderOutput, RenderResult};

// =============================================================================
// Public API Functions
// =============================================================================

/// Render a LaTeX document or fragment to HTML
///
/// # Example
///
/// ```rust
/// use texhtml::core::latex2html::latex_to_html;
///
/// let html = latex_to_html(r"\section{Intro}");
/// assert_eq!(html, "<h2>Intro</h2>");
/// ```
pub fn latex_to_html(input: &str) -> String {
    LatexRenderer::new().render(input)
}

/// Render with custom options
pub fn latex_to_html_with_options(input: &str, options: RenderOptions) -> String {
    LatexRenderer::with_options(options).render(input)
}

/// Render and collect non-fatal warnings
pub fn latex_to_html_with_diagnostics(input: &str) -> RenderOutput {
    LatexRenderer::new().render_with_diagnostics(input)
}

/// Render for display, rejecting documents that trip the compilation hook
pub fn compile_latex(input: &str) -> RenderResult<String> {
    LatexRenderer::new().compile(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_without_wrapper() {
        let html = latex_to_html(r"\item First \item Second");
        assert_eq!(html.matches("<li>").count(), 2);
        assert!(!html.contains("</li>"));
    }

    #[test]
    fn test_compile_latex_ok() {
        assert_eq!(compile_latex(r"\emph{x}").unwrap(), "<em>x</em>");
    }

    #[test]
    fn test_with_diagnostics_clean_input() {
        let out = latex_to_html_with_diagnostics(r"\textbf{a}");
        assert!(!out.has_warnings());
    }
}
