//! # texhtml
//!
//! Live-preview LaTeX to HTML renderer written in Rust.
//!
//! ## Features
//!
//! - **Macro Expansion**: Brace-balanced scanner with recursive argument rendering
//! - **Fail-Soft**: Malformed input degrades to literal text, never panics
//! - **Title Block**: `\title`, `\author`, `\date` and `\maketitle`, including `\today`
//! - **Resume Commands**: `\resumeSubheading`, `\resumeItem` and friends built in
//! - **Editor Session**: Debounced preview, autosave, templates and export
//! - **WASM Support**: Compiles to WebAssembly for browser usage
//!
//! ## Usage Examples
//!
//! ### Fragment Rendering
//!
//! ```rust
//! use texhtml::latex_to_html;
//!
//! let html = latex_to_html(r"\textbf{Hello \textit{World}}");
//! assert_eq!(html, "<strong>Hello <em>World</em></strong>");
//! ```
//!
//! ### Full Document Rendering
//!
//! ```rust
//! use texhtml::{LatexRenderer, RenderError};
//!
//! let mut renderer = LatexRenderer::new();
//! let html = renderer
//!     .compile(r#"
//!     \documentclass{article}
//!     \title{My Paper}
//!     \begin{document}
//!     \maketitle
//!     \section{Introduction}
//!     Hello, world!
//!     \end{document}
//! "#)
//!     .unwrap();
//! assert!(html.contains("<h1 class=\"title\">My Paper</h1>"));
//! assert!(html.contains("<h2>Introduction</h2>"));
//!
//! let err = renderer.compile(r"\errorcompile").unwrap_err();
//! assert!(matches!(err, RenderError::Compilation { .. }));
//! ```

/// Core rendering modules
pub mod core;

/// Data layer - macro table and constants
pub mod data;

/// Feature modules - editor session, storage, export, templates
pub mod features;

/// Utility modules
pub mod utils;

/// WASM bindings (feature-gated)
#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export core rendering functions
pub use core::latex2html;
pub use core::latex2html::{
    compile_latex, latex_to_html, latex_to_html_with_diagnostics, latex_to_html_with_options,
    LatexRenderer, Preamble, RenderOptions,
};

// Re-export data modules
pub use data::constants;
pub use data::macros;

// Re-export feature modules
pub use features::export;
pub use features::session;
pub use features::storage;
pub use features::templates;
pub use features::{EditorSession, SessionConfig};

// Re-export utilities
pub use utils::diagnostics;
pub use utils::error::{RenderError, RenderOutput, RenderResult, RenderWarning};

/// Whether `input` looks like a complete document rather than a fragment
pub fn is_full_document(input: &str) -> bool {
    input.contains("\\documentclass") || input.contains(constants::DOCUMENT_BEGIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latex_to_html_basic() {
        assert_eq!(latex_to_html(r"\section{Intro}"), "<h2>Intro</h2>");
    }

    #[test]
    fn test_is_full_document() {
        assert!(is_full_document(r"\documentclass{article}"));
        assert!(is_full_document(r"\begin{document}x\end{document}"));
        assert!(!is_full_document(r"\textbf{x}"));
    }

    #[test]
    fn test_compile_reports_marker() {
        let err = compile_latex(r"before \errorcompile after").unwrap_err();
        assert_eq!(err.to_string(), constants::COMPILATION_ERROR_MESSAGE);
    }

    #[test]
    fn test_options_preset_strict() {
        let opts = RenderOptions::strict();
        assert!(!opts.strip_unknown_environments);
        assert!(opts.title_block);
    }

    #[test]
    fn test_template_reexport() {
        assert!(templates::find_template("resume").is_some());
    }
}
