//! Core rendering modules
//!
//! This module contains the rendering engine:
//! - `latex2html`: LaTeX to HTML macro expander

pub mod latex2html;

// Re-export main types and functions from latex2html
pub use latex2html::{
    compile_latex, latex_to_html, latex_to_html_with_diagnostics, latex_to_html_with_options,
    LatexRenderer, Preamble, RenderOptions,
};
