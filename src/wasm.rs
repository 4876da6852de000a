//! WASM bindings for texhtml
//!
//! This module provides JavaScript-accessible functions for LaTeX to HTML
//! rendering in the editor page.

#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

#[cfg(feature = "wasm")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "wasm")]
use crate::{LatexRenderer, RenderOptions};

/// Render result with additional metadata
#[cfg(feature = "wasm")]
#[derive(Serialize, Deserialize)]
pub struct ConvertResult {
    /// The rendered HTML
    pub output: String,
    /// Whether the render was successful
    pub success: bool,
    /// Error message if the render failed
    pub error: Option<String>,
    /// Warnings during rendering
    pub warnings: Vec<String>,
}

#[cfg(feature = "wasm")]
impl ConvertResult {
    fn failed(message: String) -> Self {
        Self {
            output: String::new(),
            success: false,
            error: Some(message),
            warnings: vec![],
        }
    }
}

/// Initialize panic hook for better error messages in browser console
#[cfg(feature = "wasm")]
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Render LaTeX to an HTML fragment
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "renderLatex")]
pub fn render_latex_wasm(input: &str) -> String {
    crate::latex_to_html(input)
}

/// Render LaTeX with options (`RenderOptions` as a plain object)
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "renderLatexWithOptions")]
pub fn render_latex_with_options_wasm(input: &str, options: JsValue) -> JsValue {
    let opts: RenderOptions = serde_wasm_bindgen::from_value(options).unwrap_or_default();
    to_js(run_guarded(|| {
        let output = LatexRenderer::with_options(opts).render_with_diagnostics(input);
        ConvertResult {
            output: output.html,
            success: true,
            error: None,
            warnings: output.warnings.iter().map(ToString::to_string).collect(),
        }
    }))
}

/// Render for the preview pane, honouring the compilation hook
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "compileLatex")]
pub fn compile_latex_wasm(input: &str) -> JsValue {
    to_js(run_guarded(|| {
        let mut renderer = LatexRenderer::new();
        match renderer.compile(input) {
            Ok(output) => ConvertResult {
                output,
                success: true,
                error: None,
                warnings: renderer.warnings().iter().map(ToString::to_string).collect(),
            },
            Err(err) => ConvertResult::failed(err.to_string()),
        }
    }))
}

/// Check LaTeX for potential issues
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "checkLatex")]
pub fn check_latex_wasm(input: &str) -> JsValue {
    use crate::diagnostics::DiagnosticLevel;

    let result = crate::diagnostics::check_latex(input);

    // Group diagnostics by level
    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut infos = Vec::new();

    for d in &result.diagnostics {
        match d.level {
            DiagnosticLevel::Error => errors.push(d.message.clone()),
            DiagnosticLevel::Warning => warnings.push(d.message.clone()),
            DiagnosticLevel::Info => infos.push(d.message.clone()),
        }
    }

    let summary = CheckSummary {
        errors,
        warnings,
        infos,
        has_errors: result.has_errors(),
    };
    serde_wasm_bindgen::to_value(&summary).unwrap_or(JsValue::NULL)
}

/// Summary of LaTeX check results
#[cfg(feature = "wasm")]
#[derive(Serialize, Deserialize)]
pub struct CheckSummary {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub infos: Vec<String>,
    pub has_errors: bool,
}

/// Print page for print-to-PDF
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "printPage")]
pub fn print_page_wasm(html: &str, title: &str) -> String {
    crate::export::print_page(html, title)
}

/// Plain-text fallback for the clipboard
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "plainText")]
pub fn plain_text_wasm(html: &str) -> String {
    crate::export::rich_text(html).plain
}

/// Source of a built-in template, or an empty string
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "templateSource")]
pub fn template_source_wasm(name: &str) -> String {
    crate::templates::find_template(name)
        .map(|t| t.source.to_string())
        .unwrap_or_default()
}

/// Get version information
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "getVersion")]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(feature = "wasm")]
fn run_guarded<F: FnOnce() -> ConvertResult>(f: F) -> ConvertResult {
    match std::panic::catch_unwind(std::panic::AssertUnwindSafe(f)) {
        Ok(result) => result,
        Err(e) => {
            // Try to extract panic message for better error reporting
            let error_msg = if let Some(s) = e.downcast_ref::<&str>() {
                format!("Render failed: {}", s)
            } else if let Some(s) = e.downcast_ref::<String>() {
                format!("Render failed: {}", s)
            } else {
                "Render failed: unknown error (check browser console for details)".to_string()
            };
            ConvertResult::failed(error_msg)
        }
    }
}

#[cfg(feature = "wasm")]
fn to_js(result: ConvertResult) -> JsValue {
    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}
