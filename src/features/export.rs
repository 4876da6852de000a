//! Export of the raw source and the rendered preview
//!
//! - `.tex` download of the editor contents
//! - A standalone print page that opens the browser print dialog, used for
//!   print-to-PDF
//! - A rich-text clipboard payload (HTML plus plain-text fallback)

use lazy_static::lazy_static;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::utils::error::{RenderError, RenderResult};

lazy_static! {
    static ref BLOCK_BREAK: Regex =
        Regex::new(r"(?i)<br\s*/?>|</(?:p|div|h[1-6]|li|ul|ol)>|<li[^>]*>").unwrap();
    static ref TAG: Regex = Regex::new(r"<[^>]+>").unwrap();
    static ref BLANK_LINES: Regex = Regex::new(r"\n[ \t]*(?:\n[ \t]*)+").unwrap();
    static ref UNSAFE_STEM: Regex = Regex::new(r"[^A-Za-z0-9._-]+").unwrap();
}

const PRINT_STYLE: &str = "body{font-family:'Latin Modern Roman','Times New Roman',serif;max-width:800px;margin:2em auto;line-height:1.4}\
ul{margin:0.2em 0}h2{border-bottom:1px solid #000;font-size:1.2em}\
@media print{body{margin:0}}";

// =============================================================================
// .tex export
// =============================================================================

/// File stem safe for any filesystem; falls back to `document`
pub fn sanitize_file_stem(stem: &str) -> String {
    let stem = stem.trim().trim_end_matches(".tex");
    let cleaned = UNSAFE_STEM.replace_all(stem, "-");
    let cleaned = cleaned.trim_matches(|c| c == '-' || c == '.');
    if cleaned.is_empty() {
        "document".to_string()
    } else {
        cleaned.to_string()
    }
}

/// Write `source` to `<dir>/<stem>.tex` and return the path
pub fn export_tex(source: &str, dir: &Path, stem: &str) -> RenderResult<PathBuf> {
    let path = dir.join(format!("{}.tex", sanitize_file_stem(stem)));
    fs::create_dir_all(dir)?;
    fs::write(&path, source).map_err(|e| {
        RenderError::export(format!("cannot write {}: {}", path.display(), e))
    })?;
    info!(path = %path.display(), bytes = source.len(), "exported source");
    Ok(path)
}

// =============================================================================
// Print page
// =============================================================================

/// Standalone HTML page wrapping the rendered fragment; prints on load
pub fn print_page(html: &str, title: &str) -> String {
    let title = if title.trim().is_empty() {
        "Document"
    } else {
        title.trim()
    };
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n<style>{}</style>\n</head>\n<body>\n{}\n<script>window.onload=function(){{window.print();}};</script>\n</body>\n</html>\n",
        escape_text(title),
        PRINT_STYLE,
        html
    )
}

/// Write the print page to `path`, creating parent directories
pub fn write_print_page(html: &str, title: &str, path: &Path) -> RenderResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, print_page(html, title)).map_err(|e| {
        RenderError::export(format!("cannot write {}: {}", path.display(), e))
    })?;
    info!(path = %path.display(), "wrote print page");
    Ok(())
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

// =============================================================================
// Clipboard
// =============================================================================

/// Clipboard payload: rich HTML and a plain-text fallback
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RichText {
    pub html: String,
    pub plain: String,
}

/// Build the clipboard payload for a rendered fragment
pub fn rich_text(html: &str) -> RichText {
    let with_breaks = BLOCK_BREAK.replace_all(html, "\n");
    let text = TAG.replace_all(&with_breaks, "");
    let text = text
        .replace("&nbsp;", " ")
        .replace("&#124;", "|")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&amp;", "&");
    let text = BLANK_LINES.replace_all(&text, "\n");
    let plain = text
        .lines()
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string();

    RichText {
        html: html.to_string(),
        plain,
    }
}

/// A clipboard that accepts rich text
pub trait Clipboard {
    fn write_rich_text(&mut self, content: &RichText) -> RenderResult<()>;
}

/// Result of a copy action, phrased for the status line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyStatus {
    Copied,
    /// The clipboard refused; the user has to copy by hand
    ManualCopyRequired(String),
}

impl CopyStatus {
    pub fn message(&self) -> String {
        match self {
            CopyStatus::Copied => "Copied formatted text to clipboard".to_string(),
            CopyStatus::ManualCopyRequired(reason) => format!(
                "Could not copy automatically ({}). Select the preview and copy it manually.",
                reason
            ),
        }
    }
}

/// Copy a rendered fragment, turning failures into a status
pub fn copy_rendered<C: Clipboard>(clipboard: &mut C, html: &str) -> CopyStatus {
    match clipboard.write_rich_text(&rich_text(html)) {
        Ok(()) => CopyStatus::Copied,
        Err(err) => {
            warn!(error = %err, "clipboard write failed");
            CopyStatus::ManualCopyRequired(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[derive(Default)]
    struct RecordingClipboard {
        written: Vec<RichText>,
        deny: bool,
    }

    impl Clipboard for RecordingClipboard {
        fn write_rich_text(&mut self, content: &RichText) -> RenderResult<()> {
            if self.deny {
                return Err(RenderError::export("permission denied"));
            }
            self.written.push(content.clone());
            Ok(())
        }
    }

    #[test]
    fn test_sanitize_file_stem() {
        assert_eq!(sanitize_file_stem("my resume.tex"), "my-resume");
        assert_eq!(sanitize_file_stem("../../etc"), "etc");
        assert_eq!(sanitize_file_stem("  "), "document");
    }

    #[test]
    fn test_export_tex_writes_file() {
        let dir = tempdir().unwrap();
        let path = export_tex(r"\textbf{x}", dir.path(), "cv").unwrap();
        assert_eq!(path.file_name().unwrap(), "cv.tex");
        assert_eq!(fs::read_to_string(path).unwrap(), r"\textbf{x}");
    }

    #[test]
    fn test_print_page() {
        let page = print_page("<h2>Intro</h2>", "A & B");
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<title>A &amp; B</title>"));
        assert!(page.contains("<h2>Intro</h2>"));
        assert!(page.contains("window.print()"));
    }

    #[test]
    fn test_write_print_page() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out").join("cv.html");
        write_print_page("<h2>Intro</h2>", "CV", &path).unwrap();
        let page = fs::read_to_string(&path).unwrap();
        assert_eq!(page, print_page("<h2>Intro</h2>", "CV"));
    }

    #[test]
    fn test_write_print_page_into_file_fails() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "x").unwrap();
        assert!(write_print_page("x", "t", &blocker.join("page.html")).is_err());
    }

    #[test]
    fn test_rich_text_plain_fallback() {
        let rt = rich_text("<h2>Skills</h2><ul><li>Rust &amp; C<li>Go</ul>a &#124; b<br>c");
        assert_eq!(rt.plain, "Skills\nRust & C\nGo\na | b\nc");
        assert!(rt.html.contains("<h2>"));
    }

    #[test]
    fn test_copy_success_and_denial() {
        let mut clipboard = RecordingClipboard::default();
        assert_eq!(copy_rendered(&mut clipboard, "<em>x</em>"), CopyStatus::Copied);
        assert_eq!(clipboard.written[0].plain, "x");

        clipboard.deny = true;
        let status = copy_rendered(&mut clipboard, "<em>x</em>");
        assert!(matches!(status, CopyStatus::ManualCopyRequired(_)));
        assert!(status.message().contains("manually"));
    }
}
