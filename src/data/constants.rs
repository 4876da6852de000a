//! Fixed constants and command tables
//!
//! Everything here is static data consumed by the cleanup pass and the
//! editor session: size commands, list delimiters, escaped specials and the
//! fixed keys/markers shared between the renderer and its callers.

use phf::phf_map;

/// Storage key the editor autosaves the raw source under
pub const AUTOSAVE_KEY: &str = "latex-editor-source";

/// Marker token that makes `compile` reject the document
pub const ERROR_MARKER: &str = "\\errorcompile";

/// Fixed message reported for the compilation hook
pub const COMPILATION_ERROR_MESSAGE: &str =
    "Compilation error: the document could not be compiled";

/// chrono format producing "Month D, YYYY"
pub const TODAY_FORMAT: &str = "%B %-d, %Y";

/// Default live-preview debounce
pub const DEFAULT_PREVIEW_DELAY_MS: u64 = 300;

/// Default autosave debounce
pub const DEFAULT_AUTOSAVE_DELAY_MS: u64 = 1000;

/// Size and shape declarations. Each opens a `<span>` that is never closed.
pub static SIZE_COMMANDS: phf::Map<&'static str, &'static str> = phf_map! {
    "Huge" => "<span style=\"font-size:2.5em\">",
    "huge" => "<span style=\"font-size:2em\">",
    "LARGE" => "<span style=\"font-size:1.7em\">",
    "Large" => "<span style=\"font-size:1.4em\">",
    "large" => "<span style=\"font-size:1.2em\">",
    "normalsize" => "<span style=\"font-size:1em\">",
    "small" => "<span style=\"font-size:0.9em\">",
    "footnotesize" => "<span style=\"font-size:0.8em\">",
    "scriptsize" => "<span style=\"font-size:0.7em\">",
    "tiny" => "<span style=\"font-size:0.6em\">",
    "scshape" => "<span style=\"font-variant:small-caps\">",
    "bfseries" => "<span style=\"font-weight:bold\">",
};

/// Zero-argument list delimiters used by resume templates
pub static LIST_DELIMITERS: phf::Map<&'static str, &'static str> = phf_map! {
    "resumeSubHeadingListStart" => "<ul class=\"resume-subheadings\">",
    "resumeSubHeadingListEnd" => "</ul>",
    "resumeItemListStart" => "<ul class=\"resume-items\">",
    "resumeItemListEnd" => "</ul>",
};

/// Environments mapped to an HTML wrapper: name => (open, close)
pub static ENVIRONMENTS: phf::Map<&'static str, (&'static str, &'static str)> = phf_map! {
    "itemize" => ("<ul>", "</ul>"),
    "enumerate" => ("<ol>", "</ol>"),
    "center" => ("<div style=\"text-align:center\">", "</div>"),
};

/// Backslash-escaped specials and their HTML text
pub const ESCAPED_SPECIALS: &[(&str, &str)] = &[
    ("\\&", "&amp;"),
    ("\\%", "%"),
    ("\\$", "$"),
    ("\\#", "#"),
    ("\\_", "_"),
];

/// Commands removed from the body once their value has been captured
pub const PREAMBLE_COMMANDS: &[&str] = &["title", "author", "date"];

/// Name of the document environment
pub const DOCUMENT_BEGIN: &str = "\\begin{document}";
pub const DOCUMENT_END: &str = "\\end{document}";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_commands_never_close() {
        for (_, open) in SIZE_COMMANDS.entries() {
            assert!(open.starts_with("<span"));
            assert!(!open.contains("</span>"));
        }
    }

    #[test]
    fn test_list_delimiters_balance() {
        let opens = LIST_DELIMITERS
            .values()
            .filter(|v| v.starts_with("<ul"))
            .count();
        let closes = LIST_DELIMITERS.values().filter(|v| **v == "</ul>").count();
        assert_eq!(opens, closes);
    }
}
