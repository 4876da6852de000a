//! Comment stripping, spacing collapse and the final cleanup pass
//!
//! The cleanup pass runs strictly after the macro passes. It handles
//! environments, list delimiters and size declarations with simple token
//! substitution, then strips whatever backslashes and braces remain.

use fxhash::FxHashSet;
use lazy_static::lazy_static;
use regex::{Captures, Regex};

use super::context::RenderOptions;
use super::scanner::{read_braced_arg, ArgRead};
use super::utils::{replace_command, LINE_BREAK_MARK};
use crate::data::constants::{ENVIRONMENTS, ESCAPED_SPECIALS, LIST_DELIMITERS, SIZE_COMMANDS};
use crate::data::macros::is_builtin_macro;

lazy_static! {
    static ref VSPACE: Regex = Regex::new(r"\\vspace\*?\s*\{[^}]*\}").unwrap();

    /// `\\` with an optional `[length]` on the same line
    static ref LINE_BREAK: Regex = Regex::new(r"\\\\(?:[ \t]*\[[^\]]*\])?").unwrap();

    static ref BEGIN_ENV: Regex = Regex::new(r"\\begin\s*\{([A-Za-z]+\*?)\}(\s*\[[^\]]*\])?").unwrap();

    static ref END_ENV: Regex = Regex::new(r"\\end\s*\{([A-Za-z]+\*?)\}").unwrap();

    static ref COMMAND_NAME: Regex = Regex::new(r"\\([A-Za-z]+\*?)").unwrap();

    static ref LEFTOVER: Regex = Regex::new(r"[\\{}]").unwrap();

    /// Commands consumed somewhere in the pipeline besides the macro table
    static ref PIPELINE_COMMANDS: FxHashSet<&'static str> = [
        "item", "begin", "end", "maketitle", "title", "author", "date", "today", "and",
        "centering", "hfill", "vspace", "noindent",
    ]
    .into_iter()
    .collect();
}

// =============================================================================
// Early passes
// =============================================================================

/// Remove `%` line comments
pub fn strip_comments(input: &str) -> String {
    if !input.contains('%') {
        return input.to_string();
    }
    let mut out = String::with_capacity(input.len());
    for (i, line) in input.split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&line[..comment_start(line).unwrap_or(line.len())]);
    }
    out
}

/// Offset of the first `%` not escaped by an odd run of backslashes
fn comment_start(line: &str) -> Option<usize> {
    let mut backslashes = 0usize;
    for (i, b) in line.bytes().enumerate() {
        match b {
            b'\\' => backslashes += 1,
            b'%' if backslashes % 2 == 0 => return Some(i),
            _ => backslashes = 0,
        }
    }
    None
}

/// Collapse spacing commands to nothing or a single space
pub fn collapse_spacing(input: &str) -> String {
    let mut text = VSPACE.replace_all(input, "").into_owned();
    text = replace_command(&text, "centering", "");
    text = replace_command(&text, "noindent", "");
    text = replace_command(&text, "hfill", " ");
    replace_thin_spaces(&text)
}

/// `\,` to a space; the comma after a `\\` line break is kept
fn replace_thin_spaces(input: &str) -> String {
    if !input.contains("\\,") {
        return input.to_string();
    }
    let mut out = String::with_capacity(input.len());
    let mut backslashes = 0usize;
    for c in input.chars() {
        if c == ',' && backslashes % 2 == 1 {
            out.pop();
            out.push(' ');
            backslashes = 0;
            continue;
        }
        backslashes = if c == '\\' { backslashes + 1 } else { 0 };
        out.push(c);
    }
    out
}

/// Protect `\\` line breaks and `$|$` from later passes
pub fn protect_specials(input: &str) -> String {
    let text = LINE_BREAK.replace_all(input, LINE_BREAK_MARK).into_owned();
    text.replace("$|$", "&#124;")
}

// =============================================================================
// Cleanup pass
// =============================================================================

/// Environment, list, size and leftover-token substitutions
pub fn apply_cleanup(input: &str, options: &RenderOptions) -> String {
    let mut text = replace_environments(input, options.strip_unknown_environments);

    text = replace_command(&text, "item", "<li>");
    for (name, html) in LIST_DELIMITERS.entries() {
        text = replace_command(&text, name, html);
    }
    for (name, html) in SIZE_COMMANDS.entries() {
        text = replace_command(&text, name, html);
    }

    text = text.replace(LINE_BREAK_MARK, "<br>");
    for &(escaped, html) in ESCAPED_SPECIALS {
        text = text.replace(escaped, html);
    }

    LEFTOVER.replace_all(&text, "").into_owned()
}

fn replace_environments(input: &str, strip_unknown: bool) -> String {
    let mut text = String::with_capacity(input.len());
    let mut cursor = 0;

    for caps in BEGIN_ENV.captures_iter(input) {
        let whole = caps.get(0).map_or(0..0, |m| m.range());
        if whole.start < cursor {
            continue;
        }
        text.push_str(&input[cursor..whole.start]);
        cursor = whole.end;

        let name = &caps[1];
        if let Some((open, _)) = ENVIRONMENTS.get(name) {
            text.push_str(open);
        } else if strip_unknown {
            // Drop directly attached argument groups: `\begin{tabular}{ll}`
            while let ArgRead::Found { end, .. } = read_braced_arg(input, cursor) {
                if input[cursor..].starts_with('{') {
                    cursor = end;
                } else {
                    break;
                }
            }
        } else {
            text.push_str(&input[whole]);
        }
    }
    text.push_str(&input[cursor..]);

    END_ENV
        .replace_all(&text, |caps: &Captures| match ENVIRONMENTS.get(&caps[1]) {
            Some((_, close)) => close.to_string(),
            None if strip_unknown => String::new(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Commands left in `input` that no pass of the pipeline handles
pub fn unknown_commands(input: &str) -> Vec<String> {
    let mut seen = FxHashSet::default();
    let mut names = Vec::new();
    for caps in COMMAND_NAME.captures_iter(input) {
        let name = &caps[1];
        if is_handled_command(name) {
            continue;
        }
        if seen.insert(name.to_string()) {
            names.push(name.to_string());
        }
    }
    names
}

/// Whether any stage of the pipeline gives `name` a meaning
pub fn is_handled_command(name: &str) -> bool {
    is_builtin_macro(name)
        || PIPELINE_COMMANDS.contains(name)
        || LIST_DELIMITERS.contains_key(name)
        || SIZE_COMMANDS.contains_key(name)
}
