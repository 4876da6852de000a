//! Utility functions for the LaTeX → HTML pipeline
//!
//! Placeholders live in the Unicode private use area so they survive every
//! regex and strip step until they are deliberately restored.

// =============================================================================
// Placeholders
// =============================================================================

/// Stand-in for a protected `\\` line break until the cleanup pass
pub const LINE_BREAK_MARK: &str = "\u{E000}BR\u{E001}";

/// Stand-in for the backslash of a command that must stay visible
pub const LITERAL_BACKSLASH: char = '\u{E002}';

/// Emit `\name` in protected form: it survives the final backslash strip
pub fn protect_literal_command(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 3);
    out.push(LITERAL_BACKSLASH);
    out.push_str(name);
    out
}

/// Restore protected command names with a real backslash
pub fn restore_literal_commands(input: &str) -> String {
    if input.contains(LITERAL_BACKSLASH) {
        input.replace(LITERAL_BACKSLASH, "\\")
    } else {
        input.to_string()
    }
}

// =============================================================================
// Token Replacement
// =============================================================================

/// Replace every `\name` that is not immediately followed by an ASCII letter.
///
/// `replace_command("\\item x \\itemsep", "item", "<li>")` leaves `\itemsep`
/// alone. Regex cannot express this without lookahead, so it is a scan.
pub fn replace_command(input: &str, name: &str, replacement: &str) -> String {
    let token = format!("\\{}", name);
    if !input.contains(&token) {
        return input.to_string();
    }

    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(pos) = rest.find(&token) {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + token.len()..];
        if starts_with_letter(after) {
            out.push_str(&token);
        } else {
            out.push_str(replacement);
        }
        rest = after;
    }
    out.push_str(rest);
    out
}

/// Byte offsets of every `\name` not followed by a letter
pub fn find_command(input: &str, name: &str) -> Vec<usize> {
    let token = format!("\\{}", name);
    input
        .match_indices(&token)
        .filter(|(pos, _)| !starts_with_letter(&input[pos + token.len()..]))
        .map(|(pos, _)| pos)
        .collect()
}

pub fn starts_with_letter(s: &str) -> bool {
    s.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
}

/// Byte offset to 1-indexed (line, column); column counts chars
pub fn offset_to_location(input: &str, offset: usize) -> (usize, usize) {
    let before = &input[..offset.min(input.len())];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |p| p + 1);
    let column = before[line_start..].chars().count() + 1;
    (line, column)
}
