//! Brace-balanced macro scanner
//!
//! Locates invocations of one command at a time, reads its arguments by
//! brace-depth counting, renders each argument through the whole pipeline
//! and splices the formatter's HTML in place of the invocation.

use tracing::{trace, warn};

use super::context::LatexRenderer;
use super::utils::protect_literal_command;
use crate::data::macros::MacroSpec;
use crate::utils::error::RenderWarning;

/// Outcome of reading one `{...}` argument
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgRead<'a> {
    /// Argument content (without the outer braces) and the byte offset just
    /// past its closing brace
    Found { content: &'a str, end: usize },
    /// The next non-whitespace character is not `{`
    Missing,
    /// End of input reached before the braces balanced
    Unbalanced,
}

/// Read a brace-delimited argument starting at `from`, skipping leading
/// whitespace. Depth starts at 1 after the opening brace; the argument ends
/// when it returns to 0.
pub fn read_braced_arg(text: &str, from: usize) -> ArgRead<'_> {
    let bytes = text.as_bytes();
    let mut i = from;
    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    if bytes.get(i) != Some(&b'{') {
        return ArgRead::Missing;
    }

    let start = i + 1;
    let mut depth = 1usize;
    for (j, &b) in bytes.iter().enumerate().skip(start) {
        match b {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return ArgRead::Found {
                        content: &text[start..j],
                        end: j + 1,
                    };
                }
            }
            _ => {}
        }
    }
    ArgRead::Unbalanced
}

/// Why an invocation could not be parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationError {
    /// Argument `index` (0-based) has no opening brace: a false positive
    MissingBrace { index: usize },
    /// Argument `index` never closes
    Unbalanced { index: usize },
}

/// Parse `arity` arguments following a command name that ends at
/// `after_name`. Returns the raw argument contents and the offset just past
/// the whole invocation.
pub fn parse_invocation(
    text: &str,
    after_name: usize,
    arity: usize,
) -> Result<(Vec<&str>, usize), InvocationError> {
    let mut args = Vec::with_capacity(arity);
    let mut pos = after_name;
    for index in 0..arity {
        match read_braced_arg(text, pos) {
            ArgRead::Found { content, end } => {
                args.push(content);
                pos = end;
            }
            ArgRead::Missing => return Err(InvocationError::MissingBrace { index }),
            ArgRead::Unbalanced => return Err(InvocationError::Unbalanced { index }),
        }
    }
    Ok((args, pos))
}

impl LatexRenderer {
    /// Expand every invocation of `spec` in `text`: one full pass.
    pub(crate) fn expand_macro(&mut self, text: &str, spec: &MacroSpec) -> String {
        let token = spec.token();
        let mut out = String::with_capacity(text.len());
        let mut cursor = 0;

        while let Some(found) = text[cursor..].find(&token) {
            let start = cursor + found;
            let after_name = start + token.len();
            out.push_str(&text[cursor..start]);

            match parse_invocation(text, after_name, spec.arity) {
                Ok((raw_args, end)) => {
                    let rendered: Vec<String> = raw_args
                        .into_iter()
                        .map(|arg| self.render_nested(arg))
                        .collect();
                    trace!(command = spec.name, depth = self.depth(), "expanded macro");
                    out.push_str(&(spec.format)(&rendered));
                    cursor = end;
                }
                Err(InvocationError::MissingBrace { .. }) => {
                    // Not an invocation of this command; later passes may
                    // still want the token (e.g. `\resumeItemListStart`).
                    out.push_str(&token);
                    cursor = after_name;
                }
                Err(InvocationError::Unbalanced { index }) => {
                    warn!(command = spec.name, argument = index + 1, "unbalanced braces");
                    self.push_warning(
                        RenderWarning::new(format!(
                            "argument {} has unbalanced braces; shown as literal text",
                            index + 1
                        ))
                        .for_command(spec.name)
                        .with_suggestion("add the missing '}'"),
                    );
                    out.push_str(&protect_literal_command(spec.name));
                    cursor = after_name;
                }
            }
        }

        out.push_str(&text[cursor..]);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::macros::lookup_macro;
    use crate::core::latex2html::utils::LITERAL_BACKSLASH;

    #[test]
    fn test_read_simple_arg() {
        assert_eq!(
            read_braced_arg("{abc} rest", 0),
            ArgRead::Found { content: "abc", end: 5 }
        );
    }

    #[test]
    fn test_read_nested_arg() {
        let text = r"  {a {b} \textit{c}}x";
        match read_braced_arg(text, 0) {
            ArgRead::Found { content, end } => {
                assert_eq!(content, r"a {b} \textit{c}");
                assert_eq!(&text[end..], "x");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_read_missing_and_unbalanced() {
        assert_eq!(read_braced_arg("x{a}", 0), ArgRead::Missing);
        assert_eq!(read_braced_arg("{a{b}", 0), ArgRead::Unbalanced);
        assert_eq!(read_braced_arg("", 0), ArgRead::Missing);
    }

    #[test]
    fn test_read_multibyte_content() {
        assert_eq!(
            read_braced_arg("{héllo}", 0),
            ArgRead::Found { content: "héllo", end: 8 }
        );
    }

    #[test]
    fn test_parse_invocation_multiple_args() {
        let text = r"\href {https://x.io} {site} tail";
        let (args, end) = parse_invocation(text, 5, 2).unwrap();
        assert_eq!(args, vec!["https://x.io", "site"]);
        assert_eq!(&text[end..], " tail");
    }

    #[test]
    fn test_parse_invocation_errors() {
        assert_eq!(
            parse_invocation(r"\href{a} b", 5, 2),
            Err(InvocationError::MissingBrace { index: 1 })
        );
        assert_eq!(
            parse_invocation(r"\textbf{open", 7, 1),
            Err(InvocationError::Unbalanced { index: 0 })
        );
    }

    #[test]
    fn test_expand_false_positive_keeps_token() {
        let mut renderer = LatexRenderer::new();
        let spec = lookup_macro("resumeItem").unwrap();
        let out = renderer.expand_macro(r"\resumeItemListStart \resumeItem{x}", spec);
        assert_eq!(out, r"\resumeItemListStart <li>x</li>");
    }

    #[test]
    fn test_expand_unbalanced_is_protected_and_warned() {
        let mut renderer = LatexRenderer::new();
        let spec = lookup_macro("textbf").unwrap();
        let out = renderer.expand_macro(r"\textbf{open", spec);
        assert!(out.starts_with(LITERAL_BACKSLASH));
        assert!(out.ends_with("textbf{open"));
        assert_eq!(renderer.take_warnings().len(), 1);
    }
}
