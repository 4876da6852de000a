//! Document body isolation and title block synthesis

use super::preamble::Preamble;
use super::scanner::{read_braced_arg, ArgRead};
use super::utils::{find_command, replace_command};
use crate::data::constants::{DOCUMENT_BEGIN, DOCUMENT_END, PREAMBLE_COMMANDS};

/// Text between the first `\begin{document}` and the last `\end{document}`.
///
/// Without `\begin{document}` the whole input is the body. Without a
/// closing `\end{document}` after it, the body runs to the end of input.
pub fn isolate_body(source: &str) -> &str {
    let Some(begin) = source.find(DOCUMENT_BEGIN) else {
        return source;
    };
    let start = begin + DOCUMENT_BEGIN.len();
    match source.rfind(DOCUMENT_END) {
        Some(end) if end >= start => &source[start..end],
        _ => &source[start..],
    }
}

/// HTML block for `\maketitle`; empty when the preamble has nothing
pub fn title_block(preamble: &Preamble) -> String {
    if preamble.is_empty() {
        return String::new();
    }

    let mut block = String::from("<div class=\"title-block\" style=\"text-align:center\">");
    if !preamble.title.is_empty() {
        block.push_str(&format!("<h1 class=\"title\">{}</h1>", preamble.title));
    }
    if !preamble.author.is_empty() {
        let author = replace_command(&preamble.author, "and", "<br>");
        block.push_str(&format!("<p class=\"author\">{}</p>", author));
    }
    if !preamble.date.is_empty() {
        block.push_str(&format!("<p class=\"date\">{}</p>", preamble.date));
    }
    block.push_str("</div>");
    block
}

/// Replace every `\maketitle` with the title block
pub fn insert_title_block(body: &str, preamble: &Preamble) -> String {
    replace_command(body, "maketitle", &title_block(preamble))
}

/// Remove `\title{..}`, `\author{..}` and `\date{..}` from the body.
/// Occurrences without a balanced argument are left for the cleanup pass.
pub fn strip_preamble_commands(body: &str) -> String {
    let mut text = body.to_string();
    for name in PREAMBLE_COMMANDS {
        text = strip_command_with_arg(&text, name);
    }
    text
}

fn strip_command_with_arg(text: &str, name: &str) -> String {
    let positions = find_command(text, name);
    if positions.is_empty() {
        return text.to_string();
    }

    let token_len = name.len() + 1;
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for pos in positions {
        if pos < cursor {
            continue;
        }
        if let ArgRead::Found { end, .. } = read_braced_arg(text, pos + token_len) {
            out.push_str(&text[cursor..pos]);
            cursor = end;
        }
    }
    out.push_str(&text[cursor..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_identity_without_document() {
        let src = r"\textbf{x} \end{document}";
        assert_eq!(isolate_body(src), src);
    }

    #[test]
    fn test_last_end_document_wins() {
        let src = r"pre\begin{document}a % \end{document} b\end{document}post";
        assert_eq!(isolate_body(src), r"a % \end{document} b");
    }

    #[test]
    fn test_missing_end_runs_to_eof() {
        assert_eq!(isolate_body(r"x\begin{document}body"), "body");
    }

    #[test]
    fn test_end_before_begin_is_ignored() {
        assert_eq!(isolate_body(r"\end{document}\begin{document}body"), "body");
    }

    #[test]
    fn test_title_block_only_title() {
        let p = Preamble {
            title: "Report".into(),
            ..Default::default()
        };
        let block = title_block(&p);
        assert!(block.contains("<h1 class=\"title\">Report</h1>"));
        assert!(!block.contains("author"));
        assert!(!block.contains("class=\"date\""));
    }

    #[test]
    fn test_title_block_empty() {
        assert_eq!(title_block(&Preamble::default()), "");
    }

    #[test]
    fn test_every_maketitle_replaced() {
        let p = Preamble {
            title: "T".into(),
            ..Default::default()
        };
        let out = insert_title_block(r"\maketitle x \maketitle", &p);
        assert_eq!(out.matches("<h1").count(), 2);
        assert!(!out.contains("maketitle"));
    }

    #[test]
    fn test_author_and_becomes_break() {
        let p = Preamble {
            author: r"Ada \and Alan".into(),
            ..Default::default()
        };
        assert!(title_block(&p).contains("Ada <br> Alan"));
    }

    #[test]
    fn test_strip_preamble_commands() {
        let out = strip_preamble_commands(r"a\title{T {x}}b\author{A}c\date{d}e\titlepage");
        assert_eq!(out, r"abce\titlepage");
    }
}
