//! Preamble metadata extraction
//!
//! `\title`, `\author` and `\date` are searched for anywhere in the source;
//! the first well-formed occurrence of each wins.

use chrono::NaiveDate;

use super::scanner::{read_braced_arg, ArgRead};
use super::utils::{find_command, replace_command};
use crate::data::constants::TODAY_FORMAT;

/// Document metadata; empty strings when absent
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preamble {
    pub title: String,
    pub author: String,
    pub date: String,
}

impl Preamble {
    /// True when none of title, author or date is set
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.author.is_empty() && self.date.is_empty()
    }
}

/// Extract title/author/date from `source`, resolving `\today` in the date.
pub fn extract_preamble(source: &str, today: NaiveDate) -> Preamble {
    let title = first_command_argument(source, "title").unwrap_or_default();
    let author = first_command_argument(source, "author").unwrap_or_default();
    let date = first_command_argument(source, "date")
        .map(|d| resolve_today(d, today))
        .unwrap_or_default();

    Preamble {
        title: title.trim().to_string(),
        author: author.trim().to_string(),
        date: date.trim().to_string(),
    }
}

/// Raw argument of the first `\name{...}` with balanced braces
pub fn first_command_argument<'a>(source: &'a str, name: &str) -> Option<&'a str> {
    let token_len = name.len() + 1;
    find_command(source, name)
        .into_iter()
        .find_map(|pos| match read_braced_arg(source, pos + token_len) {
            ArgRead::Found { content, .. } => Some(content),
            _ => None,
        })
}

/// Replace `\today` with the date formatted as "Month D, YYYY"
pub fn resolve_today(text: &str, today: NaiveDate) -> String {
    replace_command(text, "today", &format_today(today))
}

pub fn format_today(date: NaiveDate) -> String {
    date.format(TODAY_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
    }

    #[test]
    fn test_format_today() {
        assert_eq!(format_today(day()), "March 5, 2024");
    }

    #[test]
    fn test_extract_all_fields() {
        let src = r"\title{Report}\author{Ada}\date{\today}\begin{document}\end{document}";
        let p = extract_preamble(src, day());
        assert_eq!(
            p,
            Preamble {
                title: "Report".into(),
                author: "Ada".into(),
                date: "March 5, 2024".into(),
            }
        );
    }

    #[test]
    fn test_first_occurrence_wins() {
        let p = extract_preamble(r"\title{First} \title{Second}", day());
        assert_eq!(p.title, "First");
    }

    #[test]
    fn test_nested_braces_in_title() {
        let p = extract_preamble(r"\title{A {B} \textbf{C}}", day());
        assert_eq!(p.title, r"A {B} \textbf{C}");
    }

    #[test]
    fn test_longer_command_names_ignored() {
        let p = extract_preamble(r"\titleformat{\section}{x} \title{Real}", day());
        assert_eq!(p.title, "Real");
    }

    #[test]
    fn test_searched_anywhere() {
        let p = extract_preamble(r"\begin{document}\author{Late}\end{document}", day());
        assert_eq!(p.author, "Late");
        assert!(p.title.is_empty());
    }

    #[test]
    fn test_absent_is_empty() {
        assert!(extract_preamble("plain text", day()).is_empty());
    }

    #[test]
    fn test_literal_date_kept() {
        let p = extract_preamble(r"\date{Spring 2023}", day());
        assert_eq!(p.date, "Spring 2023");
    }
}
