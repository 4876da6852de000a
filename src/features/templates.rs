//! Built-in starter documents
//!
//! Templates are loaded into the editor as raw source and rendered
//! immediately. They only use commands the renderer understands.
//!
//! ## Example
//!
//! ```rust
//! use texhtml::templates::{find_template, template_names};
//!
//! assert!(template_names().contains(&"resume"));
//! let resume = find_template("resume").unwrap();
//! assert!(resume.source.contains(r"\resumeSubheading"));
//! ```

use lazy_static::lazy_static;
use std::collections::HashMap;

/// A starter document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    pub name: &'static str,
    pub description: &'static str,
    pub source: &'static str,
}

const ARTICLE: &str = r"\documentclass{article}
\title{Untitled Report}
\author{Your Name}
\date{\today}

\begin{document}
\maketitle

\section{Introduction}
Write the \textbf{key idea} first, then the \emph{details}.

\section{Findings}
\begin{itemize}
  \item First finding
  \item Second finding with a \href{https://example.com}{link}
\end{itemize}

\subsection{Notes}
Line one\\
Line two
\end{document}
";

const RESUME: &str = r"\documentclass[letterpaper,11pt]{article}
\usepackage{hyperref}
% Custom commands are built into the previewer
\begin{document}

\begin{center}
  \textbf{\Huge \scshape Jane Doe} \\ \vspace{1pt}
  \small 555-0100 $|$ \href{mailto:jane@example.com}{\underline{jane@example.com}} $|$
  \href{https://github.com/jane}{\underline{github.com/jane}}
\end{center}

\section{Education}
  \resumeSubHeadingListStart
    \resumeSubheading
      {State University}{Springfield, USA}
      {Bachelor of Science in Computer Science}{Aug. 2018 -- May 2022}
  \resumeSubHeadingListEnd

\section{Experience}
  \resumeSubHeadingListStart
    \resumeSubheading
      {Software Engineer}{June 2022 -- Present}
      {Example Corp}{Remote}
      \resumeItemListStart
        \resumeItem{Built a \textbf{live preview} for LaTeX documents}
        \resumeItem{Cut render latency by 40\%}
      \resumeItemListEnd
  \resumeSubHeadingListEnd

\section{Projects}
  \resumeSubHeadingListStart
    \resumeProjectHeading
      {\textbf{texhtml} $|$ \emph{Rust, WebAssembly}}{2023}
      \resumeItemListStart
        \resumeItem{Brace-balanced macro expander}
      \resumeItemListEnd
  \resumeSubHeadingListEnd

\end{document}
";

const BLANK: &str = r"\documentclass{article}
\begin{document}

\end{document}
";

/// Built-in templates in display order
pub static TEMPLATES: &[Template] = &[
    Template {
        name: "article",
        description: "Report with title block, sections and a list",
        source: ARTICLE,
    },
    Template {
        name: "resume",
        description: "One-page resume using the resume composite commands",
        source: RESUME,
    },
    Template {
        name: "blank",
        description: "Empty document",
        source: BLANK,
    },
];

lazy_static! {
    static ref TEMPLATE_INDEX: HashMap<&'static str, &'static Template> =
        TEMPLATES.iter().map(|t| (t.name, t)).collect();
}

/// Look up a template by name
pub fn find_template(name: &str) -> Option<&'static Template> {
    TEMPLATE_INDEX.get(name).copied()
}

/// Template names in display order
pub fn template_names() -> Vec<&'static str> {
    TEMPLATES.iter().map(|t| t.name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::latex2html::LatexRenderer;

    #[test]
    fn test_find_template() {
        assert_eq!(find_template("article").map(|t| t.name), Some("article"));
        assert!(find_template("missing").is_none());
    }

    #[test]
    fn test_templates_render_without_warnings_from_scanner() {
        for template in TEMPLATES {
            let mut renderer = LatexRenderer::new();
            let html = renderer.render(template.source);
            assert!(renderer.warnings().is_empty(), "{}", template.name);
            assert!(!html.contains('\\'), "{} left backslashes", template.name);
        }
    }

    #[test]
    fn test_resume_template_renders_composites() {
        let html = LatexRenderer::new().render(find_template("resume").unwrap().source);
        assert!(html.contains("<strong>State University</strong>"));
        assert!(html.contains("<ul class=\"resume-items\">"));
        assert!(html.contains("<li>Cut render latency by 40%</li>"));
        assert!(html.contains("&#124;"));
        assert!(html.contains("<a href=\"mailto:jane@example.com\"><u>jane@example.com</u></a>"));
    }
}
