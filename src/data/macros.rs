//! Built-in macro table
//!
//! The table is closed: each entry pairs a command name with its argument
//! count and the formatter producing HTML from the already-rendered
//! arguments. Entries are applied in slice order, one full pass per entry,
//! so multi-argument composites come before the single-argument style
//! commands that usually appear inside their arguments.

use fxhash::FxHashMap;
use lazy_static::lazy_static;

/// Formats rendered arguments into HTML. The slice always holds exactly
/// `arity` entries.
pub type Formatter = fn(&[String]) -> String;

/// A built-in macro definition
#[derive(Clone, Copy)]
pub struct MacroSpec {
    /// Command name without the backslash
    pub name: &'static str,
    /// Number of required brace arguments
    pub arity: usize,
    /// HTML formatter
    pub format: Formatter,
}

impl MacroSpec {
    /// The literal token searched for in the body, e.g. `\textbf`
    pub fn token(&self) -> String {
        format!("\\{}", self.name)
    }
}

impl std::fmt::Debug for MacroSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MacroSpec")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish()
    }
}

const ROW_STYLE: &str = "display:flex;justify-content:space-between";

fn resume_subheading(args: &[String]) -> String {
    format!(
        "<li class=\"resume-subheading\" style=\"list-style:none\"><div style=\"{row}\"><strong>{}</strong><span>{}</span></div><div style=\"{row}\"><em>{}</em><em>{}</em></div></li>",
        args[0],
        args[1],
        args[2],
        args[3],
        row = ROW_STYLE
    )
}

fn resume_sub_subheading(args: &[String]) -> String {
    format!(
        "<div style=\"{}\"><em>{}</em><em>{}</em></div>",
        ROW_STYLE, args[0], args[1]
    )
}

fn resume_project_heading(args: &[String]) -> String {
    format!(
        "<li class=\"resume-project\" style=\"list-style:none\"><div style=\"{}\"><span>{}</span><span>{}</span></div></li>",
        ROW_STYLE, args[0], args[1]
    )
}

fn href(args: &[String]) -> String {
    format!("<a href=\"{}\">{}</a>", url_attr(&args[0]), args[1])
}

fn url(args: &[String]) -> String {
    format!("<a href=\"{}\">{}</a>", url_attr(&args[0]), args[0])
}

fn list_item(args: &[String]) -> String {
    format!("<li>{}</li>", args[0])
}

fn bold(args: &[String]) -> String {
    format!("<strong>{}</strong>", args[0])
}

fn italic(args: &[String]) -> String {
    format!("<em>{}</em>", args[0])
}

fn underline(args: &[String]) -> String {
    format!("<u>{}</u>", args[0])
}

fn monospace(args: &[String]) -> String {
    format!("<code>{}</code>", args[0])
}

fn small_caps(args: &[String]) -> String {
    format!("<span style=\"font-variant:small-caps\">{}</span>", args[0])
}

fn section(args: &[String]) -> String {
    format!("<h2>{}</h2>", args[0])
}

fn subsection(args: &[String]) -> String {
    format!("<h3>{}</h3>", args[0])
}

fn subsubsection(args: &[String]) -> String {
    format!("<h4>{}</h4>", args[0])
}

/// Rendered URL argument as an attribute value
fn url_attr(rendered: &str) -> String {
    rendered.trim().replace('"', "&quot;")
}

/// Built-in macros in application order
pub static BUILTIN_MACROS: &[MacroSpec] = &[
    // Multi-argument composites
    MacroSpec { name: "resumeSubheading", arity: 4, format: resume_subheading },
    MacroSpec { name: "resumeSubSubheading", arity: 2, format: resume_sub_subheading },
    MacroSpec { name: "resumeProjectHeading", arity: 2, format: resume_project_heading },
    MacroSpec { name: "href", arity: 2, format: href },
    // Single-argument composites
    MacroSpec { name: "resumeItem", arity: 1, format: list_item },
    MacroSpec { name: "resumeSubItem", arity: 1, format: list_item },
    // Generic style commands
    MacroSpec { name: "textbf", arity: 1, format: bold },
    MacroSpec { name: "textit", arity: 1, format: italic },
    MacroSpec { name: "underline", arity: 1, format: underline },
    MacroSpec { name: "emph", arity: 1, format: italic },
    MacroSpec { name: "texttt", arity: 1, format: monospace },
    MacroSpec { name: "textsc", arity: 1, format: small_caps },
    MacroSpec { name: "url", arity: 1, format: url },
    // Starred headings first: `\section` would otherwise claim `\section*`
    // as a false positive and leave the star behind.
    MacroSpec { name: "section*", arity: 1, format: section },
    MacroSpec { name: "section", arity: 1, format: section },
    MacroSpec { name: "subsection*", arity: 1, format: subsection },
    MacroSpec { name: "subsection", arity: 1, format: subsection },
    MacroSpec { name: "subsubsection", arity: 1, format: subsubsection },
];

lazy_static! {
    /// Name index over `BUILTIN_MACROS`
    static ref MACRO_INDEX: FxHashMap<&'static str, &'static MacroSpec> =
        BUILTIN_MACROS.iter().map(|spec| (spec.name, spec)).collect();
}

/// Look up a built-in macro by name (without backslash)
pub fn lookup_macro(name: &str) -> Option<&'static MacroSpec> {
    MACRO_INDEX.get(name).copied()
}

/// Whether `name` is handled by the macro pass
pub fn is_builtin_macro(name: &str) -> bool {
    MACRO_INDEX.contains_key(name)
}
