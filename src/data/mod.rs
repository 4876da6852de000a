//! Data layer - Static mappings and constants
//!
//! This module contains all static data used for LaTeX → HTML rendering:
//! - The built-in macro table
//! - Size commands, list delimiters and environments
//! - Fixed keys and markers

pub mod constants;
pub mod macros;

// Re-export commonly used items
pub use constants::{
    AUTOSAVE_KEY, COMPILATION_ERROR_MESSAGE, ENVIRONMENTS, ERROR_MARKER, LIST_DELIMITERS,
    SIZE_COMMANDS,
};
pub use macros::{is_builtin_macro, lookup_macro, Formatter, MacroSpec, BUILTIN_MACROS};
