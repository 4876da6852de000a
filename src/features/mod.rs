//! Feature modules - Editor plumbing around the renderer
//!
//! This module contains the pieces an editor needs besides the transform:
//! - Session controller (debounced preview, autosave)
//! - Source storage
//! - Export (.tex, print page, clipboard payload)
//! - Starter templates

pub mod export;
pub mod session;
pub mod storage;
pub mod templates;

// Re-export commonly used types
pub use export::{copy_rendered, export_tex, print_page, rich_text, Clipboard, CopyStatus, RichText};
pub use session::{Debouncer, EditorSession, PollOutcome, Preview, SessionConfig};
pub use storage::{JsonFileStore, MemoryStore, SourceStore};
pub use templates::{find_template, template_names, Template, TEMPLATES};
