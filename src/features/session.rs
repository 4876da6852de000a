//! Editor session controller
//!
//! One `EditorSession` owns everything a single open document needs: the
//! current source, the preview and autosave debounce timers, the last
//! preview and the source store. Callers drive it with explicit instants,
//! so the session never sleeps or spawns anything.
//!
//! ```rust
//! use std::time::{Duration, Instant};
//! use texhtml::session::{EditorSession, Preview, SessionConfig};
//! use texhtml::storage::MemoryStore;
//!
//! let mut session = EditorSession::new(SessionConfig::default(), MemoryStore::new());
//! let t0 = Instant::now();
//! session.on_input(r"\textbf{draft}", t0);
//! session.poll(t0 + Duration::from_millis(500)).unwrap();
//! assert_eq!(session.preview(), &Preview::Html("<strong>draft</strong>".into()));
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info};

use super::export::export_tex;
use super::storage::SourceStore;
use super::templates::find_template;
use crate::core::latex2html::{LatexRenderer, RenderOptions};
use crate::data::constants::{AUTOSAVE_KEY, DEFAULT_AUTOSAVE_DELAY_MS, DEFAULT_PREVIEW_DELAY_MS};
use crate::utils::error::{RenderError, RenderResult};

// =============================================================================
// Configuration
// =============================================================================

/// Session configuration, loadable from TOML
///
/// ```toml
/// preview_delay_ms = 300
/// autosave_delay_ms = 1000
/// autosave_key = "latex-editor-source"
///
/// [render]
/// error_marker = "\\errorcompile"
/// title_block = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub preview_delay_ms: u64,
    pub autosave_delay_ms: u64,
    pub autosave_key: String,
    pub render: RenderOptions,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            preview_delay_ms: DEFAULT_PREVIEW_DELAY_MS,
            autosave_delay_ms: DEFAULT_AUTOSAVE_DELAY_MS,
            autosave_key: AUTOSAVE_KEY.to_string(),
            render: RenderOptions::default(),
        }
    }
}

impl SessionConfig {
    /// Parse configuration from a TOML string
    pub fn from_toml_str(content: &str) -> RenderResult<Self> {
        let config: SessionConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> RenderResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            RenderError::config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    fn validate(&self) -> RenderResult<()> {
        if self.autosave_key.trim().is_empty() {
            return Err(RenderError::config("autosave_key must not be empty"));
        }
        Ok(())
    }

    pub fn preview_delay(&self) -> Duration {
        Duration::from_millis(self.preview_delay_ms)
    }

    pub fn autosave_delay(&self) -> Duration {
        Duration::from_millis(self.autosave_delay_ms)
    }
}

// =============================================================================
// Debouncer
// =============================================================================

/// Trailing-edge debounce timer. Re-arming replaces the deadline, so only
/// the last event of a burst fires.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    pub fn arm(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// True once when the deadline has passed; disarms the timer
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

// =============================================================================
// Session
// =============================================================================

/// What the preview pane currently shows
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Preview {
    /// Nothing rendered yet
    #[default]
    Empty,
    /// Rendered HTML fragment
    Html(String),
    /// Status message shown instead of a preview
    Error(String),
}

impl Preview {
    pub fn html(&self) -> Option<&str> {
        match self {
            Preview::Html(html) => Some(html),
            _ => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Preview::Error(_))
    }
}

/// Which timers fired during a `poll`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PollOutcome {
    pub rendered: bool,
    pub saved: bool,
}

/// Per-document controller for live preview and autosave
pub struct EditorSession<S: SourceStore> {
    config: SessionConfig,
    renderer: LatexRenderer,
    store: S,
    source: String,
    preview: Preview,
    preview_timer: Debouncer,
    autosave_timer: Debouncer,
    render_count: usize,
}

impl<S: SourceStore> EditorSession<S> {
    pub fn new(config: SessionConfig, store: S) -> Self {
        let renderer = LatexRenderer::with_options(config.render.clone());
        Self::with_renderer(config, store, renderer)
    }

    /// Use a preconfigured renderer (e.g. with a fixed `\today`)
    pub fn with_renderer(config: SessionConfig, store: S, renderer: LatexRenderer) -> Self {
        Self {
            preview_timer: Debouncer::new(config.preview_delay()),
            autosave_timer: Debouncer::new(config.autosave_delay()),
            config,
            renderer,
            store,
            source: String::new(),
            preview: Preview::Empty,
            render_count: 0,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn preview(&self) -> &Preview {
        &self.preview
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Number of renders performed so far
    pub fn render_count(&self) -> usize {
        self.render_count
    }

    /// Whether a debounced preview is waiting to fire
    pub fn has_pending_preview(&self) -> bool {
        self.preview_timer.is_pending()
    }

    /// Restore the autosaved source and render it immediately.
    /// Returns false when nothing was stored.
    pub fn restore(&mut self) -> RenderResult<bool> {
        match self.store.load(&self.config.autosave_key)? {
            Some(source) => {
                info!(bytes = source.len(), "restored autosaved source");
                self.source = source;
                self.render_now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Record an edit. Rendering and saving happen on a later `poll`.
    pub fn on_input(&mut self, source: impl Into<String>, now: Instant) {
        self.source = source.into();
        self.preview_timer.arm(now);
        self.autosave_timer.arm(now);
    }

    /// Fire whichever debounce deadlines have passed
    pub fn poll(&mut self, now: Instant) -> RenderResult<PollOutcome> {
        let mut outcome = PollOutcome::default();
        if self.preview_timer.fire(now) {
            self.refresh();
            outcome.rendered = true;
        }
        if self.autosave_timer.fire(now) {
            self.save()?;
            outcome.saved = true;
        }
        Ok(outcome)
    }

    /// Explicit render action: no debounce, supersedes a pending preview
    pub fn render_now(&mut self) -> &Preview {
        self.preview_timer.cancel();
        self.refresh();
        &self.preview
    }

    /// Replace the source with a built-in template, render it, and save it
    pub fn load_template(&mut self, name: &str) -> RenderResult<&Preview> {
        let template = find_template(name).ok_or_else(|| RenderError::UnknownTemplate {
            name: name.to_string(),
        })?;
        debug!(template = template.name, "loading template");
        self.source = template.source.to_string();
        self.autosave_timer.cancel();
        self.save()?;
        Ok(self.render_now())
    }

    /// Write pending changes to the store now
    pub fn save(&mut self) -> RenderResult<()> {
        self.autosave_timer.cancel();
        self.store.save(&self.config.autosave_key, &self.source)?;
        info!(key = %self.config.autosave_key, bytes = self.source.len(), "autosaved");
        Ok(())
    }

    /// Export the raw source as `<stem>.tex` inside `dir`
    pub fn export_tex(&self, dir: &Path, stem: &str) -> RenderResult<PathBuf> {
        export_tex(&self.source, dir, stem)
    }

    fn refresh(&mut self) {
        self.render_count += 1;
        self.preview = match self.renderer.compile(&self.source) {
            Ok(html) => Preview::Html(html),
            Err(err) => Preview::Error(err.to_string()),
        };
        debug!(renders = self.render_count, error = self.preview.is_error(), "preview refreshed");
    }
}
