//! HTML views
//!
//! The view set is loaded once at startup and shared read-only by every
//! request. Templates use `{{ name }}` placeholders; substituted values are
//! HTML-escaped.

use std::{path::Path, sync::OnceLock};

use anyhow::Context;
use axum::response::Html;
use regex::Regex;
use scribe_config::ViewsConfig;
use stt::AudioFormat;

const BUILTIN_INDEX: &str = include_str!("../../../views/index.html");
const BUILTIN_RESULT: &str = include_str!("../../../views/result.html");
const BUILTIN_ERROR: &str = include_str!("../../../views/error.html");

fn placeholder() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{\{\s*([a-z_]+)\s*\}\}").expect("must be valid regex"))
}

/// A single parsed template
#[derive(Debug)]
struct Template {
    name: &'static str,
    source: String,
}

impl Template {
    /// Parse `source`, rejecting placeholders the view does not provide
    fn new(name: &'static str, source: String, variables: &[&str]) -> anyhow::Result<Self> {
        let mut unknown: Vec<String> = placeholder()
            .captures_iter(&source)
            .filter_map(|c| c.get(1))
            .map(|m| m.as_str())
            .filter(|var| !variables.contains(var))
            .map(str::to_string)
            .collect();

        if !unknown.is_empty() {
            unknown.sort_unstable();
            unknown.dedup();
            anyhow::bail!("view `{name}` uses unknown placeholder(s): {}", unknown.join(", "));
        }

        Ok(Self { name, source })
    }

    fn render(&self, values: &[(&str, &str)]) -> Html<String> {
        let rendered = placeholder().replace_all(&self.source, |captures: &regex::Captures<'_>| {
            let var = captures.get(1).map_or("", |m| m.as_str());
            values
                .iter()
                .find(|(name, _)| *name == var)
                .map(|(_, value)| escape_html(value))
                .unwrap_or_default()
        });

        tracing::trace!(view = self.name, "rendered view");

        Html(rendered.into_owned())
    }
}

/// The upload form, result, and error pages
#[derive(Debug)]
pub struct Views {
    index: Template,
    result: Template,
    error: Template,
}

impl Views {
    /// Load the views named by configuration, or the compiled-in set
    ///
    /// # Errors
    ///
    /// Returns an error if a view file is missing or uses an unknown placeholder
    pub fn from_config(config: &ViewsConfig) -> anyhow::Result<Self> {
        match &config.dir {
            Some(dir) => Self::load(dir),
            None => Self::builtin(),
        }
    }

    /// Load `index.html`, `result.html` and `error.html` from `dir`
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be read or fails validation
    pub fn load(dir: &Path) -> anyhow::Result<Self> {
        let read = |file: &str| {
            let path = dir.join(file);
            std::fs::read_to_string(&path).with_context(|| format!("failed to read view {}", path.display()))
        };

        Self::from_sources(read("index.html")?, read("result.html")?, read("error.html")?)
    }

    /// The views shipped with the binary
    ///
    /// # Errors
    ///
    /// Returns an error only if the compiled-in views are malformed
    pub fn builtin() -> anyhow::Result<Self> {
        Self::from_sources(
            BUILTIN_INDEX.to_string(),
            BUILTIN_RESULT.to_string(),
            BUILTIN_ERROR.to_string(),
        )
    }

    fn from_sources(index: String, result: String, error: String) -> anyhow::Result<Self> {
        Ok(Self {
            index: Template::new("index", index, &["accept", "formats"])?,
            result: Template::new("result", result, &["text"])?,
            error: Template::new("error", error, &["message"])?,
        })
    }

    /// Upload form
    #[must_use]
    pub fn index(&self) -> Html<String> {
        let accept: Vec<String> = AudioFormat::ALL
            .iter()
            .map(|format| format!(".{}", format.extension()))
            .collect();

        self.index
            .render(&[("accept", &accept.join(",")), ("formats", &AudioFormat::allowed_list())])
    }

    /// Transcription result page
    #[must_use]
    pub fn result(&self, text: &str) -> Html<String> {
        self.result.render(&[("text", text)])
    }

    /// Error page
    #[must_use]
    pub fn error(&self, message: &str) -> Html<String> {
        self.error.render(&[("message", message)])
    }
}

fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
