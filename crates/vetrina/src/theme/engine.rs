//! Theme engine with Tera templates and suggestion resolution.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use dashmap::DashMap;
use parking_lot::RwLock;
use tera::Tera;
use tracing::debug;

use crate::error::{DisplayError, DisplayResult};
use crate::form::{BoundField, Form, FormKind};

use super::filters;

/// Default form template suggestion.
pub const FORM_TEMPLATE: &str = "form/form";

/// Form template suggestion tried first for better forms.
pub const BETTER_FORM_TEMPLATE: &str = "form/form--better";

/// Label partial, not overridable by callers.
pub const LABEL_TEMPLATE: &str = "form/label";

/// Shared handle to the loaded templates.
///
/// The display filters hold this handle and read it at call time, so templates
/// added after engine construction are visible to `render` and `label`.
pub(crate) type SharedTemplates = Arc<RwLock<Tera>>;

/// Cache mapping suggestion lists to resolved template names.
pub(crate) type SuggestionCache = Arc<DashMap<String, String>>;

/// Theme engine for rendering forms and labels.
pub struct ThemeEngine {
    tera: SharedTemplates,
    suggestion_cache: SuggestionCache,
}

impl ThemeEngine {
    /// Create a new theme engine loading templates from the given directory.
    pub fn new(template_dir: &Path) -> Result<Self> {
        let pattern = template_dir.join("**/*.html");
        let pattern_str = pattern
            .to_str()
            .context("invalid template directory path")?;

        let tera = Tera::new(pattern_str).context("failed to initialize Tera templates")?;
        let engine = Self::from_tera(tera);

        debug!(
            count = engine.tera.read().get_template_names().count(),
            "loaded templates"
        );

        Ok(engine)
    }

    /// Create a theme engine with no templates (for testing and bootstrap).
    pub fn empty() -> Self {
        Self::from_tera(Tera::default())
    }

    fn from_tera(mut tera: Tera) -> Self {
        let templates: SharedTemplates = Arc::new(RwLock::new(Tera::default()));
        let suggestion_cache: SuggestionCache = Arc::new(DashMap::new());

        filters::register(&mut tera, templates.clone(), suggestion_cache.clone());

        // The filters re-read this handle at call time; publishing the
        // instance after registration keeps them in sync with it.
        *templates.write() = tera;

        Self {
            tera: templates,
            suggestion_cache,
        }
    }

    /// Add a template from a string (for runtime additions and tests).
    pub fn add_raw_template(&self, name: &str, content: &str) -> Result<()> {
        self.tera
            .write()
            .add_raw_template(name, content)
            .with_context(|| format!("failed to add template: {name}"))
    }

    /// Resolve the best template from a list of suggestions.
    ///
    /// Templates are tried in order; the first one that exists is returned.
    /// Results are cached for performance.
    pub fn resolve_template(&self, suggestions: &[&str]) -> Option<String> {
        resolve_first(&self.tera.read(), &self.suggestion_cache, suggestions)
    }

    /// Generate form template suggestions.
    ///
    /// An explicit comma-separated name list wins; otherwise the built-in
    /// default, preceded by the better-form template for better forms.
    pub fn form_suggestions(kind: FormKind, template_names: Option<&str>) -> Vec<String> {
        form_suggestions(kind, template_names)
    }

    /// Render a form, exposing it to the template under the key `form`.
    ///
    /// `template_names` is an optional comma-separated candidate list. Fails
    /// with [`DisplayError::TemplateNotFound`] when no candidate resolves.
    pub fn render_form(&self, form: &Form, template_names: Option<&str>) -> DisplayResult<String> {
        render_form_html(&self.tera.read(), &self.suggestion_cache, form, template_names)
    }

    /// Render the label partial for a field, optionally overriding the label
    /// text.
    pub fn render_label(&self, field: &BoundField, contents: Option<&str>) -> DisplayResult<String> {
        render_label_html(&self.tera.read(), &self.suggestion_cache, field, contents)
    }

    /// Render an arbitrary template with the given context.
    pub fn render(&self, template_name: &str, context: &tera::Context) -> DisplayResult<String> {
        self.tera
            .read()
            .render(template_name, context)
            .map_err(DisplayError::from)
    }

    /// Clear the suggestion cache (useful for development hot-reload).
    pub fn clear_cache(&self) {
        self.suggestion_cache.clear();
    }

    /// Reload templates from disk.
    pub fn reload(&self) -> Result<()> {
        self.tera
            .write()
            .full_reload()
            .context("failed to reload templates")?;
        self.clear_cache();
        Ok(())
    }
}

impl std::fmt::Debug for ThemeEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeEngine")
            .field(
                "template_count",
                &self.tera.read().get_template_names().count(),
            )
            .field("cache_size", &self.suggestion_cache.len())
            .finish()
    }
}

/// Wrap ThemeEngine in Arc for sharing across handlers.
pub type SharedThemeEngine = Arc<ThemeEngine>;

/// Find the first suggestion that names a loaded template.
///
/// Each suggestion is tried with an `.html` suffix first, then as given.
/// Hits are cached under the joined suggestion list; misses are not cached so
/// new templates appear without a restart.
pub(crate) fn resolve_first(
    tera: &Tera,
    cache: &DashMap<String, String>,
    suggestions: &[&str],
) -> Option<String> {
    if suggestions.is_empty() {
        return None;
    }

    let cache_key = suggestions.join("|");

    if let Some(cached) = cache.get(&cache_key) {
        return Some(cached.clone());
    }

    for suggestion in suggestions {
        let with_ext = format!("{suggestion}.html");
        if tera.get_template(&with_ext).is_ok() {
            cache.insert(cache_key, with_ext.clone());
            return Some(with_ext);
        }

        if tera.get_template(suggestion).is_ok() {
            let name = (*suggestion).to_string();
            cache.insert(cache_key, name.clone());
            return Some(name);
        }
    }

    None
}

pub(crate) fn form_suggestions(kind: FormKind, template_names: Option<&str>) -> Vec<String> {
    // An all-whitespace name list falls through to the defaults.
    let explicit = template_names.map(str::trim).filter(|s| !s.is_empty());

    match explicit {
        Some(names) => names
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect(),
        None if kind.is_better() => vec![
            BETTER_FORM_TEMPLATE.to_string(),
            FORM_TEMPLATE.to_string(),
        ],
        None => vec![FORM_TEMPLATE.to_string()],
    }
}

pub(crate) fn render_form_html(
    tera: &Tera,
    cache: &DashMap<String, String>,
    form: &Form,
    template_names: Option<&str>,
) -> DisplayResult<String> {
    let suggestions = form_suggestions(form.kind, template_names);
    let suggestion_refs: Vec<&str> = suggestions.iter().map(String::as_str).collect();

    let template = resolve_first(tera, cache, &suggestion_refs).ok_or_else(|| {
        DisplayError::TemplateNotFound {
            candidates: suggestions.join(", "),
        }
    })?;

    let mut context = tera::Context::new();
    context.insert("form", form);

    tera.render(&template, &context).map_err(DisplayError::from)
}

pub(crate) fn render_label_html(
    tera: &Tera,
    cache: &DashMap<String, String>,
    field: &BoundField,
    contents: Option<&str>,
) -> DisplayResult<String> {
    let label_text = match contents {
        Some(text) => text.to_string(),
        None => field.label_text()?.to_string(),
    };

    let template = resolve_first(tera, cache, &[LABEL_TEMPLATE]).ok_or_else(|| {
        DisplayError::TemplateNotFound {
            candidates: LABEL_TEMPLATE.to_string(),
        }
    })?;

    let mut context = tera::Context::new();
    context.insert("label_text", &label_text);
    context.insert("id", field.html_id());
    context.insert("field", field);

    tera.render(&template, &context).map_err(DisplayError::from)
}
