//! Template renderer and engine resolution.
//! Wraps MiniJinja behind a small trait so the emission pass can be driven
//! with fake engines in tests.

use std::path::Path;

use log::debug;
use minijinja::{AutoEscape, Environment, UndefinedBehavior};

use crate::config::{EngineConfig, EngineSettings};
use crate::error::Result;

/// Render-completion hook. Invoked with the render outcome before it is
/// returned to the caller; engines with streaming render modes can observe
/// the result here.
pub type RenderCallback = Box<dyn Fn(&Result<String>)>;

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Renders a named template with the given context.
    ///
    /// # Arguments
    /// * `name` - Template name, resolved by the engine's loader
    /// * `context` - Context variables for rendering
    /// * `callback` - Optional completion hook, handed through unchanged
    fn render(
        &self,
        name: &str,
        context: &serde_json::Value,
        callback: Option<&RenderCallback>,
    ) -> Result<String>;
}

/// MiniJinja-based template rendering engine.
pub struct MiniJinjaRenderer {
    env: Environment<'static>,
}

impl MiniJinjaRenderer {
    /// Wraps a caller-built environment. Filters and globals registered on
    /// it remain available.
    pub fn from_env(env: Environment<'static>) -> Self {
        Self { env }
    }

    /// Builds an environment from settings: a path loader rooted at the
    /// configured search path (current directory when empty) and the
    /// configured behavior switches.
    pub fn from_settings(settings: &EngineSettings) -> Self {
        let search_path = if settings.path.as_os_str().is_empty() {
            Path::new(".")
        } else {
            settings.path.as_path()
        };
        debug!("Configuring template engine with search path {}", search_path.display());

        let mut env = Environment::new();
        env.set_loader(minijinja::path_loader(search_path));

        let options = &settings.options;
        if !options.autoescape {
            env.set_auto_escape_callback(|_| AutoEscape::None);
        }
        if options.throw_on_undefined {
            env.set_undefined_behavior(UndefinedBehavior::Strict);
        }
        if options.trim_blocks {
            env.set_trim_blocks(true);
        }
        if options.lstrip_blocks {
            env.set_lstrip_blocks(true);
        }

        Self { env }
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    fn render(
        &self,
        name: &str,
        context: &serde_json::Value,
        callback: Option<&RenderCallback>,
    ) -> Result<String> {
        let result = self
            .env
            .get_template(name)
            .and_then(|template| template.render(context))
            .map_err(Into::into);

        if let Some(callback) = callback {
            callback(&result);
        }

        result
    }
}

impl EngineConfig {
    /// Resolves the engine for one emit pass: clones the supplied instance
    /// (cloning keeps registered filters) or builds one from settings.
    pub fn resolve(&self) -> MiniJinjaRenderer {
        match self {
            EngineConfig::Instance(env) => MiniJinjaRenderer::from_env(env.clone()),
            EngineConfig::Settings(settings) => MiniJinjaRenderer::from_settings(settings),
        }
    }
}
