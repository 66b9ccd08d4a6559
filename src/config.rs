//! Plugin configuration.
//! Options are merged over defaults when deserialized; the only eager
//! validation happens at plugin construction, everything else is deferred to
//! the emit phase because it depends on build state.

use std::fmt;
use std::path::PathBuf;

use minijinja::Environment;
use serde::Deserialize;

use crate::renderer::RenderCallback;

/// Construction-time plugin options.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PluginOptions {
    /// Ordered list of render jobs. Must contain at least one entry.
    pub templates: Vec<TemplateDescriptor>,

    /// Templating-engine configuration, a reused instance or settings to
    /// build one from at emission time.
    pub configure: EngineConfig,
}

/// One configured render job: a source template, a destination asset path
/// and optional extras.
#[derive(Default, Deserialize)]
#[serde(default)]
pub struct TemplateDescriptor {
    /// Source template name, resolved by the engine's loader. Required;
    /// absence is a configuration error at emission time.
    pub from: Option<String>,

    /// Destination asset path, relative to the build output root or
    /// absolute. Required; absence is a configuration error at emission
    /// time.
    pub to: Option<String>,

    /// Extra variables shallow-merged over the reserved context key.
    pub context: Option<serde_json::Map<String, serde_json::Value>>,

    /// When set, the rendered output is also written to the real filesystem
    /// under the build output directory, not only recorded as a build asset.
    pub write_to_file_emit: bool,

    /// Render-completion hook handed to the engine unchanged.
    #[serde(skip)]
    pub callback: Option<RenderCallback>,
}

impl TemplateDescriptor {
    /// Creates a descriptor with the two required fields set.
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: Some(from.into()),
            to: Some(to.into()),
            ..Default::default()
        }
    }
}

impl fmt::Debug for TemplateDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemplateDescriptor")
            .field("from", &self.from)
            .field("to", &self.to)
            .field("context", &self.context)
            .field("write_to_file_emit", &self.write_to_file_emit)
            .field("callback", &self.callback.is_some())
            .finish()
    }
}

/// Templating-engine configuration.
///
/// A caller-built environment is reused as-is, so filters and globals
/// registered on it stay available across builds. Otherwise an environment
/// is built from [`EngineSettings`] on every emit pass.
#[derive(Deserialize)]
#[serde(from = "EngineSettings")]
pub enum EngineConfig {
    /// Reuse a pre-built engine instance.
    Instance(Environment<'static>),
    /// Build an engine from a template search path and options.
    Settings(EngineSettings),
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig::Settings(EngineSettings::default())
    }
}

impl From<EngineSettings> for EngineConfig {
    fn from(settings: EngineSettings) -> Self {
        EngineConfig::Settings(settings)
    }
}

impl fmt::Debug for EngineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineConfig::Instance(_) => f.write_str("EngineConfig::Instance(..)"),
            EngineConfig::Settings(settings) => {
                f.debug_tuple("EngineConfig::Settings").field(settings).finish()
            }
        }
    }
}

/// Settings used to build an engine when no instance was supplied.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Template search path. Empty means the current directory.
    pub path: PathBuf,

    /// Engine behavior switches.
    pub options: EngineOptions,
}

/// Engine behavior switches applied when building an environment from
/// settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineOptions {
    /// Escape rendered values according to the template's file extension.
    /// Disabling forces raw output for every template.
    pub autoescape: bool,

    /// Fail rendering on undefined variables instead of treating them as
    /// empty.
    pub throw_on_undefined: bool,

    /// Strip the first newline after a block tag.
    pub trim_blocks: bool,

    /// Strip leading whitespace from the start of a line to a block tag.
    pub lstrip_blocks: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            autoescape: true,
            throw_on_undefined: false,
            trim_blocks: false,
            lstrip_blocks: false,
        }
    }
}
