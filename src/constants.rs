//! Common constants used throughout the plugin.

/// Plugin name reported to the host's hook registration surface
pub const PLUGIN_NAME: &str = "TemplateEmitPlugin";

/// Phase name for the asset-emission hook
pub const EMIT_PHASE: &str = "emit";

/// Phase name for the post-emission hook
pub const AFTER_EMIT_PHASE: &str = "after-emit";

/// Reserved render-context key carrying build-derived metadata
pub const BUNDLE_CONTEXT_KEY: &str = "bundle";

/// Asset-name suffix identifying script assets
pub const SCRIPT_SUFFIX: &str = ".js";

/// Asset-name suffix identifying style assets
pub const STYLE_SUFFIX: &str = ".css";
