//! minijinja-emit renders MiniJinja templates into a bundler's build output
//! during the asset-emission phase, injecting metadata about generated
//! assets (script/style names, inlined style content) into the template
//! context and tracking template sources as rebuild triggers.

/// Host-side build state: assets, errors, file dependencies
pub mod compilation;

/// Host-side compiler model and the two-phase build driver
pub mod compiler;

/// Plugin configuration: templates, engine instance or settings
pub mod config;

/// Shared names: plugin, phases, context key, asset suffixes
pub mod constants;

/// Render-context construction from current build state
pub mod context;

/// Error types and handling for the plugin
pub mod error;

/// Phase-hook surfaces, modern and legacy, behind one registrar
pub mod hooks;

/// The emission adapter itself
/// Renders descriptors in order, emits assets, tracks dependencies
pub mod plugin;

/// Template rendering engine behind a trait seam
pub mod renderer;
