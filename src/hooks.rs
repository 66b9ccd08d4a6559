//! Phase-hook registration surfaces.
//! Hosts expose one of two registration conventions: a modern surface with
//! named taps per phase, or a legacy surface keyed by phase name. Both
//! implement [`PhaseRegistrar`], which is selected once at attachment time
//! so the emission path never inspects the host shape again.

use crate::compilation::Compilation;
use crate::constants::{AFTER_EMIT_PHASE, EMIT_PHASE};
use crate::error::Result;

/// A callback registered against a build phase.
pub type PhaseCallback = Box<dyn FnMut(&mut Compilation) -> Result<()>>;

/// Registration surface handed to plugins, independent of which convention
/// the host exposes.
pub trait PhaseRegistrar {
    /// Registers a callback for the asset-emission phase.
    fn on_emit(&mut self, plugin_name: &str, callback: PhaseCallback);

    /// Registers a callback for the post-emission phase.
    fn on_after_emit(&mut self, plugin_name: &str, callback: PhaseCallback);
}

struct Tap {
    name: String,
    callback: PhaseCallback,
}

/// An ordered series of named taps for one phase; taps run in registration
/// order and the first error stops the series.
#[derive(Default)]
pub struct SeriesHook {
    taps: Vec<Tap>,
}

impl SeriesHook {
    /// Creates an empty hook.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a named tap.
    pub fn tap(&mut self, name: impl Into<String>, callback: PhaseCallback) {
        self.taps.push(Tap { name: name.into(), callback });
    }

    /// Names of registered taps, in order.
    pub fn tap_names(&self) -> Vec<&str> {
        self.taps.iter().map(|tap| tap.name.as_str()).collect()
    }

    /// Runs every tap against the compilation.
    pub fn call(&mut self, compilation: &mut Compilation) -> Result<()> {
        for tap in &mut self.taps {
            (tap.callback)(compilation)?;
        }
        Ok(())
    }
}

/// Modern hook surface: one named-tap series per phase.
#[derive(Default)]
pub struct CompilerHooks {
    /// Asset-emission phase.
    pub emit: SeriesHook,
    /// Post-emission phase.
    pub after_emit: SeriesHook,
}

impl PhaseRegistrar for CompilerHooks {
    fn on_emit(&mut self, plugin_name: &str, callback: PhaseCallback) {
        self.emit.tap(plugin_name, callback);
    }

    fn on_after_emit(&mut self, plugin_name: &str, callback: PhaseCallback) {
        self.after_emit.tap(plugin_name, callback);
    }
}

/// Legacy hook surface: callbacks registered under a phase-name key.
#[derive(Default)]
pub struct LegacyPluginRegistry {
    registered: Vec<(String, PhaseCallback)>,
}

impl LegacyPluginRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a callback under a phase name.
    pub fn plugin(&mut self, phase: impl Into<String>, callback: PhaseCallback) {
        self.registered.push((phase.into(), callback));
    }

    /// Runs every callback registered under `phase`, in registration order.
    pub fn call(&mut self, phase: &str, compilation: &mut Compilation) -> Result<()> {
        for (name, callback) in &mut self.registered {
            if name.as_str() == phase {
                callback(compilation)?;
            }
        }
        Ok(())
    }
}

impl PhaseRegistrar for LegacyPluginRegistry {
    fn on_emit(&mut self, _plugin_name: &str, callback: PhaseCallback) {
        self.plugin(EMIT_PHASE, callback);
    }

    fn on_after_emit(&mut self, _plugin_name: &str, callback: PhaseCallback) {
        self.plugin(AFTER_EMIT_PHASE, callback);
    }
}

/// Whichever registration surface the host exposes.
pub enum HookSurface {
    /// Modern named-tap surface.
    Hooks(CompilerHooks),
    /// Legacy string-keyed surface.
    Legacy(LegacyPluginRegistry),
}

impl HookSurface {
    /// Capability detection: resolves the registrar for this surface. Done
    /// once at attachment time.
    pub fn registrar(&mut self) -> &mut dyn PhaseRegistrar {
        match self {
            HookSurface::Hooks(hooks) => hooks,
            HookSurface::Legacy(registry) => registry,
        }
    }

    pub(crate) fn run_emit(&mut self, compilation: &mut Compilation) -> Result<()> {
        match self {
            HookSurface::Hooks(hooks) => hooks.emit.call(compilation),
            HookSurface::Legacy(registry) => registry.call(EMIT_PHASE, compilation),
        }
    }

    pub(crate) fn run_after_emit(&mut self, compilation: &mut Compilation) -> Result<()> {
        match self {
            HookSurface::Hooks(hooks) => hooks.after_emit.call(compilation),
            HookSurface::Legacy(registry) => registry.call(AFTER_EMIT_PHASE, compilation),
        }
    }
}
