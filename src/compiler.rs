//! Host-side compiler model: build-output configuration and the two-phase
//! build driver the plugin attaches to.

use std::path::{Path, PathBuf};

use crate::compilation::Compilation;
use crate::error::Result;
use crate::hooks::{CompilerHooks, HookSurface, LegacyPluginRegistry};

/// Build-output configuration.
#[derive(Debug, Clone, Default)]
pub struct OutputOptions {
    /// Directory final assets are written to.
    pub path: PathBuf,
}

/// Development-server configuration.
#[derive(Debug, Clone, Default)]
pub struct DevServerOptions {
    /// Real write target when the build output is a virtual mount.
    pub output_path: Option<PathBuf>,
}

/// Compiler configuration consumed by plugins.
#[derive(Debug, Clone, Default)]
pub struct CompilerOptions {
    /// Build-output settings.
    pub output: OutputOptions,
    /// Development-server settings, when a dev server is attached.
    pub dev_server: Option<DevServerOptions>,
}

impl CompilerOptions {
    /// The directory file emission resolves against: the configured output
    /// path, unless that path is the filesystem root (a virtual mount) and
    /// the dev server names the real write target.
    pub fn effective_output_dir(&self) -> &Path {
        if self.output.path == Path::new("/") {
            if let Some(dev_server) = &self.dev_server {
                if let Some(output_path) = &dev_server.output_path {
                    return output_path;
                }
            }
        }
        &self.output.path
    }
}

/// The host build tool. Owns the phase sequencing; plugins register
/// callbacks through [`HookSurface::registrar`] and are driven by [`run`].
///
/// [`run`]: Compiler::run
pub struct Compiler {
    /// Compiler configuration.
    pub options: CompilerOptions,
    /// Hook registration surface exposed to plugins.
    pub hooks: HookSurface,
}

impl Compiler {
    /// Creates a compiler exposing the modern named-tap hook surface.
    pub fn new(options: CompilerOptions) -> Self {
        Self { options, hooks: HookSurface::Hooks(CompilerHooks::default()) }
    }

    /// Creates a compiler exposing the legacy string-keyed hook surface.
    pub fn with_legacy_plugins(options: CompilerOptions) -> Self {
        Self { options, hooks: HookSurface::Legacy(LegacyPluginRegistry::new()) }
    }

    /// Runs one build: the emit phase, then the after-emit phase.
    pub fn run(&mut self, compilation: &mut Compilation) -> Result<()> {
        self.hooks.run_emit(compilation)?;
        self.hooks.run_after_emit(compilation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_output_dir() {
        let plain = CompilerOptions {
            output: OutputOptions { path: PathBuf::from("/abs/out") },
            dev_server: None,
        };
        assert_eq!(plain.effective_output_dir(), Path::new("/abs/out"));

        let virtual_root = CompilerOptions {
            output: OutputOptions { path: PathBuf::from("/") },
            dev_server: Some(DevServerOptions { output_path: Some(PathBuf::from("/srv/dist")) }),
        };
        assert_eq!(virtual_root.effective_output_dir(), Path::new("/srv/dist"));

        // Root output without an override stays the root.
        let bare_root = CompilerOptions {
            output: OutputOptions { path: PathBuf::from("/") },
            dev_server: Some(DevServerOptions { output_path: None }),
        };
        assert_eq!(bare_root.effective_output_dir(), Path::new("/"));
    }
}
