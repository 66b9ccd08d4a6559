//! Core emission adapter.
//! Renders every configured template during the host's emit phase, records
//! the results as build assets, optionally persists them to disk, and
//! tracks template sources as file dependencies during after-emit.

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use indexmap::IndexSet;
use log::{debug, warn};

use crate::compilation::{Asset, Compilation};
use crate::compiler::Compiler;
use crate::config::PluginOptions;
use crate::constants::PLUGIN_NAME;
use crate::context::create_context;
use crate::error::{Error, Result};
use crate::hooks::PhaseCallback;
use crate::renderer::TemplateRenderer;

/// Renders configured templates into build output during the emission
/// phase.
#[derive(Debug)]
pub struct TemplateEmitPlugin {
    options: PluginOptions,
}

impl TemplateEmitPlugin {
    /// Creates the plugin from merged options.
    ///
    /// # Errors
    /// * `Error::Config` if `templates` contains no descriptors. Everything
    ///   else is validated at emission time, once build state exists.
    pub fn new(options: PluginOptions) -> Result<Self> {
        if options.templates.is_empty() {
            return Err(Error::Config(
                "`templates` must contain at least one descriptor".to_string(),
            ));
        }
        Ok(Self { options })
    }

    /// Attaches the plugin to a compiler.
    ///
    /// Resolves the effective output directory and the registration surface
    /// once, then registers the emit and after-emit callbacks. The file
    /// dependency set is shared between both callbacks and lives for the
    /// whole attachment, accumulating across builds.
    pub fn apply(self, compiler: &mut Compiler) {
        let output_dir = compiler.options.effective_output_dir().to_path_buf();
        let file_dependencies = Rc::new(RefCell::new(IndexSet::new()));

        let options = self.options;
        let dependencies = Rc::clone(&file_dependencies);
        let emit: PhaseCallback = Box::new(move |compilation| {
            emit_templates(&options, &output_dir, &mut dependencies.borrow_mut(), compilation)
        });

        let dependencies = file_dependencies;
        let after_emit: PhaseCallback = Box::new(move |compilation| {
            merge_file_dependencies(&dependencies.borrow(), compilation);
            Ok(())
        });

        let registrar = compiler.hooks.registrar();
        registrar.on_emit(PLUGIN_NAME, emit);
        registrar.on_after_emit(PLUGIN_NAME, after_emit);
    }
}

/// One emit pass: renders every descriptor in order against the current
/// build state.
///
/// Asset-map entries are written in descriptor order. File writes for
/// descriptors with `write_to_file_emit` are buffered and flushed together
/// after the loop; a failed write becomes a build error without aborting
/// the pass or rolling back asset entries.
///
/// Render failures are likewise recorded on the compilation and skip only
/// the failing descriptor. Missing `from`/`to` halt the pass.
pub fn emit_templates(
    options: &PluginOptions,
    output_dir: &Path,
    file_dependencies: &mut IndexSet<PathBuf>,
    compilation: &mut Compilation,
) -> Result<()> {
    let renderer = options.configure.resolve();
    let mut pending_writes = Vec::new();

    for template in &options.templates {
        let from = template
            .from
            .as_deref()
            .ok_or_else(|| Error::Config("each template needs a `from` option".to_string()))?;
        let to = template
            .to
            .as_deref()
            .ok_or_else(|| Error::Config("each template needs a `to` option".to_string()))?;

        file_dependencies.insert(PathBuf::from(from));

        let context = create_context(template.context.as_ref(), compilation);

        debug!("Rendering template '{}'", from);
        let rendered = match renderer.render(from, &context, template.callback.as_ref()) {
            Ok(rendered) => rendered,
            Err(err) => {
                warn!("Failed to render '{}': {}", from, err);
                compilation.errors.push(err);
                continue;
            }
        };

        let asset_key = resolve_asset_key(to, output_dir);

        if template.write_to_file_emit {
            pending_writes.push((output_dir.join(&asset_key), rendered.clone()));
        }

        debug!("Emitting asset '{}'", asset_key);
        compilation.assets.insert(asset_key, Asset::new(rendered));
    }

    for (destination, content) in pending_writes {
        if let Err(source) = write_file(&destination, &content) {
            warn!("Failed to write '{}': {}", destination.display(), source);
            compilation.errors.push(Error::WriteAsset { path: destination, source });
        }
    }

    Ok(())
}

/// One after-emit pass: merges the accumulated template sources into the
/// host's tracking collection, skipping entries already present.
pub fn merge_file_dependencies(
    file_dependencies: &IndexSet<PathBuf>,
    compilation: &mut Compilation,
) {
    for file in file_dependencies {
        if !compilation.file_dependencies.contains(file) {
            debug!("Tracking file dependency '{}'", file.display());
            compilation.file_dependencies.add(file.clone());
        }
    }
}

/// Resolves a descriptor's destination into an asset-map key: absolute
/// paths are rewritten relative to the output directory, relative paths
/// pass through unchanged.
pub fn resolve_asset_key(to: &str, output_dir: &Path) -> String {
    let to_path = Path::new(to);
    if to_path.is_absolute() {
        relative_to(to_path, output_dir).to_string_lossy().into_owned()
    } else {
        to.to_string()
    }
}

/// Path of `path` relative to `base`, walking up with `..` where the two
/// diverge.
fn relative_to(path: &Path, base: &Path) -> PathBuf {
    let mut path_components = path.components().peekable();
    let mut base_components = base.components().peekable();

    while let (Some(p), Some(b)) = (path_components.peek(), base_components.peek()) {
        if p != b {
            break;
        }
        path_components.next();
        base_components.next();
    }

    let mut relative = PathBuf::new();
    for _ in base_components {
        relative.push("..");
    }
    relative.extend(path_components);
    relative
}

fn write_file(path: &Path, content: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_asset_key() {
        let output = Path::new("/abs/out");

        assert_eq!(resolve_asset_key("a.html", output), "a.html");
        assert_eq!(resolve_asset_key("pages/a.html", output), "pages/a.html");
        assert_eq!(resolve_asset_key("/abs/out/b.html", output), "b.html");
        assert_eq!(resolve_asset_key("/abs/out/sub/c.html", output), "sub/c.html");
        assert_eq!(resolve_asset_key("/elsewhere/d.html", output), "../../elsewhere/d.html");
    }
}
