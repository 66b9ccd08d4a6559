//! Host-side build state mutated by plugins during the emission phases:
//! the asset map, the build error list and the file-dependency tracking
//! collection.

use std::path::{Path, PathBuf};

use indexmap::{IndexMap, IndexSet};

use crate::error::Error;

/// One build output: a text blob exposed through `size()` and `source()`.
///
/// Assets produced by upstream style extraction carry a chunked
/// representation next to the full source: the content chunk followed by the
/// source-map-reference chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    content: String,
    chunks: Vec<String>,
}

impl Asset {
    /// Creates an asset from its full text content.
    pub fn new(content: impl Into<String>) -> Self {
        Self { content: content.into(), chunks: Vec::new() }
    }

    /// Creates an asset from pre-split chunks; the full source is their
    /// concatenation.
    pub fn from_chunks(chunks: Vec<String>) -> Self {
        Self { content: chunks.concat(), chunks }
    }

    /// Size of the asset content in bytes.
    pub fn size(&self) -> usize {
        self.content.len()
    }

    /// Full asset content.
    pub fn source(&self) -> &str {
        &self.content
    }

    /// Pre-split representation, empty for assets built from plain text.
    pub fn chunks(&self) -> &[String] {
        &self.chunks
    }
}

/// The host's file-dependency tracking collection. Older hosts expose a
/// list, newer ones a set; both deduplicate through [`contains`] checks on
/// the caller side for the list shape.
///
/// [`contains`]: FileDependencies::contains
#[derive(Debug)]
pub enum FileDependencies {
    /// List-shaped collection.
    List(Vec<PathBuf>),
    /// Insertion-ordered set-shaped collection.
    Set(IndexSet<PathBuf>),
}

impl FileDependencies {
    /// Whether the collection already tracks `file`.
    pub fn contains(&self, file: &Path) -> bool {
        match self {
            FileDependencies::List(files) => files.iter().any(|f| f == file),
            FileDependencies::Set(files) => files.contains(file),
        }
    }

    /// Adds a dependency. The set shape ignores duplicates on its own.
    pub fn add(&mut self, file: PathBuf) {
        match self {
            FileDependencies::List(files) => files.push(file),
            FileDependencies::Set(files) => {
                files.insert(file);
            }
        }
    }

    /// Number of tracked dependencies.
    pub fn len(&self) -> usize {
        match self {
            FileDependencies::List(files) => files.len(),
            FileDependencies::Set(files) => files.len(),
        }
    }

    /// Whether nothing is tracked yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates tracked dependencies in insertion order.
    pub fn iter(&self) -> Box<dyn Iterator<Item = &PathBuf> + '_> {
        match self {
            FileDependencies::List(files) => Box::new(files.iter()),
            FileDependencies::Set(files) => Box::new(files.iter()),
        }
    }
}

impl Default for FileDependencies {
    fn default() -> Self {
        FileDependencies::Set(IndexSet::new())
    }
}

/// State of one build run. Plugins mutate it in place during their callback
/// window; the host serializes phase execution so access is uncontended.
#[derive(Debug, Default)]
pub struct Compilation {
    /// Output path -> content, in insertion order.
    pub assets: IndexMap<String, Asset>,

    /// Non-fatal errors collected during the build.
    pub errors: Vec<Error>,

    /// Source paths whose modification should trigger a rebuild.
    pub file_dependencies: FileDependencies,
}

impl Compilation {
    /// Creates an empty compilation with a set-shaped dependency collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty compilation with a list-shaped dependency
    /// collection, as exposed by older hosts.
    pub fn with_list_dependencies() -> Self {
        Self { file_dependencies: FileDependencies::List(Vec::new()), ..Self::default() }
    }
}
