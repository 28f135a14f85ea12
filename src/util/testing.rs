//! Test support: logging setup and an in-memory filesystem.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, Once, PoisonError};

use tracing::{debug, info};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::infrastructure::traits::FileSystem;

static TEST_SETUP: Once = Once::new();

pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        // global logging subscriber, used by all tracing log macros
        setup_test_logging();
        info!("Test Setup complete");
    });
}

fn setup_test_logging() {
    debug!("INIT: Attempting logger init from testing.rs");

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Node {
    File(String),
    Dir,
}

/// Filesystem held entirely in memory. The root `/` always exists.
///
/// Follows the same failure rules as the real filesystem for the operations
/// the services use: writing needs an existing parent, `create_dir` refuses
/// existing paths.
#[derive(Debug)]
pub struct InMemoryFileSystem {
    nodes: Mutex<BTreeMap<PathBuf, Node>>,
}

impl Default for InMemoryFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryFileSystem {
    pub fn new() -> Self {
        let mut nodes = BTreeMap::new();
        nodes.insert(PathBuf::from("/"), Node::Dir);
        Self {
            nodes: Mutex::new(nodes),
        }
    }

    fn nodes(&self) -> std::sync::MutexGuard<'_, BTreeMap<PathBuf, Node>> {
        self.nodes.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Create a directory and its parents.
    pub fn add_dir(&self, path: impl AsRef<Path>) {
        self.create_dir_all(path.as_ref())
            .unwrap_or_else(|e| panic!("add_dir {}: {}", path.as_ref().display(), e));
    }

    /// Create a file, creating parent directories as needed.
    pub fn add_file(&self, path: impl AsRef<Path>, contents: &str) {
        let path = path.as_ref();
        self.ensure_parent(path)
            .and_then(|_| self.write(path, contents))
            .unwrap_or_else(|e| panic!("add_file {}: {}", path.display(), e));
    }

    /// Contents of a file, if it exists.
    pub fn file(&self, path: impl AsRef<Path>) -> Option<String> {
        match self.nodes().get(path.as_ref()) {
            Some(Node::File(contents)) => Some(contents.clone()),
            _ => None,
        }
    }

    /// All paths below `root` (excluding `root`), relative to it, sorted.
    /// Directories get a trailing `/`.
    pub fn snapshot(&self, root: impl AsRef<Path>) -> Vec<String> {
        let root = root.as_ref();
        self.nodes()
            .iter()
            .filter(|(path, _)| path.as_path() != root)
            .filter_map(|(path, node)| {
                let rel = path.strip_prefix(root).ok()?.to_string_lossy().into_owned();
                Some(match node {
                    Node::Dir => format!("{}/", rel),
                    Node::File(_) => rel,
                })
            })
            .collect()
    }
}

fn not_found(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::NotFound,
        format!("no such file or directory: {}", path.display()),
    )
}

impl FileSystem for InMemoryFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        match self.nodes().get(path) {
            Some(Node::File(contents)) => Ok(contents.clone()),
            Some(Node::Dir) => Err(io::Error::new(
                io::ErrorKind::Other,
                format!("is a directory: {}", path.display()),
            )),
            None => Err(not_found(path)),
        }
    }

    fn write(&self, path: &Path, content: &str) -> io::Result<()> {
        let mut nodes = self.nodes();
        let parent = path.parent().ok_or_else(|| not_found(path))?;
        if nodes.get(parent) != Some(&Node::Dir) {
            return Err(not_found(parent));
        }
        if nodes.get(path) == Some(&Node::Dir) {
            return Err(io::Error::new(
                io::ErrorKind::Other,
                format!("is a directory: {}", path.display()),
            ));
        }
        nodes.insert(path.to_path_buf(), Node::File(content.to_string()));
        Ok(())
    }

    fn is_file(&self, path: &Path) -> bool {
        matches!(self.nodes().get(path), Some(Node::File(_)))
    }

    fn is_dir(&self, path: &Path) -> bool {
        matches!(self.nodes().get(path), Some(Node::Dir))
    }

    fn create_dir(&self, path: &Path) -> io::Result<()> {
        let mut nodes = self.nodes();
        if nodes.contains_key(path) {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("already exists: {}", path.display()),
            ));
        }
        let parent = path.parent().ok_or_else(|| not_found(path))?;
        if nodes.get(parent) != Some(&Node::Dir) {
            return Err(not_found(parent));
        }
        nodes.insert(path.to_path_buf(), Node::Dir);
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        let mut nodes = self.nodes();
        let mut missing = Vec::new();
        for ancestor in path.ancestors() {
            match nodes.get(ancestor) {
                Some(Node::Dir) => break,
                Some(Node::File(_)) => {
                    return Err(io::Error::new(
                        io::ErrorKind::AlreadyExists,
                        format!("not a directory: {}", ancestor.display()),
                    ))
                }
                None => missing.push(ancestor.to_path_buf()),
            }
        }
        for dir in missing {
            nodes.insert(dir, Node::Dir);
        }
        Ok(())
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        let nodes = self.nodes();
        if nodes.get(path) != Some(&Node::Dir) {
            return Err(not_found(path));
        }
        Ok(nodes
            .keys()
            .filter(|p| p.parent() == Some(path))
            .cloned()
            .collect())
    }
}
