//! Filesystem capabilities used by package discovery and file generation.
//!
//! Everything that touches the project tree goes through [`ProjectFs`]. [`DiskFs`] is the
//! real filesystem; [`MemoryFs`] keeps a tree in memory and is what the unit tests run
//! against.

use std::collections::BTreeMap;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use parking_lot::RwLock;

/// The operations the generator needs from a project tree.
pub trait ProjectFs {
    /// Direct children of `dir`, sorted by path. Unreadable or missing directories have no
    /// children.
    fn list_children(&self, dir: &Path) -> Vec<PathBuf>;

    /// True for real directories only. A symbolic link to a directory is not one, so tree
    /// walks never follow links.
    fn is_dir(&self, path: &Path) -> bool;

    fn exists(&self, path: &Path) -> bool;

    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Create an empty file named `name` inside `dir` and return its path.
    ///
    /// Fails with [`ErrorKind::AlreadyExists`] if the file is already there and with
    /// [`ErrorKind::NotFound`] if `dir` is not a directory.
    fn create_file(&self, dir: &Path, name: &str) -> io::Result<PathBuf>;

    fn read_text(&self, path: &Path) -> io::Result<String>;

    /// Replace the full contents of `path`.
    fn write_text(&self, path: &Path, content: &str) -> io::Result<()>;

    fn remove_file(&self, path: &Path) -> io::Result<()>;
}

/// [`ProjectFs`] backed by `std::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiskFs;

impl ProjectFs for DiskFs {
    fn list_children(&self, dir: &Path) -> Vec<PathBuf> {
        let Ok(entries) = std::fs::read_dir(dir) else {
            return vec![];
        };
        let mut out: Vec<PathBuf> = entries.flatten().map(|ent| ent.path()).collect();
        out.sort();
        out
    }

    fn is_dir(&self, path: &Path) -> bool {
        std::fs::symlink_metadata(path).is_ok_and(|meta| meta.is_dir())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }

    fn create_file(&self, dir: &Path, name: &str) -> io::Result<PathBuf> {
        let path = dir.join(name);
        std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)?;
        Ok(path)
    }

    fn read_text(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn write_text(&self, path: &Path, content: &str) -> io::Result<()> {
        std::fs::write(path, content)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        std::fs::remove_file(path)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Node {
    Dir,
    File(String),
}

/// In-memory [`ProjectFs`].
///
/// Paths are used verbatim as keys, so callers should stick to one style (absolute,
/// `/`-separated) for a given instance. Creating a file or directory creates all of its
/// ancestors.
#[derive(Debug, Default)]
pub struct MemoryFs {
    nodes: RwLock<BTreeMap<PathBuf, Node>>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a directory (and its ancestors).
    pub fn with_dir(self, path: impl AsRef<Path>) -> Self {
        self.insert_ancestors(path.as_ref());
        self.nodes
            .write()
            .insert(path.as_ref().to_path_buf(), Node::Dir);
        self
    }

    /// Add a file with `content` (and its parent directories).
    pub fn with_file(self, path: impl AsRef<Path>, content: &str) -> Self {
        self.insert_ancestors(path.as_ref());
        self.nodes
            .write()
            .insert(path.as_ref().to_path_buf(), Node::File(content.to_string()));
        self
    }

    /// All file paths currently stored, in path order.
    pub fn files(&self) -> Vec<PathBuf> {
        self.nodes
            .read()
            .iter()
            .filter(|(_, node)| matches!(node, Node::File(_)))
            .map(|(path, _)| path.clone())
            .collect()
    }

    fn insert_ancestors(&self, path: &Path) {
        let mut nodes = self.nodes.write();
        for ancestor in path.ancestors().skip(1) {
            if ancestor.as_os_str().is_empty() {
                continue;
            }
            nodes.entry(ancestor.to_path_buf()).or_insert(Node::Dir);
        }
    }
}

fn not_found(path: &Path) -> io::Error {
    io::Error::new(
        ErrorKind::NotFound,
        format!("{} does not exist", path.display()),
    )
}

impl ProjectFs for MemoryFs {
    fn list_children(&self, dir: &Path) -> Vec<PathBuf> {
        let nodes = self.nodes.read();
        if nodes.get(dir) != Some(&Node::Dir) {
            return vec![];
        }
        nodes
            .keys()
            .filter(|path| path.parent() == Some(dir))
            .cloned()
            .collect()
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.nodes.read().get(path) == Some(&Node::Dir)
    }

    fn exists(&self, path: &Path) -> bool {
        self.nodes.read().contains_key(path)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        if matches!(self.nodes.read().get(path), Some(Node::File(_))) {
            return Err(io::Error::new(
                ErrorKind::AlreadyExists,
                format!("{} is a file", path.display()),
            ));
        }
        self.insert_ancestors(path);
        self.nodes.write().insert(path.to_path_buf(), Node::Dir);
        Ok(())
    }

    fn create_file(&self, dir: &Path, name: &str) -> io::Result<PathBuf> {
        let path = dir.join(name);
        let mut nodes = self.nodes.write();
        if nodes.get(dir) != Some(&Node::Dir) {
            return Err(not_found(dir));
        }
        if nodes.contains_key(&path) {
            return Err(io::Error::new(
                ErrorKind::AlreadyExists,
                format!("{} already exists", path.display()),
            ));
        }
        nodes.insert(path.clone(), Node::File(String::new()));
        Ok(path)
    }

    fn read_text(&self, path: &Path) -> io::Result<String> {
        match self.nodes.read().get(path) {
            Some(Node::File(content)) => Ok(content.clone()),
            Some(Node::Dir) => Err(io::Error::new(
                ErrorKind::Other,
                format!("{} is a directory", path.display()),
            )),
            None => Err(not_found(path)),
        }
    }

    fn write_text(&self, path: &Path, content: &str) -> io::Result<()> {
        let mut nodes = self.nodes.write();
        let parent_is_dir = path
            .parent()
            .is_some_and(|parent| nodes.get(parent) == Some(&Node::Dir));
        if !parent_is_dir || nodes.get(path) == Some(&Node::Dir) {
            return Err(not_found(path));
        }
        nodes.insert(path.to_path_buf(), Node::File(content.to_string()));
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        let mut nodes = self.nodes.write();
        match nodes.get(path) {
            Some(Node::File(_)) => {
                nodes.remove(path);
                Ok(())
            }
            _ => Err(not_found(path)),
        }
    }
}
