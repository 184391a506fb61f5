//! Android source-root discovery and package candidate resolution.
//!
//! A source root is a directory whose path ends in `src/main/java` or `src/main/kotlin`.
//! Every directory below a source root is a package directory. Package directories are
//! grouped by the path text in front of the source-root segment (the module prefix), so two
//! modules that both contain `com/x` never mix.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::fs::ProjectFs;

const SOURCE_ROOT_SEGMENTS: [&str; 2] = ["src/main/java", "src/main/kotlin"];

fn normalized(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Whether `path` ends with `src/main/java` or `src/main/kotlin`, ignoring ASCII case.
pub fn is_source_root(path: &Path) -> bool {
    let lower = normalized(path).to_ascii_lowercase();
    let lower = lower.trim_end_matches('/');
    SOURCE_ROOT_SEGMENTS.iter().any(|seg| lower.ends_with(seg))
}

// Byte offset of the first source-root segment. `to_ascii_lowercase` keeps byte offsets
// stable, so the offset is valid in the original string too.
fn source_segment(path: &str) -> Option<(usize, &'static str)> {
    let lower = path.to_ascii_lowercase();
    SOURCE_ROOT_SEGMENTS
        .iter()
        .find_map(|seg| lower.find(seg).map(|idx| (idx, *seg)))
}

/// The module prefix of `path`: everything in front of its `src/main/java` or
/// `src/main/kotlin` segment, e.g. `/p/app/` for `/p/app/src/main/java/com/x`.
///
/// `None` when the path is not inside a source root.
pub fn root_prefix_key(path: &Path) -> Option<String> {
    let text = normalized(path);
    let (idx, _) = source_segment(&text)?;
    Some(text[..idx].to_string())
}

/// The `/`-separated package path of a directory relative to its source root, e.g.
/// `com/x/y`. The source root itself maps to an empty path.
pub fn package_path_of(path: &Path) -> Option<String> {
    let text = normalized(path);
    let (idx, seg) = source_segment(&text)?;
    let rest = &text[idx + seg.len()..];
    Some(rest.trim_matches('/').to_string())
}

/// Walk the project tree below `project_root` and collect every source root.
///
/// A source root is not descended into. Hidden directories (`.git`, `.gradle`, `.idea`)
/// are skipped. Directories that cannot be listed are treated as empty.
pub fn discover_source_roots(fs: &dyn ProjectFs, project_root: &Path) -> Vec<PathBuf> {
    let mut roots = vec![];
    let mut stack: Vec<PathBuf> = fs.list_children(project_root);
    stack.reverse();

    while let Some(dir) = stack.pop() {
        if !fs.is_dir(&dir) || is_hidden(&dir) {
            continue;
        }
        if is_source_root(&dir) {
            tracing::debug!(root = %dir.display(), "found source root");
            roots.push(dir);
            continue;
        }
        let mut children = fs.list_children(&dir);
        children.reverse();
        stack.extend(children);
    }
    roots
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with('.'))
}

/// Every directory below each source root, in depth-first order. The roots themselves are
/// not included.
pub fn enumerate_package_directories(fs: &dyn ProjectFs, source_roots: &[PathBuf]) -> Vec<PathBuf> {
    let mut out = vec![];
    for root in source_roots {
        let mut stack = fs.list_children(root);
        stack.reverse();
        while let Some(dir) = stack.pop() {
            if !fs.is_dir(&dir) {
                continue;
            }
            let mut children = fs.list_children(&dir);
            children.reverse();
            stack.extend(children);
            if !is_source_root(&dir) {
                out.push(dir);
            }
        }
    }
    out
}

/// Package directories grouped by module prefix. Keys and the directories within each key
/// keep first-seen order.
#[derive(Debug, Default, Clone)]
pub struct PackageGroup {
    keys: Vec<String>,
    dirs: HashMap<String, Vec<PathBuf>>,
}

impl PackageGroup {
    /// Discover, enumerate and group the package directories of a whole project.
    pub fn scan(fs: &dyn ProjectFs, project_root: &Path) -> Self {
        let roots = discover_source_roots(fs, project_root);
        let dirs = enumerate_package_directories(fs, &roots);
        tracing::debug!(
            roots = roots.len(),
            packages = dirs.len(),
            "scanned {}",
            project_root.display()
        );
        group_by_root(dirs)
    }

    pub fn insert(&mut self, dir: PathBuf) {
        let Some(key) = root_prefix_key(&dir) else {
            return;
        };
        match self.dirs.get_mut(&key) {
            Some(list) => list.push(dir),
            None => {
                self.keys.push(key.clone());
                self.dirs.insert(key, vec![dir]);
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&[PathBuf]> {
        self.dirs.get(key).map(Vec::as_slice)
    }

    /// Module prefixes in first-seen order.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Shorthand for [`resolve_candidate_packages`].
    pub fn candidates_for(&self, target: &Path) -> Vec<String> {
        resolve_candidate_packages(self, target)
    }
}

pub fn group_by_root(package_dirs: impl IntoIterator<Item = PathBuf>) -> PackageGroup {
    let mut group = PackageGroup::default();
    for dir in package_dirs {
        group.insert(dir);
    }
    group
}

/// Dotted package names a class created in `target` may use.
///
/// Only the module that contains `target` contributes. Each package directory also
/// contributes all of its ancestor packages. The target's own package comes first when it
/// is among them. The result is empty when `target` is outside every known source root.
pub fn resolve_candidate_packages(group: &PackageGroup, target: &Path) -> Vec<String> {
    let Some(key) = root_prefix_key(target) else {
        return vec![];
    };
    let Some(dirs) = group.get(&key) else {
        return vec![];
    };

    let mut packages: Vec<String> = vec![];
    for dir in dirs {
        let Some(pkg) = package_path_of(dir) else {
            continue;
        };
        for candidate in with_ancestors(&pkg) {
            if !packages.contains(&candidate) {
                packages.push(candidate);
            }
        }
    }

    if let Some(own) = package_path_of(target) {
        if let Some(pos) = packages.iter().position(|p| *p == own) {
            let own = packages.remove(pos);
            packages.insert(0, own);
        }
    }

    packages.into_iter().map(|p| p.replace('/', ".")).collect()
}

// `com/foo/bar` → [`com`, `com/foo`, `com/foo/bar`].
fn with_ancestors(pkg: &str) -> Vec<String> {
    let mut out = vec![];
    let mut acc = String::new();
    for seg in pkg.split('/').filter(|s| !s.is_empty()) {
        if !acc.is_empty() {
            acc.push('/');
        }
        acc.push_str(seg);
        out.push(acc.clone());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MemoryFs;

    fn two_module_project() -> MemoryFs {
        MemoryFs::new()
            .with_dir("/p/moduleA/src/main/java/com/x/y")
            .with_dir("/p/moduleA/src/main/java/org/a")
            .with_file("/p/moduleA/src/main/java/com/x/y/Main.kt", "")
            .with_dir("/p/moduleB/src/main/kotlin/com/x")
            .with_dir("/p/moduleB/src/main/kotlin/net/b")
            .with_dir("/p/.gradle/src/main/java/hidden")
            .with_file("/p/settings.gradle", "")
    }

    #[test]
    fn source_root_detection_ignores_case() {
        assert!(is_source_root(Path::new("/p/app/src/main/java")));
        assert!(is_source_root(Path::new("/p/app/src/main/kotlin")));
        assert!(is_source_root(Path::new("/p/app/SRC/Main/Java")));
        assert!(!is_source_root(Path::new("/p/app/src/main/java/com")));
        assert!(!is_source_root(Path::new("/p/app/src/test/java")));
    }

    #[test]
    fn prefix_key_and_package_path() {
        let dir = Path::new("/p/app/src/main/java/com/x/y");
        assert_eq!(root_prefix_key(dir).as_deref(), Some("/p/app/"));
        assert_eq!(package_path_of(dir).as_deref(), Some("com/x/y"));
        assert_eq!(
            package_path_of(Path::new("/p/app/src/main/kotlin")).as_deref(),
            Some("")
        );
        assert_eq!(root_prefix_key(Path::new("/p/app/res")), None);
    }

    #[test]
    fn discovers_roots_without_descending_into_them() {
        let fs = two_module_project();
        let roots = discover_source_roots(&fs, Path::new("/p"));
        assert_eq!(
            roots,
            vec![
                PathBuf::from("/p/moduleA/src/main/java"),
                PathBuf::from("/p/moduleB/src/main/kotlin"),
            ]
        );
    }

    #[test]
    fn missing_project_root_has_no_roots() {
        let fs = MemoryFs::new();
        assert!(discover_source_roots(&fs, Path::new("/nope")).is_empty());
    }

    #[test]
    fn enumerates_descendant_directories_only() {
        let fs = two_module_project();
        let roots = vec![PathBuf::from("/p/moduleA/src/main/java")];
        let dirs = enumerate_package_directories(&fs, &roots);
        assert_eq!(
            dirs,
            vec![
                PathBuf::from("/p/moduleA/src/main/java/com"),
                PathBuf::from("/p/moduleA/src/main/java/com/x"),
                PathBuf::from("/p/moduleA/src/main/java/com/x/y"),
                PathBuf::from("/p/moduleA/src/main/java/org"),
                PathBuf::from("/p/moduleA/src/main/java/org/a"),
            ]
        );
    }

    #[test]
    fn groups_by_module_prefix_in_first_seen_order() {
        let group = group_by_root(vec![
            PathBuf::from("/p/b/src/main/java/com"),
            PathBuf::from("/p/a/src/main/kotlin/com"),
            PathBuf::from("/p/b/src/main/java/com/x"),
            PathBuf::from("/p/not-a-source-dir"),
        ]);
        assert_eq!(group.keys(), ["/p/b/".to_string(), "/p/a/".to_string()]);
        assert_eq!(group.get("/p/b/").map(|d| d.len()), Some(2));
        assert_eq!(group.get("/p/a/").map(|d| d.len()), Some(1));
    }

    #[test]
    fn candidates_start_with_target_package_and_include_ancestors() {
        let fs = two_module_project();
        let group = PackageGroup::scan(&fs, Path::new("/p"));
        let pkgs = group.candidates_for(Path::new("/p/moduleA/src/main/java/com/x/y"));
        assert_eq!(pkgs[0], "com.x.y");
        for expected in ["com", "com.x", "com.x.y", "org", "org.a"] {
            assert!(pkgs.contains(&expected.to_string()), "missing {expected}");
        }
        assert_eq!(pkgs.len(), 5);
    }

    #[test]
    fn candidates_never_cross_modules() {
        let fs = two_module_project();
        let group = PackageGroup::scan(&fs, Path::new("/p"));
        let pkgs = group.candidates_for(Path::new("/p/moduleA/src/main/java/com/x"));
        assert_eq!(pkgs[0], "com.x");
        assert!(!pkgs.iter().any(|p| p.starts_with("net")));

        let pkgs = group.candidates_for(Path::new("/p/moduleB/src/main/kotlin/com/x"));
        assert_eq!(pkgs, vec!["com.x", "com", "net", "net.b"]);
    }

    #[test]
    fn target_outside_source_roots_has_no_candidates() {
        let fs = two_module_project();
        let group = PackageGroup::scan(&fs, Path::new("/p"));
        assert!(group.candidates_for(Path::new("/p/moduleA")).is_empty());
        assert!(group
            .candidates_for(Path::new("/other/src/main/java/com"))
            .is_empty());
    }

    #[test]
    fn source_root_target_keeps_traversal_order() {
        let fs = two_module_project();
        let group = PackageGroup::scan(&fs, Path::new("/p"));
        let pkgs = group.candidates_for(Path::new("/p/moduleB/src/main/kotlin"));
        assert_eq!(pkgs, vec!["com", "com.x", "net", "net.b"]);
    }
}
