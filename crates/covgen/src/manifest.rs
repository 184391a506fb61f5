//! Module-relative paths (`AndroidManifest.xml`, `res/layout`) and manifest edits.

use std::path::{Path, PathBuf};

use crate::fs::ProjectFs;
use crate::packages::root_prefix_key;
use crate::templates::tpl_manifest_activity;

const APPLICATION_CLOSE: &str = "</application>";

/// `<module>/src/main/AndroidManifest.xml` for a file inside the module's source root.
pub fn manifest_path_for(source_file: &Path) -> Option<PathBuf> {
    let prefix = root_prefix_key(source_file)?;
    Some(PathBuf::from(format!("{prefix}src/main/AndroidManifest.xml")))
}

/// `<module>/src/main/res/layout` for a file inside the module's source root.
pub fn layout_dir_for(source_file: &Path) -> Option<PathBuf> {
    let prefix = root_prefix_key(source_file)?;
    Some(PathBuf::from(format!("{prefix}src/main/res/layout")))
}

/// Insert an `<activity>` entry for `qualified_class` right before the first
/// `</application>` and trim the result.
///
/// Returns `None` when the manifest has no `</application>`; the caller leaves the file
/// alone in that case.
pub fn insert_activity(manifest: &str, qualified_class: &str) -> Option<String> {
    let idx = manifest.find(APPLICATION_CLOSE)?;
    let entry = tpl_manifest_activity(qualified_class);
    let mut out = String::with_capacity(manifest.len() + entry.len());
    out.push_str(&manifest[..idx]);
    out.push_str(&entry);
    out.push_str(&manifest[idx..]);
    Some(out.trim().to_string())
}

/// The application package of the module containing `source_file`.
///
/// Taken from the `package` attribute of the manifest, falling back to the `namespace`
/// declared in the module's `build.gradle.kts` / `build.gradle`.
pub fn app_package(fs: &dyn ProjectFs, source_file: &Path) -> Option<String> {
    let prefix = root_prefix_key(source_file)?;

    if let Some(manifest) = manifest_path_for(source_file) {
        if let Ok(text) = fs.read_text(&manifest) {
            if let Some(pkg) = manifest_package_attr(&text) {
                return Some(pkg);
            }
        }
    }

    for script in ["build.gradle.kts", "build.gradle"] {
        let path = PathBuf::from(format!("{prefix}{script}"));
        let Ok(text) = fs.read_text(&path) else {
            continue;
        };
        if let Some(ns) = gradle_namespace(&text) {
            return Some(ns);
        }
    }
    None
}

fn manifest_package_attr(manifest: &str) -> Option<String> {
    let start = manifest.find("<manifest")?;
    let tag_len = manifest[start..].find('>')?;
    let tag = &manifest[start..start + tag_len];

    let mut rest = tag;
    while let Some(idx) = rest.find("package") {
        let before = rest[..idx].chars().last();
        let after = rest[idx + "package".len()..].trim_start();
        rest = &rest[idx + "package".len()..];
        if !before.is_some_and(char::is_whitespace) {
            continue;
        }
        if let Some(value) = after.strip_prefix('=') {
            return quoted(value.trim_start());
        }
    }
    None
}

fn gradle_namespace(script: &str) -> Option<String> {
    script.lines().find_map(|line| {
        let rest = line.trim().strip_prefix("namespace")?;
        let rest = rest.trim_start();
        let rest = rest.strip_prefix('=').unwrap_or(rest).trim_start();
        quoted(rest)
    })
}

// The contents of a leading `"..."` or `'...'`.
fn quoted(s: &str) -> Option<String> {
    let quote = s.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    let body = &s[1..];
    let end = body.find(quote)?;
    let value = body[..end].trim();
    (!value.is_empty()).then(|| value.to_string())
}
