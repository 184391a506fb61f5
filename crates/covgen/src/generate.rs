//! Creating the files for one component.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{GenerateError, Result};
use crate::fs::ProjectFs;
use crate::manifest::{app_package, insert_activity, layout_dir_for, manifest_path_for};
use crate::names::{is_valid_name, ComponentKind};
use crate::templates::{
    tpl_activity, tpl_adapter, tpl_dialog, tpl_fragment, tpl_layout, tpl_view_model,
    ClassContext,
};

/// Everything needed to scaffold one component.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub kind: ComponentKind,
    /// Directory the class file is created in.
    pub target_dir: PathBuf,
    pub class_name: String,
    pub layout_name: String,
    /// Dotted package written into the generated sources.
    pub package: String,
    /// Only used for activities.
    pub view_model: Option<String>,
    /// Only used for adapters; `Any` when absent.
    pub item_type: Option<String>,
    pub hilt: bool,
    pub base_package: String,
}

/// What [`generate`] created.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateReport {
    pub kind: ComponentKind,
    pub package: String,
    pub class_file: PathBuf,
    pub layout_file: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_model_file: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_package: Option<String>,
    pub manifest_updated: bool,
}

impl GenerateReport {
    /// Created files in creation order.
    pub fn files(&self) -> Vec<&Path> {
        let mut out = vec![self.class_file.as_path()];
        if let Some(vm) = &self.view_model_file {
            out.push(vm);
        }
        out.push(&self.layout_file);
        out
    }
}

/// Check the user-supplied names without touching the filesystem.
pub fn validate(request: &GenerateRequest) -> Result<()> {
    check_name("class name", &request.class_name)?;
    check_name("layout name", &request.layout_name)?;
    if request.kind == ComponentKind::Activity {
        check_optional_name("ViewModel name", request.view_model.as_deref())?;
    }
    if request.kind == ComponentKind::Adapter {
        check_optional_name("item type", request.item_type.as_deref())?;
    }
    if request.package.trim().is_empty() {
        return Err(GenerateError::NoPackage(request.target_dir.clone()));
    }
    Ok(())
}

fn check_name(label: &'static str, value: &str) -> Result<()> {
    if is_valid_name(value) {
        Ok(())
    } else {
        Err(GenerateError::InvalidName {
            label,
            value: value.to_string(),
        })
    }
}

fn check_optional_name(label: &'static str, value: Option<&str>) -> Result<()> {
    match value {
        Some(v) if !v.is_empty() => check_name(label, v),
        _ => Ok(()),
    }
}

/// Create the class file, the optional ViewModel, the layout resource and (for activities)
/// the manifest entry.
///
/// If the layout directory cannot be resolved, or a file to be created already exists,
/// the files created so far are removed again. Write failures after that point leave the
/// already written files in place.
pub fn generate(fs: &dyn ProjectFs, request: &GenerateRequest) -> Result<GenerateReport> {
    validate(request)?;

    let view_model = match request.kind {
        ComponentKind::Activity => request.view_model.as_deref().filter(|vm| !vm.is_empty()),
        _ => None,
    };

    let mut created: Vec<PathBuf> = vec![];
    let class_file = create(fs, &request.target_dir, &format!("{}.kt", request.class_name))?;
    created.push(class_file.clone());

    let view_model_file = match view_model {
        Some(vm) => {
            let path = create(fs, &request.target_dir, &format!("{vm}.kt"))
                .inspect_err(|_| discard(fs, &created))?;
            created.push(path.clone());
            Some(path)
        }
        None => None,
    };

    let layout_dir = match layout_dir_for(&class_file) {
        Some(dir) if fs.is_dir(&dir) => dir,
        Some(dir) => {
            discard(fs, &created);
            return Err(GenerateError::LayoutDirNotFound(dir));
        }
        None => {
            discard(fs, &created);
            return Err(GenerateError::NotInSourceRoot(request.target_dir.clone()));
        }
    };
    let layout_file = create(fs, &layout_dir, &format!("{}.xml", request.layout_name))
        .inspect_err(|_| discard(fs, &created))?;

    let app_package = app_package(fs, &class_file);
    let ctx = ClassContext {
        package: &request.package,
        class_name: &request.class_name,
        layout_name: &request.layout_name,
        app_package: app_package.as_deref(),
        base_package: &request.base_package,
        hilt: request.hilt,
    };
    let class_source = match request.kind {
        ComponentKind::Activity => tpl_activity(&ctx, view_model),
        ComponentKind::Fragment => tpl_fragment(&ctx),
        ComponentKind::Dialog => tpl_dialog(&ctx),
        ComponentKind::Adapter => tpl_adapter(&ctx, request.item_type.as_deref()),
    };

    write(fs, &class_file, &class_source)?;
    write(fs, &layout_file, &tpl_layout(request.kind))?;
    if let (Some(vm), Some(path)) = (view_model, &view_model_file) {
        write(fs, path, &tpl_view_model(&request.package, vm, request.hilt))?;
    }

    let manifest_updated = match request.kind {
        ComponentKind::Activity => {
            let qualified = format!("{}.{}", request.package, request.class_name);
            register_activity(fs, &class_file, &qualified)?
        }
        _ => false,
    };

    tracing::info!(
        kind = ?request.kind,
        class = %request.class_name,
        package = %request.package,
        "generated component"
    );

    Ok(GenerateReport {
        kind: request.kind,
        package: request.package.clone(),
        class_file,
        layout_file,
        view_model_file,
        app_package,
        manifest_updated,
    })
}

fn register_activity(fs: &dyn ProjectFs, class_file: &Path, qualified: &str) -> Result<bool> {
    let Some(manifest) = manifest_path_for(class_file) else {
        return Ok(false);
    };
    if !fs.exists(&manifest) {
        tracing::debug!(path = %manifest.display(), "no manifest; skipping activity entry");
        return Ok(false);
    }
    let text = fs
        .read_text(&manifest)
        .map_err(|e| GenerateError::io("read", &manifest, e))?;
    let Some(updated) = insert_activity(&text, qualified) else {
        tracing::debug!(path = %manifest.display(), "manifest has no </application>");
        return Ok(false);
    };
    write(fs, &manifest, &updated)?;
    Ok(true)
}

fn create(fs: &dyn ProjectFs, dir: &Path, name: &str) -> Result<PathBuf> {
    match fs.create_file(dir, name) {
        Ok(path) => {
            tracing::debug!(path = %path.display(), "created");
            Ok(path)
        }
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            Err(GenerateError::FileExists(dir.join(name)))
        }
        Err(e) => Err(GenerateError::io("create", dir.join(name), e)),
    }
}

fn write(fs: &dyn ProjectFs, path: &Path, content: &str) -> Result<()> {
    fs.write_text(path, content)
        .map_err(|e| GenerateError::io("write", path, e))
}

// Best-effort; the error that triggered the cleanup is what gets reported.
fn discard(fs: &dyn ProjectFs, created: &[PathBuf]) {
    for path in created {
        if let Err(e) = fs.remove_file(path) {
            tracing::warn!(path = %path.display(), "failed to remove {e}");
        }
    }
}
