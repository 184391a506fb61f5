use std::path::{Path, PathBuf};

use serde::Serialize;

use covgen::names::{
    class_name_to_layout_name, layout_name_to_binding_class_name, suggest_layout_name,
    suggest_view_model_name,
};
use covgen::templates::DEFAULT_BASE_PACKAGE;
use covgen::{
    generate, ComponentKind, DiskFs, GenerateError, GenerateReport, GenerateRequest, PackageGroup,
};

use crate::cli::{
    json_print, ActivityArgs, AdapterArgs, CliError, ComponentArgs, JsonOk, LayoutNameArgs,
    PackagesArgs,
};
use crate::config::{find_project_root, load_config};

pub fn activity(cwd: &Path, json: bool, args: ActivityArgs) -> Result<(), CliError> {
    let view_model = if args.no_view_model {
        None
    } else {
        Some(
            args.view_model
                .unwrap_or_else(|| suggest_view_model_name(&args.common.name)),
        )
    };
    component(cwd, json, ComponentKind::Activity, args.common, view_model, None)
}

pub fn adapter(cwd: &Path, json: bool, args: AdapterArgs) -> Result<(), CliError> {
    component(cwd, json, ComponentKind::Adapter, args.common, None, args.item)
}

pub fn component(
    cwd: &Path,
    json: bool,
    kind: ComponentKind,
    args: ComponentArgs,
    view_model: Option<String>,
    item_type: Option<String>,
) -> Result<(), CliError> {
    let fs = DiskFs;
    let target = resolve_dir(cwd, &args.target, "target")?;
    let project_root = match &args.project {
        Some(p) => resolve_dir(cwd, p, "project")?,
        None => find_project_root(&target),
    };
    let cfg = load_config(&project_root)?;

    let package = match args.package {
        Some(p) => p,
        None => PackageGroup::scan(&fs, &project_root)
            .candidates_for(&target)
            .into_iter()
            .next()
            .ok_or_else(|| GenerateError::NoPackage(target.clone()))?,
    };

    let layout_name = args
        .layout
        .unwrap_or_else(|| suggest_layout_name(kind, &args.name));

    let request = GenerateRequest {
        kind,
        target_dir: target,
        class_name: args.name,
        layout_name,
        package,
        view_model,
        item_type,
        hilt: resolve_toggle(args.hilt, args.no_hilt, cfg.generator.hilt),
        base_package: args
            .base_package
            .or(cfg.generator.base_package)
            .unwrap_or_else(|| DEFAULT_BASE_PACKAGE.to_string()),
    };
    tracing::info!(
        project = %project_root.display(),
        package = %request.package,
        "generating {:?} {}",
        kind,
        request.class_name
    );

    let report = generate(&fs, &request)?;
    print_report(json, &report);
    Ok(())
}

fn print_report(json: bool, report: &GenerateReport) {
    if json {
        json_print(&JsonOk {
            ok: true,
            data: report,
        });
        return;
    }
    println!("package {}", report.package);
    for path in report.files() {
        println!("created {}", path.display());
    }
    if report.manifest_updated {
        println!("registered activity in AndroidManifest.xml");
    }
}

#[derive(Serialize)]
struct PackagesOut {
    target: PathBuf,
    project: PathBuf,
    packages: Vec<String>,
}

pub fn packages(cwd: &Path, json: bool, args: PackagesArgs) -> Result<(), CliError> {
    let target = resolve_dir(cwd, &args.target, "target")?;
    let project = match &args.project {
        Some(p) => resolve_dir(cwd, p, "project")?,
        None => find_project_root(&target),
    };
    let group = PackageGroup::scan(&DiskFs, &project);
    let packages = group.candidates_for(&target);

    if json {
        json_print(&JsonOk {
            ok: true,
            data: PackagesOut {
                target,
                project,
                packages,
            },
        });
    } else if group.is_empty() {
        eprintln!("no Android source roots found under {}", project.display());
    } else if packages.is_empty() {
        eprintln!(
            "{} is not inside an Android source root",
            target.to_string_lossy()
        );
    } else {
        for pkg in packages {
            println!("{pkg}");
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct LayoutNameOut {
    class_name: String,
    layout_name: String,
    binding_class: String,
}

pub fn layout_name(json: bool, args: LayoutNameArgs) -> Result<(), CliError> {
    if args.class_name.is_empty() {
        return Err(CliError::user("class name must not be empty"));
    }
    let layout_name = class_name_to_layout_name(&args.class_name);
    let binding_class = layout_name_to_binding_class_name(&layout_name);
    if json {
        json_print(&JsonOk {
            ok: true,
            data: LayoutNameOut {
                class_name: args.class_name,
                layout_name,
                binding_class,
            },
        });
    } else {
        println!("{layout_name}");
        println!("{binding_class}");
    }
    Ok(())
}

// ── Helpers ─────────────────────────────────────────────────────────────────

fn resolve_toggle(include_flag: bool, exclude_flag: bool, default_value: bool) -> bool {
    if exclude_flag {
        false
    } else if include_flag {
        true
    } else {
        default_value
    }
}

fn absolutize(cwd: &Path, p: &Path) -> PathBuf {
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        cwd.join(p)
    }
}

// Canonical so that module prefixes of the target and of scanned directories compare equal.
fn resolve_dir(cwd: &Path, dir: &Path, label: &str) -> Result<PathBuf, CliError> {
    let dir = absolutize(cwd, dir);
    if !dir.is_dir() {
        return Err(CliError::user(format!(
            "{label} directory does not exist: {}",
            dir.display()
        )));
    }
    dir.canonicalize()
        .map_err(|e| CliError::operational(format!("failed to resolve {}: {e}", dir.display())))
}
