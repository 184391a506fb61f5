//! Generator scenarios that run against every `ProjectFs` backend.

use std::path::{Path, PathBuf};

use covgen::templates::DEFAULT_BASE_PACKAGE;
use covgen::{generate, ComponentKind, GenerateError, GenerateRequest, PackageGroup, ProjectFs};

const MANIFEST: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<manifest xmlns:android="http://schemas.android.com/apk/res/android"
    package="com.example.app">

    <application android:label="Demo">
    </application>

</manifest>
"#;

/// Two modules sharing the `com.example.ui` package name, plus one module without a
/// `res/layout` directory.
pub fn seed_project(fs: &dyn ProjectFs, root: &Path) {
    for dir in [
        "app/src/main/java/com/example/app/ui",
        "app/src/main/res/layout",
        "lib/src/main/kotlin/com/example/ui",
        "lib/src/main/res/layout",
        "core/src/main/java/com/core",
    ] {
        fs.create_dir_all(&root.join(dir)).unwrap();
    }
    fs.write_text(&root.join("app/src/main/AndroidManifest.xml"), MANIFEST)
        .unwrap();
    fs.write_text(
        &root.join("lib/build.gradle.kts"),
        "android {\n    namespace = \"com.example.lib\"\n}\n",
    )
    .unwrap();
}

fn request(kind: ComponentKind, target: PathBuf, class_name: &str, layout: &str) -> GenerateRequest {
    GenerateRequest {
        kind,
        target_dir: target,
        class_name: class_name.to_string(),
        layout_name: layout.to_string(),
        package: String::new(),
        view_model: None,
        item_type: None,
        hilt: false,
        base_package: DEFAULT_BASE_PACKAGE.to_string(),
    }
}

pub fn test_candidates_are_module_scoped(fs: &dyn ProjectFs, root: &Path) {
    seed_project(fs, root);
    let group = PackageGroup::scan(fs, root);
    assert_eq!(group.keys().len(), 3);

    let app = group.candidates_for(&root.join("app/src/main/java/com/example/app/ui"));
    assert_eq!(
        app,
        vec!["com.example.app.ui", "com", "com.example", "com.example.app"]
    );

    let lib = group.candidates_for(&root.join("lib/src/main/kotlin/com/example"));
    assert_eq!(lib, vec!["com.example", "com", "com.example.ui"]);

    assert!(group.candidates_for(&root.join("app/src/main/res")).is_empty());
}

pub fn test_activity_end_to_end(fs: &dyn ProjectFs, root: &Path) {
    seed_project(fs, root);
    let target = root.join("app/src/main/java/com/example/app/ui");
    let package = PackageGroup::scan(fs, root)
        .candidates_for(&target)
        .into_iter()
        .next()
        .unwrap();

    let mut req = request(ComponentKind::Activity, target.clone(), "LoginActivity", "activity_login");
    req.package = package;
    req.view_model = Some("LoginViewModel".to_string());
    req.hilt = true;

    let report = generate(fs, &req).unwrap();
    assert_eq!(report.package, "com.example.app.ui");
    assert_eq!(report.files().len(), 3);
    assert!(report.manifest_updated);

    let class = fs.read_text(&target.join("LoginActivity.kt")).unwrap();
    assert!(class.starts_with("package com.example.app.ui\n"));
    assert!(class.contains("import com.example.app.R\n"));
    assert!(class.contains("import com.example.app.databinding.ActivityLoginBinding\n"));
    assert!(class.contains("@AndroidEntryPoint\n@ActivityConfig\n"));

    let vm = fs.read_text(&target.join("LoginViewModel.kt")).unwrap();
    assert!(vm.contains("@HiltViewModel\nclass LoginViewModel @Inject constructor() : ViewModel()"));

    let layout = fs
        .read_text(&root.join("app/src/main/res/layout/activity_login.xml"))
        .unwrap();
    assert!(layout.contains("<LinearLayout"));

    let manifest = fs
        .read_text(&root.join("app/src/main/AndroidManifest.xml"))
        .unwrap();
    let entry_at = manifest
        .find("android:name=\"com.example.app.ui.LoginActivity\"")
        .unwrap();
    assert!(entry_at < manifest.find("</application>").unwrap());
    assert_eq!(manifest, manifest.trim());

    // A second run must not clobber anything.
    let err = generate(fs, &req).unwrap_err();
    assert!(matches!(err, GenerateError::FileExists(_)));
}

pub fn test_kotlin_module_uses_gradle_namespace(fs: &dyn ProjectFs, root: &Path) {
    seed_project(fs, root);
    let target = root.join("lib/src/main/kotlin/com/example/ui");
    let mut req = request(ComponentKind::Adapter, target.clone(), "UserAdapter", "recycler_user_item");
    req.package = "com.example.ui".to_string();
    req.item_type = Some("User".to_string());

    let report = generate(fs, &req).unwrap();
    assert_eq!(report.app_package.as_deref(), Some("com.example.lib"));
    assert!(!report.manifest_updated);

    let class = fs.read_text(&report.class_file).unwrap();
    assert!(class.contains("import com.example.lib.databinding.RecyclerUserItemBinding\n"));
    assert!(class.contains("BaseRecyclerViewAdapter<User>()"));
}

pub fn test_missing_layout_dir_cleans_up(fs: &dyn ProjectFs, root: &Path) {
    seed_project(fs, root);
    let target = root.join("core/src/main/java/com/core");
    let mut req = request(ComponentKind::Dialog, target.clone(), "PickerDialog", "dialog_picker");
    req.package = "com.core".to_string();

    let err = generate(fs, &req).unwrap_err();
    assert!(matches!(err, GenerateError::LayoutDirNotFound(_)));
    assert!(!fs.exists(&target.join("PickerDialog.kt")));
    assert!(fs.list_children(&target).is_empty());
}
