use crate::names::{layout_name_to_binding_class_name, ComponentKind};

/// Package of the MVVM base classes the generated code extends.
pub const DEFAULT_BASE_PACKAGE: &str = "com.kk.android.comvvmhelper";

/// Inputs shared by every class template.
#[derive(Debug, Clone, Copy)]
pub struct ClassContext<'a> {
    pub package: &'a str,
    pub class_name: &'a str,
    pub layout_name: &'a str,
    /// Application package, for the `R` and data-binding imports. When unknown those
    /// imports are left out.
    pub app_package: Option<&'a str>,
    pub base_package: &'a str,
    pub hilt: bool,
}

impl ClassContext<'_> {
    fn binding(&self) -> String {
        layout_name_to_binding_class_name(self.layout_name)
    }

    fn push_app_imports(&self, imports: &mut Vec<String>) {
        if let Some(app) = self.app_package.filter(|p| !p.trim().is_empty()) {
            imports.push(format!("import {app}.R"));
            imports.push(format!("import {app}.databinding.{}", self.binding()));
        }
    }

    fn inject_constructor(&self) -> &'static str {
        if self.hilt {
            " @Inject constructor()"
        } else {
            ""
        }
    }
}

// ── Class templates ─────────────────────────────────────────────────────────

pub fn tpl_activity(ctx: &ClassContext<'_>, view_model: Option<&str>) -> String {
    let base = ctx.base_package;
    let binding = ctx.binding();

    let mut imports = vec!["import android.os.Bundle".to_string()];
    if view_model.is_some() {
        imports.push("import androidx.activity.viewModels".to_string());
    }
    imports.push(format!("import {base}.anno.ActivityConfig"));
    imports.push(format!("import {base}.ui.BaseActivity"));
    ctx.push_app_imports(&mut imports);
    if ctx.hilt {
        imports.push("import dagger.hilt.android.AndroidEntryPoint".to_string());
    }

    let mut annotations = String::new();
    if ctx.hilt {
        annotations.push_str("@AndroidEntryPoint\n");
    }
    annotations.push_str("@ActivityConfig\n");

    let view_model_field = view_model
        .map(|vm| format!("    private val viewModel by viewModels<{vm}>()\n\n"))
        .unwrap_or_default();

    format!(
        r#"package {package}

{imports}

{annotations}class {class_name} : BaseActivity<{binding}>() {{

{view_model_field}    override fun layoutId() = R.layout.{layout}

    override fun initActivity(savedInstanceState: Bundle?) {{

    }}
}}
"#,
        package = ctx.package,
        imports = imports.join("\n"),
        class_name = ctx.class_name,
        layout = ctx.layout_name,
    )
}

pub fn tpl_fragment(ctx: &ClassContext<'_>) -> String {
    let base = ctx.base_package;
    let binding = ctx.binding();

    let mut imports = vec![
        "import android.os.Bundle".to_string(),
        "import android.view.View".to_string(),
        format!("import {base}.ui.BaseFragment"),
    ];
    ctx.push_app_imports(&mut imports);
    push_hilt_entry_point_imports(ctx.hilt, &mut imports);

    format!(
        r#"package {package}

{imports}

{entry_point}class {class_name}{inject} : BaseFragment<{binding}>() {{

    override fun layoutId() = R.layout.{layout}

    override fun initFragment(view: View, savedInstanceState: Bundle?) {{

    }}
}}
"#,
        package = ctx.package,
        imports = imports.join("\n"),
        entry_point = entry_point_annotation(ctx.hilt),
        class_name = ctx.class_name,
        inject = ctx.inject_constructor(),
        layout = ctx.layout_name,
    )
}

pub fn tpl_dialog(ctx: &ClassContext<'_>) -> String {
    let base = ctx.base_package;
    let binding = ctx.binding();

    let mut imports = vec![
        "import android.os.Bundle".to_string(),
        "import android.view.View".to_string(),
        format!("import {base}.anno.DialogConfig"),
        format!("import {base}.ui.BaseDialogFragment"),
    ];
    ctx.push_app_imports(&mut imports);
    push_hilt_entry_point_imports(ctx.hilt, &mut imports);

    format!(
        r##"package {package}

{imports}

{entry_point}@DialogConfig(widthFraction = 0.8f, heightFraction = 0.5f, backgroundColor = "#00000000")
class {class_name}{inject} : BaseDialogFragment<{binding}>() {{

    override fun layoutId() = R.layout.{layout}

    override fun initDialog(view: View, savedInstanceState: Bundle?) {{

    }}

    override fun dialogFragmentAnim() = R.style.Animation_Design_BottomSheetDialog
}}
"##,
        package = ctx.package,
        imports = imports.join("\n"),
        entry_point = entry_point_annotation(ctx.hilt),
        class_name = ctx.class_name,
        inject = ctx.inject_constructor(),
        layout = ctx.layout_name,
    )
}

/// RecyclerView adapter over `item_type` (defaults to `Any`).
pub fn tpl_adapter(ctx: &ClassContext<'_>, item_type: Option<&str>) -> String {
    let base = ctx.base_package;
    let binding = ctx.binding();
    let item = item_type.filter(|t| !t.trim().is_empty()).unwrap_or("Any");

    let mut imports = vec![
        format!("import {base}.ui.BaseRecyclerViewAdapter"),
        format!("import {base}.ui.BaseRecyclerViewHolder"),
    ];
    ctx.push_app_imports(&mut imports);
    if ctx.hilt {
        imports.push("import javax.inject.Inject".to_string());
    }

    format!(
        r#"package {package}

{imports}

class {class_name}{inject} : BaseRecyclerViewAdapter<{item}>() {{

    override fun layoutId(viewType: Int) = R.layout.{layout}

    override fun setVariable(data: {item}, holder: BaseRecyclerViewHolder, dataPosition: Int, layoutPosition: Int) {{
        holder.viewDataBinding<{binding}>()?.run {{

        }}
    }}
}}
"#,
        package = ctx.package,
        imports = imports.join("\n"),
        class_name = ctx.class_name,
        inject = ctx.inject_constructor(),
        layout = ctx.layout_name,
    )
}

pub fn tpl_view_model(package: &str, view_model: &str, hilt: bool) -> String {
    let mut imports = vec!["import androidx.lifecycle.ViewModel".to_string()];
    if hilt {
        imports.push("import dagger.hilt.android.lifecycle.HiltViewModel".to_string());
        imports.push("import javax.inject.Inject".to_string());
    }
    let (annotation, inject) = if hilt {
        ("@HiltViewModel\n", " @Inject constructor()")
    } else {
        ("", "")
    };

    format!(
        r#"package {package}

{imports}

{annotation}class {view_model}{inject} : ViewModel() {{

}}
"#,
        imports = imports.join("\n"),
    )
}

fn push_hilt_entry_point_imports(hilt: bool, imports: &mut Vec<String>) {
    if hilt {
        imports.push("import dagger.hilt.android.AndroidEntryPoint".to_string());
        imports.push("import javax.inject.Inject".to_string());
    }
}

fn entry_point_annotation(hilt: bool) -> &'static str {
    if hilt {
        "@AndroidEntryPoint\n"
    } else {
        ""
    }
}

// ── Resource templates ──────────────────────────────────────────────────────

/// Data-binding layout with an empty `<data>` block and a vertical `LinearLayout`.
/// Adapter item layouts wrap their content vertically; everything else fills the parent.
pub fn tpl_layout(kind: ComponentKind) -> String {
    let height = match kind {
        ComponentKind::Adapter => "wrap_content",
        _ => "match_parent",
    };
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<layout xmlns:android="http://schemas.android.com/apk/res/android">

    <data>

    </data>

    <LinearLayout
        android:layout_width="match_parent"
        android:layout_height="{height}"
        android:orientation="vertical">

    </LinearLayout>
</layout>
"#
    )
}

/// The `<activity>` element inserted in front of `</application>`.
pub fn tpl_manifest_activity(qualified_class: &str) -> String {
    format!(
        "\n        <activity\n            android:name=\"{qualified_class}\"\n            android:exported=\"false\" />\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx<'a>(app_package: Option<&'a str>, hilt: bool) -> ClassContext<'a> {
        ClassContext {
            package: "com.example.ui",
            class_name: "MainActivity",
            layout_name: "activity_main",
            app_package,
            base_package: DEFAULT_BASE_PACKAGE,
            hilt,
        }
    }

    #[test]
    fn activity_with_view_model_and_app_package() {
        let out = tpl_activity(&ctx(Some("com.example"), false), Some("MainViewModel"));
        assert!(out.starts_with("package com.example.ui\n\nimport android.os.Bundle\n"));
        let expected_imports = "import android.os.Bundle
import androidx.activity.viewModels
import com.kk.android.comvvmhelper.anno.ActivityConfig
import com.kk.android.comvvmhelper.ui.BaseActivity
import com.example.R
import com.example.databinding.ActivityMainBinding
";
        assert!(out.contains(expected_imports), "{out}");
        assert!(out.contains("@ActivityConfig\nclass MainActivity : BaseActivity<ActivityMainBinding>() {"));
        assert!(out.contains("    private val viewModel by viewModels<MainViewModel>()\n\n"));
        assert!(out.contains("    override fun layoutId() = R.layout.activity_main\n"));
        assert!(!out.contains("AndroidEntryPoint"));
    }

    #[test]
    fn activity_without_view_model_or_app_package() {
        let out = tpl_activity(&ctx(None, true), None);
        assert!(!out.contains("viewModels"));
        assert!(!out.contains(".databinding."));
        assert!(out.contains("import dagger.hilt.android.AndroidEntryPoint\n"));
        assert!(out.contains("@AndroidEntryPoint\n@ActivityConfig\nclass MainActivity"));
    }

    #[test]
    fn fragment_with_hilt_gets_inject_constructor() {
        let mut c = ctx(Some("com.example"), true);
        c.class_name = "HomeFragment";
        c.layout_name = "fragment_home";
        let out = tpl_fragment(&c);
        assert!(out.contains(
            "@AndroidEntryPoint\nclass HomeFragment @Inject constructor() : BaseFragment<FragmentHomeBinding>() {"
        ));
        assert!(out.contains("import com.example.databinding.FragmentHomeBinding\n"));
        assert!(out.contains("override fun initFragment(view: View, savedInstanceState: Bundle?)"));
    }

    #[test]
    fn dialog_carries_dialog_config() {
        let mut c = ctx(None, false);
        c.class_name = "ConfirmDialog";
        c.layout_name = "dialog_confirm";
        let out = tpl_dialog(&c);
        assert!(out.contains(
            "@DialogConfig(widthFraction = 0.8f, heightFraction = 0.5f, backgroundColor = \"#00000000\")\nclass ConfirmDialog : BaseDialogFragment<DialogConfirmBinding>() {"
        ));
        assert!(out.contains("R.style.Animation_Design_BottomSheetDialog"));
    }

    #[test]
    fn adapter_defaults_item_type_to_any() {
        let mut c = ctx(Some("com.example"), false);
        c.class_name = "UserAdapter";
        c.layout_name = "recycler_user_item";
        let out = tpl_adapter(&c, None);
        assert!(out.contains("class UserAdapter : BaseRecyclerViewAdapter<Any>() {"));
        assert!(out.contains("override fun setVariable(data: Any, holder"));
        assert!(out.contains("holder.viewDataBinding<RecyclerUserItemBinding>()?.run {"));

        let out = tpl_adapter(&c, Some("User"));
        assert!(out.contains("BaseRecyclerViewAdapter<User>()"));
        assert!(out.contains("data: User,"));
    }

    #[test]
    fn view_model_hilt_and_plain() {
        let plain = tpl_view_model("com.example", "MainViewModel", false);
        assert_eq!(
            plain,
            "package com.example\n\nimport androidx.lifecycle.ViewModel\n\nclass MainViewModel : ViewModel() {\n\n}\n"
        );
        let hilt = tpl_view_model("com.example", "MainViewModel", true);
        assert!(hilt.contains("@HiltViewModel\nclass MainViewModel @Inject constructor() : ViewModel() {"));
    }

    #[test]
    fn layout_height_depends_on_kind() {
        let page = tpl_layout(ComponentKind::Activity);
        assert!(page.contains("<layout xmlns:android=\"http://schemas.android.com/apk/res/android\">"));
        assert!(page.contains("    <data>\n\n    </data>\n"));
        assert!(page.contains("android:layout_height=\"match_parent\""));
        let item = tpl_layout(ComponentKind::Adapter);
        assert!(item.contains("android:layout_height=\"wrap_content\""));
    }
}
