//! Class, layout and binding name conversions.

use serde::Serialize;

/// The kinds of component the generator knows how to scaffold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    Activity,
    Fragment,
    Dialog,
    Adapter,
}

impl ComponentKind {
    /// Prefix of the suggested layout file name.
    pub fn layout_prefix(self) -> &'static str {
        match self {
            ComponentKind::Activity => "activity",
            ComponentKind::Fragment => "fragment",
            ComponentKind::Dialog => "dialog",
            ComponentKind::Adapter => "recycler",
        }
    }

    // Removed from the snake-cased class name, in this order, before the prefix is added.
    fn redundant_tokens(self) -> &'static [&'static str] {
        match self {
            ComponentKind::Activity => &["_activity"],
            ComponentKind::Fragment => &["_fragment"],
            ComponentKind::Dialog => &["_dialog"],
            ComponentKind::Adapter => &["_recycler", "_adapter"],
        }
    }
}

/// `MainActivity` → `main_activity`.
///
/// Every ASCII upper-case letter after the first character gets a `_` in front of it and
/// the whole result is lower-cased. Runs of capitals are split letter by letter
/// (`ABActivity` → `a_b_activity`).
pub fn class_name_to_layout_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if i > 0 && c.is_ascii_uppercase() {
            out.push('_');
        }
        out.extend(c.to_lowercase());
    }
    out
}

/// `activity_main` → `ActivityMainBinding`, the class the data-binding compiler generates
/// for a layout. Empty segments from stray underscores are ignored.
pub fn layout_name_to_binding_class_name(layout_name: &str) -> String {
    let mut out: String = layout_name
        .split('_')
        .filter(|seg| !seg.is_empty())
        .map(upper_first)
        .collect();
    out.push_str("Binding");
    out
}

fn upper_first(seg: &str) -> String {
    let mut chars = seg.chars();
    match chars.next() {
        Some(first) => {
            let mut part = first.to_uppercase().to_string();
            part.extend(chars);
            part
        }
        None => String::new(),
    }
}

/// Accepts class, layout and ViewModel names made of `[A-Za-z0-9_-]`.
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// The layout name offered for a new component, e.g. `activity_main` for `MainActivity`
/// and `recycler_user_list_item` for `UserListAdapter`.
pub fn suggest_layout_name(kind: ComponentKind, class_name: &str) -> String {
    let mut snake = class_name_to_layout_name(class_name);
    for token in kind.redundant_tokens() {
        snake = snake.replace(token, "");
    }
    snake.retain(|c| !c.is_whitespace());
    let snake = collapse_underscores(&snake);

    let prefix = kind.layout_prefix();
    let mut out = if snake.starts_with('_') {
        format!("{prefix}{snake}")
    } else {
        format!("{prefix}_{snake}")
    };
    if kind == ComponentKind::Adapter {
        out.push_str("_item");
    }
    out
}

/// `MainActivity` → `MainViewModel`.
pub fn suggest_view_model_name(class_name: &str) -> String {
    format!("{class_name}ViewModel").replace("Activity", "")
}

fn collapse_underscores(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if c == '_' && out.ends_with('_') {
            continue;
        }
        out.push(c);
    }
    out
}
