use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};
use serde::Serialize;

use covgen::GenerateError;

#[derive(Parser, Debug)]
#[command(
    name = "covgen",
    version,
    about = "Generate Android Activity/Fragment/Dialog/Adapter boilerplate with data-binding layouts"
)]
pub struct Cli {
    /// Machine-readable output. When set, stdout is JSON only; logs go to stderr.
    #[arg(long, global = true)]
    pub json: bool,

    /// More logs to stderr.
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub cmd: Cmd,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Activity class, layout, optional ViewModel and manifest entry.
    Activity(ActivityArgs),

    /// Fragment class and layout.
    Fragment(ComponentArgs),

    /// DialogFragment class and layout.
    Dialog(ComponentArgs),

    /// RecyclerView adapter class and item layout.
    Adapter(AdapterArgs),

    /// List the packages a class created in a directory may use.
    Packages(PackagesArgs),

    /// Print the suggested layout name and binding class for a class name.
    LayoutName(LayoutNameArgs),
}

#[derive(clap::Args, Debug)]
pub struct ComponentArgs {
    /// Directory the class is created in (inside src/main/java or src/main/kotlin).
    pub target: PathBuf,

    /// Class name, e.g. MainActivity.
    #[arg(long)]
    pub name: String,

    /// Layout resource name. Derived from the class name when omitted.
    #[arg(long)]
    pub layout: Option<String>,

    /// Package for the generated sources. Defaults to the target directory's package.
    #[arg(long)]
    pub package: Option<String>,

    /// Project root to scan for source roots. Found from the target when omitted.
    #[arg(long)]
    pub project: Option<PathBuf>,

    /// Add Hilt annotations.
    #[arg(long, conflicts_with = "no_hilt")]
    pub hilt: bool,

    /// Never add Hilt annotations, even if covgen.toml enables them.
    #[arg(long = "no-hilt", action = ArgAction::SetTrue)]
    pub no_hilt: bool,

    /// Package of the MVVM base classes.
    #[arg(long)]
    pub base_package: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct ActivityArgs {
    #[command(flatten)]
    pub common: ComponentArgs,

    /// ViewModel class name. Derived from the activity name when omitted.
    #[arg(long, conflicts_with = "no_view_model")]
    pub view_model: Option<String>,

    /// Do not create a ViewModel.
    #[arg(long = "no-view-model", action = ArgAction::SetTrue)]
    pub no_view_model: bool,
}

#[derive(clap::Args, Debug)]
pub struct AdapterArgs {
    #[command(flatten)]
    pub common: ComponentArgs,

    /// Item type bound by the adapter (defaults to Any).
    #[arg(long)]
    pub item: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct PackagesArgs {
    pub target: PathBuf,

    #[arg(long)]
    pub project: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct LayoutNameArgs {
    pub class_name: String,
}

#[derive(Serialize)]
pub struct JsonOk<T: Serialize> {
    pub ok: bool,
    #[serde(flatten)]
    pub data: T,
}

#[derive(Serialize)]
pub struct JsonErr {
    pub ok: bool,
    pub error: JsonErrInner,
}

#[derive(Serialize)]
pub struct JsonErrInner {
    pub message: String,
    pub exit_code: i32,
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub details: BTreeMap<String, serde_json::Value>,
}

#[derive(thiserror::Error, Debug)]
#[error("{message}")]
pub struct CliError {
    pub message: String,
    pub exit_code: i32,
    pub details: BTreeMap<String, serde_json::Value>,
}

impl CliError {
    pub fn user(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            exit_code: 2,
            details: BTreeMap::new(),
        }
    }

    pub fn operational(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            exit_code: 1,
            details: BTreeMap::new(),
        }
    }

    pub fn with_detail(mut self, k: &str, v: serde_json::Value) -> Self {
        self.details.insert(k.to_string(), v);
        self
    }
}

impl From<GenerateError> for CliError {
    fn from(e: GenerateError) -> Self {
        let err = if e.is_user_error() {
            CliError::user(e.to_string())
        } else {
            CliError::operational(e.to_string())
        };
        match &e {
            GenerateError::FileExists(p)
            | GenerateError::NotInSourceRoot(p)
            | GenerateError::LayoutDirNotFound(p)
            | GenerateError::NoPackage(p)
            | GenerateError::Io { path: p, .. } => {
                err.with_detail("path", serde_json::json!(p.to_string_lossy()))
            }
            GenerateError::InvalidName { .. } => err,
        }
    }
}

pub fn json_print<T: Serialize>(v: &T) {
    match serde_json::to_string(v) {
        Ok(s) => println!("{s}"),
        Err(e) => tracing::error!("failed to serialize output: {e}"),
    }
}

pub fn render_err(json: bool, e: CliError) -> ExitCode {
    if json {
        json_print(&JsonErr {
            ok: false,
            error: JsonErrInner {
                message: e.message,
                exit_code: e.exit_code,
                details: e.details,
            },
        });
    } else {
        eprintln!("error: {}", e.message);
    }
    ExitCode::from(e.exit_code as u8)
}
