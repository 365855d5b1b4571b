use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;

use crate::symbols::cxxfilt::DEFAULT_PROGRAM;

/// Which demangling capability to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
    /// Run `c++filt` for every symbol.
    #[default]
    CxxFilt,
    /// Demangle in-process.
    Itanium,
    /// `c++filt` when it can be started, in-process otherwise.
    Auto,
}

impl FromStr for Backend {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s {
            "cxxfilt" | "c++filt" => Ok(Backend::CxxFilt),
            "itanium" => Ok(Backend::Itanium),
            "auto" => Ok(Backend::Auto),
            other => Err(crate::Error::UnknownBackend(other.to_string())),
        }
    }
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Backend::CxxFilt => write!(f, "cxxfilt"),
            Backend::Itanium => write!(f, "itanium"),
            Backend::Auto => write!(f, "auto"),
        }
    }
}

/// All configurable settings with their defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub backend: Backend,
    pub cxxfilt_program: String,
    pub cxxfilt_args: Vec<String>,
    pub cxxfilt_no_params: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            cxxfilt_program: DEFAULT_PROGRAM.to_string(),
            cxxfilt_args: Vec::new(),
            cxxfilt_no_params: false,
        }
    }
}

/// Raw JSON representation — all fields optional for partial overrides.
#[derive(Debug, Deserialize, Default)]
struct SettingsFile {
    #[serde(rename = "demangler.backend")]
    backend: Option<String>,
    #[serde(rename = "cxxfilt.program")]
    cxxfilt_program: Option<String>,
    #[serde(rename = "cxxfilt.args")]
    cxxfilt_args: Option<Vec<String>>,
    #[serde(rename = "cxxfilt.noParams")]
    cxxfilt_no_params: Option<bool>,
}

/// Resolve settings: defaults → user global → project-local.
pub fn resolve(project_root: Option<&Path>) -> Settings {
    let global_path = dirs::home_dir()
        .map(|h| h.join(".barename/settings.json"));
    let project_path = project_root
        .map(|r| r.join(".barename/settings.json"));
    resolve_with_paths(
        global_path.as_deref(),
        project_path.as_deref(),
    )
}

/// Testable resolver that accepts explicit file paths (no home dir dependency).
fn resolve_with_paths(
    global_path: Option<&Path>,
    project_path: Option<&Path>,
) -> Settings {
    let mut settings = Settings::default();

    if let Some(path) = global_path {
        apply_file(&mut settings, path);
    }
    if let Some(path) = project_path {
        apply_file(&mut settings, path);
    }

    settings
}

fn apply_file(settings: &mut Settings, path: &Path) {
    let Ok(content) = std::fs::read_to_string(path) else { return };
    let Ok(file) = serde_json::from_str::<SettingsFile>(&content) else {
        tracing::warn!("Invalid settings file, ignoring: {}", path.display());
        return;
    };
    if let Some(v) = file.backend {
        match v.parse() {
            Ok(backend) => settings.backend = backend,
            Err(e) => tracing::warn!("demangler.backend: {}, keeping {}", e, settings.backend),
        }
    }
    if let Some(v) = file.cxxfilt_program {
        if v.trim().is_empty() {
            tracing::warn!("cxxfilt.program is empty, keeping '{}'", settings.cxxfilt_program);
        } else {
            settings.cxxfilt_program = v;
        }
    }
    if let Some(v) = file.cxxfilt_args {
        settings.cxxfilt_args = v;
    }
    if let Some(v) = file.cxxfilt_no_params {
        settings.cxxfilt_no_params = v;
    }
}
