use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use vn_core::VnError;
use walkdir::WalkDir;

use crate::{map_cli_source_path, map_cli_source_read, map_cli_source_scan, LoadedScript};

const SCRIPT_EXTENSION: &str = ".json";
const FILE_REF_PREFIX: &str = "script-file:";
const DIR_REF_PREFIX: &str = "script-dir:";

/// Loads a single script file or every `.json` file under a directory.
pub(crate) fn load_source_by_path(script_path: &str) -> Result<LoadedScript, VnError> {
    let root = resolve_script_path(script_path)?;
    let (id, scripts_json) = if root.is_dir() {
        (
            format!("{}{}", DIR_REF_PREFIX, root.display()),
            read_scripts_json_from_dir(&root)?,
        )
    } else {
        let name = root
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| "script.json".to_string());
        let content = fs::read_to_string(&root).map_err(map_cli_source_read)?;
        (
            format!("{}{}", FILE_REF_PREFIX, root.display()),
            BTreeMap::from([(name, content)]),
        )
    };

    let title = root
        .file_stem()
        .and_then(|name| name.to_str())
        .unwrap_or("untitled")
        .to_string();
    tracing::debug!(id = %id, files = scripts_json.len(), "loaded script source");

    Ok(LoadedScript {
        id,
        title,
        scripts_json,
    })
}

/// Reloads the source a saved state was created from.
pub(crate) fn load_source_by_ref(script_ref: &str) -> Result<LoadedScript, VnError> {
    let raw = script_ref
        .strip_prefix(FILE_REF_PREFIX)
        .or_else(|| script_ref.strip_prefix(DIR_REF_PREFIX))
        .ok_or_else(|| {
            VnError::new(
                "CLI_SOURCE_REF_INVALID",
                format!("Unsupported script ref: {}", script_ref),
            )
        })?;
    load_source_by_path(raw)
}

pub(crate) fn resolve_script_path(script_path: &str) -> Result<PathBuf, VnError> {
    let path = PathBuf::from(script_path);
    let absolute = if path.is_absolute() {
        path
    } else {
        std::env::current_dir()
            .map_err(map_cli_source_path)?
            .join(path)
    };

    if !absolute.exists() {
        return Err(VnError::new(
            "CLI_SOURCE_NOT_FOUND",
            format!("script path does not exist: {}", absolute.display()),
        ));
    }

    Ok(absolute)
}

pub(crate) fn read_scripts_json_from_dir(
    scripts_dir: &Path,
) -> Result<BTreeMap<String, String>, VnError> {
    let mut scripts = BTreeMap::new();

    for entry in WalkDir::new(scripts_dir)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
    {
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        if !path.to_string_lossy().ends_with(SCRIPT_EXTENSION) {
            continue;
        }

        let relative = path
            .strip_prefix(scripts_dir)
            .map_err(map_cli_source_scan)?
            .to_string_lossy()
            .replace('\\', "/");

        let content = fs::read_to_string(path).map_err(map_cli_source_read)?;
        scripts.insert(relative, content);
    }

    if scripts.is_empty() {
        return Err(VnError::new(
            "CLI_SOURCE_EMPTY",
            format!("No .json script files under {}", scripts_dir.display()),
        ));
    }

    Ok(scripts)
}
