use crate::templates::{GeneratedFile, TemplateProvider};
use std::path::{Path, PathBuf};

/// Write every [`GeneratedFile::PROJECT_FILES`] entry into `project_dir`,
/// replacing whatever `swift package init` left there.
///
/// Returns the written paths in order.
pub fn write_project_files(
    project_dir: &Path,
    project_name: &str,
    templates: &impl TemplateProvider,
) -> Result<Vec<PathBuf>, ScaffoldError> {
    GeneratedFile::PROJECT_FILES
        .into_iter()
        .map(|file| write_generated(project_dir, project_name, file, templates))
        .collect()
}

/// Render `file` and replace it on disk, applying the executable bit when the
/// file needs one.
pub fn write_generated(
    project_dir: &Path,
    project_name: &str,
    file: GeneratedFile,
    templates: &impl TemplateProvider,
) -> Result<PathBuf, ScaffoldError> {
    let path = project_dir.join(file.relative_path(project_name));
    replace_file(&path, &templates.render(file, project_name))?;
    if file.is_executable() {
        make_executable(&path)?;
    }
    Ok(path)
}

/// Delete-then-write. A missing target or parent directory is not an error.
pub fn replace_file(path: &Path, contents: &str) -> Result<(), ScaffoldError> {
    remove_if_exists(path)?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ScaffoldError::CreateDir {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    std::fs::write(path, contents).map_err(|e| ScaffoldError::Write {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Write `contents` only when nothing exists at `path` yet.
///
/// Returns whether the file was written.
pub fn write_if_absent(path: &Path, contents: &str) -> Result<bool, ScaffoldError> {
    if path.exists() {
        tracing::debug!(path = %path.display(), "already present, leaving untouched");
        return Ok(false);
    }
    replace_file(path, contents)?;
    Ok(true)
}

/// Remove a file, treating "already absent" as success.
///
/// Returns whether a file was actually removed.
pub fn remove_if_exists(path: &Path) -> Result<bool, ScaffoldError> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "nothing to remove");
            Ok(false)
        }
        Err(e) => Err(ScaffoldError::Remove {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

#[cfg(unix)]
pub fn make_executable(path: &Path) -> Result<(), ScaffoldError> {
    use std::os::unix::fs::PermissionsExt;

    let set_err = |e| ScaffoldError::SetPermissions {
        path: path.to_path_buf(),
        source: e,
    };

    let mut perms = std::fs::metadata(path).map_err(set_err)?.permissions();
    perms.set_mode(perms.mode() | 0o755);
    std::fs::set_permissions(path, perms).map_err(set_err)
}

#[cfg(not(unix))]
pub fn make_executable(_path: &Path) -> Result<(), ScaffoldError> {
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum ScaffoldError {
    #[error("failed to create directory {path}")]
    CreateDir {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
    #[error("failed to remove {path}")]
    Remove {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write {path}")]
    Write {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
    #[error("failed to make {path} executable")]
    SetPermissions {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
}
