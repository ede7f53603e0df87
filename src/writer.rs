use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::DaisyError;
use crate::render::Project;

/// Write `<out_dir>/<name>/Cargo.toml` and `<out_dir>/<name>/src/lib.rs`.
///
/// Files are staged in a hidden sibling directory and renamed into place,
/// so a failed run never leaves a half-written project. An existing project
/// is replaced only with `force`.
pub fn write_project(project: &Project, out_dir: &Path, force: bool) -> Result<PathBuf, DaisyError> {
    let target = out_dir.join(&project.name);
    if target.exists() && !force {
        return Err(DaisyError::ProjectExists(target));
    }

    fs::create_dir_all(out_dir)?;
    let staging = out_dir.join(format!(".{}.tmp", project.name));
    if staging.exists() {
        fs::remove_dir_all(&staging)?;
    }

    if let Err(e) = stage(project, &staging) {
        let _ = fs::remove_dir_all(&staging);
        return Err(e);
    }

    if target.exists() {
        debug!("Replacing {}", target.display());
        fs::remove_dir_all(&target)?;
    }
    fs::rename(&staging, &target)?;
    info!("Wrote {}", target.display());
    Ok(target)
}

fn stage(project: &Project, staging: &Path) -> Result<(), DaisyError> {
    let src = staging.join("src");
    fs::create_dir_all(&src)?;
    fs::write(staging.join("Cargo.toml"), &project.manifest)?;
    fs::write(src.join("lib.rs"), &project.lib)?;
    Ok(())
}
