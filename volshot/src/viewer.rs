use crate::{config::Viewer, scene::VolumeScene};
use anyhow::{Context, Result};
use log::info;

/// Hands `scene` to the configured viewer and blocks until it exits.
///
/// Returns `false` when no viewer command is configured.
pub fn show(viewer: &Viewer, scene: &VolumeScene) -> Result<bool> {
    let program = viewer.command.trim();
    if program.is_empty() {
        info!(
            "no viewer configured, open {} manually",
            scene.header_file.display()
        );
        return Ok(false);
    }

    let mut args = viewer.args.clone();
    args.push(scene.header_file.display().to_string());

    info!("showing \"{}\" with {program}", scene.title);
    duct::cmd(program, &args)
        .run()
        .with_context(|| format!("viewer `{program}` failed"))?;

    Ok(true)
}
