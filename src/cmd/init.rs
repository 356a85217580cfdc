use crate::data::{Persistable, PickerConfig};
use anyhow::{Result, bail};
use std::path::Path;

pub fn run(path: &Path, force: bool) -> Result<()> {
    write_default_config(path, force)?;
    println!("Wrote default configuration to {}", path.display());
    Ok(())
}

pub(crate) fn write_default_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "{} already exists, pass --force to overwrite it",
            path.display()
        );
    }
    log::info!("writing default configuration to {}", path.display());
    PickerConfig::default().save_to(path)
}
