use crate::error::{Result, ResultExt};
use crate::ui;
use dialoguer::{theme::ColorfulTheme, Confirm};
use std::path::Path;
use threat_intel::config::ensure_config_file_exists;

pub fn execute(path: &Path, force: bool) -> Result<()> {
    let overwrite = if path.exists() && !force {
        ui::warning_message(&format!("{} already exists", path.display()));
        Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt("Overwrite it with the default configuration?")
            .default(false)
            .interact()?
    } else {
        force
    };

    if !ensure_config_file_exists(path, overwrite)
        .with_context(|| format!("Failed to write {}", path.display()))?
    {
        ui::info_message("Keeping the existing configuration");
        return Ok(());
    }

    ui::success_message(&format!("Created {}", path.display()));
    ui::info_message("Set FALCONFEEDS_API_KEY before calling any tool");
    Ok(())
}
