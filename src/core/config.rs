use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success, warning};
use std::path::Path;
use std::process::Command;

pub struct ConfigLogic;

impl ConfigLogic {
    pub fn print(cfg: &Config) -> AppResult<()> {
        println!("📄 Current configuration:\n");
        println!("{}", serde_yaml::to_string(cfg)?);
        Ok(())
    }

    /// Report keys missing from the config file. Returns them.
    pub fn check(path: &Path) -> AppResult<Vec<&'static str>> {
        if !path.exists() {
            warning(format!(
                "No configuration file at {} (run `rdose init`).",
                path.display()
            ));
            return Ok(Vec::new());
        }

        let missing = Config::missing_keys(path)?;
        if missing.is_empty() {
            success("Configuration file is complete.");
        } else {
            warning(format!("Missing configuration keys: {}", missing.join(", ")));
        }
        Ok(missing)
    }

    /// Rewrite the config file with defaults for any missing key.
    pub fn migrate(path: &Path) -> AppResult<bool> {
        if !path.exists() {
            warning(format!("No configuration file at {}.", path.display()));
            return Ok(false);
        }

        let missing = Config::missing_keys(path)?;
        if missing.is_empty() {
            info("Configuration already up to date.");
            return Ok(false);
        }

        let cfg = Config::load_from(path)?;
        cfg.save_to(path)?;
        success(format!("Added configuration keys: {}", missing.join(", ")));
        Ok(true)
    }

    /// Open the config file with `editor`, `$EDITOR`, `$VISUAL` or the
    /// platform default, in that order.
    pub fn edit(path: &Path, editor: &Option<String>) -> AppResult<()> {
        let default_editor = std::env::var("EDITOR")
            .or_else(|_| std::env::var("VISUAL"))
            .unwrap_or_else(|_| {
                if cfg!(target_os = "windows") {
                    "notepad".to_string()
                } else {
                    "nano".to_string()
                }
            });

        let editor_to_use = editor.clone().unwrap_or_else(|| default_editor.clone());

        match Command::new(&editor_to_use).arg(path).status() {
            Ok(s) if s.success() => {
                success(format!(
                    "Configuration file edited successfully using '{}'",
                    editor_to_use
                ));
                Ok(())
            }
            _ if editor_to_use != default_editor => {
                warning(format!(
                    "Editor '{}' not available, falling back to '{}'",
                    editor_to_use, default_editor
                ));

                let status = Command::new(&default_editor)
                    .arg(path)
                    .status()
                    .map_err(|e| AppError::Config(e.to_string()))?;

                if status.success() {
                    success(format!(
                        "Configuration file edited successfully using fallback '{}'",
                        default_editor
                    ));
                    Ok(())
                } else {
                    Err(AppError::Config(format!(
                        "Failed to edit configuration file using fallback '{}'",
                        default_editor
                    )))
                }
            }
            _ => Err(AppError::Config(format!(
                "Failed to edit configuration file using '{}'",
                editor_to_use
            ))),
        }
    }
}
