use crate::cli::parser::Commands;
use crate::config::Config;
use crate::config::validate::issues;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{error, success, warning};
use std::fs;
use std::path::Path;
use std::process::Command;

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, path: &Path) -> AppResult<()> {
    let Commands::Config {
        print_config,
        check,
        edit_config,
        editor,
    } = cmd
    else {
        return Ok(());
    };

    if !path.exists() {
        return Err(AppError::config(
            path.display().to_string(),
            "configuration file not found (run `court-calendar init`)",
        ));
    }

    // ---- PRINT CONFIG ----
    if *print_config {
        println!("📄 {}\n", path.display());
        println!("{}", fs::read_to_string(path)?);
    }

    // ---- CHECK CONFIG ----
    if *check {
        let cfg = Config::parse_yaml(&fs::read_to_string(path)?)?;
        let found = issues(&cfg);
        if let Some(first) = found.first() {
            for i in &found {
                error(format!("{}: {}", i.key, i.reason));
            }
            return Err(AppError::config(first.key.clone(), first.reason.clone()));
        }
        success("Configuration is valid");
    }

    // ---- EDIT CONFIG ----
    if *edit_config {
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
                success(format!("Configuration file edited using '{editor_to_use}'"));
            }
            _ => {
                warning(format!(
                    "Editor '{editor_to_use}' not available, falling back to '{default_editor}'"
                ));
                match Command::new(&default_editor).arg(path).status() {
                    Ok(s) if s.success() => {
                        success(format!("Configuration file edited using '{default_editor}'"));
                    }
                    _ => {
                        return Err(AppError::Other(format!(
                            "failed to edit configuration with '{default_editor}'"
                        )));
                    }
                }
            }
        }
    }

    Ok(())
}
