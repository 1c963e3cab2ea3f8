//! Subcommand handlers.
//!
//! Each handler loads the document through [`AppContext`], works on the flat
//! model and, for editing commands, writes the rehydrated document.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::Colorize;
use gtacfg::{FlatModel, schema};
use tokio::fs;

use crate::{
    config::OptConfig,
    ctx::AppContext,
    utils::{parse_assignment, render_line},
};

/// Handler for the `gtaopt` subcommands.
pub struct CommandHandler;

impl CommandHandler {
    /// Print every listed setting grouped by section.
    pub async fn handle_show(ctx: &AppContext, file: &Path) -> Result<()> {
        let session = ctx.load_session(file).await?;
        let model = session.model();

        for (section, paths) in schema::group_settings(model) {
            println!("{}", section.bold().cyan());
            for path in paths {
                let Some(entry) = model.get(path) else {
                    continue;
                };
                println!("{}", render_line(path, &schema::control_for(path), entry));
            }
            println!();
        }
        Ok(())
    }

    /// Print the flat model as JSON.
    pub async fn handle_dump(ctx: &AppContext, file: &Path) -> Result<()> {
        let session = ctx.load_session(file).await?;
        println!("{}", serde_json::to_string_pretty(session.model())?);
        Ok(())
    }

    /// Apply `PATH=VALUE` edits and export the result.
    pub async fn handle_set(
        ctx: &AppContext,
        file: &Path,
        assignments: &[String],
        output: Option<PathBuf>,
        dry_run: bool,
    ) -> Result<()> {
        let mut session = ctx.load_session(file).await?;

        for arg in assignments {
            let (path, raw) = parse_assignment(arg)?;
            session
                .set_raw(&path, &raw)
                .with_context(|| format!("Cannot set `{path}`"))?;
        }

        let changes = session.changes();
        if changes.is_empty() {
            println!("{}", "No settings changed".yellow());
        }
        for change in &changes {
            println!(
                "  {}: {} -> {}",
                change.path,
                change.from.to_string().red(),
                change.to.to_string().green()
            );
        }

        if dry_run || !session.needs_save {
            return Ok(());
        }

        let text = session.export()?;
        Self::write(ctx, &text, output).await
    }

    /// Rehydrate `file` with an externally edited flat model.
    pub async fn handle_apply(
        ctx: &AppContext,
        file: &Path,
        model_path: &Path,
        output: Option<PathBuf>,
    ) -> Result<()> {
        let mut session = ctx.load_session(file).await?;

        let content = fs::read_to_string(model_path)
            .await
            .with_context(|| format!("Failed to read {}", model_path.display()))?;
        let model: FlatModel = serde_json::from_str(&content)
            .with_context(|| format!("Invalid flat model {}", model_path.display()))?;
        session.replace_model(model);

        let report = session.export_with_report()?;
        for path in &report.skipped {
            warn!("`{path}` does not exist in {}, skipped", file.display());
        }
        Self::write(ctx, &report.text, output).await
    }

    /// Print the setting registry, or the configuration schema.
    pub fn handle_schema(config: bool) -> Result<()> {
        let value = if config {
            OptConfig::json_schema()?
        } else {
            registry_json()
        };
        println!("{}", serde_json::to_string_pretty(&value)?);
        Ok(())
    }

    async fn write(ctx: &AppContext, text: &str, output: Option<PathBuf>) -> Result<()> {
        let out = ctx.output_path(output);
        if let Some(backup) = ctx.write_output(&out, text).await? {
            println!("Previous file backed up to {}", backup.display());
        }
        println!("{} {}", "Saved".green().bold(), out.display());
        Ok(())
    }
}

/// Registry as JSON: path to label, control, parameters and editability.
pub fn registry_json() -> serde_json::Value {
    use schema::Control;
    use serde_json::json;

    let entries = schema::definitions()
        .map(|(path, def)| {
            let mut value = json!({
                "label": def.label,
                "control": def.control.name(),
                "section": schema::section_for(path),
                "readonly": def.readonly,
            });
            match def.control {
                Control::Slider { min, max, step } => {
                    value["min"] = json!(min);
                    value["max"] = json!(max);
                    value["step"] = json!(step);
                }
                Control::Select { options, labels } => {
                    value["options"] = json!(options);
                    if let Some(labels) = labels {
                        value["labels"] = json!(labels);
                    }
                }
                Control::Input { numeric } => {
                    value["type"] = json!(if numeric { "number" } else { "text" });
                }
                Control::Switch | Control::Text => {}
            }
            (path.to_string(), value)
        })
        .collect::<serde_json::Map<_, _>>();
    serde_json::Value::Object(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_json() {
        let value = registry_json();
        let tess = &value["graphics.Tessellation"];
        assert_eq!(tess["control"], "select");
        assert_eq!(tess["section"], "Graphics Settings");
        assert_eq!(tess["labels"][3], "Ultra");

        let lod = &value["graphics.LodScale"];
        assert_eq!(lod["max"], 5.0);
        assert_eq!(value["graphics.MSAAQuality"]["readonly"], true);
    }

    #[tokio::test]
    async fn test_set_writes_edited_document() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("settings.xml");
        let output = dir.path().join("out.xml");
        std::fs::write(
            &input,
            r#"<Settings><graphics><MSAA value="0" /><DoF value="true" /></graphics></Settings>"#,
        )
        .unwrap();

        let ctx = AppContext::default();
        CommandHandler::handle_set(
            &ctx,
            &input,
            &["graphics.MSAA=4".to_string(), "graphics.DoF=false".to_string()],
            Some(output.clone()),
            false,
        )
        .await
        .unwrap();

        let written = std::fs::read_to_string(&output).unwrap();
        assert_eq!(
            written,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <Settings><graphics><MSAA value=\"4\" /><DoF value=\"false\" /></graphics></Settings>"
        );
    }

    #[tokio::test]
    async fn test_set_rejects_invalid_option_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("settings.xml");
        let output = dir.path().join("out.xml");
        std::fs::write(&input, r#"<Settings><graphics><MSAA value="0" /></graphics></Settings>"#)
            .unwrap();

        let result = CommandHandler::handle_set(
            &AppContext::default(),
            &input,
            &["graphics.MSAA=3".to_string()],
            Some(output.clone()),
            false,
        )
        .await;
        assert!(result.is_err());
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn test_apply_uses_edited_model() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("settings.xml");
        let model_path = dir.path().join("model.json");
        let output = dir.path().join("out.xml");
        std::fs::write(&input, r#"<Settings><audio><Audio3d value="false"/></audio></Settings>"#)
            .unwrap();
        std::fs::write(
            &model_path,
            r#"{
                "audio": {"value": "", "kind": "container"},
                "audio.Audio3d": {"value": true, "kind": "boolean", "originalValue": false},
                "audio.Gone": {"value": 1, "kind": "number"}
            }"#,
        )
        .unwrap();

        let ctx = AppContext::default();
        CommandHandler::handle_apply(&ctx, &input, &model_path, Some(output.clone()))
            .await
            .unwrap();
        let written = std::fs::read_to_string(&output).unwrap();
        assert!(
            written.ends_with(r#"<Settings><audio><Audio3d value="true"/></audio></Settings>"#)
        );
    }
}
