//! Common helpers for command-line input and output.

use anyhow::bail;
use colored::Colorize;
use gtacfg::{FlatEntry, schema::Presentation};

/// Split a `PATH=VALUE` argument.
///
/// The value may be empty and may itself contain `=`; the path may not be
/// empty.
pub fn parse_assignment(arg: &str) -> anyhow::Result<(String, String)> {
    let Some((path, value)) = arg.split_once('=') else {
        bail!("expected PATH=VALUE, got `{arg}`");
    };
    let path = path.trim();
    if path.is_empty() {
        bail!("missing setting path in `{arg}`");
    }
    Ok((path.to_string(), value.to_string()))
}

/// One line of `show` output: label, control kind, value.
pub fn render_line(path: &str, presentation: &Presentation, entry: &FlatEntry) -> String {
    let value = presentation.format_value(entry);
    let control = match presentation {
        Presentation::Control(def) if presentation.is_editable() => def.control.name(),
        _ => "display",
    };
    let value = if entry.is_modified() {
        value.yellow().bold().to_string()
    } else {
        value
    };
    format!(
        "  {:<32} {:<8} {} {}",
        presentation.label(),
        control.dimmed(),
        value,
        format!("({path})").dimmed()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_assignment() {
        assert_eq!(
            parse_assignment("graphics.MSAA=4").unwrap(),
            ("graphics.MSAA".to_string(), "4".to_string())
        );
        assert_eq!(
            parse_assignment(" configSource =a=b").unwrap(),
            ("configSource".to_string(), "a=b".to_string())
        );
        assert_eq!(
            parse_assignment("video.Stereo=").unwrap(),
            ("video.Stereo".to_string(), String::new())
        );
        assert!(parse_assignment("graphics.MSAA").is_err());
        assert!(parse_assignment("=4").is_err());
    }

    #[test]
    fn test_render_line_mentions_label_and_path() {
        colored::control::set_override(false);
        let entry = FlatEntry::new(gtacfg::SettingValue::Number(2.0));
        let line = render_line(
            "graphics.SSAO",
            &gtacfg::schema::control_for("graphics.SSAO"),
            &entry,
        );
        assert!(line.contains("SSAO"));
        assert!(line.contains("select"));
        assert!(line.contains("High"));
        assert!(line.contains("(graphics.SSAO)"));
    }
}
