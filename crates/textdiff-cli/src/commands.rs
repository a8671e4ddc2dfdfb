use std::fs;
use std::path::Path;

use anyhow::Context;
use textdiff_engine::{compute_diff_with, DiffConfig, DiffReport, TextDiff};
use tracing::debug;

use crate::cli::*;
use crate::output::{format_diff, format_summary};

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref(), &cli.limits)?;
    let color = !cli.no_color;
    if !color {
        colored::control::set_override(false);
    }

    let out = match cli.command {
        Command::Files(args) => {
            let (old, new) = read_pair(&args)?;
            render(&old, &new, &config, cli.format, cli.view, color)?
        }
        Command::Text(args) => {
            let (old, new) = (unescape(&args.old), unescape(&args.new));
            render(&old, &new, &config, cli.format, cli.view, color)?
        }
        Command::Stats(args) => {
            let (old, new) = read_pair(&args)?;
            cmd_stats(&old, &new, &config, cli.format, color)?
        }
    };
    print!("{out}");
    Ok(())
}

/// Load limits from an optional TOML file, then apply command-line overrides.
pub fn load_config(path: Option<&Path>, limits: &LimitArgs) -> anyhow::Result<DiffConfig> {
    let mut config = match path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            toml::from_str(&raw).with_context(|| format!("parsing config {}", path.display()))?
        }
        None => DiffConfig::default(),
    };
    if limits.max_lines.is_some() {
        config.max_lines = limits.max_lines;
    }
    if limits.max_edits.is_some() {
        config.max_edit_distance = limits.max_edits;
    }
    debug!(?config, "diff limits");
    Ok(config)
}

fn read_pair(args: &PairArgs) -> anyhow::Result<(String, String)> {
    let old = fs::read_to_string(&args.old)
        .with_context(|| format!("reading {}", args.old.display()))?;
    let new = fs::read_to_string(&args.new)
        .with_context(|| format!("reading {}", args.new.display()))?;
    debug!(old_bytes = old.len(), new_bytes = new.len(), "inputs loaded");
    Ok((old, new))
}

fn render(
    old: &str,
    new: &str,
    config: &DiffConfig,
    format: OutputFormat,
    view: ViewMode,
    color: bool,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => {
            let report = DiffReport::from_result(compute_diff_with(old, new, config));
            json_or_error(&report)
        }
        OutputFormat::Text => {
            let diff = compute_diff_with(old, new, config).context("computing diff")?;
            Ok(format_diff(&diff, view, color))
        }
    }
}

fn cmd_stats(
    old: &str,
    new: &str,
    config: &DiffConfig,
    format: OutputFormat,
    color: bool,
) -> anyhow::Result<String> {
    let diff: TextDiff = compute_diff_with(old, new, config).context("computing diff")?;
    match format {
        OutputFormat::Json => Ok(format!("{}\n", serde_json::to_string_pretty(&diff.stats)?)),
        OutputFormat::Text => Ok(format!("{}\n", format_summary(&diff, color))),
    }
}

/// Serialize a report; a report carrying an error is still a command failure.
fn json_or_error(report: &DiffReport) -> anyhow::Result<String> {
    let json = serde_json::to_string_pretty(report)?;
    if report.is_error() {
        println!("{json}");
        anyhow::bail!("{}", report.error);
    }
    Ok(format!("{json}\n"))
}

/// Expand `\n`, `\t` and `\\` in command-line text arguments.
pub fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn unescape_sequences() {
        assert_eq!(unescape("a\\nb"), "a\nb");
        assert_eq!(unescape("a\\tb\\\\"), "a\tb\\");
        assert_eq!(unescape("keep\\q"), "keep\\q");
        assert_eq!(unescape("trailing\\"), "trailing\\");
    }

    #[test]
    fn config_file_and_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "limits.toml", "max_lines = 50\nmax_edit_distance = 7\n");

        let config = load_config(Some(path.as_path()), &LimitArgs::default()).unwrap();
        assert_eq!(config.max_lines, Some(50));
        assert_eq!(config.max_edit_distance, Some(7));

        let overrides = LimitArgs { max_lines: Some(5), max_edits: None };
        let config = load_config(Some(path.as_path()), &overrides).unwrap();
        assert_eq!(config.max_lines, Some(5));
        assert_eq!(config.max_edit_distance, Some(7));
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(load_config(Some(missing.as_path()), &LimitArgs::default()).is_err());
    }

    #[test]
    fn read_pair_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let old = write_file(&dir, "old.txt", "a\nb\n");
        let new = write_file(&dir, "new.txt", "a\nc\n");
        let (o, n) = read_pair(&PairArgs { old, new }).unwrap();
        assert_eq!(o, "a\nb\n");
        assert_eq!(n, "a\nc\n");
    }

    #[test]
    fn render_json_report() {
        let out = render("a\nb", "a\nc", &DiffConfig::default(), OutputFormat::Json, ViewMode::Unified, false)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["stats"]["changes"], 2);
        assert_eq!(value["lines"][1]["type"], "delete");
        assert_eq!(value["error"], "");
    }

    #[test]
    fn render_text_reports_resource_errors() {
        let config = DiffConfig { max_lines: Some(1), ..Default::default() };
        let err = render("a\nb", "c", &config, OutputFormat::Text, ViewMode::Unified, false)
            .unwrap_err();
        assert!(format!("{err:#}").contains("resource exhausted"));
    }

    #[test]
    fn stats_text_and_json() {
        let config = DiffConfig::default();
        let text = cmd_stats("a", "b", &config, OutputFormat::Text, false).unwrap();
        assert_eq!(text, "+1 additions, -1 deletions, 2 changes total\n");

        let json = cmd_stats("a", "b", &config, OutputFormat::Json, false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["additions"], 1);
        assert_eq!(value["deletions"], 1);
    }
}
