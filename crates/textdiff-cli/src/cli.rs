use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "textdiff",
    about = "Line-by-line text comparison with numbered output",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    #[arg(long, global = true, default_value = "unified")]
    pub view: ViewMode,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// TOML file with diff limits (max_lines, max_edit_distance)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub limits: LimitArgs,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum ViewMode {
    Unified,
    Split,
}

#[derive(Args, Debug, Default)]
pub struct LimitArgs {
    /// Maximum number of lines across both inputs
    #[arg(long, global = true)]
    pub max_lines: Option<usize>,
    /// Maximum edit distance explored before giving up
    #[arg(long, global = true)]
    pub max_edits: Option<usize>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compare two files
    Files(PairArgs),
    /// Compare two literal strings (\n, \t and \\ escapes are expanded)
    Text(TextArgs),
    /// Print only the change statistics for two files
    Stats(PairArgs),
}

#[derive(Args)]
pub struct PairArgs {
    pub old: PathBuf,
    pub new: PathBuf,
}

#[derive(Args)]
pub struct TextArgs {
    pub old: String,
    pub new: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_files() {
        let cli = Cli::try_parse_from(["textdiff", "files", "a.txt", "b.txt"]).unwrap();
        if let Command::Files(args) = cli.command {
            assert_eq!(args.old, PathBuf::from("a.txt"));
            assert_eq!(args.new, PathBuf::from("b.txt"));
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_text() {
        let cli = Cli::try_parse_from(["textdiff", "text", "a\\nb", "a\\nc"]).unwrap();
        if let Command::Text(args) = cli.command {
            assert_eq!(args.old, "a\\nb");
            assert_eq!(args.new, "a\\nc");
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_stats() {
        let cli = Cli::try_parse_from(["textdiff", "stats", "a", "b"]).unwrap();
        assert!(matches!(cli.command, Command::Stats(_)));
    }

    #[test]
    fn files_requires_two_paths() {
        assert!(Cli::try_parse_from(["textdiff", "files", "a.txt"]).is_err());
    }

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["textdiff", "stats", "a", "b"]).unwrap();
        assert_eq!(cli.format, OutputFormat::Text);
        assert_eq!(cli.view, ViewMode::Unified);
        assert!(!cli.no_color);
        assert!(!cli.verbose);
        assert!(cli.config.is_none());
        assert!(cli.limits.max_lines.is_none());
    }

    #[test]
    fn parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "textdiff", "files", "a", "b", "--view", "split", "--no-color", "--max-lines", "10",
        ])
        .unwrap();
        assert_eq!(cli.view, ViewMode::Split);
        assert!(cli.no_color);
        assert_eq!(cli.limits.max_lines, Some(10));
    }

    #[test]
    fn parse_json_format() {
        let cli = Cli::try_parse_from(["textdiff", "--format", "json", "text", "a", "b"]).unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn parse_verbose_and_config() {
        let cli = Cli::try_parse_from(["textdiff", "-v", "--config", "limits.toml", "stats", "a", "b"])
            .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("limits.toml")));
    }
}
