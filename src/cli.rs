//! CLI argument parsing via clap.

use calcdesk::build_info;
use calcdesk::config::Theme;
use clap::{Parser, Subcommand};

/// Calculator front end for a remote evaluation service.
#[derive(Debug, Parser)]
#[command(name = "calcdesk", version, long_version = build_info::LONG_VERSION)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to config file (default: ./calcdesk.toml or ~/.config/calcdesk/calcdesk.toml).
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<String>,

    /// Override the evaluation service base URL.
    #[arg(long = "base-url", global = true)]
    pub base_url: Option<String>,

    /// Disable color output.
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    /// Start with this theme (light or dark).
    #[arg(long = "theme", value_parser = parse_theme)]
    pub theme: Option<Theme>,

    /// Answer yes to the clear-history prompt in line mode.
    #[arg(short = 'y', long = "yes")]
    pub yes: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Evaluate one expression and print the result.
    Eval {
        /// Expression text, sent as-is.
        expression: String,
    },
    /// Print the stored history, optionally filtered.
    History {
        /// Only show entries whose expression contains this text.
        #[arg(short = 's', long = "search")]
        search: Option<String>,
    },
    /// Delete all stored history.
    ClearHistory {
        /// Skip the confirmation prompt.
        #[arg(short = 'y', long = "yes")]
        yes: bool,
    },
    /// Write the default config to ~/.config/calcdesk/calcdesk.toml.
    Init {
        /// Overwrite an existing config (a backup is kept).
        #[arg(long = "force")]
        force: bool,
    },
}

fn parse_theme(value: &str) -> Result<Theme, String> {
    value.parse()
}

#[cfg(test)]
mod tests {
    use super::{Args, Command};
    use calcdesk::config::Theme;
    use clap::Parser;

    #[test]
    fn no_subcommand_starts_interactive() {
        let args = Args::parse_from(["calcdesk"]);
        assert!(args.command.is_none());
        assert!(!args.no_color);
        assert!(args.theme.is_none());
    }

    #[test]
    fn eval_takes_expression_verbatim() {
        let args = Args::parse_from(["calcdesk", "eval", "sqrt(16)+1"]);
        match args.command {
            Some(Command::Eval { expression }) => assert_eq!(expression, "sqrt(16)+1"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_flags_work_after_subcommand() {
        let args = Args::parse_from([
            "calcdesk",
            "history",
            "--search",
            "sqrt",
            "--base-url",
            "http://calc.local:8080",
        ]);
        assert_eq!(args.base_url.as_deref(), Some("http://calc.local:8080"));
        match args.command {
            Some(Command::History { search }) => assert_eq!(search.as_deref(), Some("sqrt")),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn theme_flag_is_parsed() {
        let args = Args::parse_from(["calcdesk", "--theme", "Dark"]);
        assert_eq!(args.theme, Some(Theme::Dark));
        assert!(Args::try_parse_from(["calcdesk", "--theme", "neon"]).is_err());
    }

    #[test]
    fn clear_history_and_init_flags() {
        let args = Args::parse_from(["calcdesk", "clear-history", "--yes"]);
        assert!(matches!(args.command, Some(Command::ClearHistory { yes: true })));
        let args = Args::parse_from(["calcdesk", "init", "--force"]);
        assert!(matches!(args.command, Some(Command::Init { force: true })));
    }
}
