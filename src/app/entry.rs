//! Application entry orchestration for the calcdesk CLI.

use crate::app::commands::{self, CliConfirm};
use crate::cli::{Args, Command};
use calcdesk::api::{CalcService, HttpCalcService};
use calcdesk::config::{
    apply_cli_overrides, default_log_path, load_config, CliOverrides, Config,
};
use calcdesk::controller::Controller;
use calcdesk::logging::{init_logging, LogTarget};
use calcdesk::settings::{FileSettingsStore, SettingsStore};
use calcdesk::tui::{self, line_mode, Session};
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::sync::Arc;

/// How a run without a subcommand talks to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FrontEnd {
    FullScreen,
    Lines,
}

fn front_end(stdin_tty: bool, stdout_tty: bool) -> FrontEnd {
    if stdin_tty && stdout_tty {
        FrontEnd::FullScreen
    } else {
        FrontEnd::Lines
    }
}

/// Resolve config, install logging, and dispatch. Returns the exit code.
pub(crate) async fn run(args: Args) -> i32 {
    let mut stdout = io::stdout();
    let mut stderr = io::stderr();

    // `init` must work even when the existing config does not parse.
    if let Some(Command::Init { force }) = &args.command {
        return commands::run_init(*force, &mut stdout, &mut stderr);
    }

    let config = match resolve_config(&args) {
        Ok(config) => config,
        Err(msg) => {
            eprintln!("error: {msg}");
            return 1;
        }
    };

    let mode = front_end(io::stdin().is_terminal(), io::stdout().is_terminal());
    let full_screen = args.command.is_none() && mode == FrontEnd::FullScreen;
    let log_file = config.logging.file.clone().or_else(default_log_path);
    let target = match (&log_file, full_screen) {
        (Some(path), true) => LogTarget::File(path),
        _ => LogTarget::Stderr,
    };
    if let Err(e) = init_logging(&config.logging.level, target) {
        eprintln!("warning: logging disabled: {e}");
    }
    tracing::debug!(base_url = %config.service.base_url, "using calculator service");

    let service: Arc<dyn CalcService> = Arc::new(HttpCalcService::new(&config.service));

    match args.command.as_ref() {
        Some(Command::Eval { expression }) => {
            commands::run_eval(service, expression, &mut stdout, &mut stderr).await
        }
        Some(Command::History { search }) => {
            commands::run_history(service, search.as_deref(), &mut stdout, &mut stderr).await
        }
        Some(Command::ClearHistory { yes }) => {
            let confirm = CliConfirm {
                assume_yes: *yes || args.yes,
            };
            commands::run_clear_history(service, &confirm, &mut stdout, &mut stderr).await
        }
        Some(Command::Init { .. }) => 0,
        None if full_screen => run_full_screen(service, &args, &config).await,
        None => {
            let mut controller = Controller::new(service);
            let stdin = io::stdin();
            match line_mode::run(&mut controller, stdin.lock(), &mut stdout, args.yes).await {
                Ok(()) => 0,
                Err(e) => {
                    eprintln!("error: {e}");
                    1
                }
            }
        }
    }
}

fn resolve_config(args: &Args) -> Result<Config, String> {
    let mut config = load_config(args.config.as_deref()).map_err(|e| e.to_string())?;
    apply_cli_overrides(
        &mut config,
        &CliOverrides {
            base_url: args.base_url.as_deref(),
            no_color: args.no_color,
            theme: args.theme,
        },
    )
    .map_err(|e| e.to_string())?;
    Ok(config)
}

async fn run_full_screen(service: Arc<dyn CalcService>, args: &Args, config: &Config) -> i32 {
    let store: Arc<dyn SettingsStore> =
        Arc::new(FileSettingsStore::new(args.config.as_ref().map(PathBuf::from)));
    // An explicit --theme wins over the saved preference.
    let theme = match args.theme {
        Some(theme) => theme,
        None => store.load_theme().unwrap_or(config.display.theme),
    };
    let session = Session::new(Controller::new(service), store, theme);
    match tui::run(session, config.display.color).await {
        Ok(()) => 0,
        Err(e) => {
            tracing::error!(error = %e, "terminal session failed");
            eprintln!("error: terminal: {e}");
            1
        }
    }
}
