//! One-shot subcommands: `eval`, `history`, `clear-history`, `init`.
//!
//! Each runner writes user output to `out`, diagnostics to `err`, and returns
//! the process exit code.

use calcdesk::api::CalcService;
use calcdesk::config::{initialize_global_config, ConfigInitResult};
use calcdesk::controller::{
    ClearHistoryOutcome, Confirm, Controller, EvaluationOutcome, ERROR_SENTINEL,
};
use calcdesk::view::history_listing;
use std::io::{self, BufRead, IsTerminal, Write};
use std::sync::Arc;

/// `calcdesk eval <expression>`.
pub(crate) async fn run_eval(
    service: Arc<dyn CalcService>,
    expression: &str,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> i32 {
    let mut controller = Controller::new(service);
    if let Err(e) = controller.append(expression) {
        let _ = writeln!(err, "error: {e}");
        return 1;
    }
    let pending = match controller.begin_evaluation() {
        Ok(Some(pending)) => pending,
        Ok(None) => {
            let _ = writeln!(err, "error: nothing to evaluate");
            return 2;
        }
        Err(e) => {
            let _ = writeln!(err, "error: {e}");
            return 1;
        }
    };
    let response = pending.run().await;
    if let Err(e) = &response {
        let _ = writeln!(err, "error: {e}");
    }
    match controller.complete_evaluation(response) {
        EvaluationOutcome::Evaluated { result } => {
            let _ = writeln!(out, "{result}");
            0
        }
        EvaluationOutcome::Failed | EvaluationOutcome::Skipped => {
            let _ = writeln!(out, "{ERROR_SENTINEL}");
            1
        }
    }
}

/// `calcdesk history [--search <query>]`.
pub(crate) async fn run_history(
    service: Arc<dyn CalcService>,
    search: Option<&str>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> i32 {
    let result = match search.map(str::trim).filter(|q| !q.is_empty()) {
        Some(query) => service.search_history(query).await,
        None => service.list_history().await,
    };
    match result {
        Ok(entries) => {
            for line in history_listing(&entries) {
                let _ = writeln!(out, "{line}");
            }
            0
        }
        Err(e) => {
            let _ = writeln!(err, "error: failed to load history: {e}");
            1
        }
    }
}

/// `calcdesk clear-history [--yes]`.
pub(crate) async fn run_clear_history(
    service: Arc<dyn CalcService>,
    confirm: &dyn Confirm,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> i32 {
    let mut controller = Controller::new(service);
    match controller.clear_history(confirm).await {
        ClearHistoryOutcome::Cleared => {
            let _ = writeln!(out, "history cleared");
            0
        }
        ClearHistoryOutcome::Declined => {
            let _ = writeln!(err, "history not cleared");
            1
        }
        ClearHistoryOutcome::Failed => {
            let _ = writeln!(err, "error: clearing history failed");
            1
        }
    }
}

/// `calcdesk init [--force]`.
pub(crate) fn run_init(force: bool, out: &mut dyn Write, err: &mut dyn Write) -> i32 {
    match initialize_global_config(force) {
        Ok(result) => {
            let _ = writeln!(out, "{}", init_result_message(&result));
            0
        }
        Err(e) => {
            let _ = writeln!(err, "error: failed to initialize config: {e}");
            1
        }
    }
}

fn init_result_message(result: &ConfigInitResult) -> String {
    match result {
        ConfigInitResult::Created { path } => {
            format!("initialized calcdesk config: {}", path.display())
        }
        ConfigInitResult::AlreadyInitialized { path } => format!(
            "calcdesk config already initialized: {} (use --force to overwrite)",
            path.display()
        ),
        ConfigInitResult::Overwritten { path, backup_path } => format!(
            "reinitialized calcdesk config: {} (backup: {})",
            path.display(),
            backup_path.display()
        ),
    }
}

/// Read a y/N answer from `input`, prompting on `out`.
pub(crate) fn prompt_yes_no(prompt: &str, input: &mut dyn BufRead, out: &mut dyn Write) -> bool {
    let _ = write!(out, "{prompt} [y/N] ");
    let _ = out.flush();
    let mut line = String::new();
    match input.read_line(&mut line) {
        Ok(_) => matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
        Err(_) => false,
    }
}

/// Confirmation for `clear-history`: `--yes`, else ask on a terminal, else
/// decline.
pub(crate) struct CliConfirm {
    pub assume_yes: bool,
}

impl Confirm for CliConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        if !io::stdin().is_terminal() {
            eprintln!("{prompt} (not a terminal; pass --yes to confirm)");
            return false;
        }
        prompt_yes_no(prompt, &mut io::stdin().lock(), &mut io::stderr())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use calcdesk::api::HistoryEntry;
    use calcdesk::error::ApiError;
    use std::path::PathBuf;
    use std::sync::Mutex;

    /// Minimal scripted service for the binary's tests.
    #[derive(Default)]
    struct Scripted {
        evaluation: Mutex<Option<Result<String, u16>>>,
        history: Vec<HistoryEntry>,
        cleared: Mutex<bool>,
    }

    fn status(code: u16) -> ApiError {
        ApiError::Status {
            code,
            body: "boom".into(),
        }
    }

    #[async_trait]
    impl CalcService for Scripted {
        async fn evaluate(&self, _expression: &str) -> Result<String, ApiError> {
            match self.evaluation.lock().unwrap().take() {
                Some(Ok(result)) => Ok(result),
                Some(Err(code)) => Err(status(code)),
                None => Err(status(500)),
            }
        }

        async fn list_history(&self) -> Result<Vec<HistoryEntry>, ApiError> {
            Ok(self.history.clone())
        }

        async fn search_history(&self, query: &str) -> Result<Vec<HistoryEntry>, ApiError> {
            Ok(self
                .history
                .iter()
                .filter(|e| e.expression.contains(query))
                .cloned()
                .collect())
        }

        async fn clear_history(&self) -> Result<(), ApiError> {
            *self.cleared.lock().unwrap() = true;
            Ok(())
        }
    }

    fn utf8(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }

    #[tokio::test]
    async fn eval_prints_result() {
        let service = Arc::new(Scripted {
            evaluation: Mutex::new(Some(Ok("4".into()))),
            ..Scripted::default()
        });
        let (mut out, mut err) = (Vec::new(), Vec::new());
        let code = run_eval(service, "2+2", &mut out, &mut err).await;
        assert_eq!(code, 0);
        assert_eq!(utf8(out), "4\n");
        assert!(err.is_empty());
    }

    #[tokio::test]
    async fn eval_failure_prints_sentinel_and_reason() {
        let service = Arc::new(Scripted {
            evaluation: Mutex::new(Some(Err(400))),
            ..Scripted::default()
        });
        let (mut out, mut err) = (Vec::new(), Vec::new());
        let code = run_eval(service, "1/", &mut out, &mut err).await;
        assert_eq!(code, 1);
        assert_eq!(utf8(out), format!("{ERROR_SENTINEL}\n"));
        assert!(utf8(err).contains("status 400"));
    }

    #[tokio::test]
    async fn eval_of_empty_expression_sends_nothing() {
        let service = Arc::new(Scripted::default());
        let (mut out, mut err) = (Vec::new(), Vec::new());
        let code = run_eval(service, "", &mut out, &mut err).await;
        assert_eq!(code, 2);
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn history_lists_and_filters() {
        let service = Arc::new(Scripted {
            history: vec![
                HistoryEntry::new("1+1", "2"),
                HistoryEntry::new("sqrt(9)", "3"),
            ],
            ..Scripted::default()
        });
        let (mut out, mut err) = (Vec::new(), Vec::new());
        assert_eq!(
            run_history(service.clone(), None, &mut out, &mut err).await,
            0
        );
        assert_eq!(utf8(out), "1. 1+1 = 2\n2. sqrt(9) = 3\n");

        let mut out = Vec::new();
        run_history(service.clone(), Some("zzz"), &mut out, &mut err).await;
        assert_eq!(utf8(out), "No history found.\n");
    }

    #[tokio::test]
    async fn clear_history_honors_confirmation() {
        let service = Arc::new(Scripted::default());
        let (mut out, mut err) = (Vec::new(), Vec::new());
        let no = |_: &str| false;
        assert_eq!(
            run_clear_history(service.clone(), &no, &mut out, &mut err).await,
            1
        );
        assert!(!*service.cleared.lock().unwrap());

        let yes = CliConfirm { assume_yes: true };
        assert_eq!(
            run_clear_history(service.clone(), &yes, &mut out, &mut err).await,
            0
        );
        assert!(*service.cleared.lock().unwrap());
        assert_eq!(utf8(out), "history cleared\n");
    }

    #[test]
    fn prompt_accepts_only_explicit_yes() {
        let mut out = Vec::new();
        assert!(prompt_yes_no("sure?", &mut "y\n".as_bytes(), &mut out));
        assert!(prompt_yes_no("sure?", &mut "YES\n".as_bytes(), &mut out));
        assert!(!prompt_yes_no("sure?", &mut "\n".as_bytes(), &mut out));
        assert!(!prompt_yes_no("sure?", &mut "".as_bytes(), &mut out));
        assert!(utf8(out).starts_with("sure? [y/N] "));
    }

    #[test]
    fn init_messages_name_paths() {
        let msg = init_result_message(&ConfigInitResult::Overwritten {
            path: PathBuf::from("/cfg/calcdesk.toml"),
            backup_path: PathBuf::from("/cfg/calcdesk.toml.bak"),
        });
        assert!(msg.contains("/cfg/calcdesk.toml"));
        assert!(msg.contains("backup: /cfg/calcdesk.toml.bak"));
    }
}
