//! Controller-owned state: the input buffer, the rendered history list, and
//! the evaluation phase.

use crate::api::HistoryEntry;

/// Buffer contents placed on a failed evaluation.
pub const ERROR_SENTINEL: &str = "ERROR: Could not calculate";

/// Prefix shared by the local sentinel and service-formatted error results.
const ERROR_PREFIX: &str = "ERROR:";

/// The single editable string shown to the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputBuffer {
    text: String,
}

impl InputBuffer {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// True when the buffer holds an error message rather than user input.
    pub fn is_error_marker(&self) -> bool {
        self.text.starts_with(ERROR_PREFIX)
    }

    pub(super) fn append(&mut self, fragment: &str) {
        self.text.push_str(fragment);
    }

    pub(super) fn clear(&mut self) {
        self.text.clear();
    }

    /// Drop the final character. Error markers and empty buffers are left
    /// untouched; returns whether anything changed.
    pub(super) fn delete_last(&mut self) -> bool {
        if self.is_error_marker() {
            return false;
        }
        self.text.pop().is_some()
    }

    pub(super) fn replace(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}

/// `{idle, awaiting-evaluation-response}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    AwaitingEvaluation,
}

/// Everything the presentation layer needs to draw one frame.
#[derive(Debug, Clone, Default)]
pub struct CalcState {
    pub(super) buffer: InputBuffer,
    pub(super) history: Vec<HistoryEntry>,
    /// Query behind the current history list, when it came from a search.
    pub(super) history_filter: Option<String>,
    pub(super) phase: Phase,
    /// Set by a successful evaluation, cleared by the next buffer mutation.
    pub(super) acknowledged: bool,
}

impl CalcState {
    pub fn buffer(&self) -> &InputBuffer {
        &self.buffer
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn history_filter(&self) -> Option<&str> {
        self.history_filter.as_deref()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_evaluating(&self) -> bool {
        self.phase == Phase::AwaitingEvaluation
    }

    pub fn is_acknowledged(&self) -> bool {
        self.acknowledged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_concatenates_without_normalization() {
        let mut buf = InputBuffer::new("1 +");
        buf.append(" sqrt(");
        assert_eq!(buf.as_str(), "1 + sqrt(");
    }

    #[test]
    fn delete_last_removes_one_char_including_multibyte() {
        let mut buf = InputBuffer::new("2×π");
        assert!(buf.delete_last());
        assert_eq!(buf.as_str(), "2×");
        assert!(buf.delete_last());
        assert_eq!(buf.as_str(), "2");
    }

    #[test]
    fn delete_last_on_empty_is_noop() {
        let mut buf = InputBuffer::default();
        assert!(!buf.delete_last());
        assert_eq!(buf.as_str(), "");
    }

    #[test]
    fn error_markers_are_sticky_for_delete_last() {
        let mut sentinel = InputBuffer::new(ERROR_SENTINEL);
        assert!(sentinel.is_error_marker());
        assert!(!sentinel.delete_last());
        assert_eq!(sentinel.as_str(), ERROR_SENTINEL);

        let mut service_error = InputBuffer::new("ERROR: Division by zero");
        assert!(!service_error.delete_last());
        assert_eq!(service_error.as_str(), "ERROR: Division by zero");
    }

    #[test]
    fn lowercase_error_text_is_ordinary_input() {
        let mut buf = InputBuffer::new("error");
        assert!(!buf.is_error_marker());
        assert!(buf.delete_last());
        assert_eq!(buf.as_str(), "erro");
    }

    #[test]
    fn clear_resets_even_error_marker() {
        let mut buf = InputBuffer::new(ERROR_SENTINEL);
        buf.clear();
        assert!(buf.is_empty());
        assert!(!buf.is_error_marker());
    }

    #[cfg(feature = "fuzz-tests")]
    mod prop_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn append_yields_exact_concatenation(
                initial in proptest::string::string_regex("[0-9+*/().a-z -]{0,16}").expect("regex"),
                fragment in proptest::string::string_regex("[ -~]{0,8}").expect("regex"),
            ) {
                let mut buf = InputBuffer::new(initial.clone());
                buf.append(&fragment);
                prop_assert_eq!(buf.as_str(), format!("{initial}{fragment}"));
            }

            #[test]
            fn delete_last_drops_exactly_final_char(
                text in proptest::string::string_regex("[0-9+*/().a-z]{1,16}").expect("regex"),
            ) {
                let mut buf = InputBuffer::new(text.clone());
                prop_assert!(buf.delete_last());
                let mut expected = text.clone();
                expected.pop();
                prop_assert_eq!(buf.as_str().len(), text.len() - 1);
                prop_assert_eq!(buf.as_str(), expected);
            }

            #[test]
            fn clear_always_empties(
                text in proptest::string::string_regex("[ -~]{0,24}").expect("regex"),
            ) {
                let mut buf = InputBuffer::new(text);
                buf.clear();
                prop_assert!(buf.is_empty());
            }
        }
    }
}
