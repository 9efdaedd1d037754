//! Binary-local application orchestration.
//!
//! `main.rs` only parses arguments; setup and dispatch live in `entry`, and
//! the one-shot subcommands live in `commands`.

pub(crate) mod commands;
pub(crate) mod entry;
