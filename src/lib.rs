//! calcdesk: a terminal front end for a remote calculator service.
//!
//! The crate keeps an expression buffer and a history list in a
//! [`controller::Controller`], delegates all arithmetic to a
//! [`api::CalcService`] over HTTP, and renders state through the pure
//! [`view::render`] projection.
//!
//! # Quick start
//!
//! ```no_run
//! use calcdesk::api::{CalcService, HttpCalcService};
//! use calcdesk::config::load_config;
//! use calcdesk::controller::{Controller, EvaluationOutcome};
//! use std::sync::Arc;
//!
//! # async fn example() {
//! let config = load_config(None).unwrap();
//! let service: Arc<dyn CalcService> = Arc::new(HttpCalcService::new(&config.service));
//! let mut controller = Controller::new(service);
//! controller.append("2+2").unwrap();
//! if let Ok(EvaluationOutcome::Evaluated { result }) = controller.evaluate().await {
//!     println!("{result}");
//! }
//! # }
//! ```

pub mod api;
pub mod build_info;
pub mod config;
pub mod controller;
pub mod error;
pub mod logging;
pub mod settings;
#[cfg(test)]
pub mod testsupport;
pub mod tui;
pub mod view;
