#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::new_without_default,
    clippy::return_self_not_must_use
)]

pub mod app;
pub mod backend;
pub mod cli;
pub mod config;
pub mod error;
#[doc(hidden)]
pub mod util;

pub use backend::BackendClient;
pub use cli::Cli;
pub use config::Config;
pub use error::{ClientError, ConfigError, IdkError};
