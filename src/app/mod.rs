pub mod action;
pub mod dispatch;
pub mod login;
pub mod project;
pub mod prompt;
pub mod shell;

pub use dispatch::{dispatch, run};
