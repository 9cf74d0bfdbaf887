//! CLI command handlers for LayerKit.
//!
//! Each subcommand is an `Args` struct with an `execute` method returning
//! [`CliResult`]; `main` maps errors to exit codes.

pub mod capture;
pub mod common;
pub mod compare;
pub mod show;
pub mod translate;

// Re-export types used by main.rs and tests
pub use capture::CaptureArgs;
pub use common::{CliError, CliResult, ExitCode};
pub use compare::CompareArgs;
pub use show::ShowArgs;
pub use translate::TranslateArgs;
