pub mod app;
pub mod auth;
pub mod backend;
pub mod cli;
pub mod launch;
pub mod models;
pub mod runtime;
pub mod utils;

pub use app::{load_config, Config};
pub use auth::{NavigationTarget, Session};
pub use launch::{LaunchGate, PermissionService, Router};
pub use runtime::Orchestrator;
pub use utils::AttendifyError;
