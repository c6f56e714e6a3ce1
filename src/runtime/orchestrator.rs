use anyhow::Result;
use colored::Colorize;
use std::time::Duration;
use tokio::time;
use tracing::debug;

use crate::{
    app::{load_config, Config, LaunchConfig},
    auth::Session,
    backend::HttpBackend,
    cli::{handle_command, Cli, Commands},
    launch::{DeclaredPermissions, LaunchGate, Router},
};

/// Router that records the forward-navigation hand-off
#[derive(Debug, Default)]
pub struct ForwardRouter {
    proceeded: bool,
}

impl Router for ForwardRouter {
    fn proceed(&mut self) {
        debug!("launch gate proceeded");
        self.proceeded = true;
    }
}

/// Main runtime orchestrator
pub struct Orchestrator {
    cli: Cli,
    config: Config,
    session: Session,
}

impl Orchestrator {
    /// Create a new orchestrator from CLI args
    pub fn new(cli: Cli) -> Result<Self> {
        // Load configuration
        let mut config = if let Some(config_path) = &cli.config {
            let toml_str = std::fs::read_to_string(config_path)?;
            toml::from_str::<Config>(&toml_str)?
        } else {
            match load_config() {
                Ok(cfg) => cfg,
                Err(e) => {
                    eprintln!("Failed to load config: {}. Using defaults.", e);
                    Config::default()
                }
            }
        };

        // CLI argument overrides the configured backend
        if let Some(backend) = &cli.backend {
            config.backend.base_url = backend.clone();
        }

        // Load persisted session
        let session = Session::load().unwrap_or_default();

        Ok(Self {
            cli,
            config,
            session,
        })
    }

    /// Run the orchestrator
    pub async fn run(mut self) -> Result<()> {
        // Launch sequence: minimum display timer gated with the
        // permission round-trip, before anything touches the backend
        if !self.cli.no_splash {
            println!("{} v{}", "Attendify".green(), env!("CARGO_PKG_VERSION"));
            let proceeded = run_launch_sequence(&self.config.launch).await;
            if !proceeded {
                // Torn down before completion; nothing to navigate to
                return Ok(());
            }
        }

        let backend = HttpBackend::new(&self.config)?;

        let command = self.cli.command.take().unwrap_or(Commands::Status);
        handle_command(&command, &backend, &mut self.session).await
    }
}

/// Drive the launch gate to completion.
///
/// The declared permission broker answers prompts without user
/// interaction, so the round-trip resolves while the timer runs; the
/// gate still enforces that both sources complete before hand-off.
pub async fn run_launch_sequence(launch: &LaunchConfig) -> bool {
    let mut permissions = DeclaredPermissions::new(
        launch.permissions.basic_location,
        launch.permissions.background_location,
        launch.permissions.prompt_grants,
    );

    let mut gate = LaunchGate::new(ForwardRouter::default());
    gate.begin(&mut permissions);

    if let Some(result) = permissions.resolve_pending() {
        gate.on_permission_result(result);
    }

    time::sleep(Duration::from_millis(launch.splash_duration_ms)).await;
    gate.on_timer_elapsed();

    gate.has_proceeded()
}
