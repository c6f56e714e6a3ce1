use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "attendify")]
#[command(version)]
#[command(about = "Terminal client for attendance tracking", long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Backend base URL (overrides configuration)
    #[arg(short, long, env = "ATTENDIFY_BACKEND")]
    pub backend: Option<String>,

    /// Skip the minimum splash display (for scripting)
    #[arg(long)]
    pub no_splash: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize configuration
    Init,
    /// Sign in to the backend
    Login {
        /// Account email
        email: String,
        /// Account password
        password: String,
    },
    /// Register a new employee account
    Register {
        /// Full name
        name: String,
        /// Account email
        email: String,
        /// Account password
        password: String,
        /// Office the account belongs to
        office: String,
    },
    /// Sign out
    Logout,
    /// Show the signed-in account and where it routes (default)
    Status,
    /// List employees, optionally for one office
    Employees {
        /// Restrict to this office id
        #[arg(short, long)]
        office: Option<String>,
    },
    /// Show recent attendance for the signed-in user
    Attendance {
        /// Number of records to show
        #[arg(short, long, default_value_t = 7)]
        limit: usize,
    },
    /// Check in at an office
    CheckIn {
        /// Office to check in at (defaults to the account's office)
        #[arg(short, long)]
        office: Option<String>,
    },
    /// Check out of the current open check-in
    CheckOut,
    /// List registered offices
    Offices,
}
