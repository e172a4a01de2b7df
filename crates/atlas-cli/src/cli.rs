//! CLI argument definitions.
//!
//! All `clap` structures live here so that `main.rs` stays focused on
//! dispatching subcommands.

use clap::{Parser, Subcommand};

/// Atlas -- turn a typed intent into a short runbook.
#[derive(Parser)]
#[command(
    name = "atlas",
    version,
    about = "Atlas -- desktop intent planner",
    long_about = "Describe what you want done and Atlas drafts a short plan from its \
                  scenario catalog, your workflow library, and your registered applications."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Preview the plan for a command.
    Plan {
        /// The command text.
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Manage the application registry.
    Apps {
        #[command(subcommand)]
        action: AppAction,
    },

    /// Manage the workflow library.
    Workflows {
        #[command(subcommand)]
        action: WorkflowAction,
    },

    /// Start the interactive command console.
    Console,
}

#[derive(Subcommand)]
pub enum AppAction {
    /// List registered applications (pinned ones are starred).
    List,

    /// Register a desktop application.
    Add {
        /// Application name.
        #[arg(long)]
        name: String,

        /// Category, e.g. Automation or Design.
        #[arg(long, default_value = "")]
        category: String,

        /// Launch command or automation shortcut.
        #[arg(long, default_value = "")]
        launch: String,

        /// How the agent should use this tool.
        #[arg(long, default_value = "")]
        description: String,
    },
}

#[derive(Subcommand)]
pub enum WorkflowAction {
    /// List saved workflows.
    List,
}
