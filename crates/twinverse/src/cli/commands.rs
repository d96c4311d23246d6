//! Argument definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use twinverse::Role;

/// Alternate-universe persona generator.
#[derive(Parser, Debug)]
#[command(name = "twinverse")]
#[command(about = "Generate alternate-universe personas with Gemini")]
#[command(version)]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Send one prompt through the retrying Gemini client
    Generate {
        /// User prompt
        #[arg(short, long)]
        prompt: String,

        /// System instruction
        #[arg(short, long, default_value = "")]
        system: String,

        /// Extract the embedded JSON object from the answer
        #[arg(long)]
        json: bool,

        /// Attempt budget (defaults to gemini.max_attempts)
        #[arg(long)]
        max_attempts: Option<u32>,
    },

    /// Render a portrait with Imagen
    Portrait {
        /// Image prompt
        #[arg(short, long, conflicts_with = "reality", required_unless_present = "reality")]
        prompt: Option<String>,

        /// Build the prompt from a stored reality instead
        #[arg(long, requires = "user")]
        reality: Option<String>,

        /// Caller id
        #[arg(long, env = "TWINVERSE_USER")]
        user: Option<String>,

        /// Caller role
        #[arg(long, default_value = "user")]
        role: Role,

        /// Attempt budget (defaults to gemini.max_attempts)
        #[arg(long)]
        max_attempts: Option<u32>,
    },

    /// Save a profile read from a TOML file
    Profile {
        /// Caller id
        #[arg(long, env = "TWINVERSE_USER")]
        user: String,

        /// Profile TOML file
        file: PathBuf,
    },

    /// Generate and store a persona in the selected universe
    Reality {
        /// Caller id
        #[arg(long, env = "TWINVERSE_USER")]
        user: Option<String>,

        /// Persona archetype
        #[arg(long)]
        archetype: String,

        /// Universe focus
        #[arg(long)]
        universe_focus: String,

        /// Core personality seed
        #[arg(long)]
        core_personality: String,

        /// Save this profile file before generating
        #[arg(long)]
        profile: Option<PathBuf>,
    },

    /// Talk to the persona of a stored reality
    Chat {
        /// Caller id
        #[arg(long, env = "TWINVERSE_USER")]
        user: Option<String>,

        /// Caller role
        #[arg(long, default_value = "user")]
        role: Role,

        /// Reality id
        #[arg(long)]
        reality: String,

        /// Message to send
        message: String,
    },

    /// List stored realities
    List {
        /// Caller id; lists only the caller's realities
        #[arg(long, env = "TWINVERSE_USER", conflicts_with = "all")]
        user: Option<String>,

        /// List every stored reality
        #[arg(long)]
        all: bool,
    },

    /// Show one stored reality
    Show {
        /// Reality id
        id: String,
    },
}
