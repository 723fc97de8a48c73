use clap::{Parser, Subcommand, ValueEnum};
use firecell_core::PlayingMode;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "firecell")]
#[command(version)]
#[command(about = "Simulate fire spreading through a voxel room", long_about = None)]
pub struct Cli {
    /// Directory holding default.toml and user.toml
    #[arg(short, long, global = true, default_value = "config")]
    pub config: PathBuf,

    /// Log at debug level regardless of configuration
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Simulate a room and store every state
    Run {
        /// Room blueprint to start from
        #[arg(short, long)]
        room: String,

        /// Name to store the simulation under
        #[arg(short, long)]
        name: Option<String>,

        /// Number of states to produce
        #[arg(short, long)]
        steps: Option<u64>,
    },

    /// Play back a stored simulation
    Replay {
        name: String,

        #[arg(short, long, value_enum, default_value_t = Direction::Forward)]
        mode: Direction,
    },

    /// Manage room blueprints
    Rooms {
        #[command(subcommand)]
        command: RoomsCommand,
    },

    /// Inspect stored simulations
    Simulations {
        #[command(subcommand)]
        command: SimulationsCommand,
    },

    /// Print the natives classifier for this or another platform
    Platform {
        #[arg(long)]
        os_name: Option<String>,

        #[arg(long, requires = "os_name")]
        os_arch: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum RoomsCommand {
    List,
    /// Save the demo room under a name
    Demo { name: String },
}

#[derive(Subcommand)]
pub enum SimulationsCommand {
    List,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum Direction {
    Forward,
    Backward,
}

impl From<Direction> for PlayingMode {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Forward => PlayingMode::Forward,
            Direction::Backward => PlayingMode::Backward,
        }
    }
}
