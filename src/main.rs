//! Firecell - cellular-automaton fire simulator
//!
//! Runs room blueprints through the simulation engine, stores the states and
//! replays them with per-state diagnostics.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;

use firecell::platform;
use firecell::{AppConfig, Session};
use firecell_core::StateBlueprint;

use cli::{Cli, Commands, RoomsCommand, SimulationsCommand};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load_from(&cli.config).unwrap_or_else(|e| {
        eprintln!("{}. Using defaults.", e);
        AppConfig::default()
    });

    let level = if cli.verbose { "debug" } else { config.debug.log_level.as_str() };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
    install_panic_hook();
    log::info!("Starting Firecell");

    let session = Session::new(config);
    match cli.command {
        Commands::Run { room, name, steps } => {
            let summary = session
                .run(&room, name.as_deref(), steps)
                .with_context(|| format!("Failed to run room '{}'", room))?;
            println!("Stored {} states as '{}'", summary.published, summary.name);
            if let Some(last) = summary.last {
                println!("{}", last);
            }
        }
        Commands::Replay { name, mode } => {
            let frames = session
                .replay(&name, mode.into(), |frame| {
                    let layers: Vec<String> = frame
                        .layers
                        .iter()
                        .map(|(layer, count)| format!("{} {}", layer, count))
                        .collect();
                    println!(
                        "#{:<5} burning {:<5} avg {:>6.1} C  [{}]",
                        frame.index,
                        frame.diagnostics.burning_cell_count,
                        frame.diagnostics.average_temperature(),
                        layers.join(", ")
                    );
                })
                .with_context(|| format!("Failed to replay '{}'", name))?;
            println!("Replayed {} states", frames);
        }
        Commands::Rooms { command } => {
            let rooms = session.rooms();
            match command {
                RoomsCommand::List => {
                    for name in rooms.names().context("Failed to list rooms")? {
                        println!("{}", name);
                    }
                }
                RoomsCommand::Demo { name } => {
                    let path = rooms
                        .save(&StateBlueprint::demo(name.as_str()))
                        .with_context(|| format!("Failed to save demo room '{}'", name))?;
                    println!("Saved {}", path.display());
                }
            }
        }
        Commands::Simulations { command } => match command {
            SimulationsCommand::List => {
                let simulations = session.simulations();
                for name in simulations.find_stored_simulations().context("Failed to list simulations")? {
                    match simulations.read_stored_config(&name) {
                        Ok(stored) => println!(
                            "{:<24} room {:<16} {} x {}s",
                            name,
                            stored.room_name,
                            stored.step_limit.map_or("?".to_string(), |s| s.to_string()),
                            stored.step_time
                        ),
                        Err(e) => println!("{:<24} unreadable config: {}", name, e),
                    }
                }
            }
        },
        Commands::Platform { os_name, os_arch } => {
            let classifier = match os_name {
                Some(os_name) => {
                    platform::natives_classifier(&os_name, os_arch.as_deref().unwrap_or(""))?
                }
                None => platform::resolve_classifier(&session.config().platform)?,
            };
            println!("{}", classifier);
        }
    }

    Ok(())
}

/// Route panics through the logger before the default hook prints them
fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        log::error!("{}", info);
        default_hook(info);
    }));
}
