//! Command line driver for the toroidal Game of Life

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use toroidal_life::{
    config::{CliOverrides, OutputFormat, Settings},
    game_of_life::{create_example_states, load_state},
    simulation::Session,
    utils::{ColorOutput, GridFormatter},
};

#[derive(Parser)]
#[command(name = "toroidal-life")]
#[command(about = "Conway's Game of Life on a wrapping board")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Advance a board for a number of generations
    Run {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Saved state to start from
        #[arg(short, long)]
        load: Option<PathBuf>,

        /// Write the final state here (overrides config)
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Board size (overrides config)
        #[arg(long)]
        size: Option<usize>,

        /// Survival digits, e.g. 23 (overrides config)
        #[arg(long)]
        survive: Option<String>,

        /// Birth digits, e.g. 3 (overrides config)
        #[arg(long)]
        born: Option<String>,

        /// Number of generations (overrides config)
        #[arg(short, long)]
        generations: Option<usize>,

        /// Milliseconds between generations (overrides config)
        #[arg(long)]
        tick_ms: Option<u64>,

        /// Sleep for the tick interval between generations
        #[arg(long)]
        paced: bool,

        /// What to print (overrides config)
        #[arg(short, long, value_enum)]
        output: Option<OutputArg>,
    },

    /// Create a default configuration and example saved states
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },

    /// Print a saved state
    Show {
        /// Saved state file
        path: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputArg {
    Text,
    Final,
    Quiet,
}

impl From<OutputArg> for OutputFormat {
    fn from(arg: OutputArg) -> Self {
        match arg {
            OutputArg::Text => OutputFormat::Text,
            OutputArg::Final => OutputFormat::Final,
            OutputArg::Quiet => OutputFormat::Quiet,
        }
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .compact()
            .init();
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            load,
            save,
            size,
            survive,
            born,
            generations,
            tick_ms,
            paced,
            output,
        } => {
            let overrides = CliOverrides {
                size,
                survive,
                born,
                generations,
                tick_ms,
                format: output.map(OutputFormat::from),
                save_path: save,
            };
            run_command(config, load, overrides, paced)
        }
        Commands::Setup { directory, force } => setup_command(directory, force),
        Commands::Show { path } => show_command(path),
    }
}

fn load_settings(config_path: &PathBuf) -> Result<Settings> {
    if config_path.exists() {
        Settings::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))
    } else {
        tracing::warn!(path = %config_path.display(), "config file not found, using defaults");
        Ok(Settings::default())
    }
}

fn run_command(
    config_path: PathBuf,
    load: Option<PathBuf>,
    overrides: CliOverrides,
    paced: bool,
) -> Result<()> {
    let mut settings = load_settings(&config_path)?;
    settings.merge_with_cli(&overrides);
    settings.validate().context("Configuration validation failed")?;

    let mut session = Session::from_settings(&settings)?;
    if let Some(path) = &load {
        session
            .load(path)
            .with_context(|| format!("Failed to load state from {}", path.display()))?;
    }

    let format = settings.output.format;
    if format == OutputFormat::Text {
        println!("{}", GridFormatter::format_summary(session.board()));
        println!("{}", GridFormatter::format_grid_compact(&session.board().snapshot()));
    }

    let pace = paced.then(|| session.tick_interval());
    let start = Instant::now();
    session.run(settings.simulation.generations, pace, |_, board| {
        if format == OutputFormat::Text {
            println!("{}", GridFormatter::format_summary(board));
            println!("{}", GridFormatter::format_grid_compact(&board.snapshot()));
        }
    });
    let elapsed: Duration = start.elapsed();

    if format == OutputFormat::Final {
        println!("{}", GridFormatter::format_grid_compact(&session.board().snapshot()));
    }
    println!("{}", GridFormatter::format_summary(session.board()));
    tracing::info!(
        generations = settings.simulation.generations,
        elapsed_ms = elapsed.as_millis() as u64,
        "run finished"
    );

    if let Some(path) = &settings.output.save_path {
        session
            .save(path)
            .with_context(|| format!("Failed to save state to {}", path.display()))?;
        println!("{}", ColorOutput::success(&format!("State saved to {}", path.display())));
    }

    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    let config_path = directory.join("config/default.yaml");
    let states_dir = directory.join("states");

    if !config_path.exists() || force {
        Settings::default()
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!(
            "{}",
            ColorOutput::warning(&format!("Skipped: {} (already exists)", config_path.display()))
        );
    }

    let size = Settings::default().board.size;
    let states = create_example_states(&states_dir, size, force)
        .context("Failed to create example states")?;
    for (path, created) in states {
        if created {
            println!("Created: {}", path.display());
        } else {
            println!(
                "{}",
                ColorOutput::warning(&format!("Skipped: {} (already exists)", path.display()))
            );
        }
    }

    println!("\n{}", ColorOutput::success("Setup complete!"));
    println!(
        "Try: toroidal-life run --load {} --output text --generations 8",
        states_dir.join("glider.json").display()
    );

    Ok(())
}

fn show_command(path: PathBuf) -> Result<()> {
    let state =
        load_state(&path).with_context(|| format!("Failed to read {}", path.display()))?;
    let grid = state.to_grid().context("Invalid grid")?;
    let rules = state.to_rules().context("Invalid rules")?;

    let title = format!(
        "{} ({}x{}, {})",
        path.display(),
        grid.width(),
        grid.height(),
        rules
    );
    println!("{}", ColorOutput::info(&title));
    println!("{}", GridFormatter::format_grid_with_coords(&grid));
    println!("Living cells: {}", grid.living_count());

    Ok(())
}
