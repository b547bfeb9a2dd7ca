//! Terminal host for the tabledice roller.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use commands::RollArgs;

#[derive(Parser)]
#[command(
    name = "td",
    about = "Tabledice: roll and resolve tabletop dice from the terminal",
    version,
    propagate_version = true
)]
struct Cli {
    /// Log debug output to stderr (overrides TD_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Standard check: attribute + skill + d6 + bonus, a 6 doubles the attribute
    Roll {
        /// Label shown for the attribute
        #[arg(short, long, default_value = "Check")]
        label: String,

        /// Attribute value
        #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
        attribute: i32,

        /// Skill value
        #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
        skill: i32,

        /// Situational bonus
        #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
        bonus: i32,

        #[command(flatten)]
        roll: RollArgs,
    },

    /// Composite roll from dice notation or a JSON definition
    Custom {
        /// Dice formula, e.g. "2d6! - 1d4 + 3"
        #[arg(
            required_unless_present = "file",
            conflicts_with = "file",
            allow_hyphen_values = true
        )]
        formula: Option<String>,

        /// Read the roll definition from a JSON file
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Name of the roll
        #[arg(long)]
        name: Option<String>,

        /// Attribute multiplied by crits
        #[arg(long)]
        primary: Option<String>,

        /// Attribute added without multiplying
        #[arg(long)]
        secondary: Option<String>,

        /// Every crit adds another multiple of the primary attribute
        #[arg(long)]
        accumulate: bool,

        /// Attribute value as KEY=VALUE (repeatable)
        #[arg(long = "attr", value_name = "KEY=VALUE", value_parser = commands::custom::parse_attribute)]
        attributes: Vec<(String, i32)>,

        #[command(flatten)]
        roll: RollArgs,
    },

    /// Throw dice on a simulated table and report the faces they land on
    Throw {
        /// Faces per die, one entry per die (default: a single d6)
        faces: Vec<u32>,

        /// RNG seed for a reproducible throw
        #[arg(long)]
        seed: Option<u64>,

        /// Table width
        #[arg(long, default_value_t = 800.0)]
        width: f32,

        /// Table height
        #[arg(long, default_value_t = 600.0)]
        height: f32,

        /// Print the faces as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("TD_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Roll {
            label,
            attribute,
            skill,
            bonus,
            roll,
        } => commands::roll::run(&label, attribute, skill, bonus, &roll),
        Commands::Custom {
            formula,
            file,
            name,
            primary,
            secondary,
            accumulate,
            attributes,
            roll,
        } => commands::custom::run(
            commands::custom::Definition {
                formula: formula.as_deref(),
                file: file.as_deref(),
                name: name.as_deref(),
                primary: primary.as_deref(),
                secondary: secondary.as_deref(),
                accumulate,
            },
            attributes,
            &roll,
        ),
        Commands::Throw {
            faces,
            seed,
            width,
            height,
            json,
        } => commands::throw::run(&faces, seed, width, height, json),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
