pub mod custom;
pub mod roll;
pub mod throw;

use clap::Args;
use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use rand::SeedableRng;
use rand::rngs::StdRng;

use td_mechanics::{RollHistory, RollRequest, RollResult, resolve};
use td_simulation::{DiceSimulator, SimConfig, TickOutcome};

/// Frames a headless throw may take before giving up.
const MAX_FRAMES: usize = 20_000;

/// Options shared by every command that resolves a roll.
#[derive(Args)]
pub struct RollArgs {
    /// Face values to use instead of rolling, comma separated, in draw order
    #[arg(long, value_delimiter = ',', conflicts_with = "physical")]
    pub faces: Vec<u32>,

    /// Throw the dice on the simulated table instead of drawing them instantly
    #[arg(short, long)]
    pub physical: bool,

    /// RNG seed for reproducible rolls
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of times to roll
    #[arg(short = 'n', long, default_value_t = 1)]
    pub times: usize,

    /// Print the results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Faces from a finished headless throw.
pub struct Thrown {
    pub faces: Vec<u32>,
    pub frames: usize,
    pub elapsed: f64,
}

/// Throw every die at once and step the simulation until they all settle.
pub fn throw_dice(faces: &[u32], config: SimConfig) -> Result<Thrown, String> {
    config
        .validate()
        .map_err(|e| format!("invalid table: {e}"))?;
    let frame_time = config.frame_time;

    let mut sim = DiceSimulator::new(config, faces);
    sim.fling_all();
    for frame in 1..=MAX_FRAMES {
        match sim.update(frame_time) {
            TickOutcome::Pending => continue,
            TickOutcome::Complete(faces) => {
                return Ok(Thrown {
                    faces,
                    frames: frame,
                    elapsed: sim.clock(),
                });
            }
            TickOutcome::Closed => break,
        }
    }
    sim.cancel();
    Err(format!("dice still rolling after {MAX_FRAMES} frames"))
}

fn rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Resolve `request` as many times as asked, then print the results.
fn execute(request: RollRequest, args: &RollArgs) -> Result<(), String> {
    if args.times == 0 {
        return Err("--times must be at least 1".into());
    }

    let mut rng = rng(args.seed);
    let mut history = RollHistory::default();
    let mut totals = Vec::with_capacity(args.times);
    let mut crits = 0;
    let dice = request.die_faces();

    for i in 0..args.times {
        let request = if !args.faces.is_empty() {
            request.clone().with_faces(args.faces.clone())
        } else if args.physical {
            let mut config = SimConfig::default();
            if let Some(seed) = args.seed {
                config = config.with_seed(seed.wrapping_add(i as u64));
            }
            let thrown = throw_dice(&dice, config)?;
            request.clone().with_faces(thrown.faces)
        } else {
            request.clone()
        };

        let result = resolve(&request, &mut rng);
        totals.push(result.total());
        crits += usize::from(result.is_critical());
        history.push(request.label(), result);
    }

    if args.json {
        let json = serde_json::to_string_pretty(history.entries())
            .map_err(|e| format!("failed to serialize results: {e}"))?;
        println!("{json}");
        return Ok(());
    }

    match history.latest() {
        Some(entry) if args.times == 1 => print_result(&entry.label, &entry.result),
        _ => print_summary(&history, &totals, crits),
    }
    Ok(())
}

fn print_result(label: &str, result: &RollResult) {
    let dice: Vec<String> = result.raw_dice().iter().map(u32::to_string).collect();
    println!(
        "  {} {}",
        label.bold(),
        format!("[{}]", dice.join(", ")).dimmed()
    );
    for line in result.breakdown_lines() {
        println!("    {line}");
    }
    let total = result.total().to_string();
    if result.is_critical() {
        println!("  Total {} {}", total.green().bold(), "CRIT".red().bold());
    } else {
        println!("  Total {}", total.green().bold());
    }
}

fn print_summary(history: &RollHistory, totals: &[i64], crits: usize) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Roll", "Dice", "Total", "Crit"]);

    let skipped = totals.len() - history.len();
    for (i, entry) in history.entries().iter().enumerate() {
        let dice: Vec<String> = entry.result.raw_dice().iter().map(u32::to_string).collect();
        table.add_row(vec![
            (skipped + i + 1).to_string(),
            entry.label.clone(),
            dice.join(", "),
            entry.result.total().to_string(),
            if entry.result.is_critical() {
                "yes".into()
            } else {
                String::new()
            },
        ]);
    }
    println!("{table}");

    if skipped > 0 {
        println!(
            "  {}",
            format!("showing the last {} of {} rolls", history.len(), totals.len()).dimmed()
        );
    }

    let min = totals.iter().min().copied().unwrap_or(0);
    let max = totals.iter().max().copied().unwrap_or(0);
    let mean = totals.iter().sum::<i64>() as f64 / totals.len().max(1) as f64;
    println!(
        "  {} rolls, min {min}, max {max}, average {mean:.2}, {crits} crit{}",
        totals.len(),
        if crits == 1 { "" } else { "s" },
    );
}
