use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use td_mechanics::STANDARD_DIE_FACES;
use td_simulation::SimConfig;

pub fn run(
    faces: &[u32],
    seed: Option<u64>,
    width: f32,
    height: f32,
    json: bool,
) -> Result<(), String> {
    let faces = if faces.is_empty() {
        vec![STANDARD_DIE_FACES]
    } else {
        faces.to_vec()
    };
    if let Some(bad) = faces.iter().find(|&&f| f < 2) {
        return Err(format!("dice need at least 2 faces, got {bad}"));
    }

    let mut config = SimConfig::default().with_surface(width, height);
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }
    let thrown = super::throw_dice(&faces, config)?;

    if json {
        let json = serde_json::to_string(&thrown.faces)
            .map_err(|e| format!("failed to serialize faces: {e}"))?;
        println!("{json}");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Die", "Faces", "Result"]);
    for (i, (sides, value)) in faces.iter().zip(&thrown.faces).enumerate() {
        table.add_row(vec![
            (i + 1).to_string(),
            format!("d{sides}"),
            value.to_string(),
        ]);
    }
    println!("{table}");

    let sum: u64 = thrown.faces.iter().map(|&f| u64::from(f)).sum();
    println!("  {} {}", "Sum".bold(), sum.to_string().green().bold());
    println!(
        "  {}",
        format!(
            "settled after {} frames ({:.2}s)",
            thrown.frames, thrown.elapsed
        )
        .dimmed()
    );
    Ok(())
}
