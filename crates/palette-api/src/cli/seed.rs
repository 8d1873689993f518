//! Registry seeding command.

use anyhow::Result;
use console::style;

use crate::state::AppState;

/// Seed therapists and demo children from the persona catalog.
pub async fn seed(state: &AppState, json: bool) -> Result<()> {
    let report = state.seed_service.seed(state.engine.catalog()).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!();
    if report.skipped {
        println!(
            "  {} Database already seeded, nothing to do",
            style("i").blue().bold()
        );
    } else {
        println!(
            "  {} Seeded {} therapists and {} children",
            style("✓").green().bold(),
            style(report.therapists_created).bold(),
            style(report.children_created).bold()
        );
    }
    println!(
        "  {}",
        style(format!("Data dir: {}", state.data_dir.display())).dim()
    );
    println!();

    Ok(())
}
