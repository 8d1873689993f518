//! Persona catalog listing.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use crate::state::AppState;

/// List every persona with its condition, preferred art form, and therapist match.
pub fn list_personas(state: &AppState, json: bool) -> Result<()> {
    let catalog = state.engine.catalog();

    if json {
        let entries: Vec<serde_json::Value> = catalog
            .personas()
            .into_iter()
            .map(|p| {
                serde_json::json!({
                    "id": p.id,
                    "condition": p.condition,
                    "preferred_art": p.preferred_art,
                    "responses": p.responses.len(),
                    "therapist": state.engine.match_therapist(p.id.as_str()),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Persona").fg(Color::White),
        Cell::new("Condition").fg(Color::White),
        Cell::new("Art").fg(Color::White),
        Cell::new("Therapist").fg(Color::White),
        Cell::new("Score").fg(Color::White),
    ]);

    for persona in catalog.personas() {
        let (therapist, score) = match state.engine.match_therapist(persona.id.as_str()) {
            Some(m) => {
                let color = if m.art_match { Color::Green } else { Color::Yellow };
                (Cell::new(m.name), Cell::new(m.match_score).fg(color))
            }
            None => (
                Cell::new("no match").fg(Color::Red),
                Cell::new("-").fg(Color::DarkGrey),
            ),
        };

        table.add_row(vec![
            Cell::new(persona.id).fg(Color::Cyan),
            Cell::new(&persona.condition),
            Cell::new(&persona.preferred_art),
            therapist,
            score,
        ]);
    }

    println!();
    println!(
        "  {} {} personas",
        style("🎨").bold(),
        catalog.personas().len()
    );
    println!("{table}");
    println!();

    Ok(())
}
