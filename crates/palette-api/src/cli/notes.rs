//! Progress notes viewer.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use palette_types::session::NoteView;

use crate::state::AppState;

/// Print the most recent progress notes for a child, newest first.
pub async fn show_notes(
    state: &AppState,
    child_id: i64,
    limit: Option<u32>,
    json: bool,
) -> Result<()> {
    let notes = state.notes_service.get_recent_notes(child_id, limit).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&notes)?);
        return Ok(());
    }

    if notes.is_empty() {
        println!();
        println!(
            "  {} No notes found for child {}",
            style("i").blue().bold(),
            style(child_id).cyan()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("ID").fg(Color::White),
        Cell::new("Created").fg(Color::White),
        Cell::new("Mood").fg(Color::White),
        Cell::new("Engagement").fg(Color::White),
        Cell::new("Note").fg(Color::White),
    ]);

    for note in &notes {
        table.add_row(vec![
            Cell::new(note.id).fg(Color::Cyan),
            Cell::new(&note.created_at).fg(Color::DarkGrey),
            Cell::new(indicator(note, "emotional_state")),
            Cell::new(indicator(note, "art_engagement")),
            Cell::new(truncate(&note.text, 60)),
        ]);
    }

    println!();
    println!("{table}");
    println!();

    Ok(())
}

/// Render one progress indicator; strings print bare, anything else as JSON.
fn indicator(note: &NoteView, key: &str) -> String {
    match note.indicators.get(key) {
        None | Some(serde_json::Value::Null) => "-".to_string(),
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let head: String = text.chars().take(max_chars - 3).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn note(indicators: serde_json::Value) -> NoteView {
        NoteView {
            id: 1,
            text: "Drew a dragon".to_string(),
            indicators,
            created_at: "2026-01-01T00:00:00.000000Z".to_string(),
        }
    }

    #[test]
    fn test_indicator_rendering() {
        let n = note(json!({ "emotional_state": "calm", "art_engagement": 4, "x": null }));
        assert_eq!(indicator(&n, "emotional_state"), "calm");
        assert_eq!(indicator(&n, "art_engagement"), "4");
        assert_eq!(indicator(&n, "x"), "-");
        assert_eq!(indicator(&n, "missing"), "-");
    }

    #[test]
    fn test_truncate_counts_chars() {
        assert_eq!(truncate("short", 60), "short");
        assert_eq!(truncate("abcdefghij", 8), "abcde...");
        assert_eq!(truncate("ééééééééé", 5), "éé...");
    }
}
