//! ---
//! mv_section: "05-networking-external-interfaces"
//! mv_subsection: "binary"
//! mv_type: "source"
//! mv_scope: "code"
//! mv_description: "Goal map rendering for the control CLI."
//! mv_version: "v0.1.0"
//! mv_owner: "tbd"
//! ---
use std::collections::BTreeMap;

use anyhow::{Context, Result};
use clap::Args;
use megaverse_api::{Cell, EntityKind, GoalMap, MegaverseApi};
use megaverse_common::config::AppConfig;
use strum::IntoEnumIterator;
use tokio::runtime::Runtime;

/// Options for `goal`.
#[derive(Debug, Args)]
pub struct GoalOptions {
    /// Print the raw cell labels instead of one glyph per cell.
    #[arg(long)]
    pub raw: bool,
}

pub fn run(options: &GoalOptions, config: &AppConfig) -> Result<()> {
    let client = crate::build_client(config)?;
    let runtime = Runtime::new()?;
    let goal = runtime
        .block_on(client.goal_map())
        .context("error fetching goal map")?;
    for line in render(&goal, options.raw) {
        println!("{}", line);
    }
    Ok(())
}

fn render(goal: &GoalMap, raw: bool) -> Vec<String> {
    let mut lines: Vec<String> = goal
        .goal
        .iter()
        .map(|row| {
            if raw {
                row.join(" ")
            } else {
                row.iter().map(|label| glyph(label)).collect()
            }
        })
        .collect();

    let mut counts: BTreeMap<EntityKind, usize> = BTreeMap::new();
    let mut unknown = 0;
    for (_, label) in goal.cells() {
        match label.parse::<Cell>() {
            Ok(cell) => {
                if let Some(kind) = cell.kind() {
                    *counts.entry(kind).or_insert(0) += 1;
                }
            }
            Err(reason) => match reason.kind() {
                Some(kind) => *counts.entry(kind).or_insert(0) += 1,
                None => unknown += 1,
            },
        }
    }

    lines.push(String::new());
    let mut footer: Vec<String> = EntityKind::iter()
        .map(|kind| format!("{}: {}", kind.plural(), counts.get(&kind).copied().unwrap_or(0)))
        .collect();
    if unknown > 0 {
        footer.push(format!("Unrecognised: {}", unknown));
    }
    footer.push(format!("{}x{}", goal.rows(), goal.columns()));
    lines.push(footer.join(", "));
    lines
}

fn glyph(label: &str) -> char {
    match label.parse::<Cell>() {
        Ok(Cell::Space) => '.',
        Ok(Cell::Polyanet) => 'P',
        Ok(Cell::Soloon(_)) => 'S',
        Ok(Cell::Cometh(_)) => 'C',
        // Known kind with an unknown colour or direction.
        Err(reason) => match reason.kind() {
            Some(EntityKind::Soloon) => 's',
            Some(EntityKind::Cometh) => 'c',
            Some(EntityKind::Polyanet) | None => '?',
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> GoalMap {
        GoalMap {
            goal: vec![
                vec!["POLYANET".into(), "SPACE".into(), "RED_SOLOON".into()],
                vec!["UP_COMETH".into(), "ASTEROID".into()],
            ],
        }
    }

    #[test]
    fn glyphs_cover_every_shape() {
        assert_eq!(glyph("SPACE"), '.');
        assert_eq!(glyph("POLYANET"), 'P');
        assert_eq!(glyph("WHITE_SOLOON"), 'S');
        assert_eq!(glyph("LEFT_COMETH"), 'C');
        assert_eq!(glyph("GREEN_SOLOON"), 's');
        assert_eq!(glyph("SIDEWAYS_COMETH"), 'c');
        assert_eq!(glyph("ASTEROID"), '?');
    }

    #[test]
    fn render_prints_grid_and_footer() {
        let lines = render(&sample(), false);
        assert_eq!(lines[0], "P.S");
        assert_eq!(lines[1], "C?");
        assert_eq!(lines[2], "");
        assert_eq!(
            lines[3],
            "Polyanets: 1, Soloons: 1, Comeths: 1, Unrecognised: 1, 2x3"
        );
    }

    #[test]
    fn raw_render_keeps_labels() {
        let lines = render(&sample(), true);
        assert_eq!(lines[0], "POLYANET SPACE RED_SOLOON");
    }
}
