//! Turns controller snapshots into terminal text.

use std::fmt::Write as _;

use shared::{
    domain::{Creature, GameStats, RoundState},
    protocol::RoundSnapshot,
};

use crate::labels::Labels;

const MYSTERY: &str = "???";

/// Presentation-only state; the controller never sees it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ViewState {
    pub show_hints: bool,
}

pub fn describe_load_failure(message: &str, labels: &Labels) -> String {
    let lower = message.to_ascii_lowercase();
    if lower.contains("after") && lower.contains("attempts") {
        labels.exhausted.to_string()
    } else if lower.contains("error sending request")
        || lower.contains("connection refused")
        || lower.contains("dns")
        || lower.contains("timed out")
    {
        labels.unreachable.to_string()
    } else {
        format!("{}: {message}", labels.error_prefix)
    }
}

pub fn render_stats(stats: &GameStats, labels: &Labels) -> String {
    format!(
        "{}: {} | {}: {} | {}: {} | {}: {}",
        labels.total,
        stats.total,
        labels.correct,
        stats.correct,
        labels.streak,
        stats.streak,
        labels.best_streak,
        stats.best_streak
    )
}

pub fn render(snapshot: &RoundSnapshot, view: ViewState, labels: &Labels) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {} ==", labels.title);
    let _ = writeln!(out, "{}", render_stats(&snapshot.stats, labels));

    if snapshot.loading {
        let _ = writeln!(out, "{}", labels.loading);
        return out;
    }

    if let Some(error) = &snapshot.error {
        let _ = writeln!(out, "{}", describe_load_failure(error, labels));
        let _ = writeln!(out, "{}", labels.retry);
        return out;
    }

    let (Some(creature), Some(state)) = (&snapshot.creature, snapshot.state) else {
        return out;
    };

    let revealed = state.is_resolved();
    let show_hints = view.show_hints || revealed;

    if revealed {
        let _ = writeln!(out, "{} (#{})", creature.name.to_uppercase(), creature.id);
        if let Some(url) = &creature.image_url {
            let _ = writeln!(out, "{url}");
        }
    } else {
        let _ = writeln!(out, "{}", labels.question);
        let _ = writeln!(out, "{}", labels.silhouette);
    }
    let _ = writeln!(
        out,
        "{} {}",
        labels.region,
        (labels.region_name)(creature.region())
    );
    render_hints(&mut out, creature, show_hints, labels);

    match state {
        RoundState::Playing => {
            let _ = writeln!(out, "{}", labels.hint_playing);
            let _ = writeln!(out, "{}", labels.controls);
        }
        RoundState::Correct => {
            let _ = writeln!(out, "{}", labels.hint_revealed);
            let _ = writeln!(out, "{} {}", labels.correct_title, labels.correct_message);
            let _ = writeln!(out, "{}", labels.new_round);
        }
        RoundState::Wrong => {
            let _ = writeln!(out, "{}", labels.hint_revealed);
            let _ = writeln!(
                out,
                "{} {}{}{}",
                labels.wrong_title,
                labels.wrong_message_prefix,
                creature.name,
                labels.wrong_message_suffix
            );
            let _ = writeln!(out, "{}", labels.new_round);
        }
    }
    out
}

fn render_hints(out: &mut String, creature: &Creature, show: bool, labels: &Labels) {
    let types = if !show || creature.types.is_empty() {
        MYSTERY.to_string()
    } else {
        creature.types.join(", ")
    };
    let (height, weight) = if show {
        (
            format!("{:.1} m", creature.height_meters()),
            format!("{:.1} kg", creature.weight_kilograms()),
        )
    } else {
        (MYSTERY.to_string(), MYSTERY.to_string())
    };
    let _ = writeln!(
        out,
        "{}: {types} | {}: {height} | {}: {weight}",
        labels.type_label, labels.height_label, labels.weight_label
    );
}
