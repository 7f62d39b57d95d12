//! Line input to player intents.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerCommand {
    Guess(String),
    ToggleHints,
    GiveUp,
    NextRound,
    ShowStats,
    Quit,
    /// Bare Enter: starts the next round once the current one is over.
    Continue,
}

pub fn parse_command(line: &str) -> PlayerCommand {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return PlayerCommand::Continue;
    }
    match trimmed.to_ascii_lowercase().as_str() {
        "/hint" | "/hints" => PlayerCommand::ToggleHints,
        "/giveup" | "/give-up" | "/reveal" => PlayerCommand::GiveUp,
        "/next" | "/new" => PlayerCommand::NextRound,
        "/stats" => PlayerCommand::ShowStats,
        "/quit" | "/exit" => PlayerCommand::Quit,
        _ => PlayerCommand::Guess(trimmed.to_string()),
    }
}
