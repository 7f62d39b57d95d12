use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub u32);
    };
}

id_newtype!(CreatureId);

impl std::fmt::Display for CreatureId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Catalog record fetched for one round. Never mutated once a round starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creature {
    pub id: CreatureId,
    /// Canonical lowercase name; the secret the player guesses.
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub types: Vec<String>,
    /// Tenths of a meter.
    pub height: u32,
    /// Tenths of a kilogram.
    pub weight: u32,
}

impl Creature {
    pub fn height_meters(&self) -> f64 {
        f64::from(self.height) / 10.0
    }

    pub fn weight_kilograms(&self) -> f64 {
        f64::from(self.weight) / 10.0
    }

    pub fn region(&self) -> Region {
        Region::for_id(self.id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    Kanto,
    Johto,
    Hoenn,
    Sinnoh,
    Unova,
    Kalos,
    Alola,
    Galar,
    Paldea,
}

impl Region {
    pub fn for_id(id: CreatureId) -> Self {
        match id.0 {
            0..=151 => Self::Kanto,
            152..=251 => Self::Johto,
            252..=386 => Self::Hoenn,
            387..=493 => Self::Sinnoh,
            494..=649 => Self::Unova,
            650..=721 => Self::Kalos,
            722..=809 => Self::Alola,
            810..=905 => Self::Galar,
            _ => Self::Paldea,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Kanto => "Kanto",
            Self::Johto => "Johto",
            Self::Hoenn => "Hoenn",
            Self::Sinnoh => "Sinnoh",
            Self::Unova => "Unova",
            Self::Kalos => "Kalos",
            Self::Alola => "Alola",
            Self::Galar => "Galar",
            Self::Paldea => "Paldea",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundState {
    Playing,
    Correct,
    Wrong,
}

impl RoundState {
    pub fn is_resolved(self) -> bool {
        !matches!(self, Self::Playing)
    }
}

/// Session scoreboard. `correct + wrong == total` holds after every update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStats {
    pub total: u32,
    pub correct: u32,
    pub wrong: u32,
    pub streak: u32,
    pub best_streak: u32,
}

impl GameStats {
    /// Applies one resolved attempt. Surrenders are recorded as `correct = false`.
    pub fn record_attempt(&mut self, correct: bool) {
        self.total += 1;
        if correct {
            self.correct += 1;
            self.streak += 1;
            self.best_streak = self.best_streak.max(self.streak);
        } else {
            self.wrong += 1;
            self.streak = 0;
        }
    }
}
