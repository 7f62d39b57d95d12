use serde::{Deserialize, Serialize};

use crate::domain::{Creature, CreatureId, GameStats, RoundState};

/// Raw catalog document for one creature. Only the fields the game reads are modelled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogCreaturePayload {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub sprites: Option<SpritesPayload>,
    #[serde(default)]
    pub types: Vec<TypeSlotPayload>,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub weight: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpritesPayload {
    #[serde(default)]
    pub other: Option<OtherSpritesPayload>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OtherSpritesPayload {
    #[serde(default, rename = "official-artwork")]
    pub official_artwork: Option<ArtworkPayload>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArtworkPayload {
    #[serde(default)]
    pub front_default: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeSlotPayload {
    #[serde(default)]
    pub slot: u32,
    #[serde(rename = "type")]
    pub kind: NamedResourcePayload,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedResourcePayload {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl CatalogCreaturePayload {
    pub fn artwork_url(&self) -> Option<&str> {
        self.sprites
            .as_ref()?
            .other
            .as_ref()?
            .official_artwork
            .as_ref()?
            .front_default
            .as_deref()
    }

    pub fn into_creature(self) -> Creature {
        let image_url = self.artwork_url().map(str::to_owned);
        Creature {
            id: CreatureId(self.id),
            name: self.name,
            image_url,
            types: self.types.into_iter().map(|slot| slot.kind.name).collect(),
            height: self.height,
            weight: self.weight,
        }
    }
}

impl From<CatalogCreaturePayload> for Creature {
    fn from(value: CatalogCreaturePayload) -> Self {
        value.into_creature()
    }
}

/// Read-side view of a round controller, taken on every presentation refresh.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoundSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creature: Option<Creature>,
    pub loading: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// `None` until the first round has loaded, and again while a new one is loading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<RoundState>,
    pub stats: GameStats,
}

impl RoundSnapshot {
    pub fn is_playable(&self) -> bool {
        self.creature.is_some() && self.state == Some(RoundState::Playing)
    }
}
