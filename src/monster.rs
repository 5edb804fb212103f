// Monster catalog and ownership model.
//
// Type and rarity travel as their short codes ("F&D", "C", ...). Codes this
// build does not know about deserialize to `Unknown` so a newer catalog never
// breaks scoring.

use serde::{Deserialize, Serialize};

/// Highest level an owned monster can reach.
pub const MAX_LEVEL: u32 = 99;

/// Monster type codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MonsterType {
    #[serde(rename = "F&D")]
    FoodAndDrink,
    #[serde(rename = "HWB")]
    HealthAndWellbeing,
    /// Legacy split code, never triggers the wellbeing synergy.
    #[serde(rename = "H")]
    Health,
    /// Legacy split code, never triggers the wellbeing synergy.
    #[serde(rename = "WB")]
    Wellbeing,
    #[serde(rename = "W")]
    Water,
    #[serde(rename = "WA")]
    Waste,
    #[serde(rename = "N&B")]
    NatureAndBiodiversity,
    #[serde(rename = "E")]
    Energy,
    #[serde(rename = "T")]
    Transport,
    #[default]
    #[serde(other)]
    Unknown,
}

impl MonsterType {
    pub const ALL: [MonsterType; 9] = [
        MonsterType::FoodAndDrink,
        MonsterType::HealthAndWellbeing,
        MonsterType::Health,
        MonsterType::Wellbeing,
        MonsterType::Water,
        MonsterType::Waste,
        MonsterType::NatureAndBiodiversity,
        MonsterType::Energy,
        MonsterType::Transport,
    ];

    /// Parse a type code. Unrecognised codes map to `Unknown`.
    pub fn from_code(code: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|t| t.code() == code)
            .unwrap_or(MonsterType::Unknown)
    }

    pub fn code(self) -> &'static str {
        match self {
            MonsterType::FoodAndDrink => "F&D",
            MonsterType::HealthAndWellbeing => "HWB",
            MonsterType::Health => "H",
            MonsterType::Wellbeing => "WB",
            MonsterType::Water => "W",
            MonsterType::Waste => "WA",
            MonsterType::NatureAndBiodiversity => "N&B",
            MonsterType::Energy => "E",
            MonsterType::Transport => "T",
            MonsterType::Unknown => "?",
        }
    }

    /// Human-readable label shown on monster cards.
    pub fn label(self) -> &'static str {
        match self {
            MonsterType::FoodAndDrink => "Food and Drink",
            MonsterType::HealthAndWellbeing => "Health and Wellbeing",
            MonsterType::Health => "Health",
            MonsterType::Wellbeing => "Wellbeing",
            MonsterType::Water => "Water",
            MonsterType::Waste => "Waste",
            MonsterType::NatureAndBiodiversity => "Nature and Biodiversity",
            MonsterType::Energy => "Energy",
            MonsterType::Transport => "Transport",
            MonsterType::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for MonsterType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Monster rarity. Only affects collection rolls and display, never the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Rarity {
    #[serde(rename = "C")]
    Common,
    #[serde(rename = "R")]
    Rare,
    #[serde(rename = "E")]
    Epic,
    #[serde(rename = "L")]
    Legendary,
    #[default]
    #[serde(other)]
    Unknown,
}

impl Rarity {
    pub fn code(self) -> &'static str {
        match self {
            Rarity::Common => "C",
            Rarity::Rare => "R",
            Rarity::Epic => "E",
            Rarity::Legendary => "L",
            Rarity::Unknown => "?",
        }
    }

    /// Display label. Unknown rarities show as common.
    pub fn label(self) -> &'static str {
        match self {
            Rarity::Common | Rarity::Unknown => "Common",
            Rarity::Rare => "Rare",
            Rarity::Epic => "Epic",
            Rarity::Legendary => "Legendary",
        }
    }
}

/// Catalog definition of a monster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Monster {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: MonsterType,
    #[serde(default)]
    pub rarity: Rarity,
}

impl Monster {
    pub fn new(id: i64, name: &str, kind: MonsterType, rarity: Rarity) -> Self {
        Self {
            id,
            name: name.to_string(),
            kind,
            rarity,
        }
    }
}

/// A monster owned by a player. `id` is the ownership record, not the catalog id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnedMonster {
    pub id: i64,
    pub level: u32,
    pub monster: Monster,
}

impl OwnedMonster {
    pub fn new(id: i64, level: u32, monster: Monster) -> Self {
        Self { id, level, monster }
    }

    pub fn kind(&self) -> MonsterType {
        self.monster.kind
    }

    /// Raise the level by `amount`, stopping at `cap` (clamped to `MAX_LEVEL`).
    /// Levels never go down.
    pub fn increment_level(&mut self, amount: u32, cap: u32) {
        let cap = cap.min(MAX_LEVEL).max(self.level);
        self.level = self.level.saturating_add(amount).min(cap);
    }
}
