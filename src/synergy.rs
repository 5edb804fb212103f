// Synergy descriptions for the team preview.
//
// Display only: the numeric score always comes from `scoring::compute_score`.

use serde::{Deserialize, Serialize};

use crate::monster::{MonsterType, OwnedMonster};
use crate::scoring::{BIODIVERSITY_MULTIPLIER, MAX_TEAM_SIZE, WATER_MULTIPLIER, WELLBEING_BONUS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SynergyKind {
    Water,
    Energy,
    FoodRecycling,
    Waste,
    Biodiversity,
    Wellbeing,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Synergy {
    pub kind: SynergyKind,
    pub name: String,
    pub description: String,
    /// Flat points the synergy adds, when it adds any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bonus: Option<u32>,
}

impl Synergy {
    fn new(kind: SynergyKind, name: &str, description: String) -> Self {
        Self {
            kind,
            name: name.to_string(),
            description,
            bonus: None,
        }
    }
}

/// List the synergies a team triggers, in scoring order.
pub fn describe_synergies(team: &[OwnedMonster]) -> Vec<Synergy> {
    let size = team.len();
    let count = |kind: MonsterType| team.iter().filter(|m| m.kind() == kind).count();
    let mut synergies = Vec::new();

    if count(MonsterType::Water) > 0 {
        let multiplier = (WATER_MULTIPLIER * MAX_TEAM_SIZE.saturating_sub(size) as f64).max(1.0);
        synergies.push(Synergy::new(
            SynergyKind::Water,
            "Water Multiplier",
            format!("Water adds a {multiplier:.2}x multiplier with {size} monsters"),
        ));
    }

    let energy = count(MonsterType::Energy);
    if energy > 0 && size < MAX_TEAM_SIZE {
        synergies.push(Synergy::new(
            SynergyKind::Energy,
            "Energy Boost",
            format!("{energy} Energy card(s) doubled when less than 5 monsters"),
        ));
    }

    let waste = count(MonsterType::Waste);
    let food = count(MonsterType::FoodAndDrink);
    if waste > 0 && food > 0 {
        synergies.push(Synergy::new(
            SynergyKind::FoodRecycling,
            "Food Recycling",
            format!("{food} Food & Drink card(s) doubled with Waste"),
        ));
    }

    if waste > 0 {
        synergies.push(Synergy::new(
            SynergyKind::Waste,
            "Waste Management",
            format!("{waste} Waste card(s) replace lowest levels"),
        ));
    }

    if count(MonsterType::NatureAndBiodiversity) > 0 {
        let multiplier = BIODIVERSITY_MULTIPLIER.powf(size as f64);
        synergies.push(Synergy::new(
            SynergyKind::Biodiversity,
            "Biodiversity Multiplier",
            format!("Nature & Biodiversity multiplies score by {multiplier:.2}"),
        ));
    }

    if count(MonsterType::HealthAndWellbeing) > 0 {
        let bonus = size as u32 * WELLBEING_BONUS;
        let mut synergy = Synergy::new(
            SynergyKind::Wellbeing,
            "Wellbeing Bonus",
            format!("Wellbeing adds +{bonus} to score"),
        );
        synergy.bonus = Some(bonus);
        synergies.push(synergy);
    }

    synergies
}
