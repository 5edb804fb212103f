// Team scoring engine for monster challenges.
//
// Synergies run in a fixed order and each one sees the level mutations of the
// ones before it. The result must match the authoritative backend calculation.

use std::collections::HashSet;

use crate::monster::{MonsterType, OwnedMonster};

pub const MAX_TEAM_SIZE: usize = 5;

pub const WATER_MULTIPLIER: f64 = 1.5;
pub const BIODIVERSITY_MULTIPLIER: f64 = 1.2;
pub const WELLBEING_BONUS: u32 = 20;

/// Intermediate values of a scoring pass, after every synergy has run.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBreakdown {
    /// Contributing levels after energy, food and waste adjustments.
    pub levels: Vec<u32>,
    pub multiplier: f64,
    /// Flat points added before the multiplier.
    pub bonus: u64,
    pub score: u32,
}

/// A team is playable when it has 1..=5 members and no ownership id twice.
pub fn validate_team(team: &[OwnedMonster]) -> bool {
    if team.is_empty() || team.len() > MAX_TEAM_SIZE {
        return false;
    }
    let mut seen = HashSet::with_capacity(team.len());
    team.iter().all(|m| seen.insert(m.id))
}

/// Score a team. Invalid teams score 0. Out-of-range levels saturate at `u32::MAX`.
pub fn compute_score(team: &[OwnedMonster]) -> u32 {
    evaluate(team).map(|b| b.score).unwrap_or(0)
}

/// Run the full scoring pass, or `None` when the team fails validation.
pub fn evaluate(team: &[OwnedMonster]) -> Option<ScoreBreakdown> {
    if !validate_team(team) {
        return None;
    }

    let size = team.len();
    let has = |kind: MonsterType| team.iter().any(|m| m.kind() == kind);
    let mut levels: Vec<u32> = team.iter().map(|m| m.level).collect();
    let mut multiplier = 1.0_f64;
    let mut bonus: u64 = 0;

    // Water rewards smaller teams.
    if has(MonsterType::Water) {
        multiplier = (WATER_MULTIPLIER * (MAX_TEAM_SIZE - size) as f64).max(1.0);
    }

    if has(MonsterType::Energy) && size < MAX_TEAM_SIZE {
        double_by_value(&mut levels, team, MonsterType::Energy);
    }

    if has(MonsterType::Waste) && has(MonsterType::FoodAndDrink) {
        double_by_value(&mut levels, team, MonsterType::FoodAndDrink);
    }

    // Each waste monster swaps out the weakest contributor for its own level.
    if has(MonsterType::Waste) {
        for waste in team.iter().filter(|m| m.kind() == MonsterType::Waste) {
            replace_lowest(&mut levels, waste.level);
        }
    }

    if has(MonsterType::NatureAndBiodiversity) {
        multiplier *= BIODIVERSITY_MULTIPLIER.powf(size as f64);
    }

    if has(MonsterType::HealthAndWellbeing) {
        bonus += size as u64 * u64::from(WELLBEING_BONUS);
    }

    let total = bonus + levels.iter().map(|&l| u64::from(l)).sum::<u64>();
    let score = (total as f64 * multiplier).floor() as u32;

    Some(ScoreBreakdown {
        levels,
        multiplier,
        bonus,
        score,
    })
}

/// Double the slot holding each matching monster's level.
///
/// Slots are found by value (first equal entry), not by team position, to stay
/// in step with the backend. Missing values are skipped.
fn double_by_value(levels: &mut [u32], team: &[OwnedMonster], kind: MonsterType) {
    for member in team.iter().filter(|m| m.kind() == kind) {
        if let Some(slot) = levels.iter().position(|&l| l == member.level) {
            levels[slot] = member.level.saturating_mul(2);
        }
    }
}

/// Remove the first occurrence of the minimum and append `level`.
fn replace_lowest(levels: &mut Vec<u32>, level: u32) {
    let min_slot = levels
        .iter()
        .enumerate()
        .min_by_key(|&(i, &l)| (l, i))
        .map(|(i, _)| i);
    if let Some(slot) = min_slot {
        levels.remove(slot);
    }
    levels.push(level);
}
