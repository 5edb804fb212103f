// Player monster roster and random monster collection.

use rand::Rng;
use thiserror::Error;
use tracing::info;

use crate::metrics;
use crate::monster::{Monster, MonsterType, OwnedMonster, Rarity, MAX_LEVEL};

/// Rarity roll weights; must sum to 1.
pub const RARITY_WEIGHTS: [(Rarity, f64); 4] = [
    (Rarity::Common, 0.60),
    (Rarity::Rare, 0.25),
    (Rarity::Epic, 0.10),
    (Rarity::Legendary, 0.05),
];

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CollectionError {
    #[error("Invalid monster type: {0}")]
    UnknownType(String),
    #[error("no {rarity} monster of type {kind} in the catalog")]
    NoMonsterForRarity { kind: String, rarity: String },
}

/// All monster definitions the game knows about.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    monsters: Vec<Monster>,
}

impl Catalog {
    pub fn new(monsters: Vec<Monster>) -> Self {
        Self { monsters }
    }

    pub fn monsters(&self) -> &[Monster] {
        &self.monsters
    }

    pub fn has_type(&self, kind: MonsterType) -> bool {
        self.monsters.iter().any(|m| m.kind == kind)
    }

    pub fn find(&self, kind: MonsterType, rarity: Rarity) -> Option<&Monster> {
        self.monsters
            .iter()
            .find(|m| m.kind == kind && m.rarity == rarity)
    }
}

/// What a collection attempt did to the roster.
#[derive(Debug, Clone, PartialEq)]
pub enum CollectOutcome {
    /// First copy of this monster, owned at level 1.
    New(OwnedMonster),
    /// Already owned; the existing record gained a level.
    LeveledUp(OwnedMonster),
}

impl CollectOutcome {
    pub fn monster(&self) -> &OwnedMonster {
        match self {
            CollectOutcome::New(m) | CollectOutcome::LeveledUp(m) => m,
        }
    }
}

/// Map a uniform sample in [0, 1) onto a rarity.
pub fn roll_rarity(sample: f64) -> Rarity {
    let mut cumulative = 0.0;
    for (rarity, weight) in RARITY_WEIGHTS {
        cumulative += weight;
        if sample < cumulative {
            return rarity;
        }
    }
    Rarity::Legendary
}

/// A player's owned monsters.
#[derive(Debug, Clone)]
pub struct Collection {
    owned: Vec<OwnedMonster>,
    next_id: i64,
    level_cap: u32,
}

impl Collection {
    pub fn new(level_cap: u32) -> Self {
        Self::from_owned(Vec::new(), level_cap)
    }

    /// Wrap an existing roster, e.g. the player's monsters fetched upstream.
    pub fn from_owned(owned: Vec<OwnedMonster>, level_cap: u32) -> Self {
        let next_id = owned.iter().map(|m| m.id).max().unwrap_or(0).saturating_add(1);
        Self {
            owned,
            next_id,
            level_cap: level_cap.min(MAX_LEVEL),
        }
    }

    pub fn owned(&self) -> &[OwnedMonster] {
        &self.owned
    }

    pub fn get(&self, id: i64) -> Option<&OwnedMonster> {
        self.owned.iter().find(|m| m.id == id)
    }

    /// Build a team from ownership ids, in the order given. Unknown ids are skipped.
    pub fn select(&self, ids: &[i64]) -> Vec<OwnedMonster> {
        ids.iter().filter_map(|&id| self.get(id).cloned()).collect()
    }

    /// Raise each listed monster by `amount`. Returns the ids that exist in the roster.
    pub fn increment_levels(&mut self, ids: &[i64], amount: u32) -> Vec<i64> {
        let cap = self.level_cap;
        let mut leveled = Vec::new();
        for &id in ids {
            if leveled.contains(&id) {
                continue;
            }
            if let Some(m) = self.owned.iter_mut().find(|m| m.id == id) {
                m.increment_level(amount, cap);
                leveled.push(id);
            }
        }
        leveled
    }

    /// Add a catalog monster to the roster, or level up the copy already owned.
    pub fn collect_monster(&mut self, monster: &Monster) -> CollectOutcome {
        let cap = self.level_cap;
        if let Some(existing) = self.owned.iter_mut().find(|m| m.monster.id == monster.id) {
            existing.increment_level(1, cap);
            info!(id = existing.id, level = existing.level, name = %monster.name, "monster leveled up");
            return CollectOutcome::LeveledUp(existing.clone());
        }

        let owned = OwnedMonster::new(self.next_id, 1, monster.clone());
        self.next_id += 1;
        self.owned.push(owned.clone());
        info!(id = owned.id, name = %monster.name, "monster collected");
        CollectOutcome::New(owned)
    }

    /// Roll a rarity and collect the catalog monster of that type and rarity.
    pub fn collect<R: Rng + ?Sized>(
        &mut self,
        catalog: &Catalog,
        kind: MonsterType,
        rng: &mut R,
    ) -> Result<CollectOutcome, CollectionError> {
        if !catalog.has_type(kind) {
            return Err(CollectionError::UnknownType(kind.code().to_string()));
        }

        let rarity = roll_rarity(rng.gen::<f64>());
        let monster = catalog
            .find(kind, rarity)
            .ok_or_else(|| CollectionError::NoMonsterForRarity {
                kind: kind.label().to_string(),
                rarity: rarity.label().to_string(),
            })?;

        metrics::MONSTERS_COLLECTED_TOTAL
            .with_label_values(&[rarity.label()])
            .inc();
        Ok(self.collect_monster(monster))
    }
}
