// Team selection state for the challenge screen.
//
// Every action goes through `TeamState::apply`, which refreshes the preview
// score and synergy list afterwards.

use thiserror::Error;

use crate::monster::OwnedMonster;
use crate::scorer::{ScoreError, ScoreSource};
use crate::scoring::{self, MAX_TEAM_SIZE};
use crate::synergy::{self, Synergy};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum TeamError {
    #[error("Your team is full! Remove a monster first.")]
    Full,
    #[error("You need to add monsters to your team first!")]
    Empty,
}

#[derive(Debug, Clone)]
pub enum TeamAction {
    /// Add the monster, or take it out if it is already in the hand.
    Toggle(OwnedMonster),
    /// Remove by ownership id.
    Remove(i64),
    Reset,
}

#[derive(Debug, Clone, Default)]
pub struct TeamState {
    members: Vec<OwnedMonster>,
    score: u32,
    synergies: Vec<Synergy>,
    error: Option<TeamError>,
}

impl TeamState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn members(&self) -> &[OwnedMonster] {
        &self.members
    }

    /// Preview score for the current hand.
    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn synergies(&self) -> &[Synergy] {
        &self.synergies
    }

    /// Banner from the most recent failed action, cleared by the next success.
    pub fn error(&self) -> Option<&TeamError> {
        self.error.as_ref()
    }

    pub fn contains(&self, id: i64) -> bool {
        self.members.iter().any(|m| m.id == id)
    }

    pub fn is_full(&self) -> bool {
        self.members.len() >= MAX_TEAM_SIZE
    }

    pub fn apply(&mut self, action: TeamAction) -> Result<(), TeamError> {
        let result = match action {
            TeamAction::Toggle(monster) => self.toggle(monster),
            TeamAction::Remove(id) => {
                self.members.retain(|m| m.id != id);
                Ok(())
            }
            TeamAction::Reset => {
                self.members.clear();
                Ok(())
            }
        };

        self.error = result.clone().err();
        self.refresh_preview();
        result
    }

    fn toggle(&mut self, monster: OwnedMonster) -> Result<(), TeamError> {
        if self.contains(monster.id) {
            self.members.retain(|m| m.id != monster.id);
            return Ok(());
        }
        if self.is_full() {
            return Err(TeamError::Full);
        }
        self.members.push(monster);
        Ok(())
    }

    fn refresh_preview(&mut self) {
        if self.members.is_empty() {
            self.score = 0;
            self.synergies.clear();
            return;
        }
        self.score = scoring::compute_score(&self.members);
        self.synergies = synergy::describe_synergies(&self.members);
    }

    /// Replace the preview score with one from another source, e.g. the backend.
    pub fn refresh_score(&mut self, source: &dyn ScoreSource) -> Result<u32, ScoreError> {
        if self.members.is_empty() {
            self.score = 0;
            return Ok(0);
        }
        self.score = source.score(&self.members)?;
        Ok(self.score)
    }

    /// Check the hand can be submitted.
    pub fn submit_ready(&self) -> Result<&[OwnedMonster], TeamError> {
        if self.members.is_empty() {
            return Err(TeamError::Empty);
        }
        Ok(&self.members)
    }
}
