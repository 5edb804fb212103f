// Challenges: target scores a team has to reach, and what happens on an attempt.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::collection::Collection;
use crate::metrics;
use crate::scorer::{ScoreError, ScoreSource};

pub const MAX_NAME_LEN: usize = 20;

pub const SUCCESS_MESSAGE: &str = "Challenge completed!";
pub const FAILURE_MESSAGE: &str =
    "Not enough score to complete the challenge. Try a different combination!";

#[derive(Debug, Error)]
pub enum ChallengeError {
    #[error("challenge name must not be empty")]
    EmptyName,
    #[error("challenge name is {0} characters, max is {max}", max = MAX_NAME_LEN)]
    NameTooLong(usize),
    #[error("target score must be positive")]
    ZeroTarget,
    #[error("challenge {0} not found")]
    NotFound(i64),
    #[error(transparent)]
    Score(#[from] ScoreError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Challenge {
    pub id: i64,
    pub name: String,
    pub target_score: u32,
}

impl Challenge {
    pub fn new(id: i64, name: &str, target_score: u32) -> Result<Self, ChallengeError> {
        let len = name.chars().count();
        if len == 0 {
            return Err(ChallengeError::EmptyName);
        }
        if len > MAX_NAME_LEN {
            return Err(ChallengeError::NameTooLong(len));
        }
        if target_score == 0 {
            return Err(ChallengeError::ZeroTarget);
        }
        Ok(Self {
            id,
            name: name.to_string(),
            target_score,
        })
    }

    pub fn is_met_by(&self, score: u32) -> bool {
        score >= self.target_score
    }

    /// Fill level of the score gauge, 0 to 100.
    pub fn progress_percent(&self, score: u32) -> f64 {
        if self.target_score == 0 {
            return 100.0;
        }
        (f64::from(score) / f64::from(self.target_score) * 100.0).min(100.0)
    }
}

/// Result of submitting a team against a challenge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttemptOutcome {
    pub challenge_id: i64,
    pub success: bool,
    pub score: u32,
    pub target_score: u32,
    pub message: String,
    /// Ownership ids that gained levels. Empty on failure.
    pub monsters_leveled: Vec<i64>,
}

/// Score the team picked from `collection` and reward it on success.
pub fn resolve_attempt(
    challenge: &Challenge,
    team_ids: &[i64],
    source: &dyn ScoreSource,
    collection: &mut Collection,
    reward: u32,
) -> Result<AttemptOutcome, ScoreError> {
    let team = collection.select(team_ids);
    let score = source.score(&team)?;
    let success = challenge.is_met_by(score);

    let monsters_leveled = if success && reward > 0 {
        collection.increment_levels(team_ids, reward)
    } else {
        Vec::new()
    };

    let outcome = if success { "won" } else { "lost" };
    metrics::CHALLENGE_ATTEMPTS_TOTAL
        .with_label_values(&[outcome])
        .inc();
    info!(
        challenge = challenge.id,
        score,
        target = challenge.target_score,
        outcome,
        "challenge attempt"
    );

    Ok(AttemptOutcome {
        challenge_id: challenge.id,
        success,
        score,
        target_score: challenge.target_score,
        message: (if success { SUCCESS_MESSAGE } else { FAILURE_MESSAGE }).to_string(),
        monsters_leveled,
    })
}

/// Challenges ordered from easiest to hardest, with the player's progress.
#[derive(Debug, Clone, Default)]
pub struct ChallengeLadder {
    challenges: Vec<Challenge>,
    completed: HashSet<i64>,
}

impl ChallengeLadder {
    pub fn new(mut challenges: Vec<Challenge>) -> Self {
        challenges.sort_by_key(|c| (c.target_score, c.id));
        Self {
            challenges,
            completed: HashSet::new(),
        }
    }

    pub fn challenges(&self) -> &[Challenge] {
        &self.challenges
    }

    pub fn get(&self, id: i64) -> Option<&Challenge> {
        self.challenges.iter().find(|c| c.id == id)
    }

    pub fn is_completed(&self, id: i64) -> bool {
        self.completed.contains(&id)
    }

    pub fn mark_completed(&mut self, id: i64) {
        self.completed.insert(id);
    }

    /// The easiest challenge not yet completed.
    pub fn next(&self) -> Option<&Challenge> {
        self.challenges
            .iter()
            .find(|c| !self.completed.contains(&c.id))
    }

    /// Resolve an attempt against one of the ladder's challenges and record a win.
    pub fn submit(
        &mut self,
        challenge_id: i64,
        team_ids: &[i64],
        source: &dyn ScoreSource,
        collection: &mut Collection,
        reward: u32,
    ) -> Result<AttemptOutcome, ChallengeError> {
        let challenge = self
            .get(challenge_id)
            .ok_or(ChallengeError::NotFound(challenge_id))?;
        let outcome = resolve_attempt(challenge, team_ids, source, collection, reward)?;
        if outcome.success {
            self.mark_completed(challenge_id);
        }
        Ok(outcome)
    }
}
