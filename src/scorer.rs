// Score sources: the local engine and the authoritative backend behind one trait.
//
// The backend is the source of truth when reachable. The local engine is the
// same algorithm and answers whenever the backend cannot.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::ScoringMode;
use crate::metrics;
use crate::monster::OwnedMonster;
use crate::scoring;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ScoreError {
    #[error("scoring service unavailable: {0}")]
    Unavailable(String),
    #[error("malformed score response: {0}")]
    Malformed(String),
}

/// Anything that can put a number on a team.
pub trait ScoreSource: Send + Sync {
    fn name(&self) -> &'static str;

    fn score(&self, team: &[OwnedMonster]) -> Result<u32, ScoreError>;
}

/// The in-process scoring engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalScorer;

impl ScoreSource for LocalScorer {
    fn name(&self) -> &'static str {
        "local"
    }

    fn score(&self, team: &[OwnedMonster]) -> Result<u32, ScoreError> {
        Ok(scoring::compute_score(team))
    }
}

/// Which source produced a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreOrigin {
    Remote,
    Local,
}

impl ScoreOrigin {
    fn label(self) -> &'static str {
        match self {
            ScoreOrigin::Remote => "remote",
            ScoreOrigin::Local => "local",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub score: u32,
    pub origin: ScoreOrigin,
}

/// Prefers a remote source and falls back to the local engine on failure.
pub struct FallbackScorer<R> {
    remote: R,
    mode: ScoringMode,
}

impl<R: ScoreSource> FallbackScorer<R> {
    pub fn new(remote: R, mode: ScoringMode) -> Self {
        Self { remote, mode }
    }

    pub fn mode(&self) -> ScoringMode {
        self.mode
    }

    /// Score the team and report where the number came from.
    pub fn report(&self, team: &[OwnedMonster]) -> ScoreReport {
        if !scoring::validate_team(team) {
            metrics::INVALID_TEAMS_TOTAL.inc();
        }

        let report = match self.mode {
            ScoringMode::LocalOnly => local_report(team),
            ScoringMode::RemoteWithFallback => match self.remote.score(team) {
                Ok(score) => {
                    debug!(source = self.remote.name(), score, "remote score");
                    ScoreReport {
                        score,
                        origin: ScoreOrigin::Remote,
                    }
                }
                Err(e) => {
                    warn!(source = self.remote.name(), error = %e, "remote scoring failed, using local engine");
                    metrics::SCORE_FALLBACKS_TOTAL.inc();
                    local_report(team)
                }
            },
        };

        metrics::SCORES_COMPUTED_TOTAL
            .with_label_values(&[report.origin.label()])
            .inc();
        metrics::TEAM_SCORE.observe(f64::from(report.score));
        report
    }
}

impl<R: ScoreSource> ScoreSource for FallbackScorer<R> {
    fn name(&self) -> &'static str {
        "fallback"
    }

    fn score(&self, team: &[OwnedMonster]) -> Result<u32, ScoreError> {
        Ok(self.report(team).score)
    }
}

fn local_report(team: &[OwnedMonster]) -> ScoreReport {
    ScoreReport {
        score: scoring::compute_score(team),
        origin: ScoreOrigin::Local,
    }
}

// ── Backend payloads ─────────────────────────────────────────────────

/// Body of the backend's calculate-score request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRequest {
    pub monster_ids: Vec<i64>,
}

impl ScoreRequest {
    pub fn for_team(team: &[OwnedMonster]) -> Self {
        Self {
            monster_ids: team.iter().map(|m| m.id).collect(),
        }
    }
}

/// Body of the backend's calculate-score response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResponse {
    pub score: u32,
}

/// Decode a calculate-score response body.
pub fn parse_score_response(body: &str) -> Result<u32, ScoreError> {
    serde_json::from_str::<ScoreResponse>(body)
        .map(|r| r.score)
        .map_err(|e| ScoreError::Malformed(e.to_string()))
}
