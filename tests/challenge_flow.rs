// End-to-end challenge flow: roster from upstream JSON, team selection,
// scoring through the fallback source, and challenge resolution.

use monster_challenge::challenge::{Challenge, ChallengeLadder};
use monster_challenge::collection::Collection;
use monster_challenge::config::{Config, ScoringMode};
use monster_challenge::monster::{OwnedMonster, MAX_LEVEL};
use monster_challenge::scorer::{
    parse_score_response, FallbackScorer, ScoreError, ScoreOrigin, ScoreSource,
};
use monster_challenge::scoring::compute_score;
use monster_challenge::synergy::SynergyKind;
use monster_challenge::team::{TeamAction, TeamError, TeamState};

const ROSTER_JSON: &str = r#"[
    {"id": 1, "level": 4, "monster": {"id": 10, "name": "Binbag", "type": "WA", "rarity": "E"}},
    {"id": 2, "level": 1, "monster": {"id": 11, "name": "Jogger", "type": "HWB", "rarity": "C"}},
    {"id": 3, "level": 2, "monster": {"id": 12, "name": "Yogi", "type": "HWB", "rarity": "C"}},
    {"id": 4, "level": 3, "monster": {"id": 13, "name": "Fern", "type": "N&B", "rarity": "R"}},
    {"id": 5, "level": 5, "monster": {"id": 14, "name": "Spark", "type": "E", "rarity": "L"}},
    {"id": 6, "level": 2, "monster": {"id": 15, "name": "Tram", "type": "T", "rarity": "C"}},
    {"id": 7, "level": 6, "monster": {"id": 16, "name": "Mystery", "type": "??", "rarity": "C"}}
]"#;

fn roster() -> Vec<OwnedMonster> {
    serde_json::from_str(ROSTER_JSON).unwrap()
}

/// Stands in for the backend's calculate-score endpoint by decoding canned bodies.
struct CannedBackend {
    body: Option<&'static str>,
}

impl ScoreSource for CannedBackend {
    fn name(&self) -> &'static str {
        "canned"
    }

    fn score(&self, _team: &[OwnedMonster]) -> Result<u32, ScoreError> {
        match self.body {
            Some(body) => parse_score_response(body),
            None => Err(ScoreError::Unavailable("connection refused".into())),
        }
    }
}

/// A backend that runs the same algorithm, as the real one must.
struct MirrorBackend;

impl ScoreSource for MirrorBackend {
    fn name(&self) -> &'static str {
        "mirror"
    }

    fn score(&self, team: &[OwnedMonster]) -> Result<u32, ScoreError> {
        Ok(compute_score(team))
    }
}

// ── Team selection ───────────────────────────────────────────────────

#[test]
fn test_preview_follows_selection() {
    let roster = roster();
    let mut team = TeamState::new();

    for m in &roster[..3] {
        team.apply(TeamAction::Toggle(m.clone())).unwrap();
    }
    // Waste swaps 1 for 4: [4, 2, 4] = 10, plus 3 * 20 wellbeing.
    assert_eq!(team.score(), 70);
    let kinds: Vec<_> = team.synergies().iter().map(|s| s.kind).collect();
    assert_eq!(kinds, vec![SynergyKind::Waste, SynergyKind::Wellbeing]);

    team.apply(TeamAction::Remove(1)).unwrap();
    assert_eq!(team.score(), 43);

    team.apply(TeamAction::Toggle(roster[3].clone())).unwrap();
    // (60 + 6) * 1.728
    assert_eq!(team.score(), 114);
}

#[test]
fn test_sixth_monster_is_refused() {
    let roster = roster();
    let mut team = TeamState::new();
    for m in &roster[..5] {
        team.apply(TeamAction::Toggle(m.clone())).unwrap();
    }
    let err = team.apply(TeamAction::Toggle(roster[5].clone())).unwrap_err();
    assert_eq!(err, TeamError::Full);
    assert_eq!(team.members().len(), 5);
}

#[test]
fn test_unknown_type_contributes_level_only() {
    let roster = roster();
    let team = vec![roster[5].clone(), roster[6].clone()];
    assert_eq!(compute_score(&team), 8);
}

// ── Score sources ────────────────────────────────────────────────────

#[test]
fn test_backend_and_local_agree() {
    let roster = roster();
    let scorer = FallbackScorer::new(MirrorBackend, ScoringMode::RemoteWithFallback);
    // Every team of up to three from the roster, in roster order.
    for a in 0..roster.len() {
        for b in a..roster.len() {
            for c in b..roster.len() {
                let team = vec![roster[a].clone(), roster[b].clone(), roster[c].clone()];
                let report = scorer.report(&team);
                assert_eq!(report.origin, ScoreOrigin::Remote);
                assert_eq!(report.score, compute_score(&team));
            }
        }
    }
}

#[test]
fn test_backend_outage_uses_local_engine() {
    let roster = roster();
    let team = vec![roster[4].clone(), roster[5].clone()];

    let up = FallbackScorer::new(
        CannedBackend {
            body: Some(r#"{"score": 12}"#),
        },
        ScoringMode::RemoteWithFallback,
    );
    assert_eq!(up.report(&team).origin, ScoreOrigin::Remote);

    let down = FallbackScorer::new(CannedBackend { body: None }, ScoringMode::RemoteWithFallback);
    let report = down.report(&team);
    assert_eq!(report.origin, ScoreOrigin::Local);
    // Energy doubles 5 -> 10, plus 2.
    assert_eq!(report.score, 12);

    let garbled = FallbackScorer::new(
        CannedBackend {
            body: Some("<html>502</html>"),
        },
        ScoringMode::RemoteWithFallback,
    );
    assert_eq!(garbled.report(&team).origin, ScoreOrigin::Local);
}

// ── Challenges ───────────────────────────────────────────────────────

#[test]
fn test_ladder_run_levels_up_winners() {
    let config = Config::from_lookup(|var| match var {
        "MONSTER_SCORING_MODE" => Some("remote".to_string()),
        "MONSTER_CHALLENGE_REWARD" => Some("2".to_string()),
        _ => None,
    })
    .unwrap();

    let mut collection = Collection::from_owned(roster(), config.level_cap);
    let scorer = FallbackScorer::new(CannedBackend { body: None }, config.scoring_mode);
    let mut ladder = ChallengeLadder::new(vec![
        Challenge::new(2, "Marathon", 100).unwrap(),
        Challenge::new(1, "First Steps", 40).unwrap(),
    ]);

    let first = ladder.next().unwrap().clone();
    assert_eq!(first.id, 1);

    let mut team = TeamState::new();
    team.apply(TeamAction::Toggle(collection.get(2).unwrap().clone())).unwrap();
    team.apply(TeamAction::Toggle(collection.get(3).unwrap().clone())).unwrap();
    let ids: Vec<i64> = team.submit_ready().unwrap().iter().map(|m| m.id).collect();

    let outcome = ladder
        .submit(first.id, &ids, &scorer, &mut collection, config.challenge_reward)
        .unwrap();
    assert!(outcome.success);
    assert_eq!(outcome.score, 43);
    assert_eq!(outcome.monsters_leveled, vec![2, 3]);
    assert_eq!(collection.get(2).unwrap().level, 3);
    assert_eq!(collection.get(3).unwrap().level, 4);

    // The harder challenge is next; the same pair (now levels 3 and 4) falls short.
    assert_eq!(ladder.next().unwrap().id, 2);
    let outcome = ladder
        .submit(2, &ids, &scorer, &mut collection, config.challenge_reward)
        .unwrap();
    assert!(!outcome.success);
    assert_eq!(outcome.score, 47);
    assert!(outcome.monsters_leveled.is_empty());

    // Adding nature lifts it over the line: (80 + 12) * 1.2^4 = 190.77
    let mut ids = ids;
    ids.push(4);
    ids.push(6);
    let outcome = ladder
        .submit(2, &ids, &scorer, &mut collection, config.challenge_reward)
        .unwrap();
    assert!(outcome.success);
    assert_eq!(outcome.score, 190);
    assert!(ladder.next().is_none());
    assert!(collection.owned().iter().all(|m| m.level <= MAX_LEVEL));
}
