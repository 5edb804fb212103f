// Prometheus metrics for team scoring and challenge play.

use lazy_static::lazy_static;
use prometheus::{Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};

lazy_static! {
    pub static ref REGISTRY: Registry = Registry::new();

    // ── Counters ─────────────────────────────────────────────────────

    /// Scores handed out by a score source, by origin (remote, local).
    pub static ref SCORES_COMPUTED_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("monster_scores_computed_total", "Team scores computed"),
        &["origin"],
    )
    .unwrap();

    /// Remote scoring failures answered by the local engine instead.
    pub static ref SCORE_FALLBACKS_TOTAL: IntCounter = IntCounter::new(
        "monster_score_fallbacks_total",
        "Remote scoring failures served by the local engine",
    )
    .unwrap();

    /// Teams rejected by validation (empty, oversized, duplicates).
    pub static ref INVALID_TEAMS_TOTAL: IntCounter = IntCounter::new(
        "monster_invalid_teams_total",
        "Teams that failed validation",
    )
    .unwrap();

    /// Challenge attempts, by outcome (won, lost).
    pub static ref CHALLENGE_ATTEMPTS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("monster_challenge_attempts_total", "Challenge attempts"),
        &["outcome"],
    )
    .unwrap();

    /// Monsters collected, by rolled rarity.
    pub static ref MONSTERS_COLLECTED_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("monster_collected_total", "Monsters collected"),
        &["rarity"],
    )
    .unwrap();

    // ── Histograms ───────────────────────────────────────────────────

    /// Distribution of team scores.
    pub static ref TEAM_SCORE: Histogram = Histogram::with_opts(
        HistogramOpts::new("monster_team_score", "Team score")
            .buckets(vec![10.0, 25.0, 50.0, 100.0, 200.0, 400.0, 800.0, 1600.0]),
    )
    .unwrap();
}

/// Register all metrics with the custom registry. Call once at startup.
pub fn register_metrics() {
    let collectors: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(SCORES_COMPUTED_TOTAL.clone()),
        Box::new(SCORE_FALLBACKS_TOTAL.clone()),
        Box::new(INVALID_TEAMS_TOTAL.clone()),
        Box::new(CHALLENGE_ATTEMPTS_TOTAL.clone()),
        Box::new(MONSTERS_COLLECTED_TOTAL.clone()),
        Box::new(TEAM_SCORE.clone()),
    ];

    for c in collectors {
        // Already registered on a second call.
        let _ = REGISTRY.register(c);
    }
}

/// Serialize all registered metrics to the Prometheus text exposition format.
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    if encoder.encode(&metric_families, &mut buffer).is_err() {
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}
