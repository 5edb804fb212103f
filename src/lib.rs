pub mod challenge;
pub mod collection;
pub mod config;
pub mod metrics;
pub mod monster;
pub mod scorer;
pub mod scoring;
pub mod synergy;
pub mod team;
