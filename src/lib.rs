//! Per-sport statistics aggregation and standings for a recreational sports
//! league. Each tracked sport registers an aggregation strategy and a table
//! strategy in the [`registry::StatRegistry`]; callers resolve by
//! [`sport::SportType`] and never touch sport-specific code directly.

pub mod bracket;
pub mod registry;
pub mod soccer;
pub mod sport;
pub mod stats;
pub mod store;
pub mod table;
pub mod ultimate;

pub use bracket::{BracketAdvancer, EventFinalizer, FinalizeOutcome};
pub use registry::{SportStrategies, StatRegistry};
pub use sport::SportType;
pub use stats::{
    EventOutcome, EventStats, LeagueStats, PlayerStats, SportAggregator, StatsError, TeamStats,
};
pub use store::{
    EventId, InMemoryRosterStore, InMemorySessionStore, InMemoryStatStore, LeagueId, RosterStore,
    SessionStore, StatRecordStore, StatRow, TeamId,
};
pub use table::{TableBuilder, TeamResultsRow};
