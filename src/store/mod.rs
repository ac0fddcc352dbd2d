pub mod memory;

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;

use crate::sport::SportType;
use crate::stats::StatsError;

pub use memory::{InMemoryRosterStore, InMemorySessionStore, InMemoryStatStore};

pub type EventId = i64;
pub type TeamId = i64;
pub type LeagueId = i64;

/// One raw stat record: per-event, per-team, per-player counters keyed by a
/// sport-specific metric vocabulary. The core never interprets metric names
/// itself; each sport strategy reads its own.
#[derive(Debug, Clone, Default)]
pub struct StatRow {
    pub event_id: EventId,
    pub team_id: TeamId,
    pub player: String,
    pub metrics: HashMap<String, i64>,
}

impl StatRow {
    pub fn new(event_id: EventId, team_id: TeamId, player: impl Into<String>) -> Self {
        Self {
            event_id,
            team_id,
            player: player.into(),
            metrics: HashMap::new(),
        }
    }

    pub fn with(mut self, metric: &str, value: i64) -> Self {
        self.metrics.insert(metric.to_string(), value);
        self
    }

    pub fn metric(&self, name: &str) -> i64 {
        self.metrics.get(name).copied().unwrap_or_default()
    }
}

/// Summed primary-metric score for one team in one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeamScoreRow {
    pub event_id: EventId,
    pub team_id: TeamId,
    pub score: i64,
}

/// Narrow read/delete contract over the raw stat record store. The write
/// path that produces these rows is an external collaborator.
#[async_trait]
pub trait StatRecordStore: Send + Sync {
    async fn rows_for_event(
        &self,
        sport: SportType,
        event_id: EventId,
    ) -> Result<Vec<StatRow>, StatsError>;

    /// Rows for one player, optionally scoped to a single team.
    async fn rows_for_player(
        &self,
        sport: SportType,
        login: &str,
        team_id: Option<TeamId>,
    ) -> Result<Vec<StatRow>, StatsError>;

    async fn rows_for_team(
        &self,
        sport: SportType,
        team_id: TeamId,
    ) -> Result<Vec<StatRow>, StatsError>;

    /// The given metric summed per (event, team), restricted to the given
    /// events. Equivalent of `SELECT eventID, teamID, SUM(metric) ... GROUP
    /// BY eventID, teamID` against the sport's stat table.
    async fn event_team_scores(
        &self,
        sport: SportType,
        events: &[EventId],
        metric: &str,
    ) -> Result<Vec<TeamScoreRow>, StatsError>;

    /// Deletes every stat row for the event as one atomic unit. Deleting an
    /// event with no rows is a success.
    async fn delete_event_rows(
        &self,
        sport: SportType,
        event_id: EventId,
    ) -> Result<(), StatsError>;
}

/// Roster and bracket-graph lookups, consumed from outside the core.
#[async_trait]
pub trait RosterStore: Send + Sync {
    /// Every team associated with any of the given events, including teams
    /// with zero recorded stats.
    async fn teams_for_events(&self, events: &[EventId]) -> Result<BTreeSet<TeamId>, StatsError>;

    /// `None` means the league does not exist; a known league with no teams
    /// yields an empty list.
    async fn teams_for_league(&self, league_id: LeagueId)
        -> Result<Option<Vec<TeamId>>, StatsError>;

    /// The next bracket event linked to a finished event, if any.
    async fn next_event_id(&self, event_id: EventId) -> Result<Option<EventId>, StatsError>;

    /// Adjusts an event's required-participant set. Adding an already-present
    /// team is a no-op success.
    async fn set_event_required_teams(
        &self,
        event_id: EventId,
        add: &[TeamId],
        remove: &[TeamId],
    ) -> Result<(), StatsError>;
}

/// Write-path session guard: at most one active scorekeeper session per
/// event. Consumed, not owned, by this core.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn is_active_session(&self, token: &str, event_id: EventId)
        -> Result<bool, StatsError>;
}
