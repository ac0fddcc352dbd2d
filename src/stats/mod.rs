mod errors;
pub mod models;

pub use errors::StatsError;
pub use models::*;

use async_trait::async_trait;

use crate::sport::SportType;
use crate::store::{EventId, LeagueId, TeamId};

/// Per-sport statistics aggregation contract: turns raw stat rows into
/// player/team/event/league aggregates.
///
/// Failure policy: any underlying data-access failure aborts the whole
/// operation; a partially filled result is never returned as success.
#[async_trait]
pub trait SportAggregator: Send + Sync {
    fn sport(&self) -> SportType;

    /// Groups an event's raw rows by team, then by player within team,
    /// summing metrics. An event with zero teams yields an empty team list,
    /// not an error.
    async fn event_stats(&self, event_id: EventId) -> Result<EventStats, StatsError>;

    /// Aggregates across all teams the player has stats for, or scoped to
    /// one team. A player with no rows is `NotFound`.
    async fn player_stats(
        &self,
        login: &str,
        team_id: Option<TeamId>,
    ) -> Result<PlayerStats, StatsError>;

    /// A team with no recorded rows yields an all-zero line.
    async fn team_stats(&self, team_id: TeamId) -> Result<TeamStats, StatsError>;

    async fn league_stats(&self, league_id: LeagueId) -> Result<LeagueStats, StatsError>;

    /// Deletes all raw rows for the event in one atomic unit. Idempotent:
    /// deleting an event with no stats is a success.
    async fn delete_event_stats(&self, event_id: EventId) -> Result<(), StatsError>;

    /// Outcome of a finished event by the sport's primary score.
    async fn event_winner(&self, event_id: EventId) -> Result<EventOutcome, StatsError> {
        let stats = self.event_stats(event_id).await?;
        Ok(decide_outcome(&stats))
    }
}

/// Result of scanning a finished event for its winner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    Decisive { winner: TeamId, losers: Vec<TeamId> },
    /// The top score is shared; ties never advance a team.
    Tied,
    NoParticipants,
}

/// Finds the unique highest-scoring team, or reports a shared top score.
pub fn decide_outcome(stats: &EventStats) -> EventOutcome {
    let Some(max) = stats
        .teams
        .iter()
        .map(|team| team.totals.primary_score())
        .max()
    else {
        return EventOutcome::NoParticipants;
    };

    let mut at_max = stats
        .teams
        .iter()
        .filter(|team| team.totals.primary_score() == max)
        .map(|team| team.team_id);
    let winner = at_max.next().unwrap_or_default();
    if at_max.next().is_some() {
        return EventOutcome::Tied;
    }

    let losers = stats
        .teams
        .iter()
        .map(|team| team.team_id)
        .filter(|id| *id != winner)
        .collect();
    EventOutcome::Decisive { winner, losers }
}
