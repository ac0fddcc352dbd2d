use std::sync::Arc;

use tracing::{debug, warn};

use crate::registry::StatRegistry;
use crate::sport::SportType;
use crate::stats::{EventOutcome, SportAggregator, StatsError};
use crate::store::{EventId, RosterStore, SessionStore, TeamId};

/// Moves a finished elimination event's winner into the next bracket
/// event's required roster, removing the losers.
pub struct BracketAdvancer {
    roster: Arc<dyn RosterStore>,
}

impl BracketAdvancer {
    pub fn new(roster: Arc<dyn RosterStore>) -> Self {
        Self { roster }
    }

    /// Returns `false` when no next event is linked. Adding an
    /// already-present winner is a no-op success.
    ///
    /// Callers must not invoke this for a tied finishing event; ties never
    /// advance a team automatically.
    pub async fn advance(
        &self,
        finished_event: EventId,
        winner: TeamId,
        losers: &[TeamId],
    ) -> Result<bool, StatsError> {
        let Some(next_event) = self.roster.next_event_id(finished_event).await? else {
            debug!(finished_event, "No next bracket event linked");
            return Ok(false);
        };

        self.roster
            .set_event_required_teams(next_event, &[winner], losers)
            .await?;
        debug!(finished_event, next_event, winner, "Advanced bracket");
        Ok(true)
    }
}

/// How finalizing an event ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinalizeOutcome {
    /// A decisive winner moved into the linked next event.
    Advanced { winner: TeamId },
    /// Decisive, but the bracket has no next event.
    NoNextEvent { winner: TeamId },
    /// The top score was shared; nothing advanced.
    Tied,
    /// The event had no recorded participants.
    NoParticipants,
}

/// Finalizes a finished event: checks the scorekeeper session, determines
/// the winner through the sport's aggregation strategy, and advances the
/// bracket only on a decisive outcome.
pub struct EventFinalizer {
    registry: Arc<StatRegistry>,
    sessions: Arc<dyn SessionStore>,
    advancer: BracketAdvancer,
}

impl EventFinalizer {
    pub fn new(
        registry: Arc<StatRegistry>,
        sessions: Arc<dyn SessionStore>,
        roster: Arc<dyn RosterStore>,
    ) -> Self {
        Self {
            registry,
            sessions,
            advancer: BracketAdvancer::new(roster),
        }
    }

    pub async fn finalize(
        &self,
        sport: SportType,
        event_id: EventId,
        session_token: &str,
    ) -> Result<FinalizeOutcome, StatsError> {
        if !self
            .sessions
            .is_active_session(session_token, event_id)
            .await?
        {
            warn!(event_id, "Finalize rejected: no active scorekeeper session");
            return Err(StatsError::validation(
                "an active stat session is required to finalize an event",
            ));
        }

        let strategies = self.registry.require(sport)?;
        match strategies.aggregator.event_winner(event_id).await? {
            EventOutcome::Decisive { winner, losers } => {
                if self.advancer.advance(event_id, winner, &losers).await? {
                    Ok(FinalizeOutcome::Advanced { winner })
                } else {
                    Ok(FinalizeOutcome::NoNextEvent { winner })
                }
            }
            EventOutcome::Tied => Ok(FinalizeOutcome::Tied),
            EventOutcome::NoParticipants => Ok(FinalizeOutcome::NoParticipants),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::soccer::metric;
    use crate::store::{InMemoryRosterStore, InMemorySessionStore, InMemoryStatStore, StatRow};
    use std::collections::BTreeSet;

    #[tokio::test]
    async fn advance_without_next_event_is_a_no_op() {
        let roster = Arc::new(InMemoryRosterStore::new());
        let advancer = BracketAdvancer::new(roster.clone());

        assert!(!advancer.advance(1, 10, &[20]).await.unwrap());
    }

    #[tokio::test]
    async fn advance_moves_winner_and_drops_losers() {
        let roster = Arc::new(InMemoryRosterStore::new());
        roster.link_bracket(1, 2).await;
        roster.link_event_teams(2, &[20, 30]).await;
        let advancer = BracketAdvancer::new(roster.clone());

        assert!(advancer.advance(1, 10, &[20, 30]).await.unwrap());
        assert_eq!(roster.event_teams(2).await, BTreeSet::from([10]));

        // Advancing again changes nothing.
        assert!(advancer.advance(1, 10, &[20, 30]).await.unwrap());
        assert_eq!(roster.event_teams(2).await, BTreeSet::from([10]));
    }

    struct Fixture {
        store: Arc<InMemoryStatStore>,
        roster: Arc<InMemoryRosterStore>,
        sessions: Arc<InMemorySessionStore>,
        finalizer: EventFinalizer,
    }

    fn fixture() -> Fixture {
        let store = Arc::new(InMemoryStatStore::new());
        let roster = Arc::new(InMemoryRosterStore::new());
        let sessions = Arc::new(InMemorySessionStore::new());
        let registry = Arc::new(StatRegistry::standard(store.clone(), roster.clone()));
        let finalizer = EventFinalizer::new(registry, sessions.clone(), roster.clone());
        Fixture {
            store,
            roster,
            sessions,
            finalizer,
        }
    }

    async fn seed_goals(store: &InMemoryStatStore, event: EventId, team: TeamId, goals: i64) {
        store
            .record_row(
                SportType::Soccer,
                StatRow::new(event, team, "p").with(metric::GOALS, goals),
            )
            .await;
    }

    #[tokio::test]
    async fn finalize_requires_an_active_session() {
        let fx = fixture();
        let err = fx
            .finalizer
            .finalize(SportType::Soccer, 1, "stale-token")
            .await
            .unwrap_err();
        assert!(matches!(err, StatsError::Validation(_)));
    }

    #[tokio::test]
    async fn finalize_advances_the_decisive_winner() {
        let fx = fixture();
        fx.sessions.open_session(1, "live").await;
        seed_goals(&fx.store, 1, 10, 3).await;
        seed_goals(&fx.store, 1, 20, 1).await;
        fx.roster.link_bracket(1, 5).await;
        fx.roster.link_event_teams(5, &[20]).await;

        let outcome = fx
            .finalizer
            .finalize(SportType::Soccer, 1, "live")
            .await
            .unwrap();
        assert_eq!(outcome, FinalizeOutcome::Advanced { winner: 10 });
        assert_eq!(fx.roster.event_teams(5).await, BTreeSet::from([10]));
    }

    #[tokio::test]
    async fn finalize_never_advances_a_tie() {
        let fx = fixture();
        fx.sessions.open_session(1, "live").await;
        seed_goals(&fx.store, 1, 10, 2).await;
        seed_goals(&fx.store, 1, 20, 2).await;
        fx.roster.link_bracket(1, 5).await;
        fx.roster.link_event_teams(5, &[99]).await;

        let outcome = fx
            .finalizer
            .finalize(SportType::Soccer, 1, "live")
            .await
            .unwrap();
        assert_eq!(outcome, FinalizeOutcome::Tied);
        // Next event roster untouched.
        assert_eq!(fx.roster.event_teams(5).await, BTreeSet::from([99]));
    }

    #[tokio::test]
    async fn finalize_without_next_event_reports_the_winner() {
        let fx = fixture();
        fx.sessions.open_session(1, "live").await;
        seed_goals(&fx.store, 1, 10, 1).await;
        seed_goals(&fx.store, 1, 20, 0).await;

        let outcome = fx
            .finalizer
            .finalize(SportType::Soccer, 1, "live")
            .await
            .unwrap();
        assert_eq!(outcome, FinalizeOutcome::NoNextEvent { winner: 10 });
    }

    #[tokio::test]
    async fn finalize_for_an_untracked_sport_is_no_strategy() {
        let fx = fixture();
        fx.sessions.open_session(1, "live").await;

        let err = fx
            .finalizer
            .finalize(SportType::Unknown, 1, "live")
            .await
            .unwrap_err();
        assert!(matches!(err, StatsError::NoStrategy(SportType::Unknown)));
    }
}
