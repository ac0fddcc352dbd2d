use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::sport::SportType;
use crate::stats::StatsError;
use crate::table::{build_table, RankingKey, TableBuilder, TeamResultsRow};
use crate::store::{EventId, RosterStore, StatRecordStore};

use super::metric;

/// Standings strategy for soccer: goals are the primary score, ranking by
/// league points (3 per win, 1 per tie).
pub struct SoccerTableBuilder {
    store: Arc<dyn StatRecordStore>,
    roster: Arc<dyn RosterStore>,
}

impl SoccerTableBuilder {
    pub fn new(store: Arc<dyn StatRecordStore>, roster: Arc<dyn RosterStore>) -> Self {
        Self { store, roster }
    }
}

#[async_trait]
impl TableBuilder for SoccerTableBuilder {
    fn sport(&self) -> SportType {
        SportType::Soccer
    }

    async fn table_for_events(
        &self,
        events: &[EventId],
    ) -> Result<Vec<TeamResultsRow>, StatsError> {
        if events.is_empty() {
            return Err(StatsError::validation("empty event set"));
        }

        let scores = self
            .store
            .event_team_scores(SportType::Soccer, events, metric::GOALS)
            .await?;
        let roster = self.roster.teams_for_events(events).await?;
        debug!(events = events.len(), teams = roster.len(), "Building soccer table");

        Ok(build_table(
            SportType::Soccer,
            RankingKey::LeaguePoints,
            &scores,
            &roster,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{
        InMemoryRosterStore, InMemoryStatStore, LeagueId, StatRow, TeamId, TeamScoreRow,
    };

    #[tokio::test]
    async fn ranks_by_league_points_with_scoreless_teams_included() {
        let store = Arc::new(InMemoryStatStore::new());
        let roster = Arc::new(InMemoryRosterStore::new());
        let builder = SoccerTableBuilder::new(store.clone(), roster.clone());

        // Event 1: 10 beats 20. Event 2: 10 ties 30. Team 99 never plays.
        store
            .record_row(SportType::Soccer, StatRow::new(1, 10, "ana").with(metric::GOALS, 3))
            .await;
        store
            .record_row(SportType::Soccer, StatRow::new(1, 20, "cy").with(metric::GOALS, 1))
            .await;
        store
            .record_row(SportType::Soccer, StatRow::new(2, 10, "ana").with(metric::GOALS, 2))
            .await;
        store
            .record_row(SportType::Soccer, StatRow::new(2, 30, "di").with(metric::GOALS, 2))
            .await;
        roster.link_event_teams(1, &[10, 20]).await;
        roster.link_event_teams(2, &[10, 30, 99]).await;

        let table = builder.table_for_events(&[1, 2]).await.unwrap();
        assert_eq!(table.len(), 4);

        // 10: 4 pts, 30: 1 pt; idle 99 outranks beaten 20 on fewer losses.
        let order: Vec<TeamId> = table.iter().map(|row| row.team_id).collect();
        assert_eq!(order, vec![10, 30, 99, 20]);
        assert_eq!(table[0].rank, 1);
        assert_eq!(table[3].rank, 4);
        assert_eq!((table[0].wins, table[0].ties), (1, 1));
    }

    #[tokio::test]
    async fn empty_event_set_is_a_validation_error() {
        let store = Arc::new(InMemoryStatStore::new());
        let roster = Arc::new(InMemoryRosterStore::new());
        let builder = SoccerTableBuilder::new(store, roster);

        let err = builder.table_for_events(&[]).await.unwrap_err();
        assert!(matches!(err, StatsError::Validation(_)));
    }

    /// Store stub whose reads always fail, for error-propagation tests.
    struct FailingStore;

    #[async_trait]
    impl StatRecordStore for FailingStore {
        async fn rows_for_event(
            &self,
            _sport: SportType,
            _event_id: EventId,
        ) -> Result<Vec<StatRow>, StatsError> {
            Err(StatsError::data_access("connection refused"))
        }

        async fn rows_for_player(
            &self,
            _sport: SportType,
            _login: &str,
            _team_id: Option<TeamId>,
        ) -> Result<Vec<StatRow>, StatsError> {
            Err(StatsError::data_access("connection refused"))
        }

        async fn rows_for_team(
            &self,
            _sport: SportType,
            _team_id: TeamId,
        ) -> Result<Vec<StatRow>, StatsError> {
            Err(StatsError::data_access("connection refused"))
        }

        async fn event_team_scores(
            &self,
            _sport: SportType,
            _events: &[EventId],
            _metric: &str,
        ) -> Result<Vec<TeamScoreRow>, StatsError> {
            Err(StatsError::data_access("connection refused"))
        }

        async fn delete_event_rows(
            &self,
            _sport: SportType,
            _event_id: EventId,
        ) -> Result<(), StatsError> {
            Err(StatsError::data_access("connection refused"))
        }
    }

    /// Roster stub whose lookups always fail.
    struct FailingRoster;

    #[async_trait]
    impl RosterStore for FailingRoster {
        async fn teams_for_events(
            &self,
            _events: &[EventId],
        ) -> Result<std::collections::BTreeSet<TeamId>, StatsError> {
            Err(StatsError::data_access("connection refused"))
        }

        async fn teams_for_league(
            &self,
            _league_id: LeagueId,
        ) -> Result<Option<Vec<TeamId>>, StatsError> {
            Err(StatsError::data_access("connection refused"))
        }

        async fn next_event_id(&self, _event_id: EventId) -> Result<Option<EventId>, StatsError> {
            Err(StatsError::data_access("connection refused"))
        }

        async fn set_event_required_teams(
            &self,
            _event_id: EventId,
            _add: &[TeamId],
            _remove: &[TeamId],
        ) -> Result<(), StatsError> {
            Err(StatsError::data_access("connection refused"))
        }
    }

    #[tokio::test]
    async fn store_failure_aborts_the_whole_table() {
        let builder =
            SoccerTableBuilder::new(Arc::new(FailingStore), Arc::new(InMemoryRosterStore::new()));
        let err = builder.table_for_events(&[1]).await.unwrap_err();
        assert!(matches!(err, StatsError::DataAccess(_)));
    }

    #[tokio::test]
    async fn roster_failure_aborts_the_whole_table() {
        let builder =
            SoccerTableBuilder::new(Arc::new(InMemoryStatStore::new()), Arc::new(FailingRoster));
        let err = builder.table_for_events(&[1]).await.unwrap_err();
        assert!(matches!(err, StatsError::DataAccess(_)));
    }
}
