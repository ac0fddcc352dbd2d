use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::sport::SportType;
use crate::stats::StatsError;
use crate::table::{build_table, RankingKey, TableBuilder, TeamResultsRow};
use crate::store::{EventId, RosterStore, StatRecordStore};

use super::metric;

/// Standings strategy for ultimate frisbee: points thrown are the primary
/// score, ranking by win/loss differential.
pub struct UltimateTableBuilder {
    store: Arc<dyn StatRecordStore>,
    roster: Arc<dyn RosterStore>,
}

impl UltimateTableBuilder {
    pub fn new(store: Arc<dyn StatRecordStore>, roster: Arc<dyn RosterStore>) -> Self {
        Self { store, roster }
    }
}

#[async_trait]
impl TableBuilder for UltimateTableBuilder {
    fn sport(&self) -> SportType {
        SportType::UltimateFrisbee
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
            .event_team_scores(SportType::UltimateFrisbee, events, metric::POINTS_THROWN)
            .await?;
        let roster = self.roster.teams_for_events(events).await?;
        debug!(events = events.len(), teams = roster.len(), "Building ultimate table");

        Ok(build_table(
            SportType::UltimateFrisbee,
            RankingKey::WinDifferential,
            &scores,
            &roster,
        ))
    }
}
