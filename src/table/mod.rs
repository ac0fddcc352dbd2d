pub mod standings;

pub use standings::{build_table, compare_rows, RankingKey};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::sport::SportType;
use crate::stats::StatsError;
use crate::store::{EventId, TeamId};

/// One standings row. Constructed fresh per table computation and immutable
/// once emitted; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamResultsRow {
    pub sport: SportType,
    pub team_id: TeamId,
    /// 1-based, dense, unique within a table.
    pub rank: u32,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub points_for: i64,
    pub points_against: i64,
}

impl TeamResultsRow {
    pub fn new(sport: SportType, team_id: TeamId) -> Self {
        Self {
            sport,
            team_id,
            rank: 0,
            wins: 0,
            losses: 0,
            ties: 0,
            points_for: 0,
            points_against: 0,
        }
    }
}

/// Per-sport standings contract: turns a set of events into a fully ranked
/// table. Every team linked to any of the events appears exactly once, even
/// with zero recorded stats.
#[async_trait]
pub trait TableBuilder: Send + Sync {
    fn sport(&self) -> SportType;

    async fn table_for_events(&self, events: &[EventId])
        -> Result<Vec<TeamResultsRow>, StatsError>;
}
