use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use super::{
    EventId, LeagueId, RosterStore, SessionStore, StatRecordStore, StatRow, TeamId, TeamScoreRow,
};
use crate::sport::SportType;
use crate::stats::StatsError;

/// In-memory stat record store for development and testing. Rows live in one
/// table per sport, mirroring the per-sport stat tables of the production
/// schema.
#[derive(Debug, Default)]
pub struct InMemoryStatStore {
    tables: RwLock<HashMap<SportType, Vec<StatRow>>>,
}

impl InMemoryStatStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds one raw row. The real write path sits behind the session guard
    /// and is outside this core.
    pub async fn record_row(&self, sport: SportType, row: StatRow) {
        let mut tables = self.tables.write().await;
        tables.entry(sport).or_default().push(row);
    }

    pub async fn row_count(&self, sport: SportType) -> usize {
        let tables = self.tables.read().await;
        tables.get(&sport).map(Vec::len).unwrap_or(0)
    }
}

#[async_trait]
impl StatRecordStore for InMemoryStatStore {
    async fn rows_for_event(
        &self,
        sport: SportType,
        event_id: EventId,
    ) -> Result<Vec<StatRow>, StatsError> {
        let tables = self.tables.read().await;
        Ok(tables
            .get(&sport)
            .into_iter()
            .flatten()
            .filter(|row| row.event_id == event_id)
            .cloned()
            .collect())
    }

    async fn rows_for_player(
        &self,
        sport: SportType,
        login: &str,
        team_id: Option<TeamId>,
    ) -> Result<Vec<StatRow>, StatsError> {
        let tables = self.tables.read().await;
        Ok(tables
            .get(&sport)
            .into_iter()
            .flatten()
            .filter(|row| row.player == login)
            .filter(|row| team_id.is_none_or(|team| row.team_id == team))
            .cloned()
            .collect())
    }

    async fn rows_for_team(
        &self,
        sport: SportType,
        team_id: TeamId,
    ) -> Result<Vec<StatRow>, StatsError> {
        let tables = self.tables.read().await;
        Ok(tables
            .get(&sport)
            .into_iter()
            .flatten()
            .filter(|row| row.team_id == team_id)
            .cloned()
            .collect())
    }

    async fn event_team_scores(
        &self,
        sport: SportType,
        events: &[EventId],
        metric: &str,
    ) -> Result<Vec<TeamScoreRow>, StatsError> {
        let tables = self.tables.read().await;
        let mut grouped: HashMap<(EventId, TeamId), i64> = HashMap::new();
        for row in tables.get(&sport).into_iter().flatten() {
            if events.contains(&row.event_id) {
                *grouped.entry((row.event_id, row.team_id)).or_default() += row.metric(metric);
            }
        }
        Ok(grouped
            .into_iter()
            .map(|((event_id, team_id), score)| TeamScoreRow {
                event_id,
                team_id,
                score,
            })
            .collect())
    }

    #[instrument(skip(self))]
    async fn delete_event_rows(
        &self,
        sport: SportType,
        event_id: EventId,
    ) -> Result<(), StatsError> {
        // Single write lock keeps the delete atomic with respect to readers.
        let mut tables = self.tables.write().await;
        if let Some(rows) = tables.get_mut(&sport) {
            let before = rows.len();
            rows.retain(|row| row.event_id != event_id);
            debug!(event_id, removed = before - rows.len(), "Deleted event stat rows");
        }
        Ok(())
    }
}

/// In-memory roster and bracket graph.
#[derive(Debug, Default)]
pub struct InMemoryRosterStore {
    event_teams: RwLock<HashMap<EventId, BTreeSet<TeamId>>>,
    league_teams: RwLock<HashMap<LeagueId, Vec<TeamId>>>,
    next_events: RwLock<HashMap<EventId, EventId>>,
}

impl InMemoryRosterStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn link_event_teams(&self, event_id: EventId, teams: &[TeamId]) {
        let mut event_teams = self.event_teams.write().await;
        event_teams
            .entry(event_id)
            .or_default()
            .extend(teams.iter().copied());
    }

    pub async fn put_league(&self, league_id: LeagueId, teams: &[TeamId]) {
        let mut league_teams = self.league_teams.write().await;
        league_teams.insert(league_id, teams.to_vec());
    }

    pub async fn link_bracket(&self, event_id: EventId, next_event_id: EventId) {
        let mut next_events = self.next_events.write().await;
        next_events.insert(event_id, next_event_id);
    }

    pub async fn event_teams(&self, event_id: EventId) -> BTreeSet<TeamId> {
        let event_teams = self.event_teams.read().await;
        event_teams.get(&event_id).cloned().unwrap_or_default()
    }
}

#[async_trait]
impl RosterStore for InMemoryRosterStore {
    async fn teams_for_events(&self, events: &[EventId]) -> Result<BTreeSet<TeamId>, StatsError> {
        let event_teams = self.event_teams.read().await;
        let mut teams = BTreeSet::new();
        for event_id in events {
            if let Some(linked) = event_teams.get(event_id) {
                teams.extend(linked.iter().copied());
            }
        }
        Ok(teams)
    }

    async fn teams_for_league(
        &self,
        league_id: LeagueId,
    ) -> Result<Option<Vec<TeamId>>, StatsError> {
        let league_teams = self.league_teams.read().await;
        Ok(league_teams.get(&league_id).cloned())
    }

    async fn next_event_id(&self, event_id: EventId) -> Result<Option<EventId>, StatsError> {
        let next_events = self.next_events.read().await;
        Ok(next_events.get(&event_id).copied())
    }

    #[instrument(skip(self))]
    async fn set_event_required_teams(
        &self,
        event_id: EventId,
        add: &[TeamId],
        remove: &[TeamId],
    ) -> Result<(), StatsError> {
        let mut event_teams = self.event_teams.write().await;
        let teams = event_teams.entry(event_id).or_default();
        for team in remove {
            teams.remove(team);
        }
        for team in add {
            teams.insert(*team);
        }
        debug!(event_id, ?add, ?remove, "Updated required participants");
        Ok(())
    }
}

/// In-memory session guard: at most one active scorekeeper token per event.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    active: RwLock<HashMap<EventId, String>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a session for the event. Fails if a different session is
    /// already active; re-opening the same token is a no-op success.
    pub async fn open_session(&self, event_id: EventId, token: &str) -> bool {
        let mut active = self.active.write().await;
        match active.get(&event_id) {
            Some(existing) => existing == token,
            None => {
                active.insert(event_id, token.to_string());
                true
            }
        }
    }

    pub async fn close_session(&self, event_id: EventId) {
        let mut active = self.active.write().await;
        active.remove(&event_id);
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn is_active_session(
        &self,
        token: &str,
        event_id: EventId,
    ) -> Result<bool, StatsError> {
        if token.is_empty() || event_id < 1 {
            return Ok(false);
        }
        let active = self.active.read().await;
        Ok(active.get(&event_id).is_some_and(|t| t == token))
    }
}
