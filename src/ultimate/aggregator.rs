use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use async_trait::async_trait;

use crate::sport::SportType;
use crate::stats::{
    EventStats, EventTotals, LeagueStats, LeagueTotals, PlayerMetrics, PlayerStats,
    SportAggregator, StatsError, TeamMetrics, TeamStats, TopTeam, UltimatePlayerLine,
    UltimateTeamLine,
};
use crate::store::{EventId, LeagueId, RosterStore, StatRecordStore, StatRow, TeamId};

use super::metric;

/// Statistics aggregation strategy for ultimate frisbee.
pub struct UltimateAggregator {
    store: Arc<dyn StatRecordStore>,
    roster: Arc<dyn RosterStore>,
}

impl UltimateAggregator {
    pub fn new(store: Arc<dyn StatRecordStore>, roster: Arc<dyn RosterStore>) -> Self {
        Self { store, roster }
    }
}

fn sum_player_line(rows: &[&StatRow]) -> UltimatePlayerLine {
    let mut line = UltimatePlayerLine::default();
    for row in rows {
        line.points_thrown += row.metric(metric::POINTS_THROWN);
        line.points_received += row.metric(metric::POINTS_RECEIVED);
        line.fouls += row.metric(metric::FOULS);
    }
    line
}

fn team_stats_from_rows(team_id: TeamId, rows: &[&StatRow]) -> TeamStats {
    let mut by_player: BTreeMap<&str, Vec<&StatRow>> = BTreeMap::new();
    let mut totals = UltimateTeamLine::default();
    for row in rows {
        by_player.entry(row.player.as_str()).or_default().push(row);
        totals.points_for += row.metric(metric::POINTS_THROWN);
        totals.fouls += row.metric(metric::FOULS);
    }

    let players = by_player
        .into_iter()
        .map(|(login, rows)| PlayerStats {
            sport: SportType::UltimateFrisbee,
            login: login.to_string(),
            metrics: PlayerMetrics::Ultimate(sum_player_line(&rows)),
        })
        .collect();

    TeamStats {
        sport: SportType::UltimateFrisbee,
        team_id,
        totals: TeamMetrics::Ultimate(totals),
        players,
    }
}

#[async_trait]
impl SportAggregator for UltimateAggregator {
    fn sport(&self) -> SportType {
        SportType::UltimateFrisbee
    }

    async fn event_stats(&self, event_id: EventId) -> Result<EventStats, StatsError> {
        let rows = self
            .store
            .rows_for_event(SportType::UltimateFrisbee, event_id)
            .await?;

        let mut by_team: BTreeMap<TeamId, Vec<&StatRow>> = BTreeMap::new();
        for row in &rows {
            by_team.entry(row.team_id).or_default().push(row);
        }

        let mut teams: Vec<TeamStats> = by_team
            .into_iter()
            .map(|(team_id, rows)| team_stats_from_rows(team_id, &rows))
            .collect();

        // Points against: every opponent's points in this event.
        let total_points: i64 = teams
            .iter()
            .map(|team| team.totals.primary_score())
            .sum();
        for team in &mut teams {
            if let TeamMetrics::Ultimate(line) = &mut team.totals {
                line.points_against = total_points - line.points_for;
            }
        }

        Ok(EventStats {
            sport: SportType::UltimateFrisbee,
            event_id,
            teams,
            totals: EventTotals::Ultimate {
                points: total_points,
            },
        })
    }

    async fn player_stats(
        &self,
        login: &str,
        team_id: Option<TeamId>,
    ) -> Result<PlayerStats, StatsError> {
        let rows = self
            .store
            .rows_for_player(SportType::UltimateFrisbee, login, team_id)
            .await?;
        if rows.is_empty() {
            return Err(StatsError::not_found(format!(
                "no ultimate stats for player {login}"
            )));
        }

        let refs: Vec<&StatRow> = rows.iter().collect();
        Ok(PlayerStats {
            sport: SportType::UltimateFrisbee,
            login: login.to_string(),
            metrics: PlayerMetrics::Ultimate(sum_player_line(&refs)),
        })
    }

    async fn team_stats(&self, team_id: TeamId) -> Result<TeamStats, StatsError> {
        let rows = self
            .store
            .rows_for_team(SportType::UltimateFrisbee, team_id)
            .await?;

        let mut totals = UltimateTeamLine::default();
        let mut events: BTreeSet<EventId> = BTreeSet::new();
        for row in &rows {
            totals.points_for += row.metric(metric::POINTS_THROWN);
            totals.fouls += row.metric(metric::FOULS);
            events.insert(row.event_id);
        }

        // Opponent points summed per event the team took part in.
        for event_id in events {
            let event_rows = self
                .store
                .rows_for_event(SportType::UltimateFrisbee, event_id)
                .await?;
            totals.points_against += event_rows
                .iter()
                .filter(|row| row.team_id != team_id)
                .map(|row| row.metric(metric::POINTS_THROWN))
                .sum::<i64>();
        }

        Ok(TeamStats {
            sport: SportType::UltimateFrisbee,
            team_id,
            totals: TeamMetrics::Ultimate(totals),
            players: vec![],
        })
    }

    async fn league_stats(&self, league_id: LeagueId) -> Result<LeagueStats, StatsError> {
        let team_ids = self
            .roster
            .teams_for_league(league_id)
            .await?
            .ok_or_else(|| StatsError::not_found(format!("league {league_id}")))?;

        let mut teams = Vec::with_capacity(team_ids.len());
        let mut top: Option<TopTeam> = None;
        let mut points = 0;
        let mut fouls = 0;

        for team_id in team_ids {
            let team = self.team_stats(team_id).await?;
            if let TeamMetrics::Ultimate(line) = &team.totals {
                if top.is_none_or(|t| line.points_for > t.score) {
                    top = Some(TopTeam {
                        team_id,
                        score: line.points_for,
                    });
                }
                points += line.points_for;
                fouls += line.fouls;
            }
            teams.push(team);
        }

        Ok(LeagueStats {
            sport: SportType::UltimateFrisbee,
            league_id,
            teams,
            totals: LeagueTotals::Ultimate { points, fouls },
            top_scoring_team: top,
        })
    }

    async fn delete_event_stats(&self, event_id: EventId) -> Result<(), StatsError> {
        self.store
            .delete_event_rows(SportType::UltimateFrisbee, event_id)
            .await
    }
}
