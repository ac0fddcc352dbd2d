use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::sport::SportType;
use crate::stats::{
    EventStats, EventTotals, LeagueStats, LeagueTotals, PlayerMetrics, PlayerStats,
    SoccerPlayerLine, SoccerTeamLine, SportAggregator, StatsError, TeamMetrics, TeamStats,
    TopTeam,
};
use crate::store::{EventId, LeagueId, RosterStore, StatRecordStore, StatRow, TeamId};

use super::metric;

/// Statistics aggregation strategy for soccer.
pub struct SoccerAggregator {
    store: Arc<dyn StatRecordStore>,
    roster: Arc<dyn RosterStore>,
}

impl SoccerAggregator {
    pub fn new(store: Arc<dyn StatRecordStore>, roster: Arc<dyn RosterStore>) -> Self {
        Self { store, roster }
    }

    fn team_stats_from_rows(&self, team_id: TeamId, rows: &[&StatRow]) -> TeamStats {
        let mut by_player: BTreeMap<&str, Vec<&StatRow>> = BTreeMap::new();
        for row in rows {
            by_player.entry(row.player.as_str()).or_default().push(row);
        }

        let players = by_player
            .into_iter()
            .map(|(login, rows)| PlayerStats {
                sport: SportType::Soccer,
                login: login.to_string(),
                metrics: PlayerMetrics::Soccer(sum_player_line(&rows)),
            })
            .collect();

        TeamStats {
            sport: SportType::Soccer,
            team_id,
            totals: TeamMetrics::Soccer(sum_team_line(rows)),
            players,
        }
    }
}

fn sum_player_line(rows: &[&StatRow]) -> SoccerPlayerLine {
    let mut line = SoccerPlayerLine::default();
    for row in rows {
        line.goals += row.metric(metric::GOALS);
        line.assists += row.metric(metric::ASSISTS);
        line.goals_against += row.metric(metric::GOALS_AGAINST);
        line.shots += row.metric(metric::SHOTS);
        line.shots_on_goal += row.metric(metric::SHOTS_ON_GOAL);
        line.fouls += row.metric(metric::FOULS);
        line.yellow += row.metric(metric::YELLOW);
        line.red += row.metric(metric::RED);
        line.saves += row.metric(metric::SAVES);
        line.minutes += row.metric(metric::MINUTES);
    }
    line
}

fn sum_team_line(rows: &[&StatRow]) -> SoccerTeamLine {
    let mut line = SoccerTeamLine::default();
    for row in rows {
        line.goals += row.metric(metric::GOALS);
        line.goals_against += row.metric(metric::GOALS_AGAINST);
        line.shots += row.metric(metric::SHOTS);
        line.shots_on_goal += row.metric(metric::SHOTS_ON_GOAL);
        line.fouls += row.metric(metric::FOULS);
        line.yellow += row.metric(metric::YELLOW);
        line.red += row.metric(metric::RED);
        line.saves += row.metric(metric::SAVES);
    }
    line
}

#[async_trait]
impl SportAggregator for SoccerAggregator {
    fn sport(&self) -> SportType {
        SportType::Soccer
    }

    async fn event_stats(&self, event_id: EventId) -> Result<EventStats, StatsError> {
        let rows = self.store.rows_for_event(SportType::Soccer, event_id).await?;

        let mut by_team: BTreeMap<TeamId, Vec<&StatRow>> = BTreeMap::new();
        for row in &rows {
            by_team.entry(row.team_id).or_default().push(row);
        }

        let teams: Vec<TeamStats> = by_team
            .into_iter()
            .map(|(team_id, rows)| self.team_stats_from_rows(team_id, &rows))
            .collect();

        let mut goals = 0;
        let mut shots = 0;
        let mut shots_on_goal = 0;
        for team in &teams {
            if let TeamMetrics::Soccer(line) = &team.totals {
                goals += line.goals;
                shots += line.shots;
                shots_on_goal += line.shots_on_goal;
            }
        }

        Ok(EventStats {
            sport: SportType::Soccer,
            event_id,
            teams,
            totals: EventTotals::Soccer {
                goals,
                shots,
                shots_on_goal,
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
            .rows_for_player(SportType::Soccer, login, team_id)
            .await?;
        if rows.is_empty() {
            return Err(StatsError::not_found(format!(
                "no soccer stats for player {login}"
            )));
        }

        let refs: Vec<&StatRow> = rows.iter().collect();
        Ok(PlayerStats {
            sport: SportType::Soccer,
            login: login.to_string(),
            metrics: PlayerMetrics::Soccer(sum_player_line(&refs)),
        })
    }

    async fn team_stats(&self, team_id: TeamId) -> Result<TeamStats, StatsError> {
        let rows = self.store.rows_for_team(SportType::Soccer, team_id).await?;
        let refs: Vec<&StatRow> = rows.iter().collect();
        Ok(TeamStats {
            sport: SportType::Soccer,
            team_id,
            totals: TeamMetrics::Soccer(sum_team_line(&refs)),
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
        let mut totals = SoccerTeamLine::default();

        for team_id in team_ids {
            let team = self.team_stats(team_id).await?;
            if let TeamMetrics::Soccer(line) = &team.totals {
                // Strictly greater: the first-seen team keeps the title on a
                // later equal score.
                if top.is_none_or(|t| line.goals > t.score) {
                    top = Some(TopTeam {
                        team_id,
                        score: line.goals,
                    });
                }
                totals.goals += line.goals;
                totals.fouls += line.fouls;
                totals.yellow += line.yellow;
                totals.red += line.red;
                totals.shots += line.shots;
                totals.shots_on_goal += line.shots_on_goal;
            }
            teams.push(team);
        }

        Ok(LeagueStats {
            sport: SportType::Soccer,
            league_id,
            teams,
            totals: LeagueTotals::Soccer {
                goals: totals.goals,
                fouls: totals.fouls,
                yellow: totals.yellow,
                red: totals.red,
                shots: totals.shots,
                shots_on_goal: totals.shots_on_goal,
            },
            top_scoring_team: top,
        })
    }

    async fn delete_event_stats(&self, event_id: EventId) -> Result<(), StatsError> {
        self.store
            .delete_event_rows(SportType::Soccer, event_id)
            .await
    }
}
