use serde::{Deserialize, Serialize};

use crate::sport::SportType;
use crate::store::{EventId, LeagueId, TeamId};

/// Per-player soccer counters, all defaulting to zero when absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoccerPlayerLine {
    pub goals: i64,
    pub assists: i64,
    pub goals_against: i64,
    pub shots: i64,
    pub shots_on_goal: i64,
    pub fouls: i64,
    pub yellow: i64,
    pub red: i64,
    pub saves: i64,
    pub minutes: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UltimatePlayerLine {
    pub points_thrown: i64,
    pub points_received: i64,
    pub fouls: i64,
}

/// Sport-specific player metrics carried as a tagged variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "sport", rename_all = "snake_case")]
pub enum PlayerMetrics {
    Soccer(SoccerPlayerLine),
    Ultimate(UltimatePlayerLine),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub sport: SportType,
    pub login: String,
    pub metrics: PlayerMetrics,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoccerTeamLine {
    pub goals: i64,
    pub goals_against: i64,
    pub shots: i64,
    pub shots_on_goal: i64,
    pub fouls: i64,
    pub yellow: i64,
    pub red: i64,
    pub saves: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UltimateTeamLine {
    pub points_for: i64,
    pub points_against: i64,
    pub fouls: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "sport", rename_all = "snake_case")]
pub enum TeamMetrics {
    Soccer(SoccerTeamLine),
    Ultimate(UltimateTeamLine),
}

impl TeamMetrics {
    /// The sport's primary score metric: goals for soccer, points for
    /// ultimate. Drives event outcomes and the league top-scorer.
    pub fn primary_score(&self) -> i64 {
        match self {
            TeamMetrics::Soccer(line) => line.goals,
            TeamMetrics::Ultimate(line) => line.points_for,
        }
    }
}

/// Aggregated team counters plus that team's player lines. Built fresh per
/// query, never mutated after return. The player list is filled for event
/// queries and left empty for bare team queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamStats {
    pub sport: SportType,
    pub team_id: TeamId,
    pub totals: TeamMetrics,
    pub players: Vec<PlayerStats>,
}

/// Event-level totals summed across teams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "sport", rename_all = "snake_case")]
pub enum EventTotals {
    Soccer {
        goals: i64,
        shots: i64,
        shots_on_goal: i64,
    },
    Ultimate {
        points: i64,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventStats {
    pub sport: SportType,
    pub event_id: EventId,
    pub teams: Vec<TeamStats>,
    pub totals: EventTotals,
}

/// League-level totals summed across teams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "sport", rename_all = "snake_case")]
pub enum LeagueTotals {
    Soccer {
        goals: i64,
        fouls: i64,
        yellow: i64,
        red: i64,
        shots: i64,
        shots_on_goal: i64,
    },
    Ultimate {
        points: i64,
        fouls: i64,
    },
}

/// The league team with the highest primary score. Strictly-greater,
/// first-seen-wins: a later team with an equal score never takes the title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopTeam {
    pub team_id: TeamId,
    pub score: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeagueStats {
    pub sport: SportType,
    pub league_id: LeagueId,
    pub teams: Vec<TeamStats>,
    pub totals: LeagueTotals,
    pub top_scoring_team: Option<TopTeam>,
}
