//! Sport-agnostic standings accumulation and ordering.
//!
//! The per-event outcome rule is shared by every sport: among an event's
//! participants the unique top scorer takes a win and everyone else a loss;
//! a shared top score gives each team at the max a tie while teams strictly
//! below still take a loss. Points-against accumulates per-opponent, never
//! re-adding a team's own score. Only the primary ranking key differs per
//! sport.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use crate::sport::SportType;
use crate::store::{EventId, TeamId, TeamScoreRow};

use super::TeamResultsRow;

/// Sport-specific primary ranking key. The tiebreak chain after it is
/// universal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankingKey {
    /// League points, 3 per win and 1 per tie (soccer).
    LeaguePoints,
    /// Win/loss differential (ultimate).
    WinDifferential,
}

impl RankingKey {
    pub fn primary(&self, row: &TeamResultsRow) -> i64 {
        match self {
            RankingKey::LeaguePoints => 3 * i64::from(row.wins) + i64::from(row.ties),
            RankingKey::WinDifferential => i64::from(row.wins) - i64::from(row.losses),
        }
    }
}

/// Strict total order over standings rows: primary key descending, then
/// wins descending, losses ascending, points-for descending, points-against
/// ascending, and finally teamID ascending. The teamID key is absolute, so
/// no two distinct teams ever compare equal.
pub fn compare_rows(a: &TeamResultsRow, b: &TeamResultsRow, key: RankingKey) -> Ordering {
    key.primary(b)
        .cmp(&key.primary(a))
        .then_with(|| b.wins.cmp(&a.wins))
        .then_with(|| a.losses.cmp(&b.losses))
        .then_with(|| b.points_for.cmp(&a.points_for))
        .then_with(|| a.points_against.cmp(&b.points_against))
        .then_with(|| a.team_id.cmp(&b.team_id))
}

/// Builds the ranked table from per-event per-team primary scores plus the
/// full roster of teams linked to the events (zero-filled when scoreless).
pub fn build_table(
    sport: SportType,
    key: RankingKey,
    scores: &[TeamScoreRow],
    roster: &BTreeSet<TeamId>,
) -> Vec<TeamResultsRow> {
    let mut events: BTreeMap<EventId, BTreeMap<TeamId, i64>> = BTreeMap::new();
    for score in scores {
        *events
            .entry(score.event_id)
            .or_default()
            .entry(score.team_id)
            .or_default() += score.score;
    }

    let mut rows: BTreeMap<TeamId, TeamResultsRow> = BTreeMap::new();
    for team_id in roster {
        rows.insert(*team_id, TeamResultsRow::new(sport, *team_id));
    }
    for event in events.values() {
        for team_id in event.keys() {
            rows.entry(*team_id)
                .or_insert_with(|| TeamResultsRow::new(sport, *team_id));
        }
    }

    for event in events.values() {
        apply_event(event, &mut rows);
    }

    let mut table: Vec<TeamResultsRow> = rows.into_values().collect();
    table.sort_by(|a, b| compare_rows(a, b, key));
    for (index, row) in table.iter_mut().enumerate() {
        row.rank = index as u32 + 1;
    }
    table
}

fn apply_event(event: &BTreeMap<TeamId, i64>, rows: &mut BTreeMap<TeamId, TeamResultsRow>) {
    let Some(max) = event.values().copied().max() else {
        return;
    };
    let total: i64 = event.values().sum();
    let winners: Vec<TeamId> = event
        .iter()
        .filter(|(_, score)| **score == max)
        .map(|(team_id, _)| *team_id)
        .collect();

    for (team_id, score) in event {
        let Some(row) = rows.get_mut(team_id) else {
            continue;
        };
        row.points_for += score;
        row.points_against += total - score;

        if *score == max {
            if winners.len() == 1 {
                row.wins += 1;
            } else {
                row.ties += 1;
            }
        } else {
            row.losses += 1;
        }
    }
}
