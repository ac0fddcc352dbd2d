pub mod aggregator;
pub mod table;

pub use aggregator::SoccerAggregator;
pub use table::SoccerTableBuilder;

/// Metric vocabulary of the soccer stat table.
pub mod metric {
    pub const GOALS: &str = "goals";
    pub const ASSISTS: &str = "assists";
    pub const GOALS_AGAINST: &str = "goalsagainst";
    pub const SHOTS: &str = "shots";
    pub const SHOTS_ON_GOAL: &str = "shotsongoal";
    pub const FOULS: &str = "fouls";
    pub const YELLOW: &str = "yellow";
    pub const RED: &str = "red";
    pub const SAVES: &str = "saves";
    pub const MINUTES: &str = "minutes";
}
