pub mod aggregator;
pub mod table;

pub use aggregator::UltimateAggregator;
pub use table::UltimateTableBuilder;

/// Metric vocabulary of the ultimate frisbee stat table.
pub mod metric {
    pub const POINTS_THROWN: &str = "pointsthrown";
    pub const POINTS_RECEIVED: &str = "pointsreceived";
    pub const FOULS: &str = "fouls";
}
