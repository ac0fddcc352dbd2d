use std::collections::HashMap;
use std::sync::Arc;

use crate::soccer::{SoccerAggregator, SoccerTableBuilder};
use crate::sport::SportType;
use crate::stats::{SportAggregator, StatsError};
use crate::table::TableBuilder;
use crate::store::{RosterStore, StatRecordStore};
use crate::ultimate::{UltimateAggregator, UltimateTableBuilder};

/// The strategy pair registered for one sport.
#[derive(Clone)]
pub struct SportStrategies {
    pub aggregator: Arc<dyn SportAggregator>,
    pub table: Arc<dyn TableBuilder>,
}

/// Immutable mapping from a sport tag to its strategy pair. Built once at
/// startup and shared by reference; sports without tracked statistics simply
/// resolve to nothing.
pub struct StatRegistry {
    strategies: HashMap<SportType, SportStrategies>,
}

impl StatRegistry {
    pub fn builder() -> StatRegistryBuilder {
        StatRegistryBuilder::default()
    }

    /// The registry with every built-in sport wired against the given
    /// stores.
    pub fn standard(store: Arc<dyn StatRecordStore>, roster: Arc<dyn RosterStore>) -> Self {
        Self::builder()
            .with_sport(
                SportType::Soccer,
                Arc::new(SoccerAggregator::new(store.clone(), roster.clone())),
                Arc::new(SoccerTableBuilder::new(store.clone(), roster.clone())),
            )
            .with_sport(
                SportType::UltimateFrisbee,
                Arc::new(UltimateAggregator::new(store.clone(), roster.clone())),
                Arc::new(UltimateTableBuilder::new(store, roster)),
            )
            .build()
    }

    /// `None` is a normal outcome: not every sport has tracked statistics.
    pub fn resolve(&self, sport: SportType) -> Option<&SportStrategies> {
        self.strategies.get(&sport)
    }

    pub fn require(&self, sport: SportType) -> Result<&SportStrategies, StatsError> {
        self.resolve(sport).ok_or(StatsError::NoStrategy(sport))
    }

    pub fn registered_sports(&self) -> Vec<SportType> {
        self.strategies.keys().copied().collect()
    }
}

#[derive(Default)]
pub struct StatRegistryBuilder {
    strategies: HashMap<SportType, SportStrategies>,
}

impl StatRegistryBuilder {
    pub fn with_sport(
        mut self,
        sport: SportType,
        aggregator: Arc<dyn SportAggregator>,
        table: Arc<dyn TableBuilder>,
    ) -> Self {
        self.strategies
            .insert(sport, SportStrategies { aggregator, table });
        self
    }

    pub fn build(self) -> StatRegistry {
        StatRegistry {
            strategies: self.strategies,
        }
    }
}
