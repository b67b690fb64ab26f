pub mod catalog;
pub mod comparator;
pub mod comparators;
pub mod engine;
pub mod filter;
pub mod loader;
pub mod system;

pub use catalog::{all_available_comparators, default_comparators, ComparatorIdentity};
pub use comparator::Comparator;
pub use engine::ComparisonEngine;
pub use filter::filter_snapshot;
pub use loader::load_snapshot;
pub use system::{DefaultSystem, StaticSystem, System};

#[cfg(test)]
pub(crate) mod testutil;
