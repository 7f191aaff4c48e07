//! Test helpers shared across mnemo crates.

pub mod fixtures;

pub use fixtures::{
    config_with_graph_store, minimal_config, minimal_config_value, neo4j_graph_store_value,
};
