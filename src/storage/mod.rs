// storage/mod.rs
// SQLite store: pool, relation catalogue and load history

pub mod history;
pub mod pool;
pub mod schema;
#[cfg(test)]
pub mod test_helpers;

// Re-export commonly used items
pub use history::{query_load_history, LoadRecord};
pub use pool::{init_db_pool, init_db_pool_with_path, DbPool};
pub use schema::{count_rows, drop_all_relations, Relation};
