//! Command implementations.

pub mod search;
pub mod stats;

use std::path::Path;
use std::process;

use palaver_core::StringPool;
use palaver_index::WordIndex;
use palaver_ingest::Dataset;

/// Ingest a dump, seal the pool, and compile the index.
///
/// Shared by every command; exits with a message on ingest failure.
pub(crate) fn build(dump: &Path) -> (StringPool, WordIndex, Dataset) {
    let mut pool = StringPool::new();
    let dataset = match Dataset::from_path(dump, &mut pool) {
        Ok(dataset) => dataset,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    };
    log::info!(
        "parsed {} actors, {} variables, {} conversations, {} dialogue entries",
        dataset.actors.len(),
        dataset.variables.len(),
        dataset.conversations.len(),
        dataset.entries.len()
    );

    let pooled = pool.finalize();
    log::info!("pooled {pooled} strings");

    let mut index = WordIndex::new();
    let entries = index.compile(&pool);
    log::info!("indexed {entries} words");

    (pool, index, dataset)
}
