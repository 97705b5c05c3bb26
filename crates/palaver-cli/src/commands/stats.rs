//! Pool and index statistics.

use std::path::Path;

pub fn run(dump: &Path) {
    let (pool, index, dataset) = super::build(dump);
    let blob = pool.blob().expect("pool sealed by build");

    println!("actors:          {}", dataset.actors.len());
    println!("variables:       {}", dataset.variables.len());
    println!("conversations:   {}", dataset.conversations.len());
    println!("dialogue lines:  {}", dataset.entries.len());
    println!("pooled strings:  {}", blob.record_count());
    println!("blob size:       {} bytes", blob.len());
    println!("blob checksum:   {:08x}", blob.checksum());
    println!("distinct words:  {}", index.len());
    println!("index entries:   {}", index.entry_count());
}
