//! Interactive search loop.

use std::io::{self, BufRead};
use std::path::Path;

use crate::cli::OriginFilter;

pub fn run(dump: &Path, origin: Option<OriginFilter>) {
    let (pool, index, _dataset) = super::build(dump);

    println!("Ready to search:");
    for line in io::stdin().lock().lines() {
        let Ok(line) = line else { break };
        let query = line.trim();
        if query == "exitnow" {
            break;
        }
        if query.is_empty() {
            continue;
        }

        for hit in index.search(&pool, query) {
            if origin.is_none_or(|filter| filter.kind() == hit.lookback.kind) {
                println!("{}", hit.text);
            }
        }
        println!();
    }
}
