//! Keys command - print the cache key templates

use crate::cache::CACHE_KEYS;

/// Execute the keys command
pub fn execute() {
    for key in CACHE_KEYS {
        println!("{}", key);
    }
}
