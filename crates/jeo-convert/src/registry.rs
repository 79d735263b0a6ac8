//! Deduplicating pool insertion.
//!
//! The indexed model shares pool entries between entities, so every
//! insertion first scans for an entry the candidate may reuse. The scan is
//! front to back and the first match wins, which makes pool order a function
//! of entity order alone.

/// Insert `candidate` into `pool` unless an existing entry matches it, and
/// return the index of the entry the caller should reference.
///
/// `matches` is called as `matches(existing, candidate)`. For exact pools
/// (colors, tags) it is plain equality; the point pool passes a tolerant
/// distance predicate instead, so coordinates within tolerance of an earlier
/// entry snap to that entry's index.
pub fn insert_or_reuse<T>(
    pool: &mut Vec<T>,
    candidate: T,
    matches: impl Fn(&T, &T) -> bool,
) -> u64 {
    for (index, existing) in pool.iter().enumerate() {
        if matches(existing, &candidate) {
            return index as u64;
        }
    }
    pool.push(candidate);
    (pool.len() - 1) as u64
}
