//! Workload generation: hot/cold range queries with occasional point updates
//!
//! Mirrors a recency-friendly access pattern: a small pool of "hot" ranges
//! absorbs most queries, the rest are uniform cold ranges, and a small
//! fraction of operations are point updates.

use rand::rngs::StdRng;
use rand::Rng;

/// A single driver operation
#[derive(Debug, Clone, Copy)]
pub enum Query {
    /// Inclusive range-sum query
    Range {
        /// Left bound
        left: usize,
        /// Right bound
        right: usize,
    },
    /// Point update
    Update {
        /// Index to overwrite
        index: usize,
        /// New value
        value: i64,
    },
}

/// Workload shape parameters
#[derive(Debug, Clone, Copy)]
pub struct WorkloadConfig {
    /// Array length
    pub n: usize,
    /// Number of queries to generate
    pub q: usize,
    /// Number of hot ranges
    pub hot_pool: usize,
    /// Probability a Range query draws from the hot pool
    pub p_hot: f64,
    /// Probability an operation is an Update
    pub p_update: f64,
}

/// Generate a random array of `n` values in `1..=1000`
pub fn make_array(rng: &mut StdRng, n: usize) -> Vec<i64> {
    (0..n).map(|_| rng.gen_range(1..=1000)).collect()
}

/// Generate `config.q` operations.
///
/// Hot ranges span the array midpoint so they stay long (and expensive to
/// recompute), which is where caching pays off.
pub fn make_queries(rng: &mut StdRng, config: &WorkloadConfig) -> Vec<Query> {
    let n = config.n;
    let hot: Vec<(usize, usize)> = (0..config.hot_pool)
        .map(|_| (rng.gen_range(0..n / 2), rng.gen_range(n / 2..n)))
        .collect();

    let mut queries = Vec::with_capacity(config.q);
    for _ in 0..config.q {
        if rng.gen_bool(config.p_update) {
            queries.push(Query::Update {
                index: rng.gen_range(0..n),
                value: rng.gen_range(1..=1000),
            });
        } else if rng.gen_bool(config.p_hot) {
            let (left, right) = hot[rng.gen_range(0..hot.len())];
            queries.push(Query::Range { left, right });
        } else {
            let left = rng.gen_range(0..n);
            let right = rng.gen_range(left..n);
            queries.push(Query::Range { left, right });
        }
    }
    queries
}
