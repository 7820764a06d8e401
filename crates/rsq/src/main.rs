//! rsq - range-sum query workload driver
//!
//! Runs a hot/cold query workload against the cached pipeline and, for
//! comparison, against the bare store, then reports timings and cache
//! statistics.

mod workload;

use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rangecache::CachedArray;
use rangestore::ArrayStore;
use tracing::info;

use crate::workload::{make_array, make_queries, Query, WorkloadConfig};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Array size
    #[arg(short, long, default_value_t = 100_000)]
    n: usize,

    /// Number of queries
    #[arg(short, long, default_value_t = 50_000)]
    queries: usize,

    /// Cache capacity (number of cached range sums)
    #[arg(short, long, default_value_t = 1000)]
    capacity: usize,

    /// Number of hot ranges
    #[arg(long, default_value_t = 30)]
    hot_pool: usize,

    /// Probability a range query draws from the hot pool
    #[arg(long, default_value_t = 0.95)]
    p_hot: f64,

    /// Probability an operation is a point update
    #[arg(long, default_value_t = 0.03)]
    p_update: f64,

    /// RNG seed for reproducible workloads
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Skip the uncached baseline run
    #[arg(long)]
    no_baseline: bool,
}

fn run_uncached(store: &ArrayStore, queries: &[Query]) -> Result<i64> {
    let mut checksum = 0i64;
    for query in queries {
        match *query {
            Query::Range { left, right } => {
                checksum = checksum.wrapping_add(store.range_sum(left, right)?);
            }
            Query::Update { index, value } => {
                store.write(index, value)?;
            }
        }
    }
    Ok(checksum)
}

fn run_cached(cached: &CachedArray, queries: &[Query]) -> Result<i64> {
    let mut checksum = 0i64;
    for query in queries {
        match *query {
            Query::Range { left, right } => {
                checksum = checksum.wrapping_add(cached.range_sum(left, right)?);
            }
            Query::Update { index, value } => {
                cached.update(index, value)?;
            }
        }
    }
    Ok(checksum)
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    info!("rsq v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Array size: {}, queries: {}, cache capacity: {}",
        args.n, args.queries, args.capacity
    );
    info!(
        "Workload: hot_pool={}, p_hot={}, p_update={}, seed={}",
        args.hot_pool, args.p_hot, args.p_update, args.seed
    );

    let mut rng = StdRng::seed_from_u64(args.seed);
    let initial = make_array(&mut rng, args.n);
    let config = WorkloadConfig {
        n: args.n,
        q: args.queries,
        hot_pool: args.hot_pool,
        p_hot: args.p_hot,
        p_update: args.p_update,
    };
    let queries = make_queries(&mut rng, &config);

    let baseline = if args.no_baseline {
        None
    } else {
        let store = ArrayStore::new(initial.clone());
        let start = Instant::now();
        let checksum = run_uncached(&store, &queries)?;
        let elapsed = start.elapsed();
        info!(
            "Without cache: {:.2?} (checksum {})",
            elapsed, checksum
        );
        Some((elapsed, checksum))
    };

    let cached = CachedArray::new(initial, args.capacity)?;
    let start = Instant::now();
    let checksum = run_cached(&cached, &queries)?;
    let elapsed = start.elapsed();

    let stats = cached.stats();
    info!("With LRU cache: {:.2?} (checksum {})", elapsed, checksum);
    info!(
        "Cache stats: {} hits, {} misses, {} evictions, {} invalidations (hit ratio {:.1}%)",
        stats.hits(),
        stats.misses(),
        stats.evictions(),
        stats.invalidations(),
        stats.hit_ratio() * 100.0
    );

    if let Some((baseline_elapsed, baseline_checksum)) = baseline {
        // Identical workload against identical data must agree
        anyhow::ensure!(
            checksum == baseline_checksum,
            "cached run diverged from baseline: {} != {}",
            checksum,
            baseline_checksum
        );
        let speedup = baseline_elapsed.as_secs_f64() / elapsed.as_secs_f64();
        info!("Speedup: x{:.2}", speedup);
    }

    Ok(())
}
