//! ttlmemo CLI
//!
//! Command-line driver for the ttlmemo cache: a narrated walkthrough of its
//! caching behavior, a load generator, and config inspection.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use rand::Rng;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use ttlmemo_cache::{CacheConfig, FetchError, TtlCache};

/// ttlmemo - single-flight async cache with TTL expiry
#[derive(Parser)]
#[command(name = "ttlmemo")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Walk through hits, misses, expiry, coalescing and failures
    Demo {
        /// Time-to-live in milliseconds
        #[arg(long, env = "TTLMEMO_TTL_MS", default_value = "500", allow_negative_numbers = true)]
        ttl_ms: i64,
        /// Simulated producer latency in milliseconds
        #[arg(long, default_value = "100")]
        delay_ms: u64,
    },

    /// Fire concurrent fetches over a random key set
    Bench {
        /// Number of distinct keys
        #[arg(short, long, default_value = "100")]
        keys: u64,
        /// Total number of fetches
        #[arg(short, long, default_value = "10000")]
        requests: usize,
        /// Fetches in flight at once
        #[arg(short, long, default_value = "64")]
        concurrency: usize,
        /// Time-to-live in milliseconds
        #[arg(long, env = "TTLMEMO_TTL_MS", default_value = "5000", allow_negative_numbers = true)]
        ttl_ms: i64,
        /// Simulated producer latency in milliseconds
        #[arg(long, default_value = "5")]
        delay_ms: u64,
    },

    /// Load, validate and print a cache configuration
    Config {
        /// JSON config file (defaults to the environment)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "ttlmemo=debug,info"
    } else {
        "ttlmemo=info,warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Demo { ttl_ms, delay_ms } => cmd_demo(ttl_ms, delay_ms).await,
        Commands::Bench {
            keys,
            requests,
            concurrency,
            ttl_ms,
            delay_ms,
        } => cmd_bench(keys, requests, concurrency, ttl_ms, delay_ms).await,
        Commands::Config { file } => cmd_config(file),
    }
}

type GreekCache = TtlCache<&'static str, Option<&'static str>, String>;

/// Builds a cache over a small lookup table. `x` always fails.
fn greek_cache(ttl_ms: i64, delay: Duration) -> Result<(GreekCache, Arc<AtomicUsize>)> {
    let table: Arc<HashMap<&'static str, &'static str>> = Arc::new(HashMap::from([
        ("a", "alpha"),
        ("b", "beta"),
        ("d", "delta"),
        ("e", "echo"),
    ]));
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);

    let cache = TtlCache::builder()
        .ttl_ms(ttl_ms)
        .producer(move |key: &'static str| {
            let table = Arc::clone(&table);
            let calls = Arc::clone(&counter);
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                tokio::time::sleep(delay).await;
                if key == "x" {
                    return Err(format!("backing data unavailable for '{key}'"));
                }
                Ok(table.get(key).copied())
            }
        })
        .build()
        .context("Invalid cache configuration")?;

    Ok((cache, calls))
}

/// Fetches one key and prints what happened.
async fn show_fetch(cache: &GreekCache, key: &'static str) {
    let misses_before = cache.stats().misses;
    let start = Instant::now();
    let result = cache.fetch(key).await;
    let elapsed = start.elapsed();
    let kind = if cache.stats().misses > misses_before {
        "produced".yellow()
    } else {
        "cached".green()
    };

    let shown = match &result {
        Ok(Some(value)) => value.to_string().normal(),
        Ok(None) => "(no value)".dimmed(),
        Err(FetchError::Producer(err)) => format!("error: {err}").red(),
        Err(FetchError::Abandoned) => "error: producer abandoned".red(),
    };

    println!("   {:>4}  {:<28} {:>8.1?}  {}", key.bold(), shown, elapsed, kind);
}

/// Walk through the cache's behavior
async fn cmd_demo(ttl_ms: i64, delay_ms: u64) -> Result<()> {
    let delay = Duration::from_millis(delay_ms);
    let (cache, calls) = greek_cache(ttl_ms, delay)?;
    let ttl = cache.ttl();

    println!(
        "{} ttl={:?}, producer delay={:?}",
        "⏱  ttlmemo demo:".cyan().bold(),
        ttl,
        delay
    );

    println!("\n{}", "1. First fetches go to the producer".yellow().bold());
    for key in ["a", "b", "c"] {
        show_fetch(&cache, key).await;
    }

    println!("\n{}", "2. A second fetch within the TTL is served from the cache".yellow().bold());
    show_fetch(&cache, "d").await;
    show_fetch(&cache, "d").await;

    println!("\n{}", "3. After the TTL the value is produced again".yellow().bold());
    show_fetch(&cache, "e").await;
    tokio::time::sleep(ttl * 2).await;
    show_fetch(&cache, "e").await;

    println!("\n{}", "4. Concurrent fetches share one producer call".yellow().bold());
    cache.invalidate(&"b");
    let before = calls.load(Ordering::SeqCst);
    let results = futures::future::join_all((0..5).map(|_| cache.fetch("b"))).await;
    let produced = calls.load(Ordering::SeqCst) - before;
    println!(
        "   {} fetches, {} producer call(s), all equal: {}",
        results.len(),
        produced,
        results.windows(2).all(|w| w[0] == w[1])
    );

    println!("\n{}", "5. Failures are passed through and never cached".yellow().bold());
    show_fetch(&cache, "x").await;
    show_fetch(&cache, "x").await;

    println!("\n{}", "📈 Stats:".green().bold());
    println!("{}", serde_json::to_string_pretty(&cache.stats())?);

    Ok(())
}

/// Load-test the cache
async fn cmd_bench(
    keys: u64,
    requests: usize,
    concurrency: usize,
    ttl_ms: i64,
    delay_ms: u64,
) -> Result<()> {
    anyhow::ensure!(keys > 0, "--keys must be at least 1");
    anyhow::ensure!(concurrency > 0, "--concurrency must be at least 1");

    println!(
        "{} {} fetches over {} keys ({} concurrent)",
        "📊 Benchmarking".cyan().bold(),
        requests,
        keys,
        concurrency
    );

    let delay = Duration::from_millis(delay_ms);
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let cache: TtlCache<u64, u64, String> = TtlCache::builder()
        .ttl_ms(ttl_ms)
        .producer(move |key: u64| {
            let calls = Arc::clone(&counter);
            async move {
                calls.fetch_add(1, Ordering::Relaxed);
                tokio::time::sleep(delay).await;
                Ok::<_, String>(key.wrapping_mul(2_654_435_761))
            }
        })
        .build()
        .context("Invalid cache configuration")?;

    let workload: Vec<u64> = {
        let mut rng = rand::thread_rng();
        (0..requests).map(|_| rng.gen_range(0..keys)).collect()
    };

    let pb = ProgressBar::new(requests as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("   [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("#>-"),
    );

    let start = Instant::now();
    let failures = stream::iter(workload)
        .map(|key| {
            let cache = cache.clone();
            async move { cache.fetch(key).await }
        })
        .buffer_unordered(concurrency)
        .fold(0usize, |failures, result| {
            pb.inc(1);
            async move { failures + usize::from(result.is_err()) }
        })
        .await;
    pb.finish();
    let elapsed = start.elapsed();

    let stats = cache.stats();
    info!(?elapsed, producer_calls = calls.load(Ordering::Relaxed), "bench finished");

    println!("\n{}", "📈 Results:".green().bold());
    println!("   Elapsed: {:?}", elapsed);
    println!(
        "   Throughput: {:.0} fetches/sec",
        requests as f64 / elapsed.as_secs_f64().max(f64::EPSILON)
    );
    println!("   Producer calls: {}", calls.load(Ordering::Relaxed));
    println!(
        "   Hits: {}  Coalesced: {}  Misses: {}",
        stats.hits, stats.coalesced, stats.misses
    );
    println!("   Hit rate: {:.1}%", stats.hit_rate());

    if failures == 0 {
        println!("   {} Every fetch succeeded", "✅".green());
    } else {
        println!("   {} {} fetch(es) failed", "❌".red(), failures);
    }

    Ok(())
}

/// Print the effective configuration
fn cmd_config(file: Option<PathBuf>) -> Result<()> {
    let (source, config) = match file {
        Some(path) => {
            let config = CacheConfig::from_file(&path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?;
            (path.display().to_string(), config)
        }
        None => {
            let config = CacheConfig::from_env().context("Invalid configuration in environment")?;
            ("environment".to_string(), config)
        }
    };

    println!("{} {}", "⚙️  Configuration from".cyan().bold(), source);
    println!("{}", serde_json::to_string_pretty(&config)?);
    println!("   {} {:?}", "TTL:".dimmed(), config.ttl()?);
    match config.sweep_interval()? {
        Some(interval) => println!("   {} every {:?}", "Sweep:".dimmed(), interval),
        None => println!("   {} disabled (lazy expiry only)", "Sweep:".dimmed()),
    }

    Ok(())
}
