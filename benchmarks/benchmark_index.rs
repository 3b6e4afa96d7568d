// End-to-end run against a throwaway SQLite file: create, bulk load, compare.
// Sizes come from STAFFDB_BENCH_TOTAL / STAFFDB_BENCH_MINORITY (default 1M / 100).

use staffdb::bench::{IndexBenchmark, TargetPredicate, millis};
use staffdb::generate::{self, GenerationPlan};
use staffdb::loader::{self, LoadOptions};
use staffdb::storage::{SqliteStorage, schema};

fn env_usize(name: &str, default: usize) -> usize {
    std::env::var(name).ok().and_then(|v| v.parse().ok()).unwrap_or(default)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    staffdb::logger::configure_from_env();
    let dir = tempfile::tempdir()?;
    let storage = SqliteStorage::open(dir.path().join("bench.sqlite3"))?;
    schema::create_table(&storage)?;

    let plan = GenerationPlan::new(
        env_usize("STAFFDB_BENCH_TOTAL", GenerationPlan::DEFAULT_TOTAL),
        env_usize("STAFFDB_BENCH_MINORITY", GenerationPlan::DEFAULT_MINORITY),
    )?;
    let report = loader::load(&storage, generate::generate(plan), &LoadOptions::default(), |p| {
        println!("Loaded {}/{}", p.loaded, p.planned);
    })?;
    println!("load: {} rows in {:.2}s", report.loaded, report.elapsed.as_secs_f64());

    let result = IndexBenchmark::new(&storage).compare(&TargetPredicate::default())?;
    println!(
        "rows={} without={:.3}ms with={:.3}ms",
        result.row_count,
        millis(result.elapsed_without_index),
        millis(result.elapsed_with_index)
    );
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
