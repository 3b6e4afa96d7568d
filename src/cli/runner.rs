use std::io::Write;

use super::command::Command;
use super::util::today;
use crate::bench::{IndexBenchmark, millis};
use crate::employee::{DATE_FORMAT, add_employee, calculate_age, validate};
use crate::storage::{Storage, schema};
use crate::{api, generate, loader, view};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum OutputMode {
    Human,
    Plain,
    Json,
}

/// Run `cmd` in human-readable mode on stdout.
pub fn run<S: Storage + ?Sized>(storage: &S, cmd: Command) -> Result<(), Box<dyn std::error::Error>> {
    run_with_format(storage, cmd, OutputMode::Human, &mut std::io::stdout().lock())
}

pub fn run_with_format<S: Storage + ?Sized, W: Write>(
    storage: &S,
    cmd: Command,
    mode: OutputMode,
    out: &mut W,
) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        Command::CreateTable => {
            schema::create_table(storage)?;
            match mode {
                OutputMode::Json => {
                    writeln!(out, "{}", serde_json::json!({"action": "create_table", "table": schema::TABLE}))?
                }
                OutputMode::Plain => writeln!(out, "created {}", schema::TABLE)?,
                OutputMode::Human => writeln!(out, "Table '{}' is ready.", schema::TABLE)?,
            }
            Ok(())
        }
        Command::ClearTable => {
            let n = schema::clear_table(storage)?;
            match mode {
                OutputMode::Json => writeln!(out, "{}", serde_json::json!({"action": "clear_table", "deleted": n}))?,
                OutputMode::Plain => writeln!(out, "deleted {n}")?,
                OutputMode::Human => writeln!(out, "Removed {n} rows from '{}'.", schema::TABLE)?,
            }
            Ok(())
        }
        Command::Add { full_name, birth_date, gender } => {
            let record = validate(Some(&full_name), Some(&birth_date), Some(&gender))?;
            add_employee(storage, &record)?;
            match mode {
                OutputMode::Json => writeln!(out, "{}", serde_json::json!({"action": "add", "record": record}))?,
                OutputMode::Plain => writeln!(out, "added {}", record.full_name())?,
                OutputMode::Human => writeln!(
                    out,
                    "Added {} ({}, {}).",
                    record.full_name(),
                    record.birth_date().format(DATE_FORMAT),
                    record.gender()
                )?,
            }
            Ok(())
        }
        Command::List => {
            let employees = view::list_all(storage)?;
            let today = today();
            match mode {
                OutputMode::Json => {
                    let rows: Vec<_> = employees
                        .iter()
                        .map(|e| {
                            serde_json::json!({
                                "id": e.id,
                                "full_name": e.record.full_name(),
                                "birth_date": e.record.birth_date(),
                                "gender": e.record.gender(),
                                "age": calculate_age(e.record.birth_date(), today),
                            })
                        })
                        .collect();
                    writeln!(out, "{}", serde_json::Value::Array(rows))?;
                }
                OutputMode::Plain => {
                    for e in &employees {
                        writeln!(
                            out,
                            "{}\t{}\t{}\t{}\t{}",
                            e.id,
                            e.record.full_name(),
                            e.record.birth_date().format(DATE_FORMAT),
                            calculate_age(e.record.birth_date(), today),
                            e.record.gender()
                        )?;
                    }
                }
                OutputMode::Human => {
                    write!(out, "{}", view::render_table(&employees, today))?;
                    writeln!(out, "{} employees", employees.len())?;
                }
            }
            Ok(())
        }
        Command::BulkLoad { plan, options } => {
            schema::create_table(storage)?;
            let records = generate::generate(plan);
            let report = loader::load(storage, records, &options, |p| {
                if mode == OutputMode::Human {
                    let _ = writeln!(out, "Loaded {}/{} records", p.loaded, p.planned);
                }
            })?;
            match mode {
                OutputMode::Json => writeln!(out, "{}", serde_json::to_string(&report)?)?,
                OutputMode::Plain => writeln!(
                    out,
                    "planned={} loaded={} batches={} failed={}",
                    report.planned,
                    report.loaded,
                    report.batches,
                    report.failed.len()
                )?,
                OutputMode::Human => {
                    writeln!(
                        out,
                        "Inserted {} of {} records in {} batches ({:.2}s).",
                        report.loaded,
                        report.planned,
                        report.batches,
                        report.elapsed.as_secs_f64()
                    )?;
                    for f in &report.failed {
                        writeln!(
                            out,
                            "  batch {} (records {}..{}) skipped: {}",
                            f.batch_index + 1,
                            f.offset,
                            f.offset + f.size,
                            f.cause
                        )?;
                    }
                }
            }
            Ok(())
        }
        Command::Benchmark { target, options } => {
            let result = IndexBenchmark::with_options(storage, options).compare(&target)?;
            match mode {
                OutputMode::Json => writeln!(out, "{}", serde_json::to_string(&result)?)?,
                OutputMode::Plain => writeln!(
                    out,
                    "rows={} without_ms={:.3} with_ms={:.3}",
                    result.row_count,
                    millis(result.elapsed_without_index),
                    millis(result.elapsed_with_index)
                )?,
                OutputMode::Human => {
                    writeln!(out, "Query: {}", result.query_signature)?;
                    writeln!(out, "Rows matched: {}", result.row_count)?;
                    writeln!(out, "Without index: {:.3} ms", millis(result.elapsed_without_index))?;
                    writeln!(out, "With index:    {:.3} ms", millis(result.elapsed_with_index))?;
                    if let Some(x) = result.speedup() {
                        writeln!(out, "Speedup:       {x:.1}x")?;
                    }
                }
            }
            Ok(())
        }
        Command::Info => {
            let report = api::info(storage)?;
            match mode {
                OutputMode::Plain => writeln!(
                    out,
                    "backend={} employees={} index_present={}",
                    report.backend,
                    report.employees,
                    report.indexes.iter().all(|i| i.present)
                )?,
                OutputMode::Json | OutputMode::Human => {
                    writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?
                }
            }
            Ok(())
        }
    }
}
