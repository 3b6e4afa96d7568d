use clap::{Parser, Subcommand};
use std::io::IsTerminal;
use std::path::PathBuf;
use zeroize::Zeroizing;

use staffdb::bench::{BenchmarkOptions, TargetPredicate};
use staffdb::cli::{self as prog_cli, Command, OutputMode, ShellSettings};
use staffdb::config::AppConfig;
use staffdb::loader::BatchFailurePolicy;
use staffdb::storage::{self, Backend, ConnectionConfig};

#[derive(Parser, Debug)]
#[command(name = "staffdb", version, about = "Employee directory with batch loading and index benchmarks", long_about = None)]
struct Cli {
    #[arg(long, help = "Path to a config file (TOML). Overrides STAFFDB_CONFIG and the default locations.")]
    config: Option<PathBuf>,
    #[arg(long, help = "Storage backend: postgres|sqlite")]
    backend: Option<Backend>,
    #[arg(long, help = "SQLite database file; implies --backend sqlite")]
    sqlite: Option<PathBuf>,
    #[arg(long, help = "PostgreSQL host")]
    host: Option<String>,
    #[arg(long, help = "PostgreSQL port")]
    port: Option<u16>,
    #[arg(long, help = "PostgreSQL user")]
    user: Option<String>,
    #[arg(long, help = "PostgreSQL database name")]
    dbname: Option<String>,
    #[arg(long, default_value = "human", value_parser = parse_mode, help = "Output format: human|plain|json")]
    format: OutputMode,
    #[command(subcommand)]
    command: Commands,
}

fn parse_mode(s: &str) -> Result<OutputMode, String> {
    prog_cli::parse_output_mode(s).ok_or_else(|| format!("unknown format: {s}"))
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(name = "create-table", about = "Create the employees table if it does not exist")]
    CreateTable,
    #[command(name = "clear-table", about = "Delete every row from the employees table")]
    ClearTable,
    #[command(about = "Validate and insert one employee")]
    Add {
        #[arg(help = "Full name: \"Surname Name Patronymic\"")]
        full_name: String,
        #[arg(help = "Birth date, YYYY-MM-DD")]
        birth_date: String,
        #[arg(help = "Male or Female")]
        gender: String,
    },
    #[command(about = "List employees ordered by full name, with age")]
    List,
    #[command(name = "bulk-load", about = "Generate synthetic employees and insert them in batches")]
    BulkLoad {
        #[arg(long, help = "Records to generate (default 1000000)")]
        total: Option<usize>,
        #[arg(long, help = "Male records with an F surname (default 100)")]
        minority: Option<usize>,
        #[arg(long, help = "Records per batch (default 100000)")]
        batch_size: Option<usize>,
        #[arg(long, help = "Stop at the first failed batch instead of skipping it")]
        abort_on_error: bool,
    },
    #[command(about = "Time the male/surname-prefix query without and with the composite index")]
    Benchmark {
        #[arg(long, default_value_t = 'F', help = "Surname initial to query for")]
        letter: char,
        #[arg(long, help = "Drop the index again after the second run")]
        drop_after: bool,
    },
    #[command(about = "Show row count, index presence and build information")]
    Info,
    #[command(about = "Interactive numbered menu")]
    Shell,
}

fn apply_cli_overrides(cli: &Cli, cfg: &mut AppConfig) {
    let db = &mut cfg.database;
    if let Some(b) = cli.backend {
        db.backend = Some(b);
    }
    if let Some(p) = &cli.sqlite {
        db.sqlite_path = Some(p.clone());
        if cli.backend.is_none() {
            db.backend = Some(Backend::Sqlite);
        }
    }
    if let Some(h) = &cli.host {
        db.host = Some(h.clone());
    }
    if let Some(p) = cli.port {
        db.port = Some(p);
    }
    if let Some(u) = &cli.user {
        db.user = Some(u.clone());
    }
    if let Some(d) = &cli.dbname {
        db.dbname = Some(d.clone());
    }
    if let Commands::BulkLoad { total, minority, batch_size, abort_on_error } = &cli.command {
        if total.is_some() {
            cfg.generate.total = *total;
        }
        if minority.is_some() {
            cfg.generate.minority = *minority;
        }
        if batch_size.is_some() {
            cfg.load.batch_size = *batch_size;
        }
        if *abort_on_error {
            cfg.load.failure_policy = Some(BatchFailurePolicy::Abort);
        }
    }
}

fn connection(cfg: &AppConfig) -> ConnectionConfig {
    let mut conn = cfg.connection();
    if conn.backend == Backend::Postgres && conn.password.is_empty() && std::io::stdin().is_terminal() {
        match rpassword::prompt_password(format!("Password for {}: ", conn.target())) {
            Ok(p) => conn.password = Zeroizing::new(p),
            Err(e) => log::warn!("password prompt failed: {e}"),
        }
    }
    conn
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut cfg = AppConfig::load(cli.config.as_deref())?;
    apply_cli_overrides(&cli, &mut cfg);
    staffdb::logger::configure_logging(cfg.log.dir.as_deref(), cfg.log.level.as_deref(), cfg.log.retention);
    log::debug!("config: {cfg:?}");

    let store = storage::open(&connection(&cfg))?;
    let mode = cli.format;
    let cmd = match cli.command {
        Commands::CreateTable => Command::CreateTable,
        Commands::ClearTable => Command::ClearTable,
        Commands::Add { full_name, birth_date, gender } => Command::Add { full_name, birth_date, gender },
        Commands::List => Command::List,
        Commands::BulkLoad { .. } => {
            Command::BulkLoad { plan: cfg.generation_plan()?, options: cfg.load_options() }
        }
        Commands::Benchmark { letter, drop_after } => Command::Benchmark {
            target: TargetPredicate::new(letter)?,
            options: BenchmarkOptions { keep_index: !drop_after, ..BenchmarkOptions::default() },
        },
        Commands::Info => Command::Info,
        Commands::Shell => {
            let settings = ShellSettings {
                plan: cfg.generation_plan()?,
                load: cfg.load_options(),
                ..ShellSettings::default()
            };
            let stdin = std::io::stdin();
            prog_cli::run_shell(&store, stdin.lock(), &mut std::io::stdout().lock(), &settings)?;
            return Ok(());
        }
    };
    prog_cli::run_with_format(&store, cmd, mode, &mut std::io::stdout().lock())
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        log::error!("{e}");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
