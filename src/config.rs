//! Layered application config.
//!
//! Precedence: CLI flags > `STAFFDB_*` environment > config files > defaults. Files
//! are tried in order `--config`, `$STAFFDB_CONFIG`, `~/.staffdb.toml`,
//! `./staffdb.toml`; an earlier file wins over a later one, key by key.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use zeroize::Zeroizing;

use crate::errors::{ConfigError, GenerationError};
use crate::generate::GenerationPlan;
use crate::loader::{BatchFailurePolicy, LoadOptions};
use crate::storage::{Backend, ConnectionConfig};

pub const ENV_PREFIX: &str = "STAFFDB_";

fn secret<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Zeroizing<String>>, D::Error> {
    Ok(Option::<String>::deserialize(d)?.map(Zeroizing::new))
}

#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseSection {
    pub backend: Option<Backend>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub user: Option<String>,
    #[serde(deserialize_with = "secret", skip_serializing)]
    pub password: Option<Zeroizing<String>>,
    pub dbname: Option<String>,
    pub sqlite_path: Option<PathBuf>,
}

impl fmt::Debug for DatabaseSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseSection")
            .field("backend", &self.backend)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "***REDACTED***"))
            .field("dbname", &self.dbname)
            .field("sqlite_path", &self.sqlite_path)
            .finish()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoadSection {
    pub batch_size: Option<usize>,
    pub failure_policy: Option<BatchFailurePolicy>,
    pub progress_every: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenerateSection {
    pub total: Option<usize>,
    pub minority: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogSection {
    pub dir: Option<PathBuf>,
    pub level: Option<String>,
    pub retention: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub database: DatabaseSection,
    pub load: LoadSection,
    pub generate: GenerateSection,
    pub log: LogSection,
}

fn fill<T>(slot: &mut Option<T>, lower: Option<T>) {
    if slot.is_none() {
        *slot = lower;
    }
}

fn parsed<T: std::str::FromStr>(key: &'static str, raw: String) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidValue { key, value: raw })
}

impl AppConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        Self::from_toml_str(&std::fs::read_to_string(path)?)
    }

    /// Fill every unset key from `lower`; keys already set here win.
    pub fn merge_missing(&mut self, lower: AppConfig) {
        let (db, l) = (&mut self.database, lower.database);
        fill(&mut db.backend, l.backend);
        fill(&mut db.host, l.host);
        fill(&mut db.port, l.port);
        fill(&mut db.user, l.user);
        fill(&mut db.password, l.password);
        fill(&mut db.dbname, l.dbname);
        fill(&mut db.sqlite_path, l.sqlite_path);

        fill(&mut self.load.batch_size, lower.load.batch_size);
        fill(&mut self.load.failure_policy, lower.load.failure_policy);
        fill(&mut self.load.progress_every, lower.load.progress_every);

        fill(&mut self.generate.total, lower.generate.total);
        fill(&mut self.generate.minority, lower.generate.minority);

        fill(&mut self.log.dir, lower.log.dir);
        fill(&mut self.log.level, lower.log.level);
        fill(&mut self.log.retention, lower.log.retention);
    }

    /// Override keys from `STAFFDB_*` variables, looked up through `var` so tests
    /// don't have to touch the process environment.
    pub fn apply_env<F>(&mut self, var: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| var(&format!("{ENV_PREFIX}{name}")).filter(|v| !v.is_empty());
        if let Some(v) = get("BACKEND") {
            self.database.backend = Some(v.parse()?);
        }
        if let Some(v) = get("HOST") {
            self.database.host = Some(v);
        }
        if let Some(v) = get("PORT") {
            self.database.port = Some(parsed("port", v)?);
        }
        if let Some(v) = get("USER") {
            self.database.user = Some(v);
        }
        if let Some(v) = get("PASSWORD") {
            self.database.password = Some(Zeroizing::new(v));
        }
        if let Some(v) = get("DBNAME") {
            self.database.dbname = Some(v);
        }
        if let Some(v) = get("SQLITE_PATH") {
            self.database.sqlite_path = Some(PathBuf::from(v));
        }
        if let Some(v) = get("BATCH_SIZE") {
            self.load.batch_size = Some(parsed("batch_size", v)?);
        }
        if let Some(v) = get("FAILURE_POLICY") {
            self.load.failure_policy = Some(v.parse()?);
        }
        if let Some(v) = get("PROGRESS_EVERY") {
            self.load.progress_every = Some(parsed("progress_every", v)?);
        }
        if let Some(v) = get("TOTAL") {
            self.generate.total = Some(parsed("total", v)?);
        }
        if let Some(v) = get("MINORITY") {
            self.generate.minority = Some(parsed("minority", v)?);
        }
        if let Some(v) = get("LOG_DIR") {
            self.log.dir = Some(PathBuf::from(v));
        }
        if let Some(v) = get("LOG_LEVEL") {
            self.log.level = Some(v);
        }
        if let Some(v) = get("LOG_RETENTION") {
            self.log.retention = Some(parsed("log_retention", v)?);
        }
        Ok(())
    }

    /// Config files in precedence order. `explicit` is the `--config` flag.
    pub fn candidate_paths(explicit: Option<&Path>, env_config: Option<PathBuf>) -> Vec<PathBuf> {
        let mut paths = Vec::new();
        paths.extend(explicit.map(Path::to_path_buf));
        paths.extend(env_config);
        if let Some(home) = dirs_next::home_dir() {
            paths.push(home.join(".staffdb.toml"));
        }
        if let Ok(cwd) = std::env::current_dir() {
            paths.push(cwd.join("staffdb.toml"));
        }
        paths
    }

    /// Merge existing files from `paths` (first wins). A missing `required` file is
    /// an error; other missing files are skipped.
    pub fn from_files(paths: &[PathBuf], required: Option<&Path>) -> Result<Self, ConfigError> {
        let mut cfg = Self::default();
        for path in paths {
            if !path.exists() {
                if required == Some(path.as_path()) {
                    return Err(ConfigError::Io(std::io::Error::new(
                        std::io::ErrorKind::NotFound,
                        format!("config file not found: {}", path.display()),
                    )));
                }
                continue;
            }
            log::debug!("config: reading {}", path.display());
            cfg.merge_missing(Self::from_file(path)?);
        }
        Ok(cfg)
    }

    /// Files then environment. CLI overrides are applied by the caller afterwards.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let env_config = std::env::var_os(format!("{ENV_PREFIX}CONFIG")).map(PathBuf::from);
        let paths = Self::candidate_paths(explicit, env_config);
        let mut cfg = Self::from_files(&paths, explicit)?;
        cfg.apply_env(|k| std::env::var(k).ok())?;
        Ok(cfg)
    }

    pub fn connection(&self) -> ConnectionConfig {
        let d = ConnectionConfig::default();
        let db = &self.database;
        ConnectionConfig {
            backend: db.backend.unwrap_or(d.backend),
            host: db.host.clone().unwrap_or(d.host),
            port: db.port.unwrap_or(d.port),
            user: db.user.clone().unwrap_or(d.user),
            password: db.password.clone().unwrap_or(d.password),
            dbname: db.dbname.clone().unwrap_or(d.dbname),
            sqlite_path: db.sqlite_path.clone().unwrap_or(d.sqlite_path),
        }
    }

    pub fn load_options(&self) -> LoadOptions {
        let d = LoadOptions::default();
        LoadOptions {
            batch_size: self.load.batch_size.unwrap_or(d.batch_size),
            failure_policy: self.load.failure_policy.unwrap_or(d.failure_policy),
            progress_every: self.load.progress_every.or(d.progress_every),
        }
    }

    pub fn generation_plan(&self) -> Result<GenerationPlan, GenerationError> {
        GenerationPlan::new(
            self.generate.total.unwrap_or(GenerationPlan::DEFAULT_TOTAL),
            self.generate.minority.unwrap_or(GenerationPlan::DEFAULT_MINORITY),
        )
    }
}
