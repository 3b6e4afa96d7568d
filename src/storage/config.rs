use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use zeroize::Zeroizing;

use crate::errors::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Postgres,
    Sqlite,
}

impl Default for Backend {
    fn default() -> Self {
        if cfg!(feature = "postgres") { Self::Postgres } else { Self::Sqlite }
    }
}

impl FromStr for Backend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            "sqlite" | "sqlite3" => Ok(Self::Sqlite),
            _ => Err(ConfigError::InvalidValue { key: "backend", value: s.to_string() }),
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Postgres => "postgres",
            Self::Sqlite => "sqlite",
        })
    }
}

/// Everything a storage backend needs to open a connection. Scoped to one run;
/// nothing here is process-global.
#[derive(Clone)]
pub struct ConnectionConfig {
    pub backend: Backend,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: Zeroizing<String>,
    pub dbname: String,
    pub sqlite_path: PathBuf,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            host: "127.0.0.1".to_string(),
            port: 5432,
            user: "postgres".to_string(),
            password: Zeroizing::new(String::new()),
            dbname: "postgres".to_string(),
            sqlite_path: PathBuf::from("staffdb.sqlite3"),
        }
    }
}

impl ConnectionConfig {
    pub fn sqlite(path: impl Into<PathBuf>) -> Self {
        Self { backend: Backend::Sqlite, sqlite_path: path.into(), ..Self::default() }
    }

    /// Short human label for logs, never includes the password.
    pub fn target(&self) -> String {
        match self.backend {
            Backend::Postgres => format!("postgres://{}@{}:{}/{}", self.user, self.host, self.port, self.dbname),
            Backend::Sqlite => format!("sqlite://{}", self.sqlite_path.display()),
        }
    }
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("backend", &self.backend)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &if self.password.is_empty() { "" } else { "***REDACTED***" })
            .field("dbname", &self.dbname)
            .field("sqlite_path", &self.sqlite_path)
            .finish()
    }
}
