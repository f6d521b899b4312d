use std::io::Read;
use std::path::{Path, PathBuf};

use crate::args::Args;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
pub struct Config {
    /// Tracing filter, e.g. "info" or "twenty48_server=debug,tower_http=info".
    #[serde(default = "defaults::log")]
    pub log: String,

    #[serde(default)]
    pub server: Server,

    #[serde(default)]
    pub game: GameSettings,
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
pub struct Server {
    #[serde(default = "defaults::host")]
    pub host: String,
    #[serde(default = "defaults::port")]
    pub port: u16,
    /// Directory served at `/` for any path the API does not claim.
    #[serde(default)]
    pub static_dir: Option<PathBuf>,
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize, Default)]
pub struct GameSettings {
    /// Seed for the session's game seeder. `None` draws from OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Ignore moves on a game that is already won or over.
    #[serde(default)]
    pub lock_finished: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log: defaults::log(),
            server: Server::default(),
            game: GameSettings::default(),
        }
    }
}

impl Default for Server {
    fn default() -> Self {
        Self {
            host: defaults::host(),
            port: defaults::port(),
            static_dir: None,
        }
    }
}

impl Config {
    pub fn from_toml<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let mut contents = String::new();
        std::fs::File::open(path)
            .and_then(|mut file| file.read_to_string(&mut contents))
            .map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Start from the file named by `--config` (or defaults), then apply
    /// every flag given on the command line.
    pub fn load(args: &Args) -> Result<Self, ConfigError> {
        let mut cfg = match &args.config {
            Some(path) => Self::from_toml(path)?,
            None => Self::default(),
        };
        cfg.apply_args(args);
        Ok(cfg)
    }

    pub fn apply_args(&mut self, args: &Args) {
        if let Some(host) = &args.host {
            self.server.host = host.clone();
        }
        if let Some(port) = args.port {
            self.server.port = port;
        }
        if let Some(log) = &args.log {
            self.log = log.clone();
        }
        if let Some(dir) = &args.static_dir {
            self.server.static_dir = Some(dir.clone());
        }
        if let Some(seed) = args.seed {
            self.game.seed = Some(seed);
        }
        if args.lock_finished {
            self.game.lock_finished = true;
        }
    }
}

mod defaults {
    pub fn log() -> String { "info".to_string() }
    pub fn host() -> String { "0.0.0.0".to_string() }
    pub fn port() -> u16 { 8080 }
}
