use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::broadcast::DEFAULT_CAPACITY;
use crate::models::domain::TodoItem;

/// Server configuration (from apps/server/config.toml)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_capacity")]
    pub broadcast_capacity: usize,
    #[serde(default = "default_seed")]
    pub seed: Vec<SeedTodo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedTodo {
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

fn default_capacity() -> usize {
    DEFAULT_CAPACITY
}

fn default_seed() -> Vec<SeedTodo> {
    ["Learn Rust", "Learn axum", "Learn WebSockets"]
        .into_iter()
        .map(|title| SeedTodo {
            title: title.to_string(),
            completed: false,
        })
        .collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            broadcast_capacity: default_capacity(),
            seed: default_seed(),
        }
    }
}

impl Config {
    /// Load config.toml, falling back to defaults when no file is present
    pub fn load() -> Result<Self> {
        let config_path = if let Ok(path) = std::env::var("TODO_SERVER_CONFIG") {
            path
        } else if std::path::Path::new("config.toml").exists() {
            // Running from apps/server
            "config.toml".to_string()
        } else if std::path::Path::new("apps/server/config.toml").exists() {
            // Running from the workspace root
            "apps/server/config.toml".to_string()
        } else {
            log::info!("No config.toml found, using defaults");
            return Ok(Self::default());
        };

        let contents = std::fs::read_to_string(&config_path)?;
        let config = Self::parse(&contents)?;
        log::info!("Loaded config from {}", config_path);
        Ok(config)
    }

    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Items the store starts with, each under a fresh identifier
    pub fn seed_items(&self) -> Vec<TodoItem> {
        self.seed
            .iter()
            .map(|seed| TodoItem {
                completed: seed.completed,
                ..TodoItem::new(seed.title.clone())
            })
            .collect()
    }
}
