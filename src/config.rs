// src/config.rs
use crate::error::AppError;
use crate::types::{ApiKey, DatabaseId};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Parsed command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render one post to stdout as an HTML fragment
    Render {
        /// The post's Slug property value
        slug: String,
    },

    /// Build every visible post into the output directory
    Build {
        /// Directory for the generated HTML files
        #[arg(short, long, default_value = "dist")]
        out_dir: PathBuf,

        /// Flip Ready posts to Published after a successful build
        #[arg(long, default_value_t = false)]
        promote: bool,
    },

    /// Flip every Ready post to Published without building
    Publish,

    /// Add an address to the newsletter subscriber list
    Subscribe {
        email: String,

        /// Path to the subscriber CSV file
        #[arg(long, default_value = "data/newsletter.csv")]
        list: PathBuf,
    },
}

/// Resolved site configuration from the environment.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub api_key: ApiKey,
    pub database: DatabaseId,
}

impl SiteConfig {
    /// Reads `NOTION_API_KEY` and `NOTION_DATABASE_ID`, validating both.
    pub fn from_env() -> Result<Self, AppError> {
        let api_key = require_env("NOTION_API_KEY")?;
        let api_key = ApiKey::new(api_key)?;

        let database = require_env("NOTION_DATABASE_ID")?;
        let database = DatabaseId::parse(&database)?;

        Ok(Self { api_key, database })
    }
}

fn require_env(name: &str) -> Result<String, AppError> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(AppError::MissingConfiguration(format!(
            "{} environment variable is not set",
            name
        ))),
    }
}
