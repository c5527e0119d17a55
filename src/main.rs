// src/main.rs

use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::ConsoleAppender,
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use notionpress::api::{ContentRepository, NotionHttpClient};
use notionpress::config::{Command, CommandLineInput, SiteConfig};
use notionpress::error::AppError;
use notionpress::output::{render_fragment, SiteWriter};
use notionpress::render::{assemble_document, RenderContext};
use notionpress::site::{promote_ready_posts, PostCatalog, SignupOutcome, SubscriberBook};
use notionpress::types::EmailAddress;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Sets up logging configuration.
fn setup_logging(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let log_file_path = std::env::temp_dir().join("notionpress.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    let stdout_appender = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}",
        )))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout_appender)))
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("stdout")
                .appender("file")
                .build(log_level),
        )?;

    log4rs::init_config(config)?;
    log::debug!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

fn connect() -> Result<(Arc<dyn ContentRepository>, SiteConfig), AppError> {
    let config = SiteConfig::from_env()?;
    let client = NotionHttpClient::new(&config.api_key)?;
    Ok((Arc::new(client), config))
}

/// Renders one post and prints the HTML fragment to stdout.
async fn run_render(slug: &str) -> Result<(), AppError> {
    let (repository, config) = connect()?;
    let catalog = PostCatalog::new(repository, config.database);

    let post = catalog.post_by_slug(slug).await?;
    let nodes = assemble_document(&post.blocks, &RenderContext::default());
    println!("{}", render_fragment(&nodes));
    Ok(())
}

/// Builds every visible post into the output directory.
async fn run_build(out_dir: &Path, promote: bool) -> Result<(), AppError> {
    let (repository, config) = connect()?;
    let catalog = PostCatalog::new(repository.clone(), config.database.clone());
    let writer = SiteWriter::new(out_dir);
    let ctx = RenderContext::default();

    let posts = catalog.published_posts().await?;
    log::info!("Building {} post(s) into {}", posts.len(), out_dir.display());

    for meta in &posts {
        let post = catalog.post_by_slug(&meta.slug).await?;
        writer.write_post(&post, &ctx)?;
    }

    if promote {
        run_publish_with(repository, &config).await?;
    }

    log::info!("Build complete: {} page(s)", posts.len());
    Ok(())
}

async fn run_publish() -> Result<(), AppError> {
    let (repository, config) = connect()?;
    run_publish_with(repository, &config).await
}

async fn run_publish_with(
    repository: Arc<dyn ContentRepository>,
    config: &SiteConfig,
) -> Result<(), AppError> {
    let report = promote_ready_posts(repository, &config.database).await?;

    log::info!(
        "Promotion finished: {} updated, {} failed",
        report.updated.len(),
        report.failed.len()
    );

    if report.is_clean() {
        Ok(())
    } else {
        Err(AppError::Internal {
            message: format!("{} page(s) failed to update", report.failed.len()),
            source: None,
        })
    }
}

fn run_subscribe(email: &str, list: &Path) -> Result<(), AppError> {
    let email = EmailAddress::new(email)?;
    let book = SubscriberBook::new(list);

    match book.subscribe(&email)? {
        SignupOutcome::Subscribed => log::info!("Successfully subscribed"),
        SignupOutcome::AlreadySubscribed => log::warn!("Email already subscribed"),
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    let input = CommandLineInput::parse();

    if let Err(e) = setup_logging(input.verbose) {
        eprintln!("Failed to set up logging: {}", e);
        std::process::exit(1);
    }

    let result = match &input.command {
        Command::Render { slug } => run_render(slug).await,
        Command::Build { out_dir, promote } => run_build(out_dir, *promote).await,
        Command::Publish => run_publish().await,
        Command::Subscribe { email, list } => run_subscribe(email, list),
    };

    if let Err(e) = result {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
