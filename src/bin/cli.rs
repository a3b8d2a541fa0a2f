//! clubfeed CLI
//!
//! Local tooling for inspecting the club's remote feeds.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use clubfeed::{
    error::{AppError, Result},
    images::HttpImageCache,
    models::Config,
    services::{
        self, CalendarFeed, GalleryFeed, GalleryRefresh, NoticeBoard, NoticeRefresh,
    },
    storage::LocalCache,
};

/// clubfeed - Club Content Feed Inspector
#[derive(Parser, Debug)]
#[command(name = "clubfeed", version, about = "Club content feed inspector")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "clubfeed.toml")]
    config: PathBuf,

    /// Directory for the offline notice cache
    #[arg(long, default_value = ".clubfeed-cache")]
    cache_dir: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List galleries, newest first
    Galleries,

    /// Show the photo manifest of one gallery
    Photos {
        /// Gallery slug as printed by `galleries`
        slug: String,
    },

    /// Show notices grouped into upcoming and past sections
    Notices,

    /// Show calendar activities for a month
    Calendar {
        /// Month to show (YYYY-MM, default: current month)
        #[arg(long)]
        month: Option<String>,
    },

    /// Validate the configuration file
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Arc::new(Config::load_or_default(&cli.config));

    match cli.command {
        Command::Galleries => {
            let cache = Arc::new(HttpImageCache::new(&config.client)?);
            let feed = GalleryFeed::new(Arc::clone(&config), cache)?;

            // The CLI runs as an already-authenticated session.
            match feed.refresh(true).await? {
                GalleryRefresh::Applied(galleries) => {
                    log::info!("Loaded {} galleries", galleries.len());
                    for gallery in &galleries {
                        println!("{:<24} {}", gallery.key(), gallery.name);
                        println!("    thumbnail: {}", gallery.thumbnail_uri);
                    }
                }
                GalleryRefresh::SignedOut | GalleryRefresh::Superseded => {}
            }
        }

        Command::Photos { slug } => {
            let cache = Arc::new(HttpImageCache::new(&config.client)?);
            let feed = GalleryFeed::new(Arc::clone(&config), cache)?;

            let galleries = feed.load_galleries().await?;
            let gallery = galleries
                .iter()
                .find(|g| g.key() == slug || g.name == slug)
                .ok_or_else(|| AppError::config(format!("No gallery named '{slug}'")))?;

            let photos = feed.load_photos(gallery).await?;
            log::info!("{}: {} photos", gallery.name, photos.len());
            for photo in &photos {
                println!("{:>5}x{:<5} {}", photo.width, photo.height, photo.uri);
            }
        }

        Command::Notices => {
            let cache = Arc::new(LocalCache::new(&cli.cache_dir));
            let board = NoticeBoard::new(Arc::clone(&config))?.with_cache(cache);

            let load = match board.refresh().await? {
                NoticeRefresh::Applied(load) => load,
                NoticeRefresh::Superseded => return Ok(()),
            };
            if load.from_cache {
                log::warn!("Server unreachable; showing the cached notice list");
            }

            let now = chrono::Local::now().naive_local();
            let buckets = services::partition(&load.notices, now.date());
            for bucket in &buckets {
                println!("== {} ==", bucket.title());
                for item in &bucket.items {
                    let color = services::target_color(&item.target);
                    let badge = services::normalize_date(&item.date)
                        .is_some_and(|date| services::shows_new_badge(date, now));
                    println!(
                        "{}  {}  [{}]{}",
                        services::format_display_date(&item.date),
                        item.title,
                        color.label(),
                        if badge { "  (新)" } else { "" }
                    );
                }
            }
        }

        Command::Calendar { month } => {
            let feed = CalendarFeed::new(Arc::clone(&config))?;
            let data = feed.load_activities().await?;

            let month = month.unwrap_or_else(|| chrono::Local::now().format("%Y-%m").to_string());
            let activities = services::activities_in_month(&data, &month);
            log::info!("{} activities in {}", activities.len(), month);
            for (date, activity) in activities {
                println!(
                    "{}  {:<8} {}  ({})",
                    date, activity.time, activity.title, activity.location
                );
            }
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Config OK (base URL, endpoints, and prefetch settings)");
        }
    }

    log::info!("Done!");

    Ok(())
}
