use clap::Parser;
use nb_api::NewsClient;
use nb_core::{BookmarkStore, Error, Feed, Result};
use nb_storage::{MemoryStore, SqliteStore};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "nb", author, version, about = "Read the news, keep the good ones", long_about = None)]
struct Cli {
    /// Bookmark storage backend (sqlite or memory)
    #[arg(long, default_value = "sqlite")]
    storage: String,
    /// Bookmark database location (sqlite backend only)
    #[arg(long, default_value = "bookmarks.db")]
    db_path: PathBuf,
    /// News API key; falls back to the NEWSAPI_KEY environment variable
    #[arg(long)]
    api_key: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Fetch a page of articles from the news API
    Fetch {
        #[command(subcommand)]
        feed: FeedCommands,
    },
    /// Work with locally saved articles
    Saved {
        #[command(subcommand)]
        command: SavedCommands,
    },
}

#[derive(clap::Subcommand, Debug)]
enum FeedCommands {
    /// Top headlines
    Top {
        /// Two-letter country code (e.g. us)
        #[arg(long)]
        country: Option<String>,
        /// Headline category (e.g. technology)
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        keywords: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Save the article at this position in the listing
        #[arg(long)]
        save: Option<usize>,
    },
    /// Search across all indexed articles
    All {
        #[arg(long)]
        keywords: Option<String>,
        /// Comma-separated source domains (e.g. bbc.co.uk)
        #[arg(long)]
        domains: Option<String>,
        /// Oldest publication date to include (e.g. 2024-05-01)
        #[arg(long)]
        from: Option<String>,
        /// Newest publication date to include
        #[arg(long)]
        to: Option<String>,
        /// Two-letter language code (e.g. en)
        #[arg(long)]
        language: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Save the article at this position in the listing
        #[arg(long)]
        save: Option<usize>,
    },
}

#[derive(clap::Subcommand, Debug)]
enum SavedCommands {
    /// List saved articles
    List,
    /// Count saved articles
    Count,
    /// Remove a saved article by URL
    Remove { url: String },
}

async fn create_store(name: &str, db_path: &Path) -> Result<Arc<dyn BookmarkStore>> {
    match name {
        "memory" => Ok(Arc::new(MemoryStore::new())),
        "sqlite" => Ok(Arc::new(SqliteStore::open(db_path).await?)),
        other => Err(Error::Config(format!("unknown storage backend: {other}"))),
    }
}

async fn fetch(
    client: &NewsClient,
    store: &dyn BookmarkStore,
    feed: &Feed,
    page: u32,
    save: Option<usize>,
) -> Result<()> {
    let response = client.fetch_news(feed, page).await?;
    info!(
        "📰 {} of {} results on page {}",
        response.articles.len(),
        response.total_results,
        page
    );

    for (index, article) in response.articles.iter().enumerate() {
        let marker = if store.is_saved(&article.url).await? {
            "★"
        } else {
            " "
        };
        println!("{index:>3} {marker} {}", article.title);
        println!(
            "      {} · {} · {}",
            article.source.name,
            display_date(&article.published_at),
            article.url
        );
    }

    if let Some(index) = save {
        let Some(article) = response.articles.get(index) else {
            return Err(Error::Config(format!(
                "no article at position {index} on this page"
            )));
        };
        let id = store.save(article).await?;
        println!("💾 Saved \"{}\" ({id})", article.title);
    }

    Ok(())
}

async fn list_saved(store: &dyn BookmarkStore) -> Result<()> {
    let articles = store.list_saved().await?;
    if articles.is_empty() {
        println!("No saved articles");
        return Ok(());
    }

    for article in &articles {
        println!("★ {}", article.title);
        println!(
            "  {} · {} · {}",
            article.source.name,
            display_date(&article.published_at),
            article.url
        );
    }
    Ok(())
}

async fn remove_saved(store: &dyn BookmarkStore, url: &str) -> Result<()> {
    let articles = store.list_saved().await?;
    let Some(article) = articles.iter().find(|article| article.url == url) else {
        return Err(Error::Config(format!("no saved article with URL {url}")));
    };

    let id = store.remove(article).await?;
    println!("🗑 Removed \"{}\" ({id})", article.title);
    Ok(())
}

fn display_date(published_at: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(published_at)
        .map(|date| date.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|_| published_at.to_string())
}

async fn run(cli: Cli) -> Result<()> {
    let store = create_store(&cli.storage, &cli.db_path).await?;
    info!("💾 Bookmark store ready (using {})", cli.storage);

    match cli.command {
        Commands::Fetch { feed } => {
            let api_key = cli
                .api_key
                .or_else(|| std::env::var("NEWSAPI_KEY").ok())
                .ok_or_else(|| {
                    Error::Config("no API key given (use --api-key or NEWSAPI_KEY)".to_string())
                })?;
            let client = NewsClient::new(api_key)?;

            let (feed, page, save) = match feed {
                FeedCommands::Top {
                    country,
                    category,
                    keywords,
                    page,
                    save,
                } => (
                    Feed::TopNews {
                        country,
                        category,
                        keywords,
                    },
                    page,
                    save,
                ),
                FeedCommands::All {
                    keywords,
                    domains,
                    from,
                    to,
                    language,
                    page,
                    save,
                } => (
                    Feed::AllNews {
                        keywords,
                        domains,
                        from,
                        to,
                        language,
                    },
                    page,
                    save,
                ),
            };
            fetch(&client, store.as_ref(), &feed, page, save).await?;
        }
        Commands::Saved { command } => match command {
            SavedCommands::List => list_saved(store.as_ref()).await?,
            SavedCommands::Count => {
                let count = store.count().await?;
                println!("{count} saved articles");
            }
            SavedCommands::Remove { url } => remove_saved(store.as_ref(), &url).await?,
        },
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    // Error text is the user-facing message; print it as-is.
    if let Err(e) = run(cli).await {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
