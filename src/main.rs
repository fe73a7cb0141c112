//! CLI entry point for inkfolio

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use inkfolio::commands::list::ListKind;
use inkfolio::commands::new::NewKind;
use inkfolio::config::Mode;
use inkfolio::Site;

#[derive(Parser)]
#[command(name = "inkfolio")]
#[command(version)]
#[command(about = "Markdown posts, reading list and TIL log, with feeds and a sitemap", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    /// Re-read content on every access instead of caching it
    #[arg(long, global = true)]
    dev: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the content directories and a default _config.yml
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Scaffold a new post, TIL entry or reading item
    New {
        /// What to create
        #[arg(value_enum)]
        kind: NewKind,

        /// Title of the new entry
        title: String,

        /// File name without `.md` (defaults to the slugified title)
        #[arg(short, long)]
        slug: Option<String>,
    },

    /// Write RSS, Atom and sitemap into the public folder
    #[command(alias = "b")]
    Build,

    /// Serve feeds, posts and JSON listings
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,
    },

    /// Delete the public folder
    Clean,

    /// List site content
    List {
        /// Type of content to list
        #[arg(value_enum, default_value = "posts")]
        kind: ListKind,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "inkfolio=debug,info"
    } else {
        "inkfolio=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    let open_site = || -> Result<Site> {
        let site = Site::new(&base_dir)?;
        Ok(if cli.dev {
            site.with_mode(Mode::Development)
        } else {
            site
        })
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing site in {:?}", target_dir);
            inkfolio::commands::init::init_site(&target_dir)?;
            println!("Initialized empty site in {:?}", target_dir);
        }

        Commands::New { kind, title, slug } => {
            let site = open_site()?;
            tracing::info!("Creating new {:?} with title: {}", kind, title);
            let path = inkfolio::commands::new::create(&site, kind, &title, slug.as_deref())?;
            println!("Created {}", path.display());
        }

        Commands::Build => {
            let site = open_site()?;
            tracing::info!("Building feeds...");
            site.build().await?;
            println!("Built successfully!");
        }

        Commands::Server { port, ip } => {
            let site = open_site()?;
            tracing::info!("Starting server at http://{}:{}", ip, port);
            inkfolio::server::start(site, &ip, port).await?;
        }

        Commands::Clean => {
            let site = open_site()?;
            tracing::info!("Cleaning public folder...");
            inkfolio::commands::clean::run(&site)?;
            println!("Cleaned successfully!");
        }

        Commands::List { kind } => {
            let site = open_site()?;
            inkfolio::commands::list::run(&site, kind).await?;
        }

        Commands::Version => {
            println!("inkfolio version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
