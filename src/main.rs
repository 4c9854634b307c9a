//! CLI entry point for jekyll-rs

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "jekyll-rs")]
#[command(version)]
#[command(about = "A fast static blog generator for Jekyll-style sites", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new site
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new post
    New {
        /// Layout to use (post, draft)
        #[arg(short, long, default_value = "post")]
        layout: String,

        /// Title of the new post
        title: String,

        /// Filename to use instead of the generated one
        #[arg(short, long)]
        path: Option<String>,
    },

    /// Generate static files
    #[command(alias = "g")]
    Generate {
        /// Watch for file changes
        #[arg(short, long)]
        watch: bool,
    },

    /// Start a preview server
    #[command(alias = "s")]
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Disable watching for file changes
        #[arg(long)]
        no_watch: bool,
    },

    /// Clean the public folder
    Clean,

    /// List site content
    List {
        /// Type of content to list (post, page, tag)
        #[arg(default_value = "post")]
        r#type: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.debug {
        "jekyll_rs=debug,info"
    } else {
        "jekyll_rs=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            jekyll_rs::commands::init::init_site(&target_dir)?;
            println!("Initialized site in {:?}", target_dir);
        }

        Commands::New {
            layout,
            title,
            path,
        } => {
            let jekyll = jekyll_rs::Jekyll::new(&base_dir)?;
            jekyll_rs::commands::new::create_post(&jekyll, &title, &layout, path.as_deref())?;
        }

        Commands::Generate { watch } => {
            let jekyll = jekyll_rs::Jekyll::new(&base_dir)?;
            jekyll_rs::commands::generate::run(&jekyll)?;
            println!("Generated successfully!");

            if watch {
                jekyll_rs::commands::generate::watch(&jekyll).await?;
            }
        }

        Commands::Serve { port, ip, no_watch } => {
            let jekyll = jekyll_rs::Jekyll::new(&base_dir)?;
            jekyll.generate()?;
            jekyll_rs::server::start(&jekyll, &ip, port, !no_watch).await?;
        }

        Commands::Clean => {
            let jekyll = jekyll_rs::Jekyll::new(&base_dir)?;
            jekyll.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::List { r#type } => {
            let jekyll = jekyll_rs::Jekyll::new(&base_dir)?;
            jekyll_rs::commands::list::run(&jekyll, &r#type)?;
        }
    }

    Ok(())
}
