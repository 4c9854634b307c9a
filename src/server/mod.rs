//! Preview server for the generated site

use anyhow::Result;
use axum::Router;
use notify_debouncer_mini::{new_debouncer, notify::RecursiveMode};
use std::net::SocketAddr;
use std::time::Duration;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::Jekyll;

/// Start the preview server
///
/// Serves the public directory; with `watch` enabled the site is
/// regenerated whenever a source file changes.
pub async fn start(jekyll: &Jekyll, ip: &str, port: u16, watch: bool) -> Result<()> {
    let serve_dir = ServeDir::new(&jekyll.public_dir).append_index_html_on_directories(true);

    let app = Router::new()
        .fallback_service(serve_dir)
        .layer(TraceLayer::new_for_http());

    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    if watch {
        println!("Watching for changes...");
    }
    println!("Press Ctrl+C to stop.");

    if watch {
        let jekyll = jekyll.clone();
        tokio::task::spawn_blocking(move || {
            if let Err(e) = watch_and_rebuild(&jekyll) {
                tracing::error!("File watcher error: {}", e);
            }
        });
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Watch source files and regenerate on change
fn watch_and_rebuild(jekyll: &Jekyll) -> Result<()> {
    let (tx, rx) = std::sync::mpsc::channel();

    let mut debouncer = new_debouncer(Duration::from_millis(500), tx)?;

    if jekyll.posts_dir.exists() {
        debouncer
            .watcher()
            .watch(&jekyll.posts_dir, RecursiveMode::Recursive)?;
        tracing::debug!("Watching: {:?}", jekyll.posts_dir);
    }

    let config_path = jekyll.base_dir.join("_config.yml");
    if config_path.exists() {
        debouncer
            .watcher()
            .watch(&config_path, RecursiveMode::NonRecursive)?;
        tracing::debug!("Watching: {:?}", config_path);
    }

    loop {
        match rx.recv() {
            Ok(Ok(events)) => {
                let relevant = events.iter().any(|e| {
                    let s = e.path.to_string_lossy();
                    !s.contains(".git") && !s.ends_with('~') && !s.contains(".DS_Store")
                });
                if !relevant {
                    continue;
                }

                tracing::info!("File changed, regenerating...");
                match jekyll.generate() {
                    Ok(_) => tracing::info!("Regenerated"),
                    Err(e) => tracing::error!("Generation failed: {}", e),
                }
            }
            Ok(Err(e)) => {
                tracing::error!("Watch error: {:?}", e);
            }
            Err(e) => {
                tracing::error!("Channel error: {:?}", e);
                break;
            }
        }
    }

    Ok(())
}
