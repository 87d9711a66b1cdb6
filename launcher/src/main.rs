mod cli;

use axum::Router;
use axum::response::Redirect;
use axum::routing::get;
use clap::Parser;
use std::net::SocketAddr;
use std::path::Path;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Static router for the built SPA. Unknown paths under the base path fall
/// back to `index.html`; the bare root redirects to the base path.
fn router(dist_dir: &Path, base_path: &str) -> Router {
    let spa = ServeDir::new(dist_dir).fallback(ServeFile::new(dist_dir.join("index.html")));

    let router = if base_path.is_empty() {
        Router::new().fallback_service(spa)
    } else {
        let target = format!("{}/", base_path);
        Router::new()
            .route(
                "/",
                get(move || {
                    let target = target.clone();
                    async move { Redirect::permanent(&target) }
                }),
            )
            .nest_service(base_path, spa)
    };

    router.layer(TraceLayer::new_for_http())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();
    let cli = cli::Cli::parse();

    if !cli.dist_dir.join("index.html").is_file() {
        tracing::warn!(
            "No index.html in {}; run `trunk build` in frontend/ first",
            cli.dist_dir.display()
        );
    }

    let base_path = cli::normalize_base_path(&cli.base_path);
    let router = router(&cli.dist_dir, &base_path);
    let addr = SocketAddr::new(cli.host, cli.port);
    tracing::info!(
        "Serving {} at http://{}{}/",
        cli.dist_dir.display(),
        addr,
        base_path
    );
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).await?;
    Ok(())
}
