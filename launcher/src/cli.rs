use clap::Parser;
use std::net::IpAddr;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(about = "Serve the built cover letter generator")]
pub struct Cli {
    #[arg(long, default_value = "127.0.0.1")]
    pub host: IpAddr,
    #[arg(long, default_value_t = 8080)]
    pub port: u16,
    #[arg(long, default_value = "dist")]
    pub dist_dir: PathBuf,
    /// Must match `public_url` in the frontend's Trunk.toml
    #[arg(long, default_value = "/cover-letter-generator/")]
    pub base_path: String,
}

/// `"cover-letter-generator/"` -> `"/cover-letter-generator"`, root -> `""`.
pub fn normalize_base_path(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}
