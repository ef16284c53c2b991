use clap::Parser;
use imgdrop::config::Overrides;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "imgdrop")]
#[command(author, version, about = "Convert uploaded bitmaps to JPEG and serve them by content hash")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory to use for the storage [default: storage]
    #[arg(long)]
    pub storage_dir: Option<PathBuf>,

    /// Host to bind to [default: 0.0.0.0]
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to [default: 8080]
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Base URL [default: http://localhost:8080]
    #[arg(long)]
    pub base_url: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Flags that override the config file
    pub fn overrides(&self) -> Overrides {
        Overrides {
            storage_dir: self.storage_dir.clone(),
            host: self.host.clone(),
            port: self.port,
            base_url: self.base_url.clone(),
        }
    }
}
