//! Print an object from a bucket to stdout.
//!
//! Opens the object the same way a file server backed by bucketfs would, logs
//! its stat record and streams the readable bytes to stdout.
//!
//! Usage (common options):
//! ```bash
//! cargo run --release --bin bucketfs-cat -- \
//!   --bucket public-sample-data --region us-east-1 --range 0-1023 passengers.txt
//! ```
//!
//! Pass `--local <dir>` instead of `--bucket` to read from a directory.

use bucketfs::{
    ByteRange, FileSystem, ObjectClient, ObjectStoreBackend, RangedStoreFs, StoreConfig, StoreFs,
};
use clap::Parser;
use futures::TryStreamExt;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Print an object from an object store to stdout.
#[derive(Parser, Debug)]
#[command(name = "bucketfs-cat")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Object name; only the final path component is used as the key
    name: String,

    /// Bucket to read from
    #[arg(short, long, required_unless_present = "local")]
    bucket: Option<String>,

    /// Bucket region
    #[arg(short, long, default_value = "us-east-1")]
    region: String,

    /// Custom endpoint for S3-compatible stores
    #[arg(short, long)]
    endpoint: Option<String>,

    /// Permit plain-HTTP endpoints
    #[arg(long)]
    allow_http: bool,

    /// Read objects from a local directory instead of a bucket
    #[arg(long, conflicts_with = "bucket")]
    local: Option<PathBuf>,

    /// Inclusive byte range to read, e.g. 0-1023
    #[arg(long)]
    range: Option<ByteRange>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn client(&self) -> bucketfs::Result<Arc<dyn ObjectClient>> {
        if let Some(dir) = &self.local {
            return Ok(Arc::new(ObjectStoreBackend::local(dir)?));
        }

        let bucket = self.bucket.clone().unwrap_or_default();
        let mut config = StoreConfig::new(bucket, &self.region).with_allow_http(self.allow_http);
        if let Some(endpoint) = &self.endpoint {
            config = config.with_endpoint(endpoint);
        }
        Ok(Arc::new(config.build_client()?))
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Logs go to stderr so they never mix with object content.
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let client = cli.client()?;
    let fs: Box<dyn FileSystem> = match cli.range {
        Some(range) => Box::new(RangedStoreFs::new(client, range)),
        None => Box::new(StoreFs::new(client)),
    };

    let file = fs.open(&cli.name).await?;
    let stat = file.stat();
    info!(
        name = stat.name(),
        size = stat.size(),
        modified = %stat.modified(),
        mode = %format_args!("{:o}", stat.mode()),
        "opened"
    );

    let mut stdout = tokio::io::stdout();
    let mut body = file.into_stream();
    let mut written = 0u64;
    while let Some(chunk) = body.try_next().await? {
        stdout.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }
    stdout.flush().await?;

    info!(bytes = written, "done");
    Ok(())
}
