//! Chunked blob reading example.
//!
//! Reads a file into memory as a blob and walks it in 256 KiB chunks.
//!
//! Run with:
//!     cargo run --example read_blob -- /path/to/file

use std::env;

use blobstream::{Base64DataUrlReader, ReadConfig, read_blob};
use bytes::Bytes;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = env::args()
        .nth(1)
        .unwrap_or_else(|| "Cargo.toml".to_string());

    let blob = Bytes::from(tokio::fs::read(&path).await?);
    println!("Reading blob: {} ({} bytes)\n", path, blob.len());

    let config = ReadConfig::new(256 * 1024)?;
    let mut total_chunks = 0;
    let mut total_bytes = 0;

    read_blob(
        blob,
        Base64DataUrlReader::new(),
        |chunk| {
            total_chunks += 1;
            total_bytes += chunk.len();
            println!("  {}", chunk);
        },
        config,
    )
    .await?;

    println!("\n{} chunks, {} bytes", total_chunks, total_bytes);
    Ok(())
}
