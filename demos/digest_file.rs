//! Stream digest example.
//!
//! Hashes a file stream with SHA-256 and BLAKE3, then reads the original
//! stream to show it was left untouched.
//!
//! Run with:
//!     cargo run --example digest_file -- /path/to/file

use std::env;

use blobstream::{FileStream, digest_stream};
use futures_util::io::AsyncReadExt;
use sha2::Sha256;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = env::args()
        .nth(1)
        .unwrap_or_else(|| "Cargo.toml".to_string());

    let mut stream = FileStream::open(&path).await?;

    let sha256 = digest_stream::<Sha256, _>(&stream).await?;
    println!("sha256  {}", hex::encode(sha256));

    #[cfg(feature = "hash-blake3")]
    {
        let blake3 = digest_stream::<blobstream::Blake3Hasher, _>(&stream).await?;
        println!("blake3  {}", hex::encode(blake3));
    }

    let mut contents = Vec::new();
    stream.read_to_end(&mut contents).await?;
    println!("\noriginal stream still yields {} bytes", contents.len());

    Ok(())
}
