#![no_main]

use blobstream::{Base64DataUrlReader, MemoryStream, ReadConfig, digest_stream, read_blob};
use bytes::Bytes;
use libfuzzer_sys::fuzz_target;
use sha2::{Digest, Sha256};

fuzz_target!(|input: (u16, Vec<u8>)| {
    let (chunk_size, data) = input;
    let chunk_size = chunk_size as usize + 1;
    let blob = Bytes::from(data.clone());

    let mut chunks = Vec::new();
    futures_executor::block_on(read_blob(
        blob,
        Base64DataUrlReader::new(),
        |chunk| chunks.push(chunk),
        ReadConfig::new(chunk_size).unwrap(),
    ))
    .unwrap();

    // Verify: chunks are contiguous and bounded
    let mut expected_offset = 0u64;
    for chunk in &chunks {
        assert_eq!(chunk.offset, expected_offset);
        assert!(!chunk.is_empty() && chunk.len() <= chunk_size);
        expected_offset = chunk.end();
    }

    // Verify: total bytes match input
    let joined: Vec<u8> = chunks.iter().flat_map(|c| c.data.iter().copied()).collect();
    assert_eq!(joined, data);

    // Verify: the digest of a duplicate matches one-shot hashing
    let stream = MemoryStream::new(data.clone());
    let digest = futures_executor::block_on(digest_stream::<Sha256, _>(&stream)).unwrap();
    assert_eq!(digest, Sha256::digest(&data));
    assert_eq!(stream.position(), 0);
});
