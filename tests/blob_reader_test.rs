// Integration tests for chunked blob reading
// Tests cover: coverage/ordering invariants, empty blobs, failure handling, sequencing

use std::cell::RefCell;
use std::pin::pin;
use std::rc::Rc;

use blobstream::{
    Base64DataUrlReader, BlobChunks, Chunk, ChunkError, DEFAULT_CHUNK_SIZE, DataUrlReader,
    ReadConfig, read_blob, try_read_blob,
};
use bytes::Bytes;
use futures_util::StreamExt;

fn pattern(len: usize) -> Bytes {
    (0..len).map(|i| (i * 7 + 13) as u8).collect::<Vec<_>>().into()
}

async fn read_all(blob: Bytes, chunk_size: usize) -> Vec<Chunk> {
    let mut chunks = Vec::new();
    read_blob(
        blob,
        Base64DataUrlReader::new(),
        |chunk| chunks.push(chunk),
        ReadConfig::new(chunk_size).unwrap(),
    )
    .await
    .expect("read should succeed");
    chunks
}

// ============================================================================
// Coverage and Ordering
// ============================================================================

#[tokio::test]
async fn test_chunks_cover_blob_exactly() {
    for size in [1usize, 2, 15, 16, 17, 255, 1000, 4097] {
        for chunk_size in [1usize, 3, 16, 1024] {
            let blob = pattern(size);
            let chunks = read_all(blob.clone(), chunk_size).await;

            let total: usize = chunks.iter().map(|c| c.len()).sum();
            assert_eq!(total, size, "size {} chunk {}: byte count", size, chunk_size);

            let mut expected_offset = 0u64;
            for chunk in &chunks {
                assert_eq!(
                    chunk.offset, expected_offset,
                    "size {} chunk {}: chunks must be contiguous",
                    size, chunk_size
                );
                assert!(chunk.len() <= chunk_size, "chunk exceeds bound");
                assert!(!chunk.is_empty(), "no empty chunks");
                expected_offset = chunk.end();
            }

            let joined: Vec<u8> = chunks.iter().flat_map(|c| c.data.iter().copied()).collect();
            assert_eq!(&joined[..], &blob[..], "reassembled bytes must match");
            assert_eq!(chunks.len(), size.div_ceil(chunk_size));
        }
    }
}

#[tokio::test]
async fn test_default_chunk_size() {
    let size = DEFAULT_CHUNK_SIZE * 2 + DEFAULT_CHUNK_SIZE / 2;
    let mut lens = Vec::new();

    read_blob(
        pattern(size),
        Base64DataUrlReader::new(),
        |chunk| lens.push(chunk.len()),
        ReadConfig::default(),
    )
    .await
    .unwrap();

    assert_eq!(
        lens,
        vec![DEFAULT_CHUNK_SIZE, DEFAULT_CHUNK_SIZE, DEFAULT_CHUNK_SIZE / 2]
    );
}

#[tokio::test]
async fn test_borrowed_slice_blob() {
    let data = b"borrowed bytes are a blob too";
    let mut seen = Vec::new();

    read_blob(
        &data[..],
        Base64DataUrlReader::new(),
        |chunk| seen.extend_from_slice(&chunk.data),
        ReadConfig::new(5).unwrap(),
    )
    .await
    .unwrap();

    assert_eq!(seen, data);
}

// ============================================================================
// Empty Blob
// ============================================================================

#[tokio::test]
async fn test_empty_blob_never_calls_handler() {
    let calls = Rc::new(RefCell::new(0));
    let handler_calls = calls.clone();
    let reader_calls = Rc::new(RefCell::new(0));
    let counted = reader_calls.clone();
    let mut inner = Base64DataUrlReader::new();

    let result = read_blob(
        Bytes::new(),
        move |slice: Bytes| {
            *counted.borrow_mut() += 1;
            inner.read_as_data_url(slice)
        },
        move |_chunk| *handler_calls.borrow_mut() += 1,
        ReadConfig::default(),
    )
    .await;

    assert!(result.is_ok(), "empty blob should complete");
    assert_eq!(*calls.borrow(), 0, "handler must not be invoked");
    assert_eq!(*reader_calls.borrow(), 0, "no slice should be decoded");
}

// ============================================================================
// Failure Handling
// ============================================================================

#[tokio::test]
async fn test_decode_failure_stops_read() {
    let requests = Rc::new(RefCell::new(0usize));
    let counter = requests.clone();
    let mut inner = Base64DataUrlReader::new();

    let reader = move |slice: Bytes| {
        *counter.borrow_mut() += 1;
        let attempt = *counter.borrow();
        let encoded = inner.read_as_data_url(slice);
        async move {
            if attempt == 3 {
                Err(ChunkError::Aborted)
            } else {
                encoded.await
            }
        }
    };

    let mut delivered = Vec::new();
    let result = read_blob(
        pattern(100),
        reader,
        |chunk| delivered.push(chunk.offset),
        ReadConfig::new(10).unwrap(),
    )
    .await;

    assert!(matches!(result, Err(ChunkError::Aborted)));
    assert_eq!(delivered, vec![0, 10], "only chunks before the failure");
    assert_eq!(*requests.borrow(), 3, "no slice requested after the failure");
}

#[tokio::test]
async fn test_stream_ends_after_error() {
    let reader = |_slice: Bytes| async { Ok::<_, ChunkError>("data:*/*;base64,%%%".to_string()) };
    let mut chunks = pin!(BlobChunks::new(pattern(30), reader, ReadConfig::new(10).unwrap()));

    let first = chunks.next().await.expect("one item");
    assert!(matches!(first, Err(ChunkError::Decode(_))));
    assert!(chunks.next().await.is_none(), "stream is finished after an error");
}

#[tokio::test]
async fn test_handler_error_aborts_loop() {
    #[derive(Debug)]
    enum UploadError {
        Read(ChunkError),
        Rejected(u64),
    }

    impl From<ChunkError> for UploadError {
        fn from(e: ChunkError) -> Self {
            UploadError::Read(e)
        }
    }

    let mut seen = Vec::new();
    let result = try_read_blob(
        pattern(50),
        Base64DataUrlReader::new(),
        |chunk| {
            seen.push(chunk.offset);
            if chunk.offset == 20 {
                Err(UploadError::Rejected(chunk.offset))
            } else {
                Ok(())
            }
        },
        ReadConfig::new(10).unwrap(),
    )
    .await;

    assert!(matches!(result, Err(UploadError::Rejected(20))));
    assert_eq!(seen, vec![0, 10, 20]);

    let result = try_read_blob(
        pattern(5),
        Base64DataUrlReader::new(),
        |_| Ok::<(), UploadError>(()),
        ReadConfig::default().with_chunk_size(0),
    )
    .await;
    assert!(matches!(
        result,
        Err(UploadError::Read(ChunkError::InvalidConfig { .. }))
    ));
}

// ============================================================================
// Sequencing
// ============================================================================

#[tokio::test]
async fn test_one_slice_in_flight() {
    let events = Rc::new(RefCell::new(Vec::new()));
    let reader_events = events.clone();
    let handler_events = events.clone();
    let mut inner = Base64DataUrlReader::new();

    let reader = move |slice: Bytes| {
        reader_events
            .borrow_mut()
            .push(format!("read {}", slice.len()));
        let encoded = inner.read_as_data_url(slice);
        async move {
            tokio::task::yield_now().await;
            encoded.await
        }
    };

    read_blob(
        pattern(25),
        reader,
        move |chunk| {
            handler_events
                .borrow_mut()
                .push(format!("chunk {}", chunk.offset))
        },
        ReadConfig::new(10).unwrap(),
    )
    .await
    .unwrap();

    assert_eq!(
        *events.borrow(),
        vec!["read 10", "chunk 0", "read 10", "chunk 10", "read 5", "chunk 20"]
    );
}

#[tokio::test]
async fn test_stream_is_restartable() {
    let blob = pattern(64);
    let config = ReadConfig::new(16).unwrap();

    let first: Vec<_> = BlobChunks::new(blob.clone(), Base64DataUrlReader::new(), config)
        .collect()
        .await;
    let second: Vec<_> = BlobChunks::new(blob, Base64DataUrlReader::new(), config)
        .collect()
        .await;

    let first: Vec<Chunk> = first.into_iter().collect::<Result<_, _>>().unwrap();
    let second: Vec<Chunk> = second.into_iter().collect::<Result<_, _>>().unwrap();
    assert_eq!(first, second);
}
