//! Streams one HTTP response body through the decode chain to a writer.
//!
//! The decode chain is synchronous `Read` plumbing (tar and zip pull from
//! their input), so it runs on a blocking worker fed through a bounded
//! channel. The async side pulls chunks off the socket, hashes them when
//! checksum verification is on, and backpressures through the channel.

use log::debug;
use sha2::{Digest, Sha256};
use std::io::{self, Read, Write};
use tokio::sync::mpsc;
use url::Url;

use crate::codec::{self, Codec};
use crate::error::FetchError;

/// Chunks queued between the socket and the decoder. Bounded so a slow
/// decoder backpressures the download instead of buffering it.
const CHANNEL_DEPTH: usize = 16;

#[derive(Debug)]
pub(crate) struct DownloadSummary {
    /// Bytes as they came off the wire, before any decoding.
    pub raw_bytes: u64,
    /// Bytes written out behind the decode chain.
    pub written_bytes: u64,
    /// Lowercase hex SHA-256 of the raw bytes, when requested.
    pub digest: Option<String>,
}

/// Pull `response`'s body through `chain` into `writer`.
///
/// `name` is the save file name the chain was derived from, used for decode
/// error context. With `want_digest` the raw body keeps being hashed even
/// when the decoder stops pulling early: an archive stage may have its file
/// before the payload ends, but the published digest covers the whole
/// payload.
#[tracing::instrument(skip(response, writer), fields(url = %url))]
pub(crate) async fn run(
    mut response: reqwest::Response,
    url: &Url,
    name: &str,
    chain: &[Codec],
    writer: Box<dyn Write + Send>,
    want_digest: bool,
) -> Result<DownloadSummary, FetchError> {
    let (chunk_tx, chunk_rx) = mpsc::channel::<Vec<u8>>(CHANNEL_DEPTH);

    let decode_chain = chain.to_vec();
    let decode_task = tokio::task::spawn_blocking(move || -> io::Result<u64> {
        let mut writer = writer;
        let reader = ChannelReader::new(chunk_rx);
        let written = codec::decode(&decode_chain, Box::new(reader), &mut writer)?;
        writer.flush()?;
        Ok(written)
    });

    let mut hasher = want_digest.then(Sha256::new);
    let mut raw_bytes: u64 = 0;
    let mut network_error = None;
    let mut decoder_pulling = true;

    loop {
        match response.chunk().await {
            Ok(Some(chunk)) => {
                raw_bytes += chunk.len() as u64;
                if let Some(hasher) = hasher.as_mut() {
                    hasher.update(&chunk);
                }
                if decoder_pulling && chunk_tx.send(chunk.to_vec()).await.is_err() {
                    // The decoder hung up; its verdict is read after the
                    // loop. Keep draining only for the digest.
                    decoder_pulling = false;
                    if hasher.is_none() {
                        break;
                    }
                }
            }
            Ok(None) => break,
            Err(e) => {
                network_error = Some(FetchError::download(url, e));
                break;
            }
        }
    }
    drop(chunk_tx);

    let decode_result = decode_task.await;

    // A dropped connection usually also shows up as a truncated-stream
    // decode error; the network failure is the root cause, so it wins.
    if let Some(e) = network_error {
        return Err(e);
    }

    let written_bytes = match decode_result {
        Ok(Ok(written)) => written,
        Ok(Err(e)) => {
            return Err(FetchError::DecodeFailed {
                name: name.to_string(),
                source: e,
            });
        }
        Err(join_error) => {
            return Err(FetchError::DecodeFailed {
                name: name.to_string(),
                source: io::Error::other(join_error),
            });
        }
    };

    let digest = hasher.map(|hasher| hex::encode(hasher.finalize()));
    debug!("Downloaded {raw_bytes} raw bytes, wrote {written_bytes} decoded bytes");

    Ok(DownloadSummary {
        raw_bytes,
        written_bytes,
        digest,
    })
}

/// Blocking-side adapter: `Read` over the chunk channel.
struct ChannelReader {
    chunks: mpsc::Receiver<Vec<u8>>,
    current: Vec<u8>,
    offset: usize,
}

impl ChannelReader {
    fn new(chunks: mpsc::Receiver<Vec<u8>>) -> Self {
        Self {
            chunks,
            current: Vec::new(),
            offset: 0,
        }
    }
}

impl Read for ChannelReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        while self.offset >= self.current.len() {
            match self.chunks.blocking_recv() {
                Some(chunk) => {
                    self.current = chunk;
                    self.offset = 0;
                }
                None => return Ok(0),
            }
        }
        let len = buf.len().min(self.current.len() - self.offset);
        buf[..len].copy_from_slice(&self.current[self.offset..self.offset + len]);
        self.offset += len;
        Ok(len)
    }
}
