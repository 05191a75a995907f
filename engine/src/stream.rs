// Newline delimited JSON consumption: one value per line, pulled in order.
use crate::error::Result;
use serde::de::DeserializeOwned;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio_stream::wrappers::LinesStream;
use tokio_stream::StreamExt;
use tracing::{debug, warn};

/// Reads `reader` line by line, decoding each non blank line as a `T`.
///
/// Decoded values go to `on_item` and decoding failures to `on_error`;
/// reading goes on after a bad line. An I/O error stops the loop and is
/// returned. Returns the number of values decoded.
pub async fn read_ndjson<R, T, F, E>(reader: R, mut on_item: F, mut on_error: E) -> Result<usize>
where
    R: AsyncBufRead + Unpin,
    T: DeserializeOwned,
    F: FnMut(T),
    E: FnMut(serde_json::Error),
{
    let mut lines = LinesStream::new(reader.lines());
    let mut decoded = 0;
    let mut line_no = 0usize;

    while let Some(line) = lines.next().await {
        let line = line?;
        line_no += 1;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<T>(&line) {
            Ok(item) => {
                decoded += 1;
                on_item(item);
            }
            Err(e) => {
                warn!(line = line_no, error = %e, "Skipping undecodable chunk");
                on_error(e);
            }
        }
    }

    debug!(decoded, lines = line_no, "Stream exhausted");
    Ok(decoded)
}

/// Collects every decodable value of `reader`, along with the number of
/// lines that failed to decode.
pub async fn collect_ndjson<R, T>(reader: R) -> Result<(Vec<T>, usize)>
where
    R: AsyncBufRead + Unpin,
    T: DeserializeOwned,
{
    let mut items = Vec::new();
    let mut bad_lines = 0;
    read_ndjson(reader, |item: T| items.push(item), |_| bad_lines += 1).await?;
    Ok((items, bad_lines))
}
