use std::io::Write;

use futures::{Stream, StreamExt};
use serde_json::Value;
use tracing::debug;

use cocktail_rpc::{answer_text, SseLine};

use crate::error::ClientError;

/// Reads an SSE body line by line. Keep-alive pings print `...`; the first
/// `data:` frame is decoded and its answer returned without reading further.
pub async fn read_answer<S, B, E>(stream: S, output: &mut (dyn Write + Send)) -> Result<String, ClientError>
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
    ClientError: From<E>,
{
    let mut stream = std::pin::pin!(stream);
    let mut pending: Vec<u8> = Vec::new();
    while let Some(chunk) = stream.next().await {
        pending.extend_from_slice(chunk?.as_ref());
        while let Some(pos) = pending.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = pending.drain(..=pos).collect();
            if let Some(answer) = handle_line(&line, output)? { return Ok(answer); }
        }
    }
    // last line without a trailing newline
    if let Some(answer) = handle_line(&pending, output)? { return Ok(answer); }
    Err(ClientError::EmptyStream)
}

fn handle_line(raw: &[u8], output: &mut (dyn Write + Send)) -> Result<Option<String>, ClientError> {
    let line = String::from_utf8_lossy(raw);
    let line = line.trim_end_matches(['\r', '\n']);
    match SseLine::classify(line) {
        SseLine::Data(payload) => {
            let response: Value = serde_json::from_str(payload)?;
            Ok(Some(answer_text(&response)))
        }
        SseLine::Ping => {
            writeln!(output, "...")?;
            Ok(None)
        }
        SseLine::Other => {
            if !line.is_empty() { debug!(line, "skipping stream line"); }
            Ok(None)
        }
    }
}
