//! Line framing for the inbound side of a connection.

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// Read one `\n`-terminated line, terminator included.
///
/// Returns `Ok(None)` on end of stream, including when the peer closed after
/// sending an unterminated fragment; such a fragment is discarded. Invalid
/// UTF-8 surfaces as an `InvalidData` error.
///
/// Line length is not capped: a peer that never sends `\n` keeps growing the
/// buffer, the same way the history log grows without a configured limit.
pub async fn read_complete_line<R>(reader: &mut R) -> std::io::Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
{
    let mut line = String::new();
    let read = reader.read_line(&mut line).await?;
    if read == 0 || !line.ends_with('\n') {
        return Ok(None);
    }
    Ok(Some(line))
}
