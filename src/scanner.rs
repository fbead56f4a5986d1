//! Backward line-boundary scanning over a seekable byte view.

use crate::error::Result;
use std::io::SeekFrom;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncSeek, AsyncSeekExt};

/// Reads the line that ends at `cursor`, scanning backward for its start.
///
/// The returned cursor is the byte offset where the line's span begins, and
/// is what the caller passes in to read the line before this one. It is 0
/// once the scan has consumed the whole file. `cursor` must be greater
/// than 0; the caller handles empty files before calling.
///
/// The span walked here may include the line's own terminator (`\n` or
/// `\r\n`), which is stripped from the returned text. Invalid UTF-8 decodes
/// to replacement characters rather than failing the scan.
pub(crate) async fn previous_line<R>(view: &mut R, cursor: u64) -> Result<(String, u64)>
where
    R: AsyncRead + AsyncSeek + Unpin,
{
    debug_assert!(cursor > 0, "previous_line called with cursor at 0");

    let mut pos = cursor;
    let mut len: usize = 0;
    let mut byte = [0u8; 1];

    while pos > 0 {
        view.seek(SeekFrom::Start(pos - 1)).await?;
        view.read_exact(&mut byte).await?;

        // A newline at the very first step is this line's own terminator
        // and belongs to the span; any other newline is the boundary with
        // the previous line.
        if byte[0] == b'\n' && pos != cursor {
            break;
        }

        pos -= 1;
        len += 1;
    }

    let mut buf = vec![0u8; len];
    view.seek(SeekFrom::Start(pos)).await?;
    view.read_exact(&mut buf).await?;

    Ok((decode_line(&buf), pos))
}

/// Lossy-decode a line span and strip its trailing terminator, if any.
fn decode_line(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    let text = text.strip_suffix('\n').unwrap_or(&text);
    let text = text.strip_suffix('\r').unwrap_or(text);
    text.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    async fn scan_all(content: &[u8]) -> Vec<String> {
        let mut view = Cursor::new(content.to_vec());
        let mut cursor = content.len() as u64;
        let mut lines = Vec::new();

        while cursor > 0 {
            let (line, next) = previous_line(&mut view, cursor).await.unwrap();
            lines.push(line);
            cursor = next;
        }

        lines.reverse();
        lines
    }

    #[tokio::test]
    async fn test_newline_terminated_lines() {
        assert_eq!(scan_all(b"a\nb\n").await, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_no_trailing_newline() {
        assert_eq!(scan_all(b"hello").await, vec!["hello"]);
    }

    #[tokio::test]
    async fn test_last_line_unterminated() {
        assert_eq!(scan_all(b"first\nsecond").await, vec!["first", "second"]);
    }

    #[tokio::test]
    async fn test_single_line_with_newline() {
        assert_eq!(scan_all(b"only\n").await, vec!["only"]);
    }

    #[tokio::test]
    async fn test_crlf_terminators() {
        assert_eq!(scan_all(b"a\r\nb\r\n").await, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_empty_lines_preserved() {
        assert_eq!(scan_all(b"a\n\nb\n").await, vec!["a", "", "b"]);
    }

    #[tokio::test]
    async fn test_leading_empty_line() {
        assert_eq!(scan_all(b"\nx\n").await, vec!["", "x"]);
    }

    #[tokio::test]
    async fn test_invalid_utf8_degrades_to_replacement() {
        let lines = scan_all(b"ok\n\xff\xfe bad\n").await;
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "ok");
        assert!(lines[1].contains('\u{FFFD}'));
        assert!(lines[1].ends_with(" bad"));
    }

    #[tokio::test]
    async fn test_multibyte_utf8_line() {
        assert_eq!(
            scan_all("héllo 世界\n".as_bytes()).await,
            vec!["héllo 世界"]
        );
    }

    #[tokio::test]
    async fn test_cursor_decreases_every_call() {
        let content = b"aa\nbb\ncc\n".to_vec();
        let mut view = Cursor::new(content.clone());
        let mut cursor = content.len() as u64;

        while cursor > 0 {
            let (_, next) = previous_line(&mut view, cursor).await.unwrap();
            assert!(next < cursor);
            cursor = next;
        }
    }

    #[test]
    fn test_decode_line_strips_terminators() {
        assert_eq!(decode_line(b"text\n"), "text");
        assert_eq!(decode_line(b"text\r\n"), "text");
        assert_eq!(decode_line(b"text"), "text");
        assert_eq!(decode_line(b"\n"), "");
        assert_eq!(decode_line(b""), "");
        // A bare trailing carriage return counts as a terminator remnant.
        assert_eq!(decode_line(b"text\r"), "text");
    }
}
