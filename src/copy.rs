use std::io::{self, ErrorKind, Read, Write};
use crate::reader::ThrottledReader;

/// `copy` / `copy_buffer` の既定バッファサイズ（16 KiB）
pub const DEFAULT_BUFFER_SIZE: usize = 16 * 1024;

/// `src` から `dst` へ、`bandwidth` bytes/s に制限してコピーする。
///
/// 16 KiB のバッファを使う。コピーしたバイト数を返す。
pub fn copy<R, W>(dst: &mut W, src: R, bandwidth: i64) -> io::Result<u64>
where
    R: Read,
    W: Write + ?Sized,
{
    copy_buffer(dst, src, bandwidth, None)
}

/// `copy` と同じだが、呼び出し元のバッファを使う。
///
/// `buf` が `None` または空なら 16 KiB のバッファを確保する。
/// 制限は読み込み側だけで行い、`dst` 自体は制限しない。
/// 読み書きどちらかで最初に起きたエラーをそのまま返す。
pub fn copy_buffer<R, W>(
    dst: &mut W,
    src: R,
    bandwidth: i64,
    buf: Option<&mut [u8]>,
) -> io::Result<u64>
where
    R: Read,
    W: Write + ?Sized,
{
    let mut owned;
    let buf = match buf {
        Some(buf) if !buf.is_empty() => buf,
        _ => {
            owned = vec![0u8; DEFAULT_BUFFER_SIZE];
            owned.as_mut_slice()
        }
    };

    let mut reader = ThrottledReader::new(src, bandwidth);
    let mut written: u64 = 0;

    loop {
        let n = match reader.read(buf) {
            Ok(0) => return Ok(written),
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        dst.write_all(&buf[..n])?;
        written += n as u64;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    /// 読み込んだバッファ長を記録するリーダー
    struct RecordingReader {
        data: Cursor<Vec<u8>>,
        seen: Vec<usize>,
    }

    impl Read for RecordingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.seen.push(buf.len());
            self.data.read(buf)
        }
    }

    /// 最初の1回だけ Interrupted を返すリーダー
    struct InterruptOnce {
        interrupted: bool,
        data: Cursor<Vec<u8>>,
    }

    impl Read for InterruptOnce {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if !self.interrupted {
                self.interrupted = true;
                return Err(io::Error::new(ErrorKind::Interrupted, "signal"));
            }
            self.data.read(buf)
        }
    }

    #[test]
    fn test_copy_uses_default_buffer() -> io::Result<()> {
        let mut src = RecordingReader {
            data: Cursor::new(vec![9u8; 40 * 1024]),
            seen: Vec::new(),
        };
        let mut dst: Vec<u8> = Vec::new();

        let n = copy(&mut dst, &mut src, 0)?;

        assert_eq!(n, 40 * 1024);
        assert_eq!(dst.len(), 40 * 1024);
        assert!(src.seen.iter().all(|&len| len == DEFAULT_BUFFER_SIZE));
        Ok(())
    }

    #[test]
    fn test_copy_buffer_uses_given_buffer() -> io::Result<()> {
        let mut src = RecordingReader {
            data: Cursor::new(vec![1u8; 100]),
            seen: Vec::new(),
        };
        let mut dst: Vec<u8> = Vec::new();
        let mut buf = [0u8; 32];

        let n = copy_buffer(&mut dst, &mut src, -1, Some(&mut buf[..]))?;

        assert_eq!(n, 100);
        assert!(src.seen.iter().all(|&len| len == 32));
        Ok(())
    }

    #[test]
    fn test_copy_buffer_replaces_empty_buffer() -> io::Result<()> {
        let mut src = RecordingReader {
            data: Cursor::new(vec![1u8; 10]),
            seen: Vec::new(),
        };
        let mut dst: Vec<u8> = Vec::new();
        let mut buf: [u8; 0] = [];

        copy_buffer(&mut dst, &mut src, 0, Some(&mut buf[..]))?;

        assert_eq!(src.seen[0], DEFAULT_BUFFER_SIZE);
        assert_eq!(dst, vec![1u8; 10]);
        Ok(())
    }

    #[test]
    fn test_copy_retries_interrupted_reads() -> io::Result<()> {
        let src = InterruptOnce {
            interrupted: false,
            data: Cursor::new(b"after signal".to_vec()),
        };
        let mut dst: Vec<u8> = Vec::new();

        let n = copy(&mut dst, src, 0)?;

        assert_eq!(n, 12);
        assert_eq!(dst, b"after signal".to_vec());
        Ok(())
    }

    #[test]
    fn test_copy_into_unsized_writer() -> io::Result<()> {
        let mut sink: Box<dyn Write> = Box::new(io::sink());
        let n = copy(sink.as_mut(), Cursor::new(vec![0u8; 3]), 0)?;
        assert_eq!(n, 3);
        Ok(())
    }
}
