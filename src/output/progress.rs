use std::io::{self, Write};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// プログレス表示
pub struct ProgressDisplay {
    bar: ProgressBar,
}

impl ProgressDisplay {
    /// 新しいプログレス表示を作成（合計が不明ならスピナー）
    pub fn new(total_bytes: Option<u64>) -> Self {
        let bar = match total_bytes {
            Some(total) => {
                let bar = ProgressBar::new(total);
                if let Ok(style) = ProgressStyle::default_bar()
                    .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec})")
                {
                    bar.set_style(style.progress_chars("#>-"));
                }
                bar
            }
            None => {
                let bar = ProgressBar::new_spinner();
                if let Ok(style) = ProgressStyle::default_spinner()
                    .template("{spinner:.green} [{elapsed_precise}] {bytes} ({bytes_per_sec})")
                {
                    bar.set_style(style);
                }
                bar
            }
        };
        bar.set_draw_target(ProgressDrawTarget::stderr());

        Self { bar }
    }

    /// 隠れたプログレス表示（テスト用）
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    pub fn inc(&self, bytes: u64) {
        self.bar.inc(bytes);
    }

    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// 転送完了
    pub fn finish(&self) {
        self.bar.finish_with_message("Transfer complete");
    }
}

impl Drop for ProgressDisplay {
    fn drop(&mut self) {
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }
}

/// 書き込んだバイト数を数え、プログレス表示を更新するライター
pub struct CountingWriter<W> {
    inner: W,
    count: u64,
    progress: Option<ProgressDisplay>,
}

impl<W> CountingWriter<W> {
    pub fn new(inner: W, progress: Option<ProgressDisplay>) -> Self {
        Self {
            inner,
            count: 0,
            progress,
        }
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn finish(&self) {
        if let Some(ref progress) = self.progress {
            progress.finish();
        }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.count += n as u64;
        if let Some(ref progress) = self.progress {
            progress.inc(n as u64);
        }
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counting_writer_counts_and_reports() -> io::Result<()> {
        let mut writer = CountingWriter::new(Vec::<u8>::new(), Some(ProgressDisplay::hidden()));
        writer.write_all(b"hello")?;
        writer.write_all(b" world")?;

        assert_eq!(writer.count(), 11);
        assert_eq!(writer.progress.as_ref().map(|p| p.position()), Some(11));
        writer.finish();
        assert_eq!(writer.into_inner(), b"hello world".to_vec());
        Ok(())
    }

    #[test]
    fn test_counting_writer_without_progress() -> io::Result<()> {
        let mut writer = CountingWriter::new(io::sink(), None);
        writer.write_all(&[0u8; 100])?;
        assert_eq!(writer.count(), 100);
        Ok(())
    }
}
