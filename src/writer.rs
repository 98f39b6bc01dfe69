use std::io::{self, Write};
use log::debug;
use crate::limiter::Limiter;

/// 帯域幅を制限するライター
///
/// `ThrottledReader` と対称。書き込みが成功した場合だけリミッターに
/// 問い合わせ、`flush` は制限せずに委譲する。
#[derive(Debug)]
pub struct ThrottledWriter<W> {
    limiter: Limiter,
    inner: W,
}

impl<W> ThrottledWriter<W> {
    pub fn new(inner: W, bandwidth: i64) -> Self {
        debug!("bwio: wrapping writer at {} B/s", bandwidth);
        Self {
            limiter: Limiter::new(bandwidth),
            inner,
        }
    }

    pub fn bandwidth(&self) -> i64 {
        self.limiter.bandwidth()
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.inner
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for ThrottledWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.limiter.ensure_initialized();

        let n = self.inner.write(buf)?;
        self.limiter.limit(n, buf.len());
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
