use std::io::{self, Read};
use log::debug;
use crate::limiter::Limiter;

/// 帯域幅を制限するリーダー
///
/// 読み込みごとに内部ストリームへ委譲し、エラーなく転送できた場合だけ
/// リミッターに問い合わせる。内部ストリームのエラーはそのまま返す。
#[derive(Debug)]
pub struct ThrottledReader<R> {
    limiter: Limiter,
    inner: R,
}

impl<R> ThrottledReader<R> {
    /// `inner` をラップし、`bandwidth` bytes/s に制限する。
    /// 0以下なら制限しない。
    pub fn new(inner: R, bandwidth: i64) -> Self {
        debug!("bwio: wrapping reader at {} B/s", bandwidth);
        Self {
            limiter: Limiter::new(bandwidth),
            inner,
        }
    }

    pub fn bandwidth(&self) -> i64 {
        self.limiter.bandwidth()
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    pub fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> Read for ThrottledReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.limiter.ensure_initialized();

        // EOFを含むエラーは遅延させずにそのまま返す
        let n = self.inner.read(buf)?;
        if n == 0 && !buf.is_empty() {
            return Ok(0);
        }

        self.limiter.limit(n, buf.len());
        Ok(n)
    }
}
