use std::time::{Duration, Instant};
use log::trace;

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// ストール判定の基本しきい値（これにバッファ補正が加算される）
const STALL_BASE: Duration = Duration::from_secs(1);

/// 1回の転送後に取るべき動作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Decision {
    /// 帯域内なので何もしない
    Continue,
    /// 帯域を超えているので指定時間スリープしてからウィンドウをリセット
    Sleep(Duration),
    /// ストールを検出したのでスリープせずにウィンドウをリセット
    Stall,
}

/// 帯域幅リミッター
///
/// 1本のストリームに1対1で紐づく可変状態。転送したバイト数をバケットに
/// 貯め、目標帯域で転送した場合にかかるはずの時間と実際の経過時間の差だけ
/// 呼び出し元をスリープさせる。
///
/// 上流が遅い・アイドルだった等で異常に長く開いたウィンドウはリセットし、
/// 溜まった「貯金」が再開後のバーストとして放出されないようにする。
/// バッファサイズ/帯域の比が大きい場合はストール判定のしきい値を補正するが、
/// この補正はあまり検証されていない。
#[derive(Debug)]
pub struct Limiter {
    /// bytes per second（0以下は無制限）
    bandwidth: i64,
    /// 現在のウィンドウの開始時刻（初回I/Oまで未初期化）
    window_start: Option<Instant>,
    /// ウィンドウ開始以降に転送したバイト数
    bucket: u64,
}

impl Limiter {
    pub fn new(bandwidth: i64) -> Self {
        Limiter {
            bandwidth,
            window_start: None,
            bucket: 0,
        }
    }

    pub fn bandwidth(&self) -> i64 {
        self.bandwidth
    }

    pub fn is_unlimited(&self) -> bool {
        self.bandwidth <= 0
    }

    pub fn is_initialized(&self) -> bool {
        self.window_start.is_some()
    }

    /// 未初期化ならウィンドウを開始する。2回目以降は何もしない。
    ///
    /// ラップした時点ではなく最初のI/Oから時間を計測するため、
    /// ラップから初回転送までのアイドル時間は課金されない。
    pub fn ensure_initialized(&mut self) {
        if self.window_start.is_none() {
            self.reset_at(Instant::now());
        }
    }

    /// バケットを空にして新しいウィンドウを開始する
    pub fn reset(&mut self) {
        self.reset_at(Instant::now());
    }

    fn reset_at(&mut self, now: Instant) {
        self.bucket = 0;
        self.window_start = Some(now);
    }

    /// `buf_size` のバッファで `n` バイト転送した後に呼ぶ。
    ///
    /// 目標帯域を超えていれば超過分だけ現在のスレッドをブロックする。
    /// エラーは返さない。
    pub fn limit(&mut self, n: usize, buf_size: usize) {
        if self.is_unlimited() {
            return;
        }

        match self.assess(n, buf_size, Instant::now()) {
            Decision::Sleep(penalty) => {
                trace!("bwio: {} bytes ahead of {} B/s, sleeping {:?}", self.bucket, self.bandwidth, penalty);
                std::thread::sleep(penalty);
                self.reset();
            }
            Decision::Stall => {
                trace!("bwio: stall detected after {} bytes, resetting window", self.bucket);
                self.reset();
            }
            Decision::Continue => {}
        }
    }

    fn assess(&mut self, n: usize, buf_size: usize, now: Instant) -> Decision {
        if self.is_unlimited() {
            return Decision::Continue;
        }

        let start = *self.window_start.get_or_insert(now);
        self.bucket = self.bucket.saturating_add(n as u64);
        let window_age = now.saturating_duration_since(start);

        let bandwidth = self.bandwidth as u64;
        let due_nanos = self.bucket as u128 * NANOS_PER_SEC / bandwidth as u128;
        let due = Duration::from_nanos(due_nanos.min(u64::MAX as u128) as u64);

        if due > window_age {
            return Decision::Sleep(due - window_age);
        }

        // 大きなバッファ・低帯域では1チャンクに時間がかかるのでストール扱いしない
        let compensation = Duration::from_secs(buf_size as u64 / bandwidth);
        let stall_threshold = STALL_BASE.saturating_add(compensation);
        if window_age > stall_threshold {
            Decision::Stall
        } else {
            Decision::Continue
        }
    }
}
