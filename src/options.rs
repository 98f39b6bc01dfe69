use std::path::PathBuf;
use serde::Deserialize;
use crate::copy::DEFAULT_BUFFER_SIZE;
use crate::error::{BwioError, Result};

/// どちら側で帯域を制限するか
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LimitSide {
    /// 読み込み側（`copy_buffer`）
    Read,
    /// 書き込み側（`ThrottledWriter`）
    Write,
}

impl Default for LimitSide {
    fn default() -> Self {
        LimitSide::Read
    }
}

#[derive(Debug, Clone)]
pub struct Options {
    // 入出力
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,

    // 帯域制御
    pub bandwidth: i64,
    pub buffer_size: usize,
    pub limit_side: LimitSide,

    // 出力・表示オプション
    pub verbose: u8,
    pub stats: bool,
    pub progress: bool,
    pub human_readable: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            input: None,
            output: None,

            bandwidth: 0,
            buffer_size: DEFAULT_BUFFER_SIZE,
            limit_side: LimitSide::Read,

            verbose: 0,
            stats: false,
            progress: false,
            human_readable: false,
        }
    }
}

impl Options {
    pub fn is_unlimited(&self) -> bool {
        self.bandwidth <= 0
    }

    /// 入力が標準入力かどうか（未指定または `-`）
    pub fn reads_stdin(&self) -> bool {
        match &self.input {
            None => true,
            Some(path) => path.as_os_str() == "-",
        }
    }

    pub fn writes_stdout(&self) -> bool {
        match &self.output {
            None => true,
            Some(path) => path.as_os_str() == "-",
        }
    }
}

/// 帯域指定文字列を bytes/s に変換する
///
/// 数値のみならバイト単位。`K`/`M`/`G`（`KB`, `KiB` 等も可、大文字小文字を
/// 区別しない）は1024倍単位。小数も受け付ける。0や負の値は無制限を意味する
/// のでそのまま返す。
pub fn parse_bandwidth(input: &str) -> Result<i64> {
    let s = input.trim();
    let split = s
        .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == '-' || c == '+'))
        .unwrap_or(s.len());
    let (number, suffix) = s.split_at(split);

    let multiplier: i64 = match suffix.trim().to_ascii_uppercase().as_str() {
        "" | "B" => 1,
        "K" | "KB" | "KIB" => 1 << 10,
        "M" | "MB" | "MIB" => 1 << 20,
        "G" | "GB" | "GIB" => 1 << 30,
        _ => return Err(BwioError::InvalidBandwidth(input.to_string())),
    };

    if number.contains('.') {
        let value: f64 = number
            .parse()
            .map_err(|_| BwioError::InvalidBandwidth(input.to_string()))?;
        let bytes = value * multiplier as f64;
        if !bytes.is_finite() || bytes.abs() >= i64::MAX as f64 {
            return Err(BwioError::InvalidBandwidth(input.to_string()));
        }
        return Ok(bytes as i64);
    }

    let value: i64 = number
        .parse()
        .map_err(|_| BwioError::InvalidBandwidth(input.to_string()))?;
    value
        .checked_mul(multiplier)
        .ok_or_else(|| BwioError::InvalidBandwidth(input.to_string()))
}
