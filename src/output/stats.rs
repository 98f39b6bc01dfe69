use std::time::Duration;

/// 転送統計
#[derive(Debug, Clone, Default)]
pub struct Stats {
    pub transferred_bytes: u64,
    pub execution_time: Duration,
    /// 設定された帯域（0以下は無制限）
    pub bandwidth: i64,
}

impl Stats {
    pub fn new(transferred_bytes: u64, execution_time: Duration, bandwidth: i64) -> Self {
        Self {
            transferred_bytes,
            execution_time,
            bandwidth,
        }
    }

    /// 平均転送速度（bytes/s）
    pub fn total_speed(&self) -> f64 {
        if self.execution_time.as_secs_f64() > 0.0 {
            self.transferred_bytes as f64 / self.execution_time.as_secs_f64()
        } else {
            0.0
        }
    }

    pub fn lines(&self, human_readable: bool) -> Vec<String> {
        let limit = if self.bandwidth > 0 {
            format!("{}/s", format_bytes(self.bandwidth as f64, human_readable))
        } else {
            "unlimited".to_string()
        };

        vec![
            format!("Transferred bytes: {}", format_bytes(self.transferred_bytes as f64, human_readable)),
            format!("Execution time: {:.3}s", self.execution_time.as_secs_f64()),
            format!("Total speed: {}/s", format_bytes(self.total_speed(), human_readable)),
            format!("Bandwidth limit: {}", limit),
        ]
    }

    /// 標準エラーに出力する（標準出力はデータ用）
    pub fn display(&self, human_readable: bool) {
        for line in self.lines(human_readable) {
            eprintln!("{}", line);
        }
    }
}

pub fn format_bytes(bytes: f64, human_readable: bool) -> String {
    if !human_readable {
        return format!("{:.0} B", bytes);
    }

    const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];
    let mut value = bytes;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{:.0} {}", value, UNITS[unit])
    } else {
        format!("{:.2} {}", value, UNITS[unit])
    }
}
