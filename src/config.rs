use std::path::Path;
use serde::Deserialize;
use crate::error::{BwioError, Result};
use crate::options::{parse_bandwidth, LimitSide, Options};

/// 帯域の指定（数値ならbytes/s、文字列なら `500K` 形式）
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum BandwidthSetting {
    Bytes(i64),
    Rate(String),
}

impl BandwidthSetting {
    pub fn bytes_per_second(&self) -> Result<i64> {
        match self {
            BandwidthSetting::Bytes(n) => Ok(*n),
            BandwidthSetting::Rate(s) => parse_bandwidth(s),
        }
    }
}

/// TOML設定ファイル
///
/// ```toml
/// bandwidth = "500K"
/// buffer_size = 16384
/// limit_side = "write"
/// ```
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub bandwidth: Option<BandwidthSetting>,
    pub buffer_size: Option<usize>,
    pub limit_side: Option<LimitSide>,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)?;
        Self::parse(&config_str)
    }

    pub fn parse(config_str: &str) -> Result<Self> {
        Ok(toml::from_str(config_str)?)
    }

    /// 設定されている項目だけ `options` に反映する
    pub fn apply(&self, options: &mut Options) -> Result<()> {
        if let Some(ref bandwidth) = self.bandwidth {
            options.bandwidth = bandwidth.bytes_per_second()?;
        }
        if let Some(buffer_size) = self.buffer_size {
            if buffer_size == 0 {
                return Err(BwioError::Config("buffer_size must be greater than zero".to_string()));
            }
            options.buffer_size = buffer_size;
        }
        if let Some(limit_side) = self.limit_side {
            options.limit_side = limit_side;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() -> Result<()> {
        let config = Config::parse(
            r#"
            bandwidth = "500K"
            buffer_size = 4096
            limit_side = "write"
            "#,
        )?;

        let mut options = Options::default();
        config.apply(&mut options)?;

        assert_eq!(options.bandwidth, 512_000);
        assert_eq!(options.buffer_size, 4096);
        assert_eq!(options.limit_side, LimitSide::Write);
        Ok(())
    }

    #[test]
    fn test_numeric_bandwidth() -> Result<()> {
        let config = Config::parse("bandwidth = 1000")?;
        assert_eq!(config.bandwidth, Some(BandwidthSetting::Bytes(1000)));
        Ok(())
    }

    #[test]
    fn test_empty_config_keeps_defaults() -> Result<()> {
        let config = Config::parse("")?;
        let mut options = Options::default();
        config.apply(&mut options)?;

        let defaults = Options::default();
        assert_eq!(options.bandwidth, defaults.bandwidth);
        assert_eq!(options.buffer_size, defaults.buffer_size);
        Ok(())
    }

    #[test]
    fn test_unknown_key_is_config_error() {
        match Config::parse("bandwith = 10") {
            Err(BwioError::Config(_)) => {}
            other => panic!("expected config error, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_buffer_size_is_rejected() -> Result<()> {
        let config = Config::parse("buffer_size = 0")?;
        assert!(matches!(
            config.apply(&mut Options::default()),
            Err(BwioError::Config(_))
        ));
        Ok(())
    }

    #[test]
    fn test_bad_rate_string() -> Result<()> {
        let config = Config::parse(r#"bandwidth = "lots""#)?;
        assert!(matches!(
            config.apply(&mut Options::default()),
            Err(BwioError::InvalidBandwidth(_))
        ));
        Ok(())
    }

    #[test]
    fn test_load_from_file() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "bandwidth = \"1M\"")?;

        let config = Config::load(file.path())?;
        assert_eq!(config.bandwidth, Some(BandwidthSetting::Rate("1M".to_string())));
        Ok(())
    }
}
