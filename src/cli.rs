use clap::{ArgAction, Parser};
use std::path::PathBuf;
use bwio::{parse_bandwidth, BwioError, Config, LimitSide, Options, Result};

#[derive(Parser, Debug)]
#[command(name = "bwcat")]
#[command(version = "0.1.0")]
#[command(about = "Copy a file or stdin to a file or stdout at a limited bandwidth", long_about = None)]
#[command(disable_help_flag = true)]
pub struct Cli {
    /// Print help information (use --help)
    #[arg(long = "help", action = ArgAction::Help)]
    pub help: Option<bool>,

    /// Input file ("-" or omitted for stdin)
    pub input: Option<PathBuf>,

    /// Output file ("-" or omitted for stdout)
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    // 帯域制御
    /// Limit I/O bandwidth in bytes/s; accepts K, M, G suffixes, 0 = unlimited
    #[arg(long = "bwlimit", allow_hyphen_values = true)]
    pub bwlimit: Option<String>,

    /// Size of the copy buffer in bytes
    #[arg(short = 'B', long = "buffer-size")]
    pub buffer_size: Option<usize>,

    /// Throttle writes to the output instead of reads from the input
    #[arg(long = "limit-write")]
    pub limit_write: bool,

    /// Read settings from a TOML file (flags take precedence)
    #[arg(long = "config")]
    pub config: Option<PathBuf>,

    // 出力・表示オプション
    /// Print transfer statistics to stderr
    #[arg(long = "stats")]
    pub stats: bool,

    /// Show progress during transfer
    #[arg(long = "progress")]
    pub progress: bool,

    /// Output numbers in a human-readable format
    #[arg(short = 'h', long = "human-readable")]
    pub human_readable: bool,

    /// Increase verbosity (-v, -vv)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// 既定値 → 設定ファイル → フラグの順に適用して `Options` を作る
    pub fn into_options(self) -> Result<Options> {
        let mut options = Options::default();

        if let Some(ref path) = self.config {
            Config::load(path)?.apply(&mut options)?;
        }

        options.input = self.input;
        options.output = self.output;

        if let Some(ref rate) = self.bwlimit {
            options.bandwidth = parse_bandwidth(rate)?;
        }
        if let Some(buffer_size) = self.buffer_size {
            if buffer_size == 0 {
                return Err(BwioError::InvalidOption("--buffer-size must be greater than zero".to_string()));
            }
            options.buffer_size = buffer_size;
        }
        if self.limit_write {
            options.limit_side = LimitSide::Write;
        }

        options.verbose = self.verbose;
        options.stats = self.stats;
        options.progress = self.progress;
        options.human_readable = self.human_readable;

        Ok(options)
    }
}
