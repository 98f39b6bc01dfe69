mod cli;

use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::time::Instant;
use clap::Parser;
use log::info;
use bwio::output::{CountingWriter, ProgressDisplay, Stats};
use bwio::{copy_buffer, LimitSide, Options, Result, ThrottledWriter};
use cli::Cli;

fn main() {
    // ロガーの初期化
    env_logger::init();

    let cli = Cli::parse();

    let options = match cli.into_options() {
        Ok(options) => options,
        Err(e) => {
            eprintln!("bwcat: {}", e);
            std::process::exit(2);
        }
    };

    if let Err(e) = run(&options) {
        eprintln!("bwcat: {}", e);
        std::process::exit(1);
    }
}

fn open_input(options: &Options) -> Result<(Box<dyn Read>, Option<u64>)> {
    match options.input {
        Some(ref path) if !options.reads_stdin() => {
            let file = File::open(path)?;
            let len = file.metadata().ok().map(|m| m.len());
            Ok((Box::new(file), len))
        }
        _ => Ok((Box::new(io::stdin().lock()), None)),
    }
}

fn open_output(options: &Options) -> Result<Box<dyn Write>> {
    match options.output {
        Some(ref path) if !options.writes_stdout() => Ok(Box::new(BufWriter::new(File::create(path)?))),
        _ => Ok(Box::new(io::stdout().lock())),
    }
}

fn run(options: &Options) -> Result<()> {
    let (src, total) = open_input(options)?;
    let dst = open_output(options)?;

    if options.verbose > 0 {
        eprintln!(
            "bwcat: limiting {} side to {} B/s with a {} byte buffer",
            match options.limit_side {
                LimitSide::Read => "read",
                LimitSide::Write => "write",
            },
            options.bandwidth,
            options.buffer_size
        );
    }

    let progress = if options.progress {
        Some(ProgressDisplay::new(total))
    } else {
        None
    };
    let mut dst = CountingWriter::new(dst, progress);
    let mut buf = vec![0u8; options.buffer_size];

    let start = Instant::now();
    let copied = match options.limit_side {
        LimitSide::Read => copy_buffer(&mut dst, src, options.bandwidth, Some(&mut buf[..]))?,
        LimitSide::Write => {
            // 読み込みは無制限、書き込み側で制限する
            let mut throttled = ThrottledWriter::new(&mut dst, options.bandwidth);
            let copied = copy_buffer(&mut throttled, src, 0, Some(&mut buf[..]))?;
            throttled.flush()?;
            copied
        }
    };
    dst.flush()?;
    dst.finish();
    let elapsed = start.elapsed();

    info!("bwcat: copied {} bytes in {:?}", copied, elapsed);

    if options.stats {
        Stats::new(copied, elapsed, options.bandwidth).display(options.human_readable);
    }

    Ok(())
}
