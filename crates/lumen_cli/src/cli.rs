use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

/// Log levels selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "lumen")]
#[command(about = "Render a scene with the Lumen CPU ray tracer")]
pub struct Args {
    /// JSON scene description; renders the built-in demo when omitted
    pub scene: Option<PathBuf>,

    /// Directory the PNG is written to
    #[arg(short, long, default_value = "images")]
    pub output: PathBuf,

    /// Worker threads: 1 renders on the main thread, 0 uses every core
    #[arg(short, long, default_value_t = 0)]
    pub threads: usize,

    /// Enable anti-aliasing with N x N samples per pixel
    #[arg(short = 'a', long, value_name = "N")]
    pub anti_aliasing: Option<u32>,

    /// Overlay a grid line every N pixels after rendering
    #[arg(long, value_name = "N")]
    pub grid: Option<u32>,

    /// Logging level; overrides RUST_LOG
    #[arg(long)]
    pub log_level: Option<LogLevel>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["lumen"]).unwrap();
        assert_eq!(args.scene, None);
        assert_eq!(args.output, PathBuf::from("images"));
        assert_eq!(args.threads, 0);
        assert_eq!(args.anti_aliasing, None);
        assert_eq!(args.grid, None);
        assert_eq!(args.log_level, None);
    }

    #[test]
    fn test_all_options() {
        let args = Args::try_parse_from([
            "lumen",
            "scenes/mirrors.json",
            "--output",
            "out",
            "-t",
            "4",
            "-a",
            "3",
            "--grid",
            "50",
            "--log-level",
            "debug",
        ])
        .unwrap();

        assert_eq!(args.scene, Some(PathBuf::from("scenes/mirrors.json")));
        assert_eq!(args.output, PathBuf::from("out"));
        assert_eq!(args.threads, 4);
        assert_eq!(args.anti_aliasing, Some(3));
        assert_eq!(args.grid, Some(50));
        assert_eq!(args.log_level, Some(LogLevel::Debug));
        assert_eq!(LevelFilter::from(LogLevel::Debug), LevelFilter::Debug);
    }

    #[test]
    fn test_rejects_bad_thread_count() {
        assert!(Args::try_parse_from(["lumen", "--threads", "-2"]).is_err());
    }
}
