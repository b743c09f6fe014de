//! Logger setup: terminal output plus an optional ANSI-stripped log file.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use env_logger::{Builder, Target};
use log::{Level, LevelFilter};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

/// Writes to stderr and, if present, to a file with escape codes removed.
struct Tee {
    file: Option<File>,
}

impl Write for Tee {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stderr().write_all(buf)?;
        if let Some(file) = self.file.as_mut() {
            file.write_all(&strip_ansi_escapes::strip(buf))?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()?;
        if let Some(file) = self.file.as_mut() {
            file.flush()?;
        }
        Ok(())
    }
}

pub(crate) fn level_for(quiet: bool, verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else if quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    }
}

/// Install the global logger. `RUST_LOG` overrides the level chosen by flags.
pub(crate) fn init(quiet: bool, verbose: bool, logfile: Option<&Path>) -> io::Result<()> {
    let file = logfile.map(File::create).transpose()?;

    let mut builder = Builder::new();
    builder
        .filter_level(level_for(quiet, verbose))
        .parse_default_env()
        .target(Target::Pipe(Box::new(Tee { file })));

    if verbose {
        builder.format(|buf, record| {
            writeln!(
                buf,
                "[{} {:<5} {}] {}",
                buf.timestamp_millis(),
                record.level(),
                record.target(),
                record.args()
            )
        });
    } else {
        builder.format(|buf, record| match record.level() {
            Level::Error => writeln!(
                buf,
                "{} {}",
                "error:".if_supports_color(Stderr, |t| t.red()),
                record.args()
            ),
            Level::Warn => writeln!(
                buf,
                "{} {}",
                "warning:".if_supports_color(Stderr, |t| t.yellow()),
                record.args()
            ),
            _ => writeln!(buf, "{}", record.args()),
        });
    }

    builder
        .try_init()
        .map_err(|e| io::Error::other(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_wins_over_quiet() {
        assert_eq!(level_for(true, true), LevelFilter::Debug);
        assert_eq!(level_for(true, false), LevelFilter::Warn);
        assert_eq!(level_for(false, false), LevelFilter::Info);
    }

    #[test]
    fn tee_strips_escapes_in_file() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let mut tee = Tee {
            file: Some(tmp.reopen().unwrap()),
        };
        tee.write_all(b"\x1b[33mwarning:\x1b[0m low\n").unwrap();
        tee.flush().unwrap();
        let written = std::fs::read_to_string(tmp.path()).unwrap();
        assert_eq!(written, "warning: low\n");
    }
}
