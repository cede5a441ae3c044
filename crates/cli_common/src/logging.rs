use std::io;
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

/// Arguments which configure the logging of every Popreel executable.
#[derive(Debug, Clone, clap::Args)]
pub struct LogArgs {
    /// The log verbosity. `RUST_LOG` directives, if set, take precedence.
    #[clap(
        long = "log.level",
        value_enum,
        default_value_t = LogLevel::Warn,
        env = "LOG_LEVEL",
        global = true
    )]
    pub level: LogLevel,

    /// The format of log lines written to stderr. Defaults to `color` when stderr is a
    /// terminal and `json` otherwise.
    #[clap(long = "log.format", value_enum, env = "LOG_FORMAT", global = true)]
    pub format: Option<LogFormat>,
}

impl Default for LogArgs {
    fn default() -> Self {
        LogArgs {
            level: LogLevel::Warn,
            format: None,
        }
    }
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Off,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => LevelFilter::TRACE,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Off => LevelFilter::OFF,
        }
    }
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Structured, newline-delimited JSON.
    Json,
    /// Plain human-readable lines.
    Text,
    /// Human-readable lines with ANSI colors.
    Color,
}

impl LogFormat {
    fn resolve(format: Option<LogFormat>) -> LogFormat {
        format.unwrap_or_else(|| {
            if atty::is(atty::Stream::Stderr) {
                LogFormat::Color
            } else {
                LogFormat::Json
            }
        })
    }
}

/// Installs the global tracing subscriber. Logs are always written to stderr, leaving stdout to
/// the program's own output. Must be called at most once per process.
pub fn init_logging(args: &LogArgs) {
    let env_filter = || {
        EnvFilter::builder()
            .with_default_directive(LevelFilter::from(args.level).into())
            .from_env_lossy()
    };

    match LogFormat::resolve(args.format) {
        LogFormat::Json => {
            tracing_subscriber::fmt()
                .with_writer(io::stderr)
                .with_env_filter(env_filter())
                .json()
                // Keep the message and fields at the top level of each line.
                .flatten_event(true)
                .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
                // One line per span, written once it closes, carrying its timing.
                .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
                .with_current_span(true)
                .with_span_list(false)
                .with_thread_ids(false)
                .with_thread_names(false)
                .with_target(false)
                .init();
        }
        LogFormat::Text | LogFormat::Color => {
            tracing_subscriber::fmt()
                .with_writer(io::stderr)
                .with_env_filter(env_filter())
                .compact()
                .with_ansi(args.format != Some(LogFormat::Text))
                .with_target(false)
                .init();
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use clap::Parser;

    #[derive(Debug, clap::Parser)]
    struct Args {
        #[clap(flatten)]
        log: LogArgs,
    }

    #[test]
    fn log_args_are_parsed_with_dotted_names() {
        let args = Args::parse_from(["test", "--log.level", "debug", "--log.format", "text"]);
        assert_eq!(LogLevel::Debug, args.log.level);
        assert_eq!(Some(LogFormat::Text), args.log.format);
    }

    #[test]
    fn explicit_format_is_not_overridden() {
        assert_eq!(LogFormat::Json, LogFormat::resolve(Some(LogFormat::Json)));
        assert_eq!(LogFormat::Text, LogFormat::resolve(Some(LogFormat::Text)));
    }
}
