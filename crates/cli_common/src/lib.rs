//! Contains helpers and things that are used by all Popreel rust executables.
mod logging;

pub use logging::{init_logging, LogArgs, LogFormat, LogLevel};

/// A return type indicating that a function cannot return.
pub enum Never {}

/// Executes the given `run_fn` and exits the process with the outcome. This function will never
/// return, so a typical `fn main` will have this as the last line. Argument parsing is left up to
/// the caller.
/// The `run_fn` can be any function or closure that returns a Result having an `Ok` that can be
/// converted into a `Success`. Returning an `Err` will cause the error and its chain of causes to
/// be logged, and the application will exit with a code of `1`.
pub fn run_cli_main<A, S, F>(args: A, run_fn: F) -> Never
where
    F: FnOnce(A) -> Result<S, anyhow::Error>,
    S: Into<Success>,
{
    let error = match run_fn(args).map(Into::<Success>::into) {
        Ok(Success::Exit(code)) => {
            std::process::exit(code);
        }
        Err(err) => err,
    };

    tracing::debug!(error_details = ?error, "execution failed");
    tracing::error!(error = format!("{error:#}"), "execution failed");
    std::process::exit(1);
}

/// Represents the successful execution of a program or subcommand.
#[derive(Debug, PartialEq)]
pub enum Success {
    /// Program should immediately exit with the given code.
    Exit(i32),
}

impl From<()> for Success {
    fn from(_: ()) -> Self {
        Success::Exit(0)
    }
}

impl From<i32> for Success {
    fn from(code: i32) -> Self {
        Success::Exit(code)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn unit_and_codes_convert_into_exit() {
        assert_eq!(Success::Exit(0), ().into());
        assert_eq!(Success::Exit(3), 3.into());
    }
}
