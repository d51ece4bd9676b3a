use std::fmt;

use crate::filter;
use crate::runner::CommandResult;

pub const SUCCESS_LINE: &str = "\u{2713} PlatformIO command succeeded";
pub const ERRORS_HEADER: &str = "\u{2717} PlatformIO command failed. Errors:";
pub const TAIL_HEADER: &str = "\u{2717} PlatformIO command failed:";

/// What gets printed for one finished PlatformIO run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    Success,
    /// Error lines matched by [`filter::is_error_line`], ANSI-stripped.
    Errors(Vec<String>),
    /// Nothing matched; the last few non-blank lines of raw output instead.
    Tail(Vec<String>),
}

impl Report {
    /// Pick the report for `result`. A zero exit wins regardless of what was printed.
    pub fn from_result(result: &CommandResult, tail_len: usize) -> Self {
        if result.exit_code == 0 {
            return Self::Success;
        }
        let errors = filter::extract_errors(&result.combined);
        if errors.is_empty() {
            Self::Tail(filter::tail_lines(&result.combined, tail_len))
        } else {
            Self::Errors(errors)
        }
    }

    /// Short name for verbose logging.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Errors(_) => "errors",
            Self::Tail(_) => "tail",
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (header, lines) = match self {
            Self::Success => return f.write_str(SUCCESS_LINE),
            Self::Errors(lines) => (ERRORS_HEADER, lines),
            Self::Tail(lines) => (TAIL_HEADER, lines),
        };
        f.write_str(header)?;
        for line in lines {
            write!(f, "\n{line}")?;
        }
        Ok(())
    }
}
