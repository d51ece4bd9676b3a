use std::sync::LazyLock;

use regex::Regex;

/// Whole-word `error` or `failed`, any case.
const KEYWORD_PATTERN: &str = r"(?i)\b(?:error|failed)\b";

/// Any SGR sequence (`ESC [ <digits and ;> m`), not just the red ones.
const ANSI_SGR_PATTERN: &str = r"\x1b\[[0-9;]*m";

/// Raw foreground sequences that build tools use to paint a line red:
/// bright red, red, bold red.
const RED_SEQUENCES: &[&str] = &["\x1b[91m", "\x1b[31m", "\x1b[1;31m"];

static KEYWORD_RE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(KEYWORD_PATTERN).ok());
static ANSI_SGR_RE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(ANSI_SGR_PATTERN).ok());

/// True when `line` looks like part of a failure explanation.
///
/// A line qualifies if it contains `error` or `failed` as a standalone word
/// (case-insensitive), or carries one of the red color sequences in
/// [`RED_SEQUENCES`]. Detection runs on the raw line, before any stripping.
pub fn is_error_line(line: &str) -> bool {
    let keyword = KEYWORD_RE.as_ref().is_some_and(|re| re.is_match(line));
    keyword || RED_SEQUENCES.iter().any(|seq| line.contains(seq))
}

/// Remove every ANSI SGR (color/style) sequence from `line`.
///
/// Repeats until nothing matches, so a sequence assembled from the leftovers
/// of another (`ESC ESC[31m [0m`) is removed too and the result is a fixed point.
pub fn strip_ansi(line: &str) -> String {
    let Some(re) = ANSI_SGR_RE.as_ref() else {
        return line.to_string();
    };
    let mut out = line.to_string();
    while re.is_match(&out) {
        out = re.replace_all(&out, "").into_owned();
    }
    out
}

/// Turn `\r\n` and lone `\r` into `\n`.
///
/// Upload tools redraw progress with bare carriage returns; each redraw is
/// treated as its own line.
pub fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Collect the error lines of `output`, ANSI-stripped, in their original order.
///
/// Lines that are blank once their color codes are gone are dropped.
pub fn extract_errors(output: &str) -> Vec<String> {
    output
        .split('\n')
        .filter(|line| is_error_line(line))
        .map(strip_ansi)
        .filter(|line| !line.trim().is_empty())
        .collect()
}

/// The last `n` non-blank lines of `output`, earliest first, left untouched.
pub fn tail_lines(output: &str, n: usize) -> Vec<String> {
    let non_blank: Vec<&str> = output
        .split('\n')
        .filter(|line| !line.trim().is_empty())
        .collect();
    let start = non_blank.len().saturating_sub(n);
    non_blank[start..].iter().map(ToString::to_string).collect()
}

#[cfg(test)]
mod tests;
