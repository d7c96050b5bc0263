//! The error raiser (spec.md §4.7/§7), ported line-for-line in spirit from
//! `original_source/runtime/numerobis/exceptions/throw.c`: `u_throw` prints
//! a two-line, ANSI-colored header and a windowed source excerpt with the
//! offending span underlined, then terminates the process. There is no
//! exception mechanism in this runtime — every error path is terminal.

use std::io::Write as _;

use runtime_derive::KindName;
use runtime_util::KindName as _;

use crate::location::Location;
use crate::source_registry;

const ANSI_RESET: &str = "\x1b[0m";
const ANSI_RED_BOLD: &str = "\x1b[1;31m";
const ANSI_DIM: &str = "\x1b[2m";

/// The two error taxonomy headers the diagnostics print (spec.md §7).
/// `KindName` (derived) turns each variant straight into its `TYPE`
/// header text, the same way `ValueKind` gets its debug label.
#[derive(Clone, Copy, Debug, PartialEq, Eq, KindName)]
enum ErrorKind {
    TypeError,
    IndexError,
}

/// The canonical error codes this runtime raises (spec.md §7).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCode {
    /// `301` — string-to-int conversion of a non-numeric or empty string.
    InvalidConversion,
    /// `901` — list index out of bounds after normalization.
    ListIndex,
    /// `902` — string index out of bounds after normalization.
    StringIndex,
}

impl ErrorCode {
    fn numeric(self) -> u32 {
        match self {
            ErrorCode::InvalidConversion => 301,
            ErrorCode::ListIndex => 901,
            ErrorCode::StringIndex => 902,
        }
    }

    fn type_name(self) -> &'static str {
        let kind = match self {
            ErrorCode::InvalidConversion => ErrorKind::TypeError,
            ErrorCode::ListIndex | ErrorCode::StringIndex => ErrorKind::IndexError,
        };
        kind.kind_name()
    }

    fn message(self) -> &'static str {
        match self {
            ErrorCode::InvalidConversion => "cannot convert string to number",
            ErrorCode::ListIndex => "list index out of range",
            ErrorCode::StringIndex => "string index out of range",
        }
    }
}

/// One window of a (possibly multi-line) span, positioned relative to a
/// single source line. Mirrors `_location_split`'s per-line `Location`
/// records.
struct SplitLine {
    line: i32,
    col: i32,
    end_col: Option<i32>,
}

fn split_location(span: &Location) -> Vec<SplitLine> {
    let start = span.line;
    let end = span.end_line;
    if end < start {
        return Vec::new();
    }

    (start..=end)
        .map(|line| SplitLine {
            line,
            col: if line == span.line { span.col } else { 1 },
            end_col: if line == span.end_line { Some(span.end_col) } else { None },
        })
        .collect()
}

/// Prints a windowed, UTF-8-aware excerpt of the current source around
/// `span`, underlining the offending text with box-drawing characters.
fn print_preview(span: &Location) {
    let Some(program) = source_registry::current_program() else { return };
    let lines = split_location(span);
    let n = lines.len();
    eprintln!();

    for (i, split) in lines.iter().enumerate() {
        let Some(src) = program.line(split.line) else { continue };
        let chars: Vec<char> = src.chars().collect();
        let src_len = chars.len() as i32;

        let end_col = split.end_col.filter(|c| *c > 0).unwrap_or(src_len + 1);

        let col_start = split.col.clamp(1, src_len + 1);
        let col_end = (end_col.clamp(col_start, src_len + 1)) + 1;

        let window_start = (col_start - 1 - 30).max(0);
        let window_end = (col_end - 1 + 30).min(src_len);

        let slice = |from: i32, to: i32| -> String {
            let from = from.max(0) as usize;
            let to = (to.max(from as i32)) as usize;
            chars[from.min(chars.len())..to.min(chars.len())].iter().collect()
        };

        let before = slice(window_start, col_start - 1);
        let highlight = slice(col_start - 1, col_end - 1);
        let after = slice(col_end - 1, window_end);

        let prefix = if window_start > 0 { "..." } else { "" };
        let suffix = if window_end < src_len { "..." } else { "" };

        eprintln!(
            "{ANSI_DIM}{:5} │{ANSI_RESET}   {prefix}{before}{ANSI_RED_BOLD}{highlight}{ANSI_RESET}{after}{suffix}",
            split.line,
        );

        let highlight_len = highlight.chars().count();
        if highlight_len > 0 {
            let mut underline = String::new();
            for j in 0..highlight_len {
                if i == 0 && j == 0 {
                    underline.push('╰');
                } else if i == n - 1 && j == highlight_len - 1 {
                    underline.push('╯');
                } else {
                    underline.push('─');
                }
            }
            let gutter_pad = prefix.chars().count() + before.chars().count();
            eprintln!(
                "{ANSI_DIM}      │   {ANSI_RESET}{:gutter_pad$}{ANSI_RED_BOLD}{underline}{ANSI_RESET}",
                "",
            );
        }
    }
}

/// Raises a runtime error at `span`: prints the two-line header and a
/// source excerpt, then terminates the process with failure status. There
/// is no recovery path — every caller of this function diverges.
pub fn u_throw(code: ErrorCode, span: &Location) -> ! {
    let path = source_registry::current_file_path();
    let path_display = path.as_deref().map(|p| p.display().to_string()).unwrap_or_default();

    tracing::error!(
        code = code.numeric(),
        kind = code.type_name(),
        path = %path_display,
        line = span.line,
        col = span.col,
        "runtime error raised"
    );

    eprintln!(
        "{ANSI_RESET}{ANSI_RED_BOLD}{}{ANSI_RESET} {ANSI_DIM}at {}:{}:{}",
        code.type_name(),
        path_display,
        span.line,
        span.col
    );
    eprintln!("  [E{}] {ANSI_RESET}{}", code.numeric(), code.message());

    print_preview(span);

    let _ = std::io::stderr().flush();
    std::process::exit(1);
}

/// Terminates the process for a programmer error that has no user-facing
/// source location (spec.md §7 "Fatal internal"): currently, only
/// registering the same extern-function name twice. Distinct from
/// [`u_throw`] because the reference runtime's fatal path also prints
/// straight to stderr without going through the message table.
pub fn fatal_abort(context: &str) -> ! {
    tracing::error!(%context, "fatal internal error");
    eprintln!("{ANSI_RED_BOLD}fatal internal error{ANSI_RESET}: {context}");
    std::process::exit(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_location_single_line() {
        let span = Location::new(3, 5, 3, 9);
        let lines = split_location(&span);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].line, 3);
        assert_eq!(lines[0].col, 5);
        assert_eq!(lines[0].end_col, Some(9));
    }

    #[test]
    fn split_location_multi_line() {
        let span = Location::new(3, 5, 5, 2);
        let lines = split_location(&span);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1].col, 1);
        assert_eq!(lines[1].end_col, None);
        assert_eq!(lines[2].end_col, Some(2));
    }

    #[test]
    fn error_code_numbers_match_spec() {
        assert_eq!(ErrorCode::InvalidConversion.numeric(), 301);
        assert_eq!(ErrorCode::ListIndex.numeric(), 901);
        assert_eq!(ErrorCode::StringIndex.numeric(), 902);
    }

    #[test]
    fn error_code_type_names_group_by_taxonomy() {
        assert_eq!(ErrorCode::InvalidConversion.type_name(), "TypeError");
        assert_eq!(ErrorCode::ListIndex.type_name(), "IndexError");
        assert_eq!(ErrorCode::StringIndex.type_name(), "IndexError");
    }
}
