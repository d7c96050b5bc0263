/// A source-span descriptor threaded through every fallible dispatch
/// operation and handed to the raiser on error.
///
/// This is purely a span; it carries no knowledge of which file it belongs
/// to — that comes from the process-wide current-file index (see
/// [`crate::source_registry`]) at the point the error is raised.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Location {
    pub line: i32,
    pub col: i32,
    pub end_line: i32,
    pub end_col: i32,
}

impl Location {
    pub const fn new(line: i32, col: i32, end_line: i32, end_col: i32) -> Self {
        Location { line, col, end_line, end_col }
    }

    /// A single-point location, useful for synthetic/builtin-raised errors
    /// that don't have a multi-character span.
    pub const fn point(line: i32, col: i32) -> Self {
        Location { line, col, end_line: line, end_col: col }
    }
}
