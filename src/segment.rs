//! Segmentation of raw spec text into logical lines.
//!
//! The [`Segmenter`] removes comments and resolves line continuations in a
//! single left-to-right pass, producing one [`LogicalLine`] per `key = value`
//! declaration. Decoding those lines is left to [`crate::de`].
//!
//! Scanning is driven by [`ScanState`], a four-state machine:
//!
//! | State            | `\` marker       | `#`              | line feed                  | other     |
//! |------------------|------------------|------------------|----------------------------|-----------|
//! | `Normal`         | `InContinuation` | `InComment`      | end line, `Normal`         | emit      |
//! | `InComment`      | `InContinuation` | erase            | end line, `Normal`         | erase     |
//! | `InContinuation` | erase            | erase            | join, `JustResumed`        | erase     |
//! | `JustResumed`    | `InContinuation` | `InComment`      | end line, `Normal`         | emit, `Normal` |
//!
//! A `\` is a continuation marker only when nothing but spaces, tabs, or a
//! comment follows it on its physical line (or it ends the buffer). Any other
//! `\` is ordinary text, so `dir = C:\temp` keeps its backslash. A marker
//! drops itself, the rest of its physical line, and the line feed it
//! introduces. Every character of the continued line, leading whitespace
//! included, is appended to the current logical line.
//!
//! ## Examples
//!
//! ```rust
//! use gestalt::segment::Segmenter;
//!
//! let lines = Segmenter::new("a = 1 # one\nlong = x\\\n  y").segment();
//! let texts: Vec<_> = lines.iter().map(|l| l.text.as_str()).collect();
//! assert_eq!(texts, vec!["a = 1 ", "long = x  y"]);
//! assert_eq!(lines[1].line, 2);
//! ```

use tracing::trace;

/// Starts a comment running to the end of the physical line.
pub const COMMENT: char = '#';

/// Placed before a line feed, fuses the next physical line onto the current one.
pub const CONTINUATION: char = '\\';

/// Whitespace allowed between a continuation marker and the end of its line.
const MARKER_TRAIL: &[char] = &[' ', '\t'];

/// Characters trimmed from both ends of the whole buffer.
pub(crate) const BUFFER_TRIM: &[char] = &[' ', '\t', '\n', '\r'];

/// Scanner state; see the module documentation for the transition table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ScanState {
    #[default]
    Normal,
    InComment,
    InContinuation,
    JustResumed,
}

/// What the scanner does with the character that triggered a transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// Append the character to the current logical line.
    Emit,
    /// Drop the character.
    Erase,
    /// Drop a continued line feed; the logical line goes on.
    Join,
    /// The line feed ends the current logical line.
    Terminate,
}

impl ScanState {
    /// Feeds one character, returning the next state and the action to take.
    ///
    /// Precedence: continuation marker, then comment introducer, then line
    /// feed, then everything else.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use gestalt::segment::{Action, ScanState};
    ///
    /// let (state, action) = ScanState::Normal.step('\\');
    /// assert_eq!((state, action), (ScanState::InContinuation, Action::Erase));
    ///
    /// let (state, action) = state.step('\n');
    /// assert_eq!((state, action), (ScanState::JustResumed, Action::Join));
    /// ```
    #[must_use]
    pub fn step(self, ch: char) -> (ScanState, Action) {
        match (self, ch) {
            (_, CONTINUATION) => (ScanState::InContinuation, Action::Erase),
            (ScanState::InContinuation, COMMENT) => (ScanState::InContinuation, Action::Erase),
            (_, COMMENT) => (ScanState::InComment, Action::Erase),
            (ScanState::InContinuation, '\n') => (ScanState::JustResumed, Action::Join),
            (_, '\n') => (ScanState::Normal, Action::Terminate),
            _ => self.step_text(ch),
        }
    }

    /// Feeds a character that carries no meaning for the scanner, such as a
    /// `\` that is not a continuation marker.
    #[must_use]
    pub fn step_text(self, _ch: char) -> (ScanState, Action) {
        match self {
            ScanState::InComment | ScanState::InContinuation => (self, Action::Erase),
            ScanState::Normal | ScanState::JustResumed => (ScanState::Normal, Action::Emit),
        }
    }

    /// Returns `true` while characters are being dropped.
    #[must_use]
    pub const fn is_erasing(&self) -> bool {
        matches!(self, ScanState::InComment | ScanState::InContinuation)
    }
}

/// Returns `true` if a `\` followed by `rest` is a continuation marker: only
/// spaces or tabs stand between it and a line feed, a comment, or the end of
/// the input.
///
/// # Examples
///
/// ```rust
/// use gestalt::segment::is_continuation_marker;
///
/// assert!(is_continuation_marker("  \nnext"));
/// assert!(is_continuation_marker(" # note\nnext"));
/// assert!(is_continuation_marker(""));
/// assert!(!is_continuation_marker("temp\nnext"));
/// ```
#[must_use]
pub fn is_continuation_marker(rest: &str) -> bool {
    let rest = rest.trim_start_matches(MARKER_TRAIL);
    rest.is_empty() || rest.starts_with('\n') || rest.starts_with(COMMENT)
}

/// One comment-free, continuation-resolved declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogicalLine {
    /// 1-based physical line on which this logical line starts.
    pub line: usize,
    pub text: String,
}

impl LogicalLine {
    #[must_use]
    pub fn new(line: usize, text: impl Into<String>) -> Self {
        LogicalLine {
            line,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.text.trim_matches(BUFFER_TRIM).is_empty()
    }
}

/// Splits a raw buffer into [`LogicalLine`]s.
///
/// Blank lines are kept in the output; the decoder skips them.
pub struct Segmenter {
    input: String,
    first_line: usize,
}

impl Segmenter {
    /// Prepares `input` for scanning.
    ///
    /// CRLF pairs are normalized to a single line feed and surrounding
    /// whitespace is trimmed from the whole buffer. Line numbers still refer to
    /// the untrimmed input.
    #[must_use]
    pub fn new(input: &str) -> Self {
        let normalized = input.replace("\r\n", "\n");
        let body = normalized.trim_start_matches(BUFFER_TRIM);
        let first_line = 1 + normalized[..normalized.len() - body.len()]
            .matches('\n')
            .count();
        Segmenter {
            input: body.trim_end_matches(BUFFER_TRIM).to_string(),
            first_line,
        }
    }

    /// Runs the scanner to completion.
    #[must_use]
    pub fn segment(&self) -> Vec<LogicalLine> {
        let mut lines = Vec::new();
        let mut current = String::with_capacity(self.input.len().min(256));
        let mut state = ScanState::default();
        let mut physical = self.first_line;
        let mut start = physical;

        for (i, ch) in self.input.char_indices() {
            let literal = ch == CONTINUATION
                && !is_continuation_marker(&self.input[i + ch.len_utf8()..]);
            let (next, action) = if literal {
                if !state.is_erasing() {
                    trace!(line = physical, "keeping literal backslash");
                }
                state.step_text(ch)
            } else {
                state.step(ch)
            };
            match action {
                Action::Emit => current.push(ch),
                Action::Erase => {}
                Action::Join => {
                    physical += 1;
                    trace!(line = physical, "continuation joined");
                }
                Action::Terminate => {
                    lines.push(LogicalLine::new(start, std::mem::take(&mut current)));
                    physical += 1;
                    start = physical;
                }
            }
            state = next;
        }
        lines.push(LogicalLine::new(start, current));

        trace!(count = lines.len(), "segmented input");
        lines
    }
}

/// Segments `input` with a fresh [`Segmenter`].
#[must_use]
pub fn segment(input: &str) -> Vec<LogicalLine> {
    Segmenter::new(input).segment()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(input: &str) -> Vec<String> {
        segment(input).into_iter().map(|l| l.text).collect()
    }

    #[test]
    fn test_empty_buffer_yields_one_blank_line() {
        let lines = segment("");
        assert_eq!(lines.len(), 1);
        assert!(lines[0].is_blank());
        assert!(segment(" \r\n\t\n ")[0].is_blank());
    }

    #[test]
    fn test_crlf_is_normalized() {
        assert_eq!(texts("a = 1\r\nb = 2\r\n"), vec!["a = 1", "b = 2"]);
    }

    #[test]
    fn test_whole_line_and_trailing_comments_are_erased() {
        assert_eq!(
            texts("# header\na = 1 # trailing\n\nb = 2"),
            vec!["", "a = 1 ", "", "b = 2"]
        );
    }

    #[test]
    fn test_continuation_keeps_leading_whitespace_of_next_line() {
        assert_eq!(
            texts("k = This sentence ends \\\nin 4 spaces\\\n    ."),
            vec!["k = This sentence ends in 4 spaces    ."]
        );
    }

    #[test]
    fn test_text_after_continuation_marker_is_dropped() {
        assert_eq!(texts("k = a\\   \nb"), vec!["k = ab"]);
        assert_eq!(texts("k = a\\ # note\nb"), vec!["k = ab"]);
    }

    #[test]
    fn test_continuation_inside_comment_still_joins() {
        assert_eq!(texts("k = a # note \\\nb"), vec!["k = a b"]);
    }

    #[test]
    fn test_comment_on_continued_line() {
        assert_eq!(
            texts("k[] = a, \\\n b, # skip this\n c = d"),
            vec!["k[] = a,  b, ", " c = d"]
        );
    }

    #[test]
    fn test_backslash_followed_by_text_is_literal() {
        assert_eq!(texts("dir = C:\\temp\nx = 1"), vec!["dir = C:\\temp", "x = 1"]);
        assert_eq!(texts("dir = C:\\temp"), vec!["dir = C:\\temp"]);
        assert_eq!(texts("re = a\\b\\\nc"), vec!["re = a\\bc"]);
    }

    #[test]
    fn test_literal_backslash_in_comment_is_erased() {
        assert_eq!(texts("k = v # see C:\\temp\nz = 1"), vec!["k = v ", "z = 1"]);
    }

    #[test]
    fn test_marker_before_trailing_whitespace_or_comment() {
        assert!(is_continuation_marker(" \t\nrest"));
        assert!(is_continuation_marker("\t# note"));
        assert!(!is_continuation_marker(" x\n"));
        assert_eq!(texts("k = a\\\t\nb"), vec!["k = ab"]);
    }

    #[test]
    fn test_dangling_continuation_at_end_is_dropped() {
        assert_eq!(texts("k = v\\"), vec!["k = v"]);
    }

    #[test]
    fn test_line_numbers_track_physical_lines() {
        let lines = segment("\n\n# c\nk[] = a,\\\n  b\nz = 1");
        let numbered: Vec<_> = lines.iter().map(|l| (l.line, l.text.as_str())).collect();
        assert_eq!(numbered, vec![(3, ""), (4, "k[] = a,  b"), (6, "z = 1")]);
    }

    #[test]
    fn test_state_machine_precedence() {
        assert_eq!(
            ScanState::InComment.step('\\'),
            (ScanState::InContinuation, Action::Erase)
        );
        assert_eq!(
            ScanState::InContinuation.step('#'),
            (ScanState::InContinuation, Action::Erase)
        );
        assert_eq!(
            ScanState::InComment.step('\n'),
            (ScanState::Normal, Action::Terminate)
        );
        assert_eq!(
            ScanState::JustResumed.step(' '),
            (ScanState::Normal, Action::Emit)
        );
        assert_eq!(
            ScanState::JustResumed.step('\n'),
            (ScanState::Normal, Action::Terminate)
        );
        assert_eq!(
            ScanState::JustResumed.step_text('\\'),
            (ScanState::Normal, Action::Emit)
        );
        assert_eq!(
            ScanState::InComment.step_text('\\'),
            (ScanState::InComment, Action::Erase)
        );
    }
}
