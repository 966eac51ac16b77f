//! Contains the common [`ErrorKind`] trait used by all errors to display user-facing error
//! messages, and the [`Error`] type that pairs a kind with the source regions it points at.

use ariadne::{Color, Report};
use std::{any::Any, fmt::{self, Debug, Display, Formatter}, ops::Range};

#[cfg(test)]
extern crate self as calculus_error;

/// The color to use to highlight expressions.
pub const EXPR: Color = Color::RGB(52, 235, 152);

/// Represents any kind of error that can occur during some operation.
pub trait ErrorKind: Debug + Send + Sync {
    /// Returns `self` as [`Any`], so the concrete kind can be recovered from an [`Error`].
    fn as_any(&self) -> &dyn Any;

    /// The one-line message describing this error.
    fn message(&self) -> String;

    /// Builds the report for this error.
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)>;
}

/// An error associated with regions of source code that can be highlighted.
///
/// Errors produced while transforming trees (rather than parsing text) have no source to point at,
/// and carry an empty list of spans.
#[derive(Debug)]
pub struct Error {
    /// The regions of the source code that this error originated from.
    pub spans: Vec<Range<usize>>,

    /// The kind of error that occurred.
    pub kind: Box<dyn ErrorKind>,
}

impl Error {
    /// Creates a new error with the given spans and kind.
    pub fn new(spans: Vec<Range<usize>>, kind: impl ErrorKind + 'static) -> Self {
        Self { spans, kind: Box::new(kind) }
    }

    /// Creates a new error that does not point at any source code.
    pub fn spanless(kind: impl ErrorKind + 'static) -> Self {
        Self::new(Vec::new(), kind)
    }

    /// The byte offset in the source the error points at, if it points at the source at all.
    pub fn offset(&self) -> Option<usize> {
        self.spans.first().map(|span| span.start)
    }

    /// Returns true if the kind of this error is `K`.
    pub fn is<K: ErrorKind + 'static>(&self) -> bool {
        self.kind.as_any().is::<K>()
    }

    /// Returns the kind of this error as a `K`, if it is one.
    pub fn downcast_ref<K: ErrorKind + 'static>(&self) -> Option<&K> {
        self.kind.as_any().downcast_ref::<K>()
    }

    /// Build a report from this error kind.
    pub fn build_report<'a>(&self, src_id: &'a str) -> Report<(&'a str, Range<usize>)> {
        self.kind.build_report(src_id, &self.spans)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.offset() {
            Some(offset) => write!(f, "{} (at offset {})", self.kind.message(), offset),
            None => write!(f, "{}", self.kind.message()),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use ariadne::Source;
    use calculus_attrs::ErrorKind;
    use pretty_assertions::assert_eq;
    use super::*;

    #[derive(Debug, Clone, ErrorKind, PartialEq)]
    #[error(
        message = format!("cannot use `{}` here", self.name),
        labels = ["this name"],
        help = "try another name",
    )]
    struct BadName {
        name: String,
    }

    #[derive(Debug, Clone, ErrorKind, PartialEq)]
    #[error(message = "nothing to point at")]
    struct Floating;

    /// Renders the report of the given error against `src` with colors stripped.
    fn render_report(err: &Error, src: &str) -> String {
        let mut buf = Vec::new();
        err.build_report("input")
            .write(("input", Source::from(src)), &mut buf)
            .unwrap();
        String::from_utf8(strip_ansi_escapes::strip(buf)).unwrap()
    }

    #[test]
    fn display_includes_offset() {
        let err = Error::new(vec![4..7], BadName { name: "abc".to_string() });
        assert_eq!(err.to_string(), "cannot use `abc` here (at offset 4)");
        assert_eq!(err.offset(), Some(4));
    }

    #[test]
    fn display_without_spans() {
        let err = Error::spanless(Floating);
        assert_eq!(err.to_string(), "nothing to point at");
        assert_eq!(err.offset(), None);
    }

    #[test]
    fn downcast_kind() {
        let err = Error::new(vec![0..1], BadName { name: "q".to_string() });
        assert!(err.is::<BadName>());
        assert!(!err.is::<Floating>());
        assert_eq!(err.downcast_ref::<BadName>().map(|k| k.name.as_str()), Some("q"));
    }

    #[test]
    fn report_mentions_labels_and_help() {
        let err = Error::new(vec![4..7], BadName { name: "abc".to_string() });
        let report = render_report(&err, "1 + abc");
        assert!(report.contains("cannot use `abc` here"));
        assert!(report.contains("this name"));
        assert!(report.contains("try another name"));
    }
}
