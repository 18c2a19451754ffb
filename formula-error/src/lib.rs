//! Contains the common [`ErrorKind`] trait implemented by every error that points into a formula,
//! and the [`Error`] type that pairs a kind with the regions of the formula it came from.

use ariadne::{Color, Report, Source};
use std::{any::Any, fmt::Debug, io, ops::Range};

/// The color to use to highlight expressions.
pub const EXPR: Color = Color::RGB(52, 235, 152);

/// Represents any kind of error that can occur while reading a formula.
pub trait ErrorKind: Debug + Send {
    /// Returns the kind as [`Any`], so that callers can recover the concrete kind.
    fn as_any(&self) -> &dyn Any;

    /// Builds the report for this error.
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)>;
}

/// An error associated with regions of source code that can be highlighted.
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

    /// Returns true if the kind of this error is `K`.
    pub fn is<K: ErrorKind + 'static>(&self) -> bool {
        self.kind.as_any().is::<K>()
    }

    /// Returns the kind of this error if it is `K`.
    pub fn downcast_ref<K: ErrorKind + 'static>(&self) -> Option<&K> {
        self.kind.as_any().downcast_ref::<K>()
    }

    /// Build a report from this error kind.
    pub fn build_report<'a>(&self, src_id: &'a str) -> Report<(&'a str, Range<usize>)> {
        self.kind.build_report(src_id, &self.spans)
    }

    /// Prints the report of this error to stderr, with `source` as the text the spans refer to.
    pub fn eprint(&self, src_id: &str, source: &str) -> io::Result<()> {
        self.build_report(src_id).eprint((src_id, Source::from(source)))
    }

    /// Renders the report of this error into a string, with `source` as the text the spans refer
    /// to. The output contains the terminal color codes of the report.
    pub fn report_to_string(&self, src_id: &str, source: &str) -> io::Result<String> {
        let mut buf = Vec::new();
        self.build_report(src_id).write((src_id, Source::from(source)), &mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}
