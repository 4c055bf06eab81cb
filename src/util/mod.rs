//! Shared support code: source spans, configuration and logging

pub mod config;
pub mod logger;
pub mod span;

/// A value tagged with the span it came from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spanned<T> {
    pub value: T,
    pub span: span::Span,
}

impl<T> Spanned<T> {
    #[inline]
    pub fn new(
        value: T,
        span: span::Span,
    ) -> Self {
        Self { value, span }
    }
}
