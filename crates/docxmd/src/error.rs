use core::fmt;
use std::{borrow::Cow, ops::Deref};

use ecow::EcoString;

/// An error that can occur while rendering markdown into a document.
#[derive(Clone)]
pub struct Error(Box<Repr>);

#[derive(Clone)]
enum Repr {
    /// Just a message.
    Msg(Cow<'static, str>),
    /// The markdown conversion re-entered itself too many times.
    NestingExceeded { depth: usize, limit: usize },
    /// The substitution collaborator failed.
    Substitution {
        context: Cow<'static, str>,
        source: Error,
    },
    /// A data URI image could not be decoded.
    InvalidEmbeddedImage {
        link: EcoString,
        reason: Cow<'static, str>,
    },
    /// There is no paragraph to anchor inline content to.
    MissingAnchor,
    /// The options cannot be used to render.
    Configuration(Cow<'static, str>),
}

/// The category of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A plain message.
    Message,
    /// See [`Error::nesting_exceeded`].
    NestingExceeded,
    /// See [`Error::substitution`].
    SubstitutionFailure,
    /// See [`Error::invalid_embedded_image`].
    InvalidEmbeddedImage,
    /// See [`Error::missing_anchor`].
    MissingAnchor,
    /// See [`Error::configuration`].
    Configuration,
}

impl Error {
    /// Conversion re-entered itself deeper than `limit`.
    pub fn nesting_exceeded(depth: usize, limit: usize) -> Self {
        Error(Box::new(Repr::NestingExceeded { depth, limit }))
    }

    /// Wraps an error raised by the substitution pass.
    pub fn substitution(context: impl Into<Cow<'static, str>>, source: Error) -> Self {
        Error(Box::new(Repr::Substitution {
            context: context.into(),
            source,
        }))
    }

    /// An embedded image whose payload cannot be decoded.
    pub fn invalid_embedded_image(
        link: impl Into<EcoString>,
        reason: impl Into<Cow<'static, str>>,
    ) -> Self {
        Error(Box::new(Repr::InvalidEmbeddedImage {
            link: link.into(),
            reason: reason.into(),
        }))
    }

    /// Inline content was requested without a paragraph to hold it.
    pub fn missing_anchor() -> Self {
        Error(Box::new(Repr::MissingAnchor))
    }

    /// Invalid render options.
    pub fn configuration(msg: impl Into<Cow<'static, str>>) -> Self {
        Error(Box::new(Repr::Configuration(msg.into())))
    }

    /// Returns the category of the error.
    pub fn kind(&self) -> ErrorKind {
        match self.0.deref() {
            Repr::Msg(..) => ErrorKind::Message,
            Repr::NestingExceeded { .. } => ErrorKind::NestingExceeded,
            Repr::Substitution { .. } => ErrorKind::SubstitutionFailure,
            Repr::InvalidEmbeddedImage { .. } => ErrorKind::InvalidEmbeddedImage,
            Repr::MissingAnchor => ErrorKind::MissingAnchor,
            Repr::Configuration(..) => ErrorKind::Configuration,
        }
    }

    /// Adds substitution context to untyped errors. Errors that already carry
    /// a kind are passed through so that the caller still sees the root cause.
    pub(crate) fn in_substitution(self, context: impl Into<Cow<'static, str>>) -> Self {
        match self.kind() {
            ErrorKind::Message => Error::substitution(context, self),
            _ => self,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.deref() {
            Repr::Msg(s) => write!(f, "{s}"),
            Repr::NestingExceeded { depth, limit } => write!(
                f,
                "markdown conversion nested too deeply ({depth} levels, at most {limit} allowed)"
            ),
            Repr::Substitution { context, source } => write!(f, "{context}: {source}"),
            Repr::InvalidEmbeddedImage { link, reason } => {
                // data URIs are huge, keep the message readable
                let shown: String = link.chars().take(48).collect();
                let ellipsis = if link.chars().count() > 48 { "..." } else { "" };
                write!(f, "invalid embedded image `{shown}{ellipsis}`: {reason}")
            }
            Repr::MissingAnchor => write!(f, "no paragraph to anchor inline content to"),
            Repr::Configuration(msg) => write!(f, "invalid configuration: {msg}"),
        }
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        <Self as fmt::Display>::fmt(self, f)
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error(Box::new(Repr::Msg(e.to_string().into())))
    }
}

impl From<fmt::Error> for Error {
    fn from(e: fmt::Error) -> Self {
        Error(Box::new(Repr::Msg(e.to_string().into())))
    }
}

impl From<&'static str> for Error {
    fn from(s: &'static str) -> Self {
        Error(Box::new(Repr::Msg(s.into())))
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error(Box::new(Repr::Msg(s.into())))
    }
}

impl From<Cow<'static, str>> for Error {
    fn from(s: Cow<'static, str>) -> Self {
        Error(Box::new(Repr::Msg(s)))
    }
}
