//! Configuration for parsing HLS playlists.
//!
//! This module provides the options accepted by [`crate::parse_with_options`] and
//! [`crate::parse_with_custom`], along with a builder for constructing them.

/// Parsing options for a parse call to follow.
///
/// The default is lenient: malformed numeric values degrade to absent, tags missing a required
/// attribute are dropped, and stray lines are ignored, so that a parse always yields whatever
/// meaningful record the input supports. With `strict` set, those same conditions fail the call
/// with a [`crate::error::ParseError`] pointing at the offending line.
#[derive(Debug, PartialEq, Clone, Copy, Default)]
pub struct ParsingOptions {
    /// Whether malformed content should fail the parse instead of degrading.
    pub strict: bool,
}

impl ParsingOptions {
    /// Construct a new `ParsingOptions` with the provided strictness.
    pub fn new(strict: bool) -> Self {
        Self { strict }
    }
}

/// A builder type to provide convenience for constructing [`ParsingOptions`].
#[derive(Default)]
pub struct ParsingOptionsBuilder {
    strict: bool,
}

impl ParsingOptionsBuilder {
    /// Instantiate the builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Finish building, consume the builder, and generate the [`ParsingOptions`].
    pub fn build(self) -> ParsingOptions {
        ParsingOptions { strict: self.strict }
    }

    /// Fail the parse on malformed content instead of degrading leniently.
    pub fn with_strict_validation(mut self) -> Self {
        self.strict = true;
        self
    }

    /// Degrade leniently on malformed content (the default).
    pub fn without_strict_validation(mut self) -> Self {
        self.strict = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_is_lenient() {
        assert_eq!(ParsingOptions { strict: false }, ParsingOptions::default());
        assert_eq!(ParsingOptions::default(), ParsingOptionsBuilder::new().build());
    }

    #[test]
    fn builder_sets_strictness() {
        assert_eq!(
            ParsingOptions { strict: true },
            ParsingOptionsBuilder::new().with_strict_validation().build(),
        );
        assert_eq!(
            ParsingOptions { strict: false },
            ParsingOptionsBuilder::new()
                .with_strict_validation()
                .without_strict_validation()
                .build(),
        );
    }
}
