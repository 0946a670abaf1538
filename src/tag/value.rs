//! Collection of methods and types used to extract meaning from the value component of a tag line.
//!
//! The value of a tag (when not empty) is everything after the `:` and before the new line break.
//! Most HLS tags structure that value as an attribute list: comma-separated `KEY=VALUE` pairs
//! where values are either quoted strings (in which case embedded commas and `=` are literal) or
//! unquoted strings. [`AttributeList::parse`] tokenizes that grammar, and [`TagValue`] offers the
//! scalar conversions used by tags whose value is not an attribute list.
//!
//! Tokenizing is deliberately forgiving: a pair that cannot be read is dropped and scanning
//! resumes at the next top-level comma. The first problem found is retained on the list (see
//! [`AttributeList::error`]) so that strict-mode callers can reject the tag while lenient callers
//! use whatever survived.

use crate::error::{AttributeListError, ParseFloatError, ParseNumberError};
use memchr::{memchr, memchr2};

/// The value component of a tag line (everything after the `:`).
///
/// Wraps the raw string and provides conversions into the scalar shapes that HLS tag values take.
/// Attribute lists have their own entry point in [`AttributeList::parse`].
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct TagValue<'a>(pub &'a str);

impl<'a> TagValue<'a> {
    /// Attempt to convert the tag value into a decimal integer (e.g. `#EXT-X-VERSION:3`).
    pub fn try_as_decimal_integer(&self) -> Result<u64, ParseNumberError> {
        parse_u64(self.0.trim_ascii().as_bytes())
    }

    /// Attempt to convert the tag value into a decimal floating point with an optional title
    /// (`#EXTINF:<duration>,[<title>]`).
    ///
    /// The title is everything after the first comma, taken verbatim, and is empty when the comma
    /// is absent.
    pub fn try_as_decimal_floating_point_with_title(
        &self,
    ) -> Result<(f64, &'a str), ParseFloatError> {
        let (duration, title) = match memchr(b',', self.0.as_bytes()) {
            Some(n) => (&self.0[..n], &self.0[(n + 1)..]),
            None => (self.0, ""),
        };
        let duration = fast_float2::parse(duration.trim_ascii()).map_err(|_| ParseFloatError)?;
        Ok((duration, title))
    }

    /// Convert the tag value into an attribute list.
    pub fn as_attribute_list(&self) -> AttributeList<'a> {
        AttributeList::parse(self.0)
    }
}

/// An attribute value within an attribute list.
///
/// Values may be quoted or unquoted. Numeric and enumerated values are always unquoted in HLS, but
/// the lexer does not enforce that; coercion (and its leniency) belongs to the tag interpreters.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum AttributeValue<'a> {
    /// A quoted value (e.g. `CODECS="avc1.64002a,mp4a.40.2"`) with the quotes stripped.
    Quoted(&'a str),
    /// An unquoted value (e.g. `BANDWIDTH=10000000`, `RESOLUTION=1920x1080`) with surrounding
    /// whitespace trimmed.
    Unquoted(&'a str),
}

impl<'a> AttributeValue<'a> {
    /// The textual content of the value, regardless of quoting.
    pub fn as_str(&self) -> &'a str {
        match self {
            Self::Quoted(s) | Self::Unquoted(s) => s,
        }
    }

    /// A convenience method to get the value of the `Quoted` case.
    pub fn quoted(&self) -> Option<&'a str> {
        match self {
            Self::Quoted(s) => Some(s),
            Self::Unquoted(_) => None,
        }
    }

    /// A convenience method to get the value of the `Unquoted` case.
    pub fn unquoted(&self) -> Option<&'a str> {
        match self {
            Self::Quoted(_) => None,
            Self::Unquoted(s) => Some(s),
        }
    }

    /// Attempt to convert the value into a decimal integer.
    pub fn try_as_decimal_integer(&self) -> Result<u64, ParseNumberError> {
        parse_u64(self.as_str().as_bytes())
    }

    /// Attempt to convert the value into a decimal floating point.
    pub fn try_as_decimal_floating_point(&self) -> Result<f64, ParseFloatError> {
        fast_float2::parse(self.as_str()).map_err(|_| ParseFloatError)
    }
}

/// An ordered list of `(name, value)` attribute pairs lexed from a tag value.
///
/// Order is the source declaration order. Duplicate names are kept in the list (so that
/// re-serialization reproduces the input) but lookups via [`Self::get`] resolve to the last
/// occurrence, matching the "last wins" rule.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct AttributeList<'a> {
    pairs: Vec<(&'a str, AttributeValue<'a>)>,
    error: Option<AttributeListError>,
}

impl<'a> AttributeList<'a> {
    /// Tokenize `input` as an attribute list.
    ///
    /// Never fails: unreadable pairs are dropped and scanning resumes at the next top-level
    /// comma (or stops, for an unterminated quote, since nothing after it can be trusted). The
    /// first problem found is reported via [`Self::error`].
    ///
    /// ```
    /// # use hls_manifest::tag::value::{AttributeList, AttributeValue};
    /// let list = AttributeList::parse("BANDWIDTH=1280000,CODECS=\"avc1,mp4a\"");
    /// assert_eq!(
    ///     Some(AttributeValue::Unquoted("1280000")),
    ///     list.get("BANDWIDTH").copied(),
    /// );
    /// assert_eq!(
    ///     Some(AttributeValue::Quoted("avc1,mp4a")),
    ///     list.get("CODECS").copied(),
    /// );
    /// assert_eq!(None, list.error());
    /// ```
    pub fn parse(input: &'a str) -> Self {
        let bytes = input.as_bytes();
        let mut pairs = Vec::new();
        let mut error: Option<AttributeListError> = None;
        let mut pos = 0;
        while pos < bytes.len() {
            // Find the '=' that ends this attribute's name. A ',' first means the fragment has no
            // value at all.
            let eq = match memchr2(b'=', b',', &bytes[pos..]) {
                Some(i) if bytes[pos + i] == b'=' => pos + i,
                found => {
                    let end = found.map_or(bytes.len(), |i| pos + i);
                    if !input[pos..end].trim_ascii().is_empty() {
                        error.get_or_insert(AttributeListError::MissingValueSeparator);
                    }
                    pos = end + 1;
                    continue;
                }
            };
            let name = input[pos..eq].trim_ascii();
            if name.is_empty() {
                error.get_or_insert(AttributeListError::EmptyAttributeName);
            }

            // Value starts after the '='. Leading whitespace is insignificant for both forms.
            let mut vstart = eq + 1;
            while vstart < bytes.len() && bytes[vstart].is_ascii_whitespace() {
                vstart += 1;
            }
            if bytes.get(vstart) == Some(&b'"') {
                let Some(q) = memchr(b'"', &bytes[(vstart + 1)..]) else {
                    error.get_or_insert(AttributeListError::UnterminatedQuote);
                    break;
                };
                let close = vstart + 1 + q;
                let value = AttributeValue::Quoted(&input[(vstart + 1)..close]);
                let mut after = close + 1;
                while after < bytes.len() && bytes[after].is_ascii_whitespace() {
                    after += 1;
                }
                match bytes.get(after) {
                    None | Some(&b',') => {
                        if !name.is_empty() {
                            pairs.push((name, value));
                        }
                        pos = after + 1;
                    }
                    Some(_) => {
                        error.get_or_insert(AttributeListError::UnexpectedCharacterAfterQuote);
                        pos = memchr(b',', &bytes[after..]).map_or(bytes.len(), |i| after + i + 1);
                    }
                }
            } else {
                let end = memchr(b',', &bytes[vstart..]).map_or(bytes.len(), |i| vstart + i);
                let value = AttributeValue::Unquoted(input[vstart..end].trim_ascii());
                if !name.is_empty() {
                    pairs.push((name, value));
                }
                pos = end + 1;
            }
        }
        Self { pairs, error }
    }

    /// Look up an attribute by name (case-sensitive). The last occurrence wins.
    pub fn get(&self, name: &str) -> Option<&AttributeValue<'a>> {
        self.pairs
            .iter()
            .rev()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v)
    }

    /// The pairs in source order, duplicates included.
    pub fn pairs(&self) -> &[(&'a str, AttributeValue<'a>)] {
        &self.pairs
    }

    /// The first syntax problem found while tokenizing, if any.
    pub fn error(&self) -> Option<AttributeListError> {
        self.error
    }
}

fn parse_u64(bytes: &[u8]) -> Result<u64, ParseNumberError> {
    if bytes.is_empty() {
        return Err(ParseNumberError::Empty);
    }
    let mut n = 0u64;
    for byte in bytes {
        if !byte.is_ascii_digit() {
            return Err(ParseNumberError::InvalidDigit(*byte));
        }
        n = n
            .checked_mul(10)
            .and_then(|n| n.checked_add(u64::from(byte - b'0')))
            .ok_or(ParseNumberError::NumberTooBig)?;
    }
    Ok(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn decimal_integer_tag_value() {
        assert_eq!(Ok(42), TagValue("42").try_as_decimal_integer());
        assert_eq!(
            Err(ParseNumberError::InvalidDigit(b'x')),
            TagValue("4x").try_as_decimal_integer(),
        );
        assert_eq!(Err(ParseNumberError::Empty), TagValue("").try_as_decimal_integer());
    }

    #[test]
    fn decimal_floating_point_with_title() {
        assert_eq!(
            Ok((9.009, "")),
            TagValue("9.009,").try_as_decimal_floating_point_with_title(),
        );
        assert_eq!(
            Ok((9.009, "")),
            TagValue("9.009").try_as_decimal_floating_point_with_title(),
        );
        assert_eq!(
            Ok((6.0, " A title, with a comma")),
            TagValue("6, A title, with a comma").try_as_decimal_floating_point_with_title(),
        );
        assert_eq!(
            Err(ParseFloatError),
            TagValue("abc,title").try_as_decimal_floating_point_with_title(),
        );
    }

    #[test]
    fn single_unquoted_attribute() {
        let list = AttributeList::parse("BANDWIDTH=1280000");
        assert_eq!(vec![("BANDWIDTH", AttributeValue::Unquoted("1280000"))], list.pairs());
        assert_eq!(Ok(1280000), list.get("BANDWIDTH").unwrap().try_as_decimal_integer());
    }

    #[test]
    fn multiple_attributes_keep_source_order() {
        let list = AttributeList::parse("A=1,B=\"two\",C=3.5");
        assert_eq!(
            vec![
                ("A", AttributeValue::Unquoted("1")),
                ("B", AttributeValue::Quoted("two")),
                ("C", AttributeValue::Unquoted("3.5")),
            ],
            list.pairs(),
        );
        assert_eq!(Ok(3.5), list.get("C").unwrap().try_as_decimal_floating_point());
    }

    #[test]
    fn quoted_value_keeps_commas_and_equals() {
        let list = AttributeList::parse("CODECS=\"avc1.64002a,mp4a.40.2\",NOTE=\"a=b\"");
        assert_eq!(Some("avc1.64002a,mp4a.40.2"), list.get("CODECS").unwrap().quoted());
        assert_eq!(Some("a=b"), list.get("NOTE").unwrap().quoted());
    }

    #[test]
    fn empty_quoted_value_is_allowed() {
        let list = AttributeList::parse("URI=\"\"");
        assert_eq!(Some(&AttributeValue::Quoted("")), list.get("URI"));
        assert_eq!(None, list.error());
    }

    #[test]
    fn whitespace_around_pairs_is_trimmed() {
        let list = AttributeList::parse(" A = 1 , B = \"two\" ");
        assert_eq!(Some(&AttributeValue::Unquoted("1")), list.get("A"));
        assert_eq!(Some(&AttributeValue::Quoted("two")), list.get("B"));
        assert_eq!(None, list.error());
    }

    #[test]
    fn duplicate_names_last_wins_on_lookup() {
        let list = AttributeList::parse("A=1,A=2");
        assert_eq!(Some(&AttributeValue::Unquoted("2")), list.get("A"));
        assert_eq!(2, list.pairs().len());
    }

    #[test]
    fn names_are_case_sensitive() {
        let list = AttributeList::parse("Duration=30,DURATION=60");
        assert_eq!(Some(&AttributeValue::Unquoted("30")), list.get("Duration"));
        assert_eq!(Some(&AttributeValue::Unquoted("60")), list.get("DURATION"));
    }

    #[test]
    fn unterminated_quote_reports_and_stops() {
        let list = AttributeList::parse("A=1,B=\"oops");
        assert_eq!(vec![("A", AttributeValue::Unquoted("1"))], list.pairs());
        assert_eq!(Some(AttributeListError::UnterminatedQuote), list.error());
    }

    #[test]
    fn fragment_without_separator_is_dropped_and_scanning_continues() {
        let list = AttributeList::parse("JUNK,A=1");
        assert_eq!(vec![("A", AttributeValue::Unquoted("1"))], list.pairs());
        assert_eq!(Some(AttributeListError::MissingValueSeparator), list.error());
    }

    #[test]
    fn empty_name_is_dropped_and_scanning_continues() {
        let list = AttributeList::parse("=1,A=2");
        assert_eq!(vec![("A", AttributeValue::Unquoted("2"))], list.pairs());
        assert_eq!(Some(AttributeListError::EmptyAttributeName), list.error());
    }

    #[test]
    fn garbage_after_quote_drops_the_pair_only() {
        let list = AttributeList::parse("A=\"1\"x,B=2");
        assert_eq!(vec![("B", AttributeValue::Unquoted("2"))], list.pairs());
        assert_eq!(Some(AttributeListError::UnexpectedCharacterAfterQuote), list.error());
    }

    #[test]
    fn lexing_is_invertible_for_legal_input() {
        let input = "TYPE=AUDIO,GROUP-ID=\"aud1\",NAME=\"English\",DEFAULT=YES,CHANNELS=\"2\"";
        let list = AttributeList::parse(input);
        assert_eq!(None, list.error());
        let reserialized = list
            .pairs()
            .iter()
            .map(|(name, value)| match value {
                AttributeValue::Quoted(s) => format!("{name}=\"{s}\""),
                AttributeValue::Unquoted(s) => format!("{name}={s}"),
            })
            .collect::<Vec<_>>()
            .join(",");
        assert_eq!(input, reserialized);
        assert_eq!(list, AttributeList::parse(&reserialized));
    }
}
