//! Types and operations for working with lines of a HLS playlist.
//!
//! The HLS specification, in Section 4.1 (Definition of a Playlist), defines lines as such:
//! > Each line is a URI, is blank, or starts with the character '#'. Lines that start with the
//! > character '#' are either comments or tags. Tags begin with #EXT.
//!
//! The [`Lines`] iterator applies that classification to a whole input, skipping the lines that
//! carry no information (blanks and comments) and yielding [`PlaylistLine`] for the rest. It is
//! the first stage of [`crate::parse`] but is public so that custom consumers can be built on it.

use memchr::memchr;

/// A meaningful line from a HLS playlist.
///
/// Blank lines and comments never reach this type; the [`Lines`] iterator drops them.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum PlaylistLine<'a> {
    /// A tag line (one that begins with `#EXT`).
    Tag {
        /// The tag name with the `#EXT` prefix removed, so `#EXTM3U` has name `M3U` and
        /// `#EXT-X-KEY` has name `-X-KEY`. This mirrors how names are matched by
        /// [`crate::tag::TagName`].
        name: &'a str,
        /// Everything after the first `:`, or `None` when the line has no `:` separator. An empty
        /// value (`Some("")`) is therefore distinguishable from a bare tag, though most
        /// interpreters treat the two the same way.
        value: Option<&'a str>,
    },
    /// A URI line. These are lines that do not begin with `#` and are not blank after whitespace
    /// trimming. No validation is done on the line being a valid URI; that is left to the user of
    /// the library.
    Uri(&'a str),
}

/// An iterator over the meaningful lines of a playlist.
///
/// Splits on `\n`, tolerating `\r\n` endings, trims surrounding whitespace from every line, strips
/// a leading UTF-8 BOM from the input, and skips blank lines and comments (lines starting with `#`
/// but not `#EXT`). Each item carries its 1-based physical line number so that errors can point
/// back into the source.
///
/// ```
/// # use hls_manifest::line::{Lines, PlaylistLine};
/// let mut lines = Lines::new("#EXTM3U\n\n# a comment\nmain.m3u8\r\n");
/// assert_eq!(
///     Some((1, PlaylistLine::Tag { name: "M3U", value: None })),
///     lines.next(),
/// );
/// assert_eq!(Some((4, PlaylistLine::Uri("main.m3u8"))), lines.next());
/// assert_eq!(None, lines.next());
/// ```
#[derive(Debug, Clone)]
pub struct Lines<'a> {
    remaining: Option<&'a str>,
    line_number: usize,
}

const UTF_8_BOM: &str = "\u{feff}";

impl<'a> Lines<'a> {
    /// Creates an iterator over the meaningful lines of `input`.
    pub fn new(input: &'a str) -> Self {
        let input = input.strip_prefix(UTF_8_BOM).unwrap_or(input);
        Self {
            remaining: Some(input),
            line_number: 0,
        }
    }

    fn next_raw_line(&mut self) -> Option<&'a str> {
        let rest = self.remaining?;
        self.line_number += 1;
        match memchr(b'\n', rest.as_bytes()) {
            Some(n) => {
                self.remaining = Some(&rest[(n + 1)..]);
                Some(&rest[..n])
            }
            None => {
                self.remaining = None;
                Some(rest)
            }
        }
    }
}

impl<'a> Iterator for Lines<'a> {
    type Item = (usize, PlaylistLine<'a>);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = self.next_raw_line()?.trim_ascii();
            let Some(comment_or_tag) = line.strip_prefix('#') else {
                if line.is_empty() {
                    continue;
                }
                return Some((self.line_number, PlaylistLine::Uri(line)));
            };
            let Some(tag) = comment_or_tag.strip_prefix("EXT") else {
                continue;
            };
            let (name, value) = match memchr(b':', tag.as_bytes()) {
                Some(n) => (&tag[..n], Some(&tag[(n + 1)..])),
                None => (tag, None),
            };
            return Some((self.line_number, PlaylistLine::Tag { name, value }));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn all(input: &str) -> Vec<(usize, PlaylistLine<'_>)> {
        Lines::new(input).collect()
    }

    #[test]
    fn uri_line() {
        assert_eq!(vec![(1, PlaylistLine::Uri("hello/world.m3u8"))], all("hello/world.m3u8"));
    }

    #[test]
    fn blank_lines_are_skipped() {
        assert_eq!(Vec::<(usize, PlaylistLine)>::new(), all(""));
        assert_eq!(Vec::<(usize, PlaylistLine)>::new(), all("\n\r\n   \n\t\n"));
    }

    #[test]
    fn comments_are_skipped() {
        assert_eq!(Vec::<(usize, PlaylistLine)>::new(), all("# comment\n#another\n"));
        // A comment that merely mentions EXT mid-line is still a comment.
        assert_eq!(Vec::<(usize, PlaylistLine)>::new(), all("# EXT is mentioned here\n"));
    }

    #[test]
    fn bare_tag() {
        assert_eq!(
            vec![(1, PlaylistLine::Tag { name: "M3U", value: None })],
            all("#EXTM3U"),
        );
        assert_eq!(
            vec![(1, PlaylistLine::Tag { name: "-X-ENDLIST", value: None })],
            all("#EXT-X-ENDLIST\n"),
        );
    }

    #[test]
    fn tag_with_value() {
        assert_eq!(
            vec![(1, PlaylistLine::Tag { name: "-X-TARGETDURATION", value: Some("10") })],
            all("#EXT-X-TARGETDURATION:10"),
        );
    }

    #[test]
    fn tag_with_empty_value_keeps_colon_distinction() {
        assert_eq!(
            vec![(1, PlaylistLine::Tag { name: "-X-BLACKOUT", value: Some("") })],
            all("#EXT-X-BLACKOUT:"),
        );
    }

    #[test]
    fn tag_value_may_contain_further_colons() {
        assert_eq!(
            vec![(
                1,
                PlaylistLine::Tag {
                    name: "-X-PROGRAM-DATE-TIME",
                    value: Some("2024-01-01T00:00:00.000Z"),
                }
            )],
            all("#EXT-X-PROGRAM-DATE-TIME:2024-01-01T00:00:00.000Z"),
        );
    }

    #[test]
    fn carriage_returns_are_stripped() {
        assert_eq!(
            vec![
                (1, PlaylistLine::Tag { name: "M3U", value: None }),
                (2, PlaylistLine::Uri("first.ts")),
            ],
            all("#EXTM3U\r\nfirst.ts\r\n"),
        );
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        assert_eq!(vec![(1, PlaylistLine::Uri("first.ts"))], all("  first.ts \t\n"));
    }

    #[test]
    fn leading_bom_is_stripped() {
        assert_eq!(
            vec![(1, PlaylistLine::Tag { name: "M3U", value: None })],
            all("\u{feff}#EXTM3U\n"),
        );
    }

    #[test]
    fn line_numbers_count_skipped_lines() {
        let input = "#EXTM3U\n\n# comment\n#EXTINF:4,\nfirst.ts\n";
        assert_eq!(
            vec![
                (1, PlaylistLine::Tag { name: "M3U", value: None }),
                (4, PlaylistLine::Tag { name: "INF", value: Some("4,") }),
                (5, PlaylistLine::Uri("first.ts")),
            ],
            all(input),
        );
    }

    #[test]
    fn oatcls_prefix_is_a_tag() {
        assert_eq!(
            vec![(1, PlaylistLine::Tag { name: "-OATCLS-SCTE35", value: Some("/DA=") })],
            all("#EXT-OATCLS-SCTE35:/DA=\n"),
        );
    }
}
