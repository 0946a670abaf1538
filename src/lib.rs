#![warn(missing_docs)]

//! # hls-manifest
//!
//! hls-manifest parses HLS playlists ([M3U8]) into an owned document model. The API is a single
//! pass: hand [`parse`] the UTF-8 text of a manifest and receive a [`manifest::Manifest`]
//! describing either a media playlist (a list of segments) or a multivariant playlist (a list of
//! variant streams and renditions). The record owns all of its data, so the input buffer can be
//! freed immediately and the record moved across threads.
//!
//! When parsing, hls-manifest aims to be very lenient when it comes to validation. The philosophy
//! is that the library does not want to get in the way of extracting meaningful information from
//! the input data: real-world playlists routinely bend the specification and a manifest rejected
//! here might have played fine in a client. Unknown tags are skipped, malformed numbers degrade to
//! defaults, tags missing a required attribute are dropped, and truncated input yields whatever
//! was parsed up to the truncation. Validating the sanity of the parsed values is deliberately
//! left to the user of the library. Strict validation is available as an opt-in through
//! [`config::ParsingOptions`] for callers (such as packaging pipelines) that would rather fail
//! fast, and reports a structured [`error::ParseError`] with the offending line.
//!
//! # Usage
//!
//! Consider the simple media playlist from the HLS specification:
//!
//! ```
//! const EXAMPLE_MANIFEST: &str = r#"#EXTM3U
//! #EXT-X-TARGETDURATION:10
//! #EXT-X-VERSION:3
//! #EXTINF:9.009,
//! first.ts
//! #EXTINF:9.009,
//! second.ts
//! #EXTINF:3.003,
//! third.ts
//! #EXT-X-ENDLIST
//! "#;
//!
//! let manifest = hls_manifest::parse(EXAMPLE_MANIFEST);
//! assert_eq!(Some(10), manifest.target_duration);
//! assert_eq!(Some(3), manifest.version);
//! assert!(manifest.is_endlist);
//! assert!(!manifest.is_variant);
//! assert_eq!(3, manifest.segments.len());
//! assert_eq!("first.ts", manifest.segments[0].uri);
//! assert_eq!(9.009, manifest.segments[0].duration);
//! ```
//!
//! Cross-line context is resolved for you: each segment carries the encryption key and init
//! section in effect at its URI line, the date-ranges declared since the previous segment, and a
//! derived wall-clock timestamp propagated from the last `#EXT-X-PROGRAM-DATE-TIME`:
//!
//! ```
//! let manifest = hls_manifest::parse(concat!(
//!     "#EXTM3U\n",
//!     "#EXT-X-PROGRAM-DATE-TIME:2024-01-01T00:00:00Z\n",
//!     "#EXTINF:4,\n",
//!     "one.ts\n",
//!     "#EXTINF:4,\n",
//!     "two.ts\n",
//! ));
//! let derived = manifest.segments[1].current_program_date_time.unwrap();
//! assert_eq!("2024-01-01T00:00:04+00:00", derived.to_rfc3339());
//! ```
//!
//! Tags outside the HLS specification (beyond the widely deployed extensions the library already
//! understands) can be observed through [`parse_with_custom`], which hands every unrecognized
//! `#EXT…` line to a caller-supplied closure together with a view of the record built so far.
//!
//! [M3U8]: https://datatracker.ietf.org/doc/draft-pantos-hls-rfc8216bis/

pub mod config;
pub mod date;
pub mod error;
pub mod line;
pub mod manifest;
mod parser;
pub mod tag;

pub use manifest::Manifest;
pub use parser::{parse, parse_with_custom, parse_with_options};
