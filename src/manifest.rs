//! The owned document model produced by parsing a playlist.
//!
//! [`Manifest`] is the top-level record for both playlist kinds: a media playlist fills
//! [`Manifest::segments`] and friends, while a multivariant (master) playlist fills
//! [`Manifest::variant_streams`], [`Manifest::renditions`] and the other session-level lists, with
//! [`Manifest::is_variant`] distinguishing the two. Everything is owned data: no field borrows
//! from the parsed input, so the input buffer can be dropped as soon as [`crate::parse`] returns,
//! and the record can be sent across threads freely.
//!
//! Numeric fields where an explicit zero differs from absence are `Option`s; booleans default to
//! `false`; sequences preserve source order.

use chrono::{DateTime, FixedOffset};
use std::collections::HashMap;

/// A parsed HLS playlist.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct Manifest {
    /// The value of `#EXT-X-TARGETDURATION`.
    pub target_duration: Option<u64>,
    /// The value of `#EXT-X-VERSION`.
    pub version: Option<u64>,
    /// The value of `#EXT-X-MEDIA-SEQUENCE`.
    ///
    /// When the tag is absent this is `Some(0)` for a media playlist but `None` for a
    /// multivariant playlist, where the concept does not apply.
    pub media_sequence: Option<u64>,
    /// The value of `#EXT-X-DISCONTINUITY-SEQUENCE`.
    pub discontinuity_sequence: Option<u64>,
    /// The value of `#EXT-X-ALLOW-CACHE` (a legacy tag, kept verbatim).
    pub allow_cache: Option<String>,
    /// The value of `#EXT-X-PLAYLIST-TYPE` (`EVENT` or `VOD`, kept verbatim).
    pub playlist_type: Option<String>,
    /// The first `#EXT-X-PROGRAM-DATE-TIME` declared in the playlist.
    pub program_date_time: Option<DateTime<FixedOffset>>,
    /// Whether the playlist is a multivariant (master) playlist.
    pub is_variant: bool,
    /// Whether `#EXT-X-ENDLIST` was present.
    pub is_endlist: bool,
    /// Whether `#EXT-X-I-FRAMES-ONLY` was present.
    pub is_i_frames_only: bool,
    /// Whether `#EXT-X-INDEPENDENT-SEGMENTS` was present.
    pub is_independent_segments: bool,
    /// Whether `#EXT-X-IMAGES-ONLY` was present.
    pub is_images_only: bool,
    /// The `#EXT-X-START` record, when the tag was present.
    pub start: Option<Start>,
    /// The `#EXT-X-SERVER-CONTROL` record, when the tag was present.
    pub server_control: Option<ServerControl>,
    /// The `#EXT-X-PART-INF` record, when the tag was present.
    pub part_inf: Option<PartInf>,
    /// The `#EXT-X-SKIP` record, when the tag was present.
    pub skip: Option<Skip>,
    /// The `#EXT-X-PRELOAD-HINT` record, when the tag was present.
    pub preload_hint: Option<PreloadHint>,
    /// The `#EXT-X-CONTENT-STEERING` record, when the tag was present.
    pub content_steering: Option<ContentSteering>,
    /// Media segments, in input order. Empty for a multivariant playlist.
    pub segments: Vec<Segment>,
    /// Variant streams declared with `#EXT-X-STREAM-INF`, in input order.
    pub variant_streams: Vec<VariantStream>,
    /// I-frame streams declared with `#EXT-X-I-FRAME-STREAM-INF`, in input order.
    pub iframe_streams: Vec<IFrameStream>,
    /// Image streams declared with `#EXT-X-IMAGE-STREAM-INF`, in input order.
    pub image_streams: Vec<ImageStream>,
    /// Alternative renditions declared with `#EXT-X-MEDIA`, in input order.
    pub renditions: Vec<Rendition>,
    /// Session-level view of every distinct `#EXT-X-KEY`, in first-seen order.
    ///
    /// `None` is the null-key placeholder: it stands both for an explicit `METHOD=NONE` key and,
    /// when any segment ended up unencrypted, for the absence of encryption (in which case the
    /// placeholder is guaranteed to sit at the head of the list).
    pub keys: Vec<Option<Key>>,
    /// Keys declared with `#EXT-X-SESSION-KEY`, in input order.
    pub session_keys: Vec<Key>,
    /// Every distinct init section ever declared with `#EXT-X-MAP`, in first-seen order.
    pub init_sections: Vec<InitSection>,
    /// Reports declared with `#EXT-X-RENDITION-REPORT`, in input order.
    pub rendition_reports: Vec<RenditionReport>,
    /// Records declared with `#EXT-X-SESSION-DATA`, in input order.
    pub session_data: Vec<SessionData>,
    /// Records declared with `#EXT-X-TILES`, in input order.
    pub tiles: Vec<Tiles>,
}

/// One media segment of a media playlist.
///
/// Cross-line context has already been resolved: the segment carries copies of the encryption key
/// and init section in effect at its URI line, the date-ranges and parts declared since the
/// previous segment, and its derived wall-clock timestamp.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct Segment {
    /// The `#EXTINF` duration in seconds.
    pub duration: f64,
    /// The `#EXTINF` title, verbatim. Empty when the playlist declared none.
    pub title: String,
    /// The segment URI line.
    pub uri: String,
    /// The `#EXT-X-BYTERANGE` value in its literal `<n>[@<o>]` form.
    pub byterange: Option<String>,
    /// The value of `#EXT-X-BITRATE`.
    pub bitrate: Option<u64>,
    /// Whether `#EXT-X-DISCONTINUITY` preceded this segment.
    pub discontinuity: bool,
    /// The `#EXT-X-PROGRAM-DATE-TIME` declared for this segment, if any.
    pub program_date_time: Option<DateTime<FixedOffset>>,
    /// The wall-clock time of this segment derived from the last declared program-date-time plus
    /// the durations of the segments since. `None` when no program-date-time was declared at or
    /// before this segment.
    pub current_program_date_time: Option<DateTime<FixedOffset>>,
    /// Whether `#EXT-X-CUE-IN` marked this segment.
    pub cue_in: bool,
    /// Whether this segment sits inside an ad break (`#EXT-X-CUE-OUT` or `#EXT-X-CUE-OUT-CONT`).
    pub cue_out: bool,
    /// Whether this segment starts an ad break (`#EXT-X-CUE-OUT`).
    pub cue_out_start: bool,
    /// Whether the cue-out declared its duration via an explicit `DURATION` attribute.
    pub cue_out_explicitly_duration: bool,
    /// The raw SCTE-35 cue payload (`SCTE35` of `#EXT-X-CUE-OUT-CONT`, or `CUE` of
    /// `#EXT-X-SCTE35`).
    pub scte35: Option<String>,
    /// The raw payload of `#EXT-OATCLS-SCTE35`.
    pub oatcls_scte35: Option<String>,
    /// The ad-break duration, kept in its textual form.
    pub scte35_duration: Option<String>,
    /// The elapsed time into the ad break (`ElapsedTime` of `#EXT-X-CUE-OUT-CONT`), textual.
    pub scte35_elapsedtime: Option<String>,
    /// The attributes of `#EXT-X-ASSET`, when the tag preceded this segment.
    pub asset_metadata: Option<HashMap<String, String>>,
    /// The encryption key in effect for this segment. `None` means unencrypted.
    pub key: Option<Key>,
    /// The init section in effect for this segment.
    pub init_section: Option<InitSection>,
    /// Date-ranges declared between the previous segment's URI line and this segment's URI line,
    /// in source order.
    pub dateranges: Vec<DateRange>,
    /// Partial segments declared since the previous segment, in source order.
    pub parts: Vec<Part>,
    /// Whether `#EXT-X-GAP` marked this segment.
    pub gap_tag: bool,
    /// The blackout state of this segment. `None` when no `#EXT-X-BLACKOUT` tag was present.
    pub blackout: Option<Blackout>,
}

/// The value of a non-standard `#EXT-X-BLACKOUT` tag.
#[derive(Debug, PartialEq, Clone)]
pub enum Blackout {
    /// The bare tag with no payload.
    Flag,
    /// The tag's payload, verbatim.
    Payload(String),
}

/// A partial segment declared with `#EXT-X-PART` (low-latency HLS).
#[derive(Debug, PartialEq, Clone, Default)]
pub struct Part {
    /// The `URI` attribute.
    pub uri: String,
    /// The `DURATION` attribute in seconds.
    pub duration: f64,
    /// The `BYTERANGE` attribute in its literal form.
    pub byterange: Option<String>,
    /// The `INDEPENDENT` attribute, verbatim.
    pub independent: Option<String>,
    /// The `GAP` attribute, verbatim.
    pub gap: Option<String>,
    /// Whether a bare `#EXT-X-GAP` tag was pending when the part was declared.
    pub gap_tag: bool,
    /// Date-ranges pending at the point of this part's declaration, in source order.
    pub dateranges: Vec<DateRange>,
}

/// A named time interval declared with `#EXT-X-DATERANGE`.
///
/// Dates are kept in their textual form, as declared. Any attribute whose name starts with `X-`
/// goes into [`Self::client_attributes`].
#[derive(Debug, PartialEq, Clone, Default)]
pub struct DateRange {
    /// The `ID` attribute. A date-range without one is dropped by the parser.
    pub id: String,
    /// The `CLASS` attribute.
    pub class: Option<String>,
    /// The `START-DATE` attribute.
    pub start_date: Option<String>,
    /// The `END-DATE` attribute.
    pub end_date: Option<String>,
    /// The `DURATION` attribute in seconds.
    pub duration: Option<f64>,
    /// The `PLANNED-DURATION` attribute in seconds.
    pub planned_duration: Option<f64>,
    /// The `SCTE35-CMD` attribute.
    pub scte35_cmd: Option<String>,
    /// The `SCTE35-OUT` attribute.
    pub scte35_out: Option<String>,
    /// The `SCTE35-IN` attribute.
    pub scte35_in: Option<String>,
    /// The `END-ON-NEXT` attribute.
    pub end_on_next: Option<String>,
    /// Every `X-`-prefixed client attribute.
    pub client_attributes: HashMap<String, String>,
}

/// An encryption key declared with `#EXT-X-KEY` or `#EXT-X-SESSION-KEY`.
///
/// Keys have no identity beyond their fields: two keys with identical fields are the same key,
/// which is what the derived `PartialEq` expresses and what the session-level deduplication in
/// [`Manifest::keys`] relies on.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct Key {
    /// The `METHOD` attribute (e.g. `AES-128`, `SAMPLE-AES`).
    pub method: Option<String>,
    /// The `URI` attribute.
    pub uri: Option<String>,
    /// The `IV` attribute, verbatim (hexadecimal string).
    pub iv: Option<String>,
    /// The `KEYFORMAT` attribute.
    pub keyformat: Option<String>,
    /// The `KEYFORMATVERSIONS` attribute.
    pub keyformatversions: Option<String>,
}

/// An init section declared with `#EXT-X-MAP`.
#[derive(Debug, PartialEq, Clone)]
pub struct InitSection {
    /// The `URI` attribute.
    pub uri: String,
    /// The `BYTERANGE` attribute in its literal form.
    pub byterange: Option<String>,
}

/// A variant stream: the URI line paired with its preceding `#EXT-X-STREAM-INF`.
#[derive(Debug, PartialEq, Clone)]
pub struct VariantStream {
    /// The URI line following the tag.
    pub uri: String,
    /// The tag's attributes.
    pub stream_info: StreamInf,
}

/// The attributes of `#EXT-X-STREAM-INF`.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct StreamInf {
    /// The legacy `PROGRAM-ID` attribute.
    pub program_id: Option<u64>,
    /// The `BANDWIDTH` attribute in bits per second. Degrades to `0` when absent or malformed.
    pub bandwidth: u64,
    /// The `AVERAGE-BANDWIDTH` attribute in bits per second.
    pub average_bandwidth: Option<u64>,
    /// The `RESOLUTION` attribute in its `<width>x<height>` form.
    pub resolution: Option<String>,
    /// The `CODECS` attribute.
    pub codecs: Option<String>,
    /// The `FRAME-RATE` attribute.
    pub frame_rate: Option<f64>,
    /// The `VIDEO` group identifier.
    pub video: Option<String>,
    /// The `AUDIO` group identifier.
    pub audio: Option<String>,
    /// The `SUBTITLES` group identifier.
    pub subtitles: Option<String>,
    /// The `CLOSED-CAPTIONS` attribute.
    pub closed_captions: Option<String>,
    /// The `VIDEO-RANGE` attribute (`SDR`, `HLG`, `PQ`).
    pub video_range: Option<String>,
    /// The `HDCP-LEVEL` attribute.
    pub hdcp_level: Option<String>,
    /// The `PATHWAY-ID` attribute (content steering).
    pub pathway_id: Option<String>,
    /// The `STABLE-VARIANT-ID` attribute.
    pub stable_variant_id: Option<String>,
    /// The `REQ-VIDEO-LAYOUT` attribute.
    pub req_video_layout: Option<String>,
}

/// An I-frame stream declared with `#EXT-X-I-FRAME-STREAM-INF` (URI inside the tag).
#[derive(Debug, PartialEq, Clone)]
pub struct IFrameStream {
    /// The `URI` attribute.
    pub uri: String,
    /// The tag's remaining attributes.
    pub stream_info: IFrameStreamInf,
}

/// The attributes of `#EXT-X-I-FRAME-STREAM-INF`.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct IFrameStreamInf {
    /// The legacy `PROGRAM-ID` attribute.
    pub program_id: Option<u64>,
    /// The `BANDWIDTH` attribute in bits per second.
    pub bandwidth: Option<u64>,
    /// The `AVERAGE-BANDWIDTH` attribute in bits per second.
    pub average_bandwidth: Option<u64>,
    /// The `RESOLUTION` attribute in its `<width>x<height>` form.
    pub resolution: Option<String>,
    /// The `CODECS` attribute.
    pub codecs: Option<String>,
    /// The `VIDEO-RANGE` attribute.
    pub video_range: Option<String>,
    /// The `HDCP-LEVEL` attribute.
    pub hdcp_level: Option<String>,
    /// The `PATHWAY-ID` attribute.
    pub pathway_id: Option<String>,
    /// The `STABLE-VARIANT-ID` attribute.
    pub stable_variant_id: Option<String>,
}

/// An image stream declared with the non-standard `#EXT-X-IMAGE-STREAM-INF` (URI inside the tag).
#[derive(Debug, PartialEq, Clone)]
pub struct ImageStream {
    /// The `URI` attribute.
    pub uri: String,
    /// The tag's remaining attributes.
    pub stream_info: ImageStreamInf,
}

/// The attributes of `#EXT-X-IMAGE-STREAM-INF`.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct ImageStreamInf {
    /// The legacy `PROGRAM-ID` attribute.
    pub program_id: Option<u64>,
    /// The `BANDWIDTH` attribute in bits per second.
    pub bandwidth: Option<u64>,
    /// The `AVERAGE-BANDWIDTH` attribute in bits per second.
    pub average_bandwidth: Option<u64>,
    /// The `RESOLUTION` attribute in its `<width>x<height>` form.
    pub resolution: Option<String>,
    /// The `CODECS` attribute.
    pub codecs: Option<String>,
    /// The `PATHWAY-ID` attribute.
    pub pathway_id: Option<String>,
    /// The `STABLE-VARIANT-ID` attribute.
    pub stable_variant_id: Option<String>,
}

/// An alternative rendition declared with `#EXT-X-MEDIA`.
///
/// All attributes are kept verbatim, including the `YES`/`NO` enumerated ones, matching what the
/// playlist author wrote rather than a normalized boolean.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct Rendition {
    /// The `TYPE` attribute (`AUDIO`, `VIDEO`, `SUBTITLES`, `CLOSED-CAPTIONS`).
    pub media_type: Option<String>,
    /// The `URI` attribute.
    pub uri: Option<String>,
    /// The `GROUP-ID` attribute.
    pub group_id: Option<String>,
    /// The `LANGUAGE` attribute.
    pub language: Option<String>,
    /// The `ASSOC-LANGUAGE` attribute.
    pub assoc_language: Option<String>,
    /// The `NAME` attribute.
    pub name: Option<String>,
    /// The `DEFAULT` attribute.
    pub default: Option<String>,
    /// The `AUTOSELECT` attribute.
    pub autoselect: Option<String>,
    /// The `FORCED` attribute.
    pub forced: Option<String>,
    /// The `INSTREAM-ID` attribute.
    pub instream_id: Option<String>,
    /// The `CHARACTERISTICS` attribute.
    pub characteristics: Option<String>,
    /// The `CHANNELS` attribute.
    pub channels: Option<String>,
    /// The `STABLE-RENDITION-ID` attribute.
    pub stable_rendition_id: Option<String>,
}

/// A record declared with `#EXT-X-SESSION-DATA`.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct SessionData {
    /// The `DATA-ID` attribute.
    pub data_id: Option<String>,
    /// The `VALUE` attribute.
    pub value: Option<String>,
    /// The `URI` attribute.
    pub uri: Option<String>,
    /// The `LANGUAGE` attribute.
    pub language: Option<String>,
}

/// A report declared with `#EXT-X-RENDITION-REPORT` (low-latency HLS).
#[derive(Debug, PartialEq, Clone)]
pub struct RenditionReport {
    /// The `URI` attribute.
    pub uri: String,
    /// The `LAST-MSN` attribute.
    pub last_msn: Option<u64>,
    /// The `LAST-PART` attribute.
    pub last_part: Option<u64>,
}

/// A trick-play tile set declared with the non-standard `#EXT-X-TILES`.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct Tiles {
    /// The `RESOLUTION` attribute.
    pub resolution: Option<String>,
    /// The `LAYOUT` attribute in its `<columns>x<rows>` form.
    pub layout: Option<String>,
    /// The `DURATION` attribute in seconds.
    pub duration: Option<f64>,
    /// The `URI` attribute.
    pub uri: Option<String>,
}

/// The `#EXT-X-START` record.
#[derive(Debug, PartialEq, Clone)]
pub struct Start {
    /// The `TIME-OFFSET` attribute in seconds (may be negative).
    pub time_offset: f64,
    /// The `PRECISE` attribute, verbatim.
    pub precise: Option<String>,
}

/// The `#EXT-X-SERVER-CONTROL` record (low-latency HLS delivery directives).
#[derive(Debug, PartialEq, Clone, Default)]
pub struct ServerControl {
    /// The `CAN-BLOCK-RELOAD` attribute, verbatim.
    pub can_block_reload: Option<String>,
    /// The `HOLD-BACK` attribute in seconds.
    pub hold_back: Option<f64>,
    /// The `PART-HOLD-BACK` attribute in seconds.
    pub part_hold_back: Option<f64>,
    /// The `CAN-SKIP-UNTIL` attribute in seconds.
    pub can_skip_until: Option<f64>,
    /// The `CAN-SKIP-DATERANGES` attribute, verbatim.
    pub can_skip_dateranges: Option<String>,
}

/// The `#EXT-X-PART-INF` record.
#[derive(Debug, PartialEq, Clone)]
pub struct PartInf {
    /// The `PART-TARGET` attribute in seconds.
    pub part_target: f64,
}

/// The `#EXT-X-SKIP` record of a delta-update playlist.
#[derive(Debug, PartialEq, Clone)]
pub struct Skip {
    /// The `SKIPPED-SEGMENTS` attribute.
    pub skipped_segments: u64,
    /// The `RECENTLY-REMOVED-DATERANGES` attribute, verbatim.
    pub recently_removed_dateranges: Option<String>,
}

/// The `#EXT-X-PRELOAD-HINT` record.
#[derive(Debug, PartialEq, Clone)]
pub struct PreloadHint {
    /// The `TYPE` attribute (`PART` or `MAP`).
    pub hint_type: String,
    /// The `URI` attribute.
    pub uri: String,
    /// The `BYTERANGE-START` attribute.
    pub byterange_start: Option<u64>,
    /// The `BYTERANGE-LENGTH` attribute.
    pub byterange_length: Option<u64>,
}

/// The `#EXT-X-CONTENT-STEERING` record.
#[derive(Debug, PartialEq, Clone)]
pub struct ContentSteering {
    /// The `SERVER-URI` attribute.
    pub server_uri: String,
    /// The `PATHWAY-ID` attribute.
    pub pathway_id: Option<String>,
}
