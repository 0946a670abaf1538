use crate::{
    config::ParsingOptions,
    date,
    error::{ErrorKind, ParseError},
    line::{Lines, PlaylistLine},
    manifest::{
        Blackout, ContentSteering, DateRange, IFrameStream, IFrameStreamInf, ImageStream,
        ImageStreamInf, InitSection, Key, Manifest, Part, PartInf, PreloadHint, Rendition,
        RenditionReport, Segment, ServerControl, SessionData, Skip, Start, StreamInf, Tiles,
        VariantStream,
    },
    tag::{TagName, TagValue, value::AttributeList},
};
use chrono::{DateTime, FixedOffset, TimeDelta};
use std::{collections::HashMap, mem};

/// Parse a playlist leniently into a [`Manifest`].
///
/// This is the main entry point of the library. Parsing is a single pass over the input and never
/// fails: malformed numeric values degrade to absent, tags missing a required attribute are
/// dropped, unknown tags are skipped, and truncated input yields whatever was parsed up to the
/// truncation. Use [`parse_with_options`] for strict validation and [`parse_with_custom`] to
/// observe unknown tags.
///
/// The input must already be UTF-8; callers holding arbitrary bytes should lossy-decode first
/// (`String::from_utf8_lossy`). A leading BOM and CRLF line endings are accepted.
///
/// ```
/// let manifest = hls_manifest::parse(concat!(
///     "#EXTM3U\n",
///     "#EXT-X-TARGETDURATION:10\n",
///     "#EXTINF:9.009,\n",
///     "first.ts\n",
///     "#EXT-X-ENDLIST\n",
/// ));
/// assert_eq!(Some(10), manifest.target_duration);
/// assert_eq!(1, manifest.segments.len());
/// assert_eq!("first.ts", manifest.segments[0].uri);
/// assert!(manifest.is_endlist);
/// ```
pub fn parse(input: &str) -> Manifest {
    // Lenient parsing has no failure path, so the error case is unreachable.
    parse_with_custom(input, &ParsingOptions::default(), |_, _, _| {}).unwrap_or_default()
}

/// Parse a playlist with the provided options.
///
/// With [`crate::config::ParsingOptions::strict`] unset this is equivalent to [`parse`]. With it
/// set, the conditions that lenient parsing degrades through instead fail the call with a
/// [`ParseError`] carrying the offending line number and an excerpt.
pub fn parse_with_options(input: &str, options: &ParsingOptions) -> Result<Manifest, ParseError> {
    parse_with_custom(input, options, |_, _, _| {})
}

/// Parse a playlist, handing every unrecognized `#EXT…` tag to `on_unknown_tag`.
///
/// The handler receives the tag name (with the `#EXT` prefix removed, matching
/// [`crate::tag::TagName`] conventions), the raw value after the `:` (or `None` for a bare tag),
/// and a read-only view of the record built so far. Its return value is ignored; it exists so
/// that callers can accumulate their own state for tags outside the HLS specification.
///
/// ```
/// let mut seen = Vec::new();
/// let manifest = hls_manifest::parse_with_custom(
///     "#EXTM3U\n#EXT-X-VENDOR-TAG:VALUE=1\n",
///     &hls_manifest::config::ParsingOptions::default(),
///     |name, value, _manifest| seen.push((name.to_string(), value.map(String::from))),
/// )
/// .unwrap();
/// assert_eq!(vec![("-X-VENDOR-TAG".to_string(), Some("VALUE=1".to_string()))], seen);
/// assert!(manifest.segments.is_empty());
/// ```
pub fn parse_with_custom<F>(
    input: &str,
    options: &ParsingOptions,
    on_unknown_tag: F,
) -> Result<Manifest, ParseError>
where
    F: FnMut(&str, Option<&str>, &Manifest),
{
    Parser::new(options.strict, on_unknown_tag).run(input)
}

/// What kind of playlist the tags seen so far indicate.
#[derive(Debug, PartialEq, Clone, Copy)]
enum Mode {
    Unknown,
    Media,
    Multivariant,
}

/// The single-pass parser: cross-line context threaded through the tag interpreters, plus the
/// growing output record.
struct Parser<'a, F> {
    strict: bool,
    on_unknown_tag: F,
    manifest: Manifest,
    mode: Mode,
    /// The segment being assembled. Segment-scoped tags may precede the `EXTINF`, so the scaffold
    /// always exists; `has_inf` arms it for finalization by the next URI line.
    scaffold: Segment,
    has_inf: bool,
    /// Stream info awaiting its URI line after `EXT-X-STREAM-INF`.
    pending_variant: Option<StreamInf>,
    /// The key in effect for segments; `None` means unencrypted.
    current_key: Option<Key>,
    current_map: Option<InitSection>,
    /// Date-ranges declared since the previous segment's URI line.
    pending_dateranges: Vec<DateRange>,
    /// Parts declared since the previous segment's URI line.
    pending_parts: Vec<Part>,
    line_number: usize,
    tag_name: &'a str,
    tag_value: Option<&'a str>,
}

impl<'a, F> Parser<'a, F>
where
    F: FnMut(&str, Option<&str>, &Manifest),
{
    fn new(strict: bool, on_unknown_tag: F) -> Self {
        Self {
            strict,
            on_unknown_tag,
            manifest: Manifest::default(),
            mode: Mode::Unknown,
            scaffold: Segment::default(),
            has_inf: false,
            pending_variant: None,
            current_key: None,
            current_map: None,
            pending_dateranges: Vec::new(),
            pending_parts: Vec::new(),
            line_number: 0,
            tag_name: "",
            tag_value: None,
        }
    }

    fn run(mut self, input: &'a str) -> Result<Manifest, ParseError> {
        let mut checked_header = false;
        for (number, line) in Lines::new(input) {
            self.line_number = number;
            if !checked_header {
                checked_header = true;
                let is_header = matches!(line, PlaylistLine::Tag { name: "M3U", .. });
                if !is_header && self.strict {
                    return Err(ParseError {
                        kind: ErrorKind::MissingHeader,
                        line: number,
                        excerpt: line_excerpt(&line),
                    });
                }
            }
            match line {
                PlaylistLine::Tag { name, value } => self.handle_tag(name, value)?,
                PlaylistLine::Uri(uri) => self.handle_uri(uri)?,
            }
        }
        Ok(self.finish())
    }

    fn handle_tag(&mut self, name: &'a str, value: Option<&'a str>) -> Result<(), ParseError> {
        self.tag_name = name;
        self.tag_value = value;
        let Ok(tag) = TagName::try_from(name) else {
            (self.on_unknown_tag)(name, value, &self.manifest);
            return Ok(());
        };
        match tag {
            TagName::M3u => {}
            TagName::Version => self.manifest.version = self.tag_integer()?,
            TagName::IndependentSegments => self.manifest.is_independent_segments = true,
            TagName::Targetduration => {
                self.manifest.target_duration = self.tag_integer()?;
                self.note_media_tag();
            }
            TagName::MediaSequence => self.manifest.media_sequence = self.tag_integer()?,
            TagName::DiscontinuitySequence => {
                self.manifest.discontinuity_sequence = self.tag_integer()?
            }
            TagName::Endlist => self.manifest.is_endlist = true,
            TagName::PlaylistType => {
                self.manifest.playlist_type = self.tag_value.map(String::from)
            }
            TagName::AllowCache => self.manifest.allow_cache = self.tag_value.map(String::from),
            TagName::IFramesOnly => self.manifest.is_i_frames_only = true,
            TagName::ImagesOnly => self.manifest.is_images_only = true,
            TagName::Inf => self.interpret_inf()?,
            TagName::Byterange => self.scaffold.byterange = self.tag_value.map(String::from),
            TagName::Discontinuity => self.scaffold.discontinuity = true,
            TagName::Bitrate => self.scaffold.bitrate = self.tag_integer()?,
            TagName::Gap => self.scaffold.gap_tag = true,
            TagName::ProgramDateTime => self.interpret_program_date_time()?,
            TagName::Key => self.interpret_key()?,
            TagName::SessionKey => self.interpret_session_key()?,
            TagName::Map => self.interpret_map()?,
            TagName::StreamInf => self.interpret_stream_inf()?,
            TagName::IFrameStreamInf => self.interpret_i_frame_stream_inf()?,
            TagName::ImageStreamInf => self.interpret_image_stream_inf()?,
            TagName::Media => self.interpret_media()?,
            TagName::SessionData => self.interpret_session_data()?,
            TagName::Start => self.interpret_start()?,
            TagName::ServerControl => self.interpret_server_control()?,
            TagName::PartInf => self.interpret_part_inf()?,
            TagName::Part => self.interpret_part()?,
            TagName::PreloadHint => self.interpret_preload_hint()?,
            TagName::RenditionReport => self.interpret_rendition_report()?,
            TagName::Skip => self.interpret_skip()?,
            TagName::Daterange => self.interpret_daterange()?,
            TagName::ContentSteering => self.interpret_content_steering()?,
            TagName::Tiles => self.interpret_tiles()?,
            TagName::Asset => self.interpret_asset()?,
            TagName::CueIn => self.scaffold.cue_in = true,
            TagName::CueOut => self.interpret_cue_out(),
            TagName::CueOutCont => self.interpret_cue_out_cont()?,
            TagName::Blackout => self.interpret_blackout(),
            TagName::OatclsScte35 => {
                self.scaffold.oatcls_scte35 = self.tag_value.map(String::from)
            }
            TagName::Scte35 => self.interpret_scte35()?,
        }
        Ok(())
    }

    fn handle_uri(&mut self, uri: &'a str) -> Result<(), ParseError> {
        if let Some(stream_info) = self.pending_variant.take() {
            self.manifest.variant_streams.push(VariantStream {
                uri: uri.to_string(),
                stream_info,
            });
            return Ok(());
        }
        if self.has_inf {
            self.finalize_segment(uri);
            return Ok(());
        }
        if self.strict {
            return Err(ParseError {
                kind: ErrorKind::UnexpectedUri,
                line: self.line_number,
                excerpt: uri.to_string(),
            });
        }
        Ok(())
    }

    fn finalize_segment(&mut self, uri: &str) {
        let mut segment = mem::take(&mut self.scaffold);
        self.has_inf = false;
        segment.uri = uri.to_string();
        segment.key = self.current_key.clone();
        segment.init_section = self.current_map.clone();
        segment.dateranges = mem::take(&mut self.pending_dateranges);
        segment.parts = mem::take(&mut self.pending_parts);
        self.manifest.segments.push(segment);
    }

    /// Finalization per the output contract: derive each segment's wall-clock time, guarantee the
    /// null-key placeholder, and backfill the media-sequence default for media playlists.
    fn finish(mut self) -> Manifest {
        let mut current: Option<DateTime<FixedOffset>> = None;
        for segment in &mut self.manifest.segments {
            if segment.program_date_time.is_some() {
                current = segment.program_date_time;
            }
            if let Some(pdt) = current {
                segment.current_program_date_time = Some(pdt);
                current = Some(pdt + TimeDelta::nanoseconds((segment.duration * 1e9).round() as i64));
            }
        }
        let any_unencrypted = self.manifest.segments.iter().any(|s| s.key.is_none());
        if any_unencrypted && !self.manifest.keys.contains(&None) {
            self.manifest.keys.insert(0, None);
        }
        self.manifest.is_variant = self.mode == Mode::Multivariant;
        if self.manifest.media_sequence.is_none() && !self.manifest.is_variant {
            self.manifest.media_sequence = Some(0);
        }
        self.manifest
    }

    fn note_media_tag(&mut self) {
        if self.mode == Mode::Unknown {
            self.mode = Mode::Media;
        }
    }

    fn note_variant_tag(&mut self) {
        self.mode = Mode::Multivariant;
    }

    // Segment tags

    fn interpret_inf(&mut self) -> Result<(), ParseError> {
        self.note_media_tag();
        let raw = self.tag_value.unwrap_or("");
        match TagValue(raw).try_as_decimal_floating_point_with_title() {
            Ok((duration, title)) => {
                self.scaffold.duration = if duration.is_finite() { duration } else { 0.0 };
                self.scaffold.title = title.to_string();
            }
            Err(_) if !self.strict => {
                self.scaffold.duration = 0.0;
                self.scaffold.title = raw.split_once(',').map(|(_, t)| t).unwrap_or("").to_string();
            }
            Err(_) => return Err(self.err(ErrorKind::InvalidNumber)),
        }
        self.has_inf = true;
        Ok(())
    }

    fn interpret_program_date_time(&mut self) -> Result<(), ParseError> {
        match date::parse(self.tag_value.unwrap_or("")) {
            Ok(date) => {
                self.scaffold.program_date_time = Some(date);
                if self.manifest.program_date_time.is_none() {
                    self.manifest.program_date_time = Some(date);
                }
            }
            Err(_) if !self.strict => {}
            Err(_) => return Err(self.err(ErrorKind::InvalidNumber)),
        }
        Ok(())
    }

    fn interpret_key(&mut self) -> Result<(), ParseError> {
        let list = self.attribute_list()?;
        let method = attr_string(&list, "METHOD");
        if method.as_deref() == Some("NONE") {
            self.current_key = None;
            self.push_session_view_key(None);
        } else {
            let key = key_from(&list, method);
            self.current_key = Some(key.clone());
            self.push_session_view_key(Some(key));
        }
        Ok(())
    }

    fn push_session_view_key(&mut self, key: Option<Key>) {
        if !self.manifest.keys.contains(&key) {
            self.manifest.keys.push(key);
        }
    }

    fn interpret_session_key(&mut self) -> Result<(), ParseError> {
        let list = self.attribute_list()?;
        let method = attr_string(&list, "METHOD");
        if method.as_deref() != Some("NONE") {
            self.manifest.session_keys.push(key_from(&list, method));
        }
        Ok(())
    }

    fn interpret_map(&mut self) -> Result<(), ParseError> {
        let list = self.attribute_list()?;
        let Some(uri) = self.require_string(&list, "URI")? else {
            return Ok(());
        };
        let section = InitSection {
            uri,
            byterange: attr_string(&list, "BYTERANGE"),
        };
        self.current_map = Some(section.clone());
        if !self.manifest.init_sections.contains(&section) {
            self.manifest.init_sections.push(section);
        }
        Ok(())
    }

    fn interpret_daterange(&mut self) -> Result<(), ParseError> {
        let list = self.attribute_list()?;
        let Some(id) = self.require_string(&list, "ID")? else {
            return Ok(());
        };
        let mut client_attributes = HashMap::new();
        for (name, value) in list.pairs() {
            if name.starts_with("X-") {
                client_attributes.insert((*name).to_string(), value.as_str().to_string());
            }
        }
        self.pending_dateranges.push(DateRange {
            id,
            class: attr_string(&list, "CLASS"),
            start_date: attr_string(&list, "START-DATE"),
            end_date: attr_string(&list, "END-DATE"),
            duration: self.attr_float(&list, "DURATION")?,
            planned_duration: self.attr_float(&list, "PLANNED-DURATION")?,
            scte35_cmd: attr_string(&list, "SCTE35-CMD"),
            scte35_out: attr_string(&list, "SCTE35-OUT"),
            scte35_in: attr_string(&list, "SCTE35-IN"),
            end_on_next: attr_string(&list, "END-ON-NEXT"),
            client_attributes,
        });
        Ok(())
    }

    fn interpret_part(&mut self) -> Result<(), ParseError> {
        let list = self.attribute_list()?;
        let Some(uri) = self.require_string(&list, "URI")? else {
            return Ok(());
        };
        self.pending_parts.push(Part {
            uri,
            duration: self.attr_float(&list, "DURATION")?.unwrap_or(0.0),
            byterange: attr_string(&list, "BYTERANGE"),
            independent: attr_string(&list, "INDEPENDENT"),
            gap: attr_string(&list, "GAP"),
            gap_tag: self.scaffold.gap_tag,
            dateranges: mem::take(&mut self.pending_dateranges),
        });
        Ok(())
    }

    fn interpret_asset(&mut self) -> Result<(), ParseError> {
        let list = self.attribute_list()?;
        let mut metadata = HashMap::new();
        for (name, value) in list.pairs() {
            metadata.insert((*name).to_string(), value.as_str().to_string());
        }
        self.scaffold.asset_metadata = Some(metadata);
        Ok(())
    }

    fn interpret_cue_out(&mut self) {
        self.scaffold.cue_out = true;
        self.scaffold.cue_out_start = true;
        let payload = self.tag_value.unwrap_or("").trim_ascii();
        if payload.is_empty() {
            return;
        }
        // Both `:DURATION=<n>` and the bare `:<n>` payload shape occur in the wild; the bare form
        // is not an attribute list, so the lexer's verdict is not consulted here.
        let list = AttributeList::parse(payload);
        if let Some(duration) = list.get("DURATION") {
            self.scaffold.scte35_duration = Some(duration.as_str().to_string());
            self.scaffold.cue_out_explicitly_duration = true;
        } else {
            self.scaffold.scte35_duration = Some(payload.to_string());
        }
    }

    fn interpret_cue_out_cont(&mut self) -> Result<(), ParseError> {
        self.scaffold.cue_out = true;
        let list = self.attribute_list()?;
        if let Some(elapsed) = attr_string(&list, "ElapsedTime") {
            self.scaffold.scte35_elapsedtime = Some(elapsed);
        }
        if let Some(duration) = attr_string(&list, "Duration") {
            self.scaffold.scte35_duration = Some(duration);
        }
        if let Some(cue) = attr_string(&list, "SCTE35") {
            self.scaffold.scte35 = Some(cue);
        }
        Ok(())
    }

    fn interpret_scte35(&mut self) -> Result<(), ParseError> {
        let list = self.attribute_list()?;
        if let Some(cue) = attr_string(&list, "CUE") {
            self.scaffold.scte35 = Some(cue);
        }
        Ok(())
    }

    fn interpret_blackout(&mut self) {
        self.scaffold.blackout = match self.tag_value {
            None => Some(Blackout::Flag),
            Some(v) if v.trim_ascii().is_empty() => Some(Blackout::Flag),
            Some(v) => Some(Blackout::Payload(v.to_string())),
        };
    }

    // Multivariant tags

    fn interpret_stream_inf(&mut self) -> Result<(), ParseError> {
        let list = self.attribute_list()?;
        self.pending_variant = Some(StreamInf {
            program_id: self.attr_integer(&list, "PROGRAM-ID")?,
            bandwidth: self.attr_integer(&list, "BANDWIDTH")?.unwrap_or(0),
            average_bandwidth: self.attr_integer(&list, "AVERAGE-BANDWIDTH")?,
            resolution: attr_string(&list, "RESOLUTION"),
            codecs: attr_string(&list, "CODECS"),
            frame_rate: self.attr_float(&list, "FRAME-RATE")?,
            video: attr_string(&list, "VIDEO"),
            audio: attr_string(&list, "AUDIO"),
            subtitles: attr_string(&list, "SUBTITLES"),
            closed_captions: attr_string(&list, "CLOSED-CAPTIONS"),
            video_range: attr_string(&list, "VIDEO-RANGE"),
            hdcp_level: attr_string(&list, "HDCP-LEVEL"),
            pathway_id: attr_string(&list, "PATHWAY-ID"),
            stable_variant_id: attr_string(&list, "STABLE-VARIANT-ID"),
            req_video_layout: attr_string(&list, "REQ-VIDEO-LAYOUT"),
        });
        self.note_variant_tag();
        Ok(())
    }

    fn interpret_i_frame_stream_inf(&mut self) -> Result<(), ParseError> {
        let list = self.attribute_list()?;
        let Some(uri) = self.require_string(&list, "URI")? else {
            return Ok(());
        };
        let stream_info = IFrameStreamInf {
            program_id: self.attr_integer(&list, "PROGRAM-ID")?,
            bandwidth: self.attr_integer(&list, "BANDWIDTH")?,
            average_bandwidth: self.attr_integer(&list, "AVERAGE-BANDWIDTH")?,
            resolution: attr_string(&list, "RESOLUTION"),
            codecs: attr_string(&list, "CODECS"),
            video_range: attr_string(&list, "VIDEO-RANGE"),
            hdcp_level: attr_string(&list, "HDCP-LEVEL"),
            pathway_id: attr_string(&list, "PATHWAY-ID"),
            stable_variant_id: attr_string(&list, "STABLE-VARIANT-ID"),
        };
        self.manifest.iframe_streams.push(IFrameStream { uri, stream_info });
        self.note_variant_tag();
        Ok(())
    }

    fn interpret_image_stream_inf(&mut self) -> Result<(), ParseError> {
        let list = self.attribute_list()?;
        let Some(uri) = self.require_string(&list, "URI")? else {
            return Ok(());
        };
        let stream_info = ImageStreamInf {
            program_id: self.attr_integer(&list, "PROGRAM-ID")?,
            bandwidth: self.attr_integer(&list, "BANDWIDTH")?,
            average_bandwidth: self.attr_integer(&list, "AVERAGE-BANDWIDTH")?,
            resolution: attr_string(&list, "RESOLUTION"),
            codecs: attr_string(&list, "CODECS"),
            pathway_id: attr_string(&list, "PATHWAY-ID"),
            stable_variant_id: attr_string(&list, "STABLE-VARIANT-ID"),
        };
        self.manifest.image_streams.push(ImageStream { uri, stream_info });
        self.note_variant_tag();
        Ok(())
    }

    fn interpret_media(&mut self) -> Result<(), ParseError> {
        let list = self.attribute_list()?;
        self.manifest.renditions.push(Rendition {
            media_type: attr_string(&list, "TYPE"),
            uri: attr_string(&list, "URI"),
            group_id: attr_string(&list, "GROUP-ID"),
            language: attr_string(&list, "LANGUAGE"),
            assoc_language: attr_string(&list, "ASSOC-LANGUAGE"),
            name: attr_string(&list, "NAME"),
            default: attr_string(&list, "DEFAULT"),
            autoselect: attr_string(&list, "AUTOSELECT"),
            forced: attr_string(&list, "FORCED"),
            instream_id: attr_string(&list, "INSTREAM-ID"),
            characteristics: attr_string(&list, "CHARACTERISTICS"),
            channels: attr_string(&list, "CHANNELS"),
            stable_rendition_id: attr_string(&list, "STABLE-RENDITION-ID"),
        });
        Ok(())
    }

    fn interpret_session_data(&mut self) -> Result<(), ParseError> {
        let list = self.attribute_list()?;
        self.manifest.session_data.push(SessionData {
            data_id: attr_string(&list, "DATA-ID"),
            value: attr_string(&list, "VALUE"),
            uri: attr_string(&list, "URI"),
            language: attr_string(&list, "LANGUAGE"),
        });
        Ok(())
    }

    // Session sub-records

    fn interpret_start(&mut self) -> Result<(), ParseError> {
        let list = self.attribute_list()?;
        let Some(time_offset) = self.require_float(&list, "TIME-OFFSET")? else {
            return Ok(());
        };
        self.manifest.start = Some(Start {
            time_offset,
            precise: attr_string(&list, "PRECISE"),
        });
        Ok(())
    }

    fn interpret_server_control(&mut self) -> Result<(), ParseError> {
        let list = self.attribute_list()?;
        self.manifest.server_control = Some(ServerControl {
            can_block_reload: attr_string(&list, "CAN-BLOCK-RELOAD"),
            hold_back: self.attr_float(&list, "HOLD-BACK")?,
            part_hold_back: self.attr_float(&list, "PART-HOLD-BACK")?,
            can_skip_until: self.attr_float(&list, "CAN-SKIP-UNTIL")?,
            can_skip_dateranges: attr_string(&list, "CAN-SKIP-DATERANGES"),
        });
        Ok(())
    }

    fn interpret_part_inf(&mut self) -> Result<(), ParseError> {
        let list = self.attribute_list()?;
        let Some(part_target) = self.require_float(&list, "PART-TARGET")? else {
            return Ok(());
        };
        self.manifest.part_inf = Some(PartInf { part_target });
        Ok(())
    }

    fn interpret_preload_hint(&mut self) -> Result<(), ParseError> {
        let list = self.attribute_list()?;
        let Some(hint_type) = self.require_string(&list, "TYPE")? else {
            return Ok(());
        };
        let Some(uri) = self.require_string(&list, "URI")? else {
            return Ok(());
        };
        self.manifest.preload_hint = Some(PreloadHint {
            hint_type,
            uri,
            byterange_start: self.attr_integer(&list, "BYTERANGE-START")?,
            byterange_length: self.attr_integer(&list, "BYTERANGE-LENGTH")?,
        });
        Ok(())
    }

    fn interpret_rendition_report(&mut self) -> Result<(), ParseError> {
        let list = self.attribute_list()?;
        let Some(uri) = self.require_string(&list, "URI")? else {
            return Ok(());
        };
        self.manifest.rendition_reports.push(RenditionReport {
            uri,
            last_msn: self.attr_integer(&list, "LAST-MSN")?,
            last_part: self.attr_integer(&list, "LAST-PART")?,
        });
        Ok(())
    }

    fn interpret_skip(&mut self) -> Result<(), ParseError> {
        let list = self.attribute_list()?;
        let Some(skipped_segments) = self.require_integer(&list, "SKIPPED-SEGMENTS")? else {
            return Ok(());
        };
        self.manifest.skip = Some(Skip {
            skipped_segments,
            recently_removed_dateranges: attr_string(&list, "RECENTLY-REMOVED-DATERANGES"),
        });
        Ok(())
    }

    fn interpret_content_steering(&mut self) -> Result<(), ParseError> {
        let list = self.attribute_list()?;
        let Some(server_uri) = self.require_string(&list, "SERVER-URI")? else {
            return Ok(());
        };
        self.manifest.content_steering = Some(ContentSteering {
            server_uri,
            pathway_id: attr_string(&list, "PATHWAY-ID"),
        });
        Ok(())
    }

    fn interpret_tiles(&mut self) -> Result<(), ParseError> {
        let list = self.attribute_list()?;
        self.manifest.tiles.push(Tiles {
            resolution: attr_string(&list, "RESOLUTION"),
            layout: attr_string(&list, "LAYOUT"),
            duration: self.attr_float(&list, "DURATION")?,
            uri: attr_string(&list, "URI"),
        });
        Ok(())
    }

    // Strict/lenient value extraction

    fn err(&self, kind: ErrorKind) -> ParseError {
        let excerpt = match self.tag_value {
            Some(value) => format!("#EXT{}:{}", self.tag_name, value),
            None => format!("#EXT{}", self.tag_name),
        };
        ParseError {
            kind,
            line: self.line_number,
            excerpt,
        }
    }

    fn attribute_list(&self) -> Result<AttributeList<'a>, ParseError> {
        let list = TagValue(self.tag_value.unwrap_or("")).as_attribute_list();
        match list.error() {
            Some(e) if self.strict => Err(self.err(ErrorKind::from(e))),
            _ => Ok(list),
        }
    }

    fn tag_integer(&self) -> Result<Option<u64>, ParseError> {
        match TagValue(self.tag_value.unwrap_or("")).try_as_decimal_integer() {
            Ok(n) => Ok(Some(n)),
            Err(_) if !self.strict => Ok(None),
            Err(_) => Err(self.err(ErrorKind::InvalidNumber)),
        }
    }

    fn attr_integer(
        &self,
        list: &AttributeList,
        name: &'static str,
    ) -> Result<Option<u64>, ParseError> {
        match list.get(name) {
            None => Ok(None),
            Some(value) => match value.try_as_decimal_integer() {
                Ok(n) => Ok(Some(n)),
                Err(_) if !self.strict => Ok(None),
                Err(_) => Err(self.err(ErrorKind::InvalidNumber)),
            },
        }
    }

    fn attr_float(
        &self,
        list: &AttributeList,
        name: &'static str,
    ) -> Result<Option<f64>, ParseError> {
        match list.get(name) {
            None => Ok(None),
            Some(value) => match value.try_as_decimal_floating_point() {
                Ok(f) => Ok(Some(f)),
                Err(_) if !self.strict => Ok(None),
                Err(_) => Err(self.err(ErrorKind::InvalidNumber)),
            },
        }
    }

    /// A required string attribute. `Ok(None)` means the tag should be dropped (lenient mode);
    /// strict mode fails instead.
    fn require_string(
        &self,
        list: &AttributeList,
        name: &'static str,
    ) -> Result<Option<String>, ParseError> {
        match attr_string(list, name) {
            Some(s) => Ok(Some(s)),
            None if self.strict => Err(self.err(ErrorKind::MissingRequiredAttribute(name))),
            None => Ok(None),
        }
    }

    fn require_float(
        &self,
        list: &AttributeList,
        name: &'static str,
    ) -> Result<Option<f64>, ParseError> {
        match list.get(name) {
            None if self.strict => Err(self.err(ErrorKind::MissingRequiredAttribute(name))),
            None => Ok(None),
            Some(_) => self.attr_float(list, name),
        }
    }

    fn require_integer(
        &self,
        list: &AttributeList,
        name: &'static str,
    ) -> Result<Option<u64>, ParseError> {
        match list.get(name) {
            None if self.strict => Err(self.err(ErrorKind::MissingRequiredAttribute(name))),
            None => Ok(None),
            Some(_) => self.attr_integer(list, name),
        }
    }
}

fn attr_string(list: &AttributeList, name: &str) -> Option<String> {
    list.get(name).map(|v| v.as_str().to_string())
}

fn key_from(list: &AttributeList, method: Option<String>) -> Key {
    Key {
        method,
        uri: attr_string(list, "URI"),
        iv: attr_string(list, "IV"),
        keyformat: attr_string(list, "KEYFORMAT"),
        keyformatversions: attr_string(list, "KEYFORMATVERSIONS"),
    }
}

fn line_excerpt(line: &PlaylistLine) -> String {
    match line {
        PlaylistLine::Tag { name, value: Some(value) } => format!("#EXT{name}:{value}"),
        PlaylistLine::Tag { name, value: None } => format!("#EXT{name}"),
        PlaylistLine::Uri(uri) => (*uri).to_string(),
    }
}
