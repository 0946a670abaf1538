//! Tag recognition and the value grammar shared by most tags.
//!
//! HLS tags begin with `#EXT`; everything up to the first `:` is the name and the rest is the
//! value. [`TagName`] is the closed set of names this library interprets, matched against the
//! name with the `#EXT` prefix removed (so `#EXTM3U` is matched as `M3U` and `#EXT-X-KEY` as
//! `-X-KEY`). Tags outside the set are handed to the custom-tag hook of
//! [`crate::parse_with_custom`], or silently ignored without one.

pub mod value;

pub use value::TagValue;

/// The name of a tag interpreted by the parser.
///
/// Covers the tags of draft-pantos-hls-rfc8216bis that contribute to the output record, plus the
/// widely deployed non-standard extensions (SCTE-35 ad markers, blackout, image streams) that
/// packagers emit alongside them.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum TagName {
    /// `#EXTM3U`
    M3u,
    /// `#EXT-X-VERSION`
    Version,
    /// `#EXT-X-INDEPENDENT-SEGMENTS`
    IndependentSegments,
    /// `#EXT-X-START`
    Start,
    /// `#EXT-X-TARGETDURATION`
    Targetduration,
    /// `#EXT-X-MEDIA-SEQUENCE`
    MediaSequence,
    /// `#EXT-X-DISCONTINUITY-SEQUENCE`
    DiscontinuitySequence,
    /// `#EXT-X-ENDLIST`
    Endlist,
    /// `#EXT-X-PLAYLIST-TYPE`
    PlaylistType,
    /// `#EXT-X-ALLOW-CACHE`
    AllowCache,
    /// `#EXT-X-I-FRAMES-ONLY`
    IFramesOnly,
    /// `#EXT-X-IMAGES-ONLY`
    ImagesOnly,
    /// `#EXT-X-PART-INF`
    PartInf,
    /// `#EXT-X-SERVER-CONTROL`
    ServerControl,
    /// `#EXTINF`
    Inf,
    /// `#EXT-X-BYTERANGE`
    Byterange,
    /// `#EXT-X-DISCONTINUITY`
    Discontinuity,
    /// `#EXT-X-KEY`
    Key,
    /// `#EXT-X-MAP`
    Map,
    /// `#EXT-X-PROGRAM-DATE-TIME`
    ProgramDateTime,
    /// `#EXT-X-GAP`
    Gap,
    /// `#EXT-X-BITRATE`
    Bitrate,
    /// `#EXT-X-PART`
    Part,
    /// `#EXT-X-DATERANGE`
    Daterange,
    /// `#EXT-X-SKIP`
    Skip,
    /// `#EXT-X-PRELOAD-HINT`
    PreloadHint,
    /// `#EXT-X-RENDITION-REPORT`
    RenditionReport,
    /// `#EXT-X-MEDIA`
    Media,
    /// `#EXT-X-STREAM-INF`
    StreamInf,
    /// `#EXT-X-I-FRAME-STREAM-INF`
    IFrameStreamInf,
    /// `#EXT-X-IMAGE-STREAM-INF`
    ImageStreamInf,
    /// `#EXT-X-SESSION-DATA`
    SessionData,
    /// `#EXT-X-SESSION-KEY`
    SessionKey,
    /// `#EXT-X-CONTENT-STEERING`
    ContentSteering,
    /// `#EXT-X-TILES`
    Tiles,
    /// `#EXT-X-ASSET`
    Asset,
    /// `#EXT-X-CUE-IN`
    CueIn,
    /// `#EXT-X-CUE-OUT`
    CueOut,
    /// `#EXT-X-CUE-OUT-CONT`
    CueOutCont,
    /// `#EXT-X-BLACKOUT`
    Blackout,
    /// `#EXT-OATCLS-SCTE35`
    OatclsScte35,
    /// `#EXT-X-SCTE35`
    Scte35,
}

/// The input did not name a tag known to the library.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct UnknownTagName;

impl TryFrom<&'_ str> for TagName {
    type Error = UnknownTagName;

    fn try_from(value: &'_ str) -> Result<Self, Self::Error> {
        match value {
            "M3U" => Ok(Self::M3u),
            "-X-VERSION" => Ok(Self::Version),
            "-X-INDEPENDENT-SEGMENTS" => Ok(Self::IndependentSegments),
            "-X-START" => Ok(Self::Start),
            "-X-TARGETDURATION" => Ok(Self::Targetduration),
            "-X-MEDIA-SEQUENCE" => Ok(Self::MediaSequence),
            "-X-DISCONTINUITY-SEQUENCE" => Ok(Self::DiscontinuitySequence),
            "-X-ENDLIST" => Ok(Self::Endlist),
            "-X-PLAYLIST-TYPE" => Ok(Self::PlaylistType),
            "-X-ALLOW-CACHE" => Ok(Self::AllowCache),
            "-X-I-FRAMES-ONLY" => Ok(Self::IFramesOnly),
            "-X-IMAGES-ONLY" => Ok(Self::ImagesOnly),
            "-X-PART-INF" => Ok(Self::PartInf),
            "-X-SERVER-CONTROL" => Ok(Self::ServerControl),
            "INF" => Ok(Self::Inf),
            "-X-BYTERANGE" => Ok(Self::Byterange),
            "-X-DISCONTINUITY" => Ok(Self::Discontinuity),
            "-X-KEY" => Ok(Self::Key),
            "-X-MAP" => Ok(Self::Map),
            "-X-PROGRAM-DATE-TIME" => Ok(Self::ProgramDateTime),
            "-X-GAP" => Ok(Self::Gap),
            "-X-BITRATE" => Ok(Self::Bitrate),
            "-X-PART" => Ok(Self::Part),
            "-X-DATERANGE" => Ok(Self::Daterange),
            "-X-SKIP" => Ok(Self::Skip),
            "-X-PRELOAD-HINT" => Ok(Self::PreloadHint),
            "-X-RENDITION-REPORT" => Ok(Self::RenditionReport),
            "-X-MEDIA" => Ok(Self::Media),
            "-X-STREAM-INF" => Ok(Self::StreamInf),
            "-X-I-FRAME-STREAM-INF" => Ok(Self::IFrameStreamInf),
            "-X-IMAGE-STREAM-INF" => Ok(Self::ImageStreamInf),
            "-X-SESSION-DATA" => Ok(Self::SessionData),
            "-X-SESSION-KEY" => Ok(Self::SessionKey),
            "-X-CONTENT-STEERING" => Ok(Self::ContentSteering),
            "-X-TILES" => Ok(Self::Tiles),
            "-X-ASSET" => Ok(Self::Asset),
            "-X-CUE-IN" => Ok(Self::CueIn),
            "-X-CUE-OUT" => Ok(Self::CueOut),
            "-X-CUE-OUT-CONT" => Ok(Self::CueOutCont),
            "-X-BLACKOUT" => Ok(Self::Blackout),
            "-OATCLS-SCTE35" => Ok(Self::OatclsScte35),
            "-X-SCTE35" => Ok(Self::Scte35),
            _ => Err(UnknownTagName),
        }
    }
}

impl TagName {
    /// The name as it appears in a playlist after the `#EXT` prefix.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::M3u => "M3U",
            Self::Version => "-X-VERSION",
            Self::IndependentSegments => "-X-INDEPENDENT-SEGMENTS",
            Self::Start => "-X-START",
            Self::Targetduration => "-X-TARGETDURATION",
            Self::MediaSequence => "-X-MEDIA-SEQUENCE",
            Self::DiscontinuitySequence => "-X-DISCONTINUITY-SEQUENCE",
            Self::Endlist => "-X-ENDLIST",
            Self::PlaylistType => "-X-PLAYLIST-TYPE",
            Self::AllowCache => "-X-ALLOW-CACHE",
            Self::IFramesOnly => "-X-I-FRAMES-ONLY",
            Self::ImagesOnly => "-X-IMAGES-ONLY",
            Self::PartInf => "-X-PART-INF",
            Self::ServerControl => "-X-SERVER-CONTROL",
            Self::Inf => "INF",
            Self::Byterange => "-X-BYTERANGE",
            Self::Discontinuity => "-X-DISCONTINUITY",
            Self::Key => "-X-KEY",
            Self::Map => "-X-MAP",
            Self::ProgramDateTime => "-X-PROGRAM-DATE-TIME",
            Self::Gap => "-X-GAP",
            Self::Bitrate => "-X-BITRATE",
            Self::Part => "-X-PART",
            Self::Daterange => "-X-DATERANGE",
            Self::Skip => "-X-SKIP",
            Self::PreloadHint => "-X-PRELOAD-HINT",
            Self::RenditionReport => "-X-RENDITION-REPORT",
            Self::Media => "-X-MEDIA",
            Self::StreamInf => "-X-STREAM-INF",
            Self::IFrameStreamInf => "-X-I-FRAME-STREAM-INF",
            Self::ImageStreamInf => "-X-IMAGE-STREAM-INF",
            Self::SessionData => "-X-SESSION-DATA",
            Self::SessionKey => "-X-SESSION-KEY",
            Self::ContentSteering => "-X-CONTENT-STEERING",
            Self::Tiles => "-X-TILES",
            Self::Asset => "-X-ASSET",
            Self::CueIn => "-X-CUE-IN",
            Self::CueOut => "-X-CUE-OUT",
            Self::CueOutCont => "-X-CUE-OUT-CONT",
            Self::Blackout => "-X-BLACKOUT",
            Self::OatclsScte35 => "-OATCLS-SCTE35",
            Self::Scte35 => "-X-SCTE35",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn round_trips_every_name() {
        let names = [
            TagName::M3u,
            TagName::Version,
            TagName::IndependentSegments,
            TagName::Start,
            TagName::Targetduration,
            TagName::MediaSequence,
            TagName::DiscontinuitySequence,
            TagName::Endlist,
            TagName::PlaylistType,
            TagName::AllowCache,
            TagName::IFramesOnly,
            TagName::ImagesOnly,
            TagName::PartInf,
            TagName::ServerControl,
            TagName::Inf,
            TagName::Byterange,
            TagName::Discontinuity,
            TagName::Key,
            TagName::Map,
            TagName::ProgramDateTime,
            TagName::Gap,
            TagName::Bitrate,
            TagName::Part,
            TagName::Daterange,
            TagName::Skip,
            TagName::PreloadHint,
            TagName::RenditionReport,
            TagName::Media,
            TagName::StreamInf,
            TagName::IFrameStreamInf,
            TagName::ImageStreamInf,
            TagName::SessionData,
            TagName::SessionKey,
            TagName::ContentSteering,
            TagName::Tiles,
            TagName::Asset,
            TagName::CueIn,
            TagName::CueOut,
            TagName::CueOutCont,
            TagName::Blackout,
            TagName::OatclsScte35,
            TagName::Scte35,
        ];
        for name in names {
            assert_eq!(Ok(name), TagName::try_from(name.as_str()));
        }
    }

    #[test]
    fn cue_out_and_cue_out_cont_are_distinct() {
        assert_eq!(Ok(TagName::CueOut), TagName::try_from("-X-CUE-OUT"));
        assert_eq!(Ok(TagName::CueOutCont), TagName::try_from("-X-CUE-OUT-CONT"));
    }

    #[test]
    fn unknown_names_are_rejected() {
        assert_eq!(Err(UnknownTagName), TagName::try_from("-X-NOT-A-TAG"));
        assert_eq!(Err(UnknownTagName), TagName::try_from(""));
    }
}
