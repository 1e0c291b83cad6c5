//! Codec descriptions exchanged between the local side and the peer.
//!
//! A [`Codec`] is an owned value: it is copied, never aliased, through every
//! negotiation step. Payload types 0-95 are static (assigned out of band, by
//! configuration or by the peer), 96-127 are dynamic and allocated by
//! [`crate::negotiation`].


pub mod association;
pub mod blueprint;

use serde::{Deserialize, Serialize};
use std::fmt;
use unicase::UniCase;

/// PayloadType identifies the format of the RTP payload and determines
/// its interpretation by the application. Each codec in a RTP Session
/// will have a different payload_type
/// <https://tools.ietf.org/html/rfc3550#section-3>
pub type PayloadType = u8;

/// Highest valid RTP payload type.
pub const PAYLOAD_TYPE_MAX: PayloadType = 127;
/// First payload type of the dynamic range.
pub const DYNAMIC_PAYLOAD_TYPE_MIN: PayloadType = 96;
/// Last payload type of the dynamic range.
pub const DYNAMIC_PAYLOAD_TYPE_MAX: PayloadType = PAYLOAD_TYPE_MAX;

/// Encoding name of a preference that only reserves its payload type.
pub const RESERVE_PT_ENCODING_NAME: &str = "reserve-pt";

const MEDIA_TYPE_AUDIO_STR: &str = "audio";
const MEDIA_TYPE_VIDEO_STR: &str = "video";
const UNSPECIFIED_STR: &str = "Unspecified";

/// Kind of media a codec carries.
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    /// Unspecified or unknown media type
    #[default]
    Unspecified = 0,

    /// Audio codec
    Audio = 1,

    /// Video codec
    Video = 2,
}

impl From<&str> for MediaType {
    fn from(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case(MEDIA_TYPE_AUDIO_STR) {
            MediaType::Audio
        } else if raw.eq_ignore_ascii_case(MEDIA_TYPE_VIDEO_STR) {
            MediaType::Video
        } else {
            MediaType::Unspecified
        }
    }
}

impl From<u8> for MediaType {
    fn from(v: u8) -> Self {
        match v {
            1 => MediaType::Audio,
            2 => MediaType::Video,
            _ => MediaType::Unspecified,
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            MediaType::Audio => MEDIA_TYPE_AUDIO_STR,
            MediaType::Video => MEDIA_TYPE_VIDEO_STR,
            MediaType::Unspecified => UNSPECIFIED_STR,
        };
        write!(f, "{s}")
    }
}

/// Identifier of a codec.
///
/// A preference either pins a payload type, leaves it to the allocator
/// ([`CodecId::Any`]) or is a negative entry removing every matching
/// blueprint from the local codecs ([`CodecId::Disable`]).
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CodecId {
    /// No payload type chosen yet.
    #[default]
    Any,
    /// Negative preference, never negotiated.
    Disable,
    /// A concrete RTP payload type in 0..=127.
    Payload(PayloadType),
}

impl CodecId {
    /// Returns the payload type if one is set.
    pub fn payload_type(&self) -> Option<PayloadType> {
        match *self {
            CodecId::Payload(pt) => Some(pt),
            _ => None,
        }
    }
}

/// Integer ids follow the convention of signaling layers:
/// 0..=127 is a payload type, -1 means any and other negative values disable.
impl From<i32> for CodecId {
    fn from(v: i32) -> Self {
        match v {
            -1 => CodecId::Any,
            v if v < 0 => CodecId::Disable,
            v if v <= PAYLOAD_TYPE_MAX as i32 => CodecId::Payload(v as PayloadType),
            _ => CodecId::Any,
        }
    }
}

impl From<PayloadType> for CodecId {
    fn from(pt: PayloadType) -> Self {
        if pt <= PAYLOAD_TYPE_MAX {
            CodecId::Payload(pt)
        } else {
            CodecId::Any
        }
    }
}

impl fmt::Display for CodecId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            CodecId::Any => write!(f, "-1"),
            CodecId::Disable => write!(f, "-2"),
            CodecId::Payload(pt) => write!(f, "{pt}"),
        }
    }
}

/// A single optional (fmtp) parameter of a codec.
#[derive(Default, Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CodecParameter {
    pub name: String,
    pub value: String,
}

impl CodecParameter {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Codec description as carried by the signaling layer.
///
/// `clock_rate` and `channels` use 0 for "unset". Optional parameters keep
/// their insertion order and are unique by (case-insensitive) name.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Codec {
    pub id: CodecId,
    pub media_type: MediaType,
    pub encoding_name: String,
    pub clock_rate: u32,
    pub channels: u32,
    pub parameters: Vec<CodecParameter>,
}

impl Codec {
    pub fn new(
        id: impl Into<CodecId>,
        encoding_name: impl Into<String>,
        media_type: MediaType,
        clock_rate: u32,
    ) -> Self {
        Self {
            id: id.into(),
            media_type,
            encoding_name: encoding_name.into(),
            clock_rate,
            channels: 0,
            parameters: vec![],
        }
    }

    pub fn with_channels(mut self, channels: u32) -> Self {
        self.channels = channels;
        self
    }

    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.add_parameter(name, value);
        self
    }

    pub fn payload_type(&self) -> Option<PayloadType> {
        self.id.payload_type()
    }

    /// Case-insensitive encoding name comparison.
    pub fn has_encoding_name(&self, encoding_name: &str) -> bool {
        UniCase::new(self.encoding_name.as_str()) == UniCase::new(encoding_name)
    }

    /// True for a negative ("disable") preference.
    pub fn is_disable(&self) -> bool {
        self.id == CodecId::Disable
    }

    /// True for a preference that only reserves its payload type.
    pub fn is_reserve_pt(&self) -> bool {
        self.has_encoding_name(RESERVE_PT_ENCODING_NAME)
    }

    pub fn parameter(&self, name: &str) -> Option<&CodecParameter> {
        self.parameters
            .iter()
            .find(|p| UniCase::new(p.name.as_str()) == UniCase::new(name))
    }

    pub fn parameter_value(&self, name: &str) -> Option<&str> {
        self.parameter(name).map(|p| p.value.as_str())
    }

    /// Sets a parameter, replacing the value of an existing one with the same name.
    pub fn add_parameter(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if let Some(p) = self
            .parameters
            .iter_mut()
            .find(|p| UniCase::new(p.name.as_str()) == UniCase::new(name.as_str()))
        {
            p.value = value;
        } else {
            self.parameters.push(CodecParameter { name, value });
        }
    }

    pub fn remove_parameter(&mut self, name: &str) -> Option<CodecParameter> {
        let index = self
            .parameters
            .iter()
            .position(|p| UniCase::new(p.name.as_str()) == UniCase::new(name))?;
        Some(self.parameters.remove(index))
    }

    /// Compares two codecs, ignoring the order of their optional parameters.
    pub fn are_equal(&self, other: &Codec) -> bool {
        self.id == other.id
            && self.media_type == other.media_type
            && self.clock_rate == other.clock_rate
            && self.channels == other.channels
            && self.encoding_name == other.encoding_name
            && self.parameters.len() == other.parameters.len()
            && self.parameters.iter().all(|p| other.parameters.contains(p))
    }
}

impl fmt::Display for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} {} clock:{} channels:{}",
            self.id, self.media_type, self.encoding_name, self.clock_rate, self.channels
        )?;
        for p in &self.parameters {
            write!(f, " {}={}", p.name, p.value)?;
        }
        Ok(())
    }
}

/// Verifies that two codec lists hold pairwise equal codecs in the same order.
pub fn codec_lists_are_equal(a: &[Codec], b: &[Codec]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.are_equal(y))
}
