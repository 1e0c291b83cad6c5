use crate::codec::{Codec, MediaType};
use bitflags::bitflags;
use std::fmt;
use std::sync::Arc;

/// Opaque capability description produced by codec discovery.
///
/// This crate never interprets it, it is carried along so that pipeline
/// construction can build the codec chain for a winning association.
#[derive(Default, Debug, Clone, PartialEq, Eq, Hash)]
pub struct Caps(String);

impl Caps {
    pub fn new(caps: impl Into<String>) -> Self {
        Self(caps.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Caps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

bitflags! {
    /// What codec discovery found for a blueprint.
    #[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Hash)]
    pub struct BlueprintFlags: u8 {
        /// A receive (depayloader/decoder) chain exists.
        const HAS_SINK = 1 << 0;
        /// A send (encoder/payloader) chain exists.
        const HAS_SRC = 1 << 1;
        /// The send chain cannot be shared between sessions.
        const SEND_HAS_UNIQUE = 1 << 2;
        /// The receive chain cannot be shared between sessions.
        const RECV_HAS_UNIQUE = 1 << 3;
    }
}

/// A locally available codec capability template.
///
/// Blueprints are immutable once discovered; earlier blueprints in a list are
/// preferred over later ones.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct CodecBlueprint {
    pub codec: Codec,
    pub media_caps: Caps,
    pub rtp_caps: Caps,
    pub flags: BlueprintFlags,
}

impl CodecBlueprint {
    pub fn new(codec: Codec) -> Self {
        Self {
            codec,
            media_caps: Caps::default(),
            rtp_caps: Caps::default(),
            flags: BlueprintFlags::HAS_SINK | BlueprintFlags::HAS_SRC,
        }
    }

    pub fn with_caps(mut self, media_caps: Caps, rtp_caps: Caps) -> Self {
        self.media_caps = media_caps;
        self.rtp_caps = rtp_caps;
        self
    }

    pub fn with_flags(mut self, flags: BlueprintFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn media_type(&self) -> MediaType {
        self.codec.media_type
    }
}

/// The blueprints of every media type, owned by the caller and handed to the
/// local codec builder by reference.
#[derive(Default, Debug, Clone)]
pub struct BlueprintCatalog {
    audio: Vec<Arc<CodecBlueprint>>,
    video: Vec<Arc<CodecBlueprint>>,
}

impl BlueprintCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a blueprint at the lowest priority of its media type.
    /// Blueprints of an unspecified media type are ignored.
    pub fn add(&mut self, blueprint: CodecBlueprint) {
        match blueprint.media_type() {
            MediaType::Audio => self.audio.push(Arc::new(blueprint)),
            MediaType::Video => self.video.push(Arc::new(blueprint)),
            MediaType::Unspecified => {
                log::warn!(
                    "Ignoring blueprint without media type: {}",
                    blueprint.codec
                );
            }
        }
    }

    pub fn blueprints(&self, media_type: MediaType) -> &[Arc<CodecBlueprint>] {
        match media_type {
            MediaType::Audio => &self.audio,
            MediaType::Video => &self.video,
            MediaType::Unspecified => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.audio.is_empty() && self.video.is_empty()
    }
}

impl FromIterator<CodecBlueprint> for BlueprintCatalog {
    fn from_iter<I: IntoIterator<Item = CodecBlueprint>>(iter: I) -> Self {
        let mut catalog = BlueprintCatalog::new();
        for blueprint in iter {
            catalog.add(blueprint);
        }
        catalog
    }
}
