use crate::codec::blueprint::CodecBlueprint;
use crate::codec::{Codec, MediaType};
use log::debug;
use std::sync::Arc;

/// Can `codec` be implemented by `blueprint`.
///
/// Encoding and parameter names compare case-insensitively, clock rates must
/// agree unless one side leaves it unset, and parameters named on both sides
/// must hold identical values.
pub fn codec_matches_blueprint(codec: &Codec, blueprint: &CodecBlueprint) -> bool {
    let bp = &blueprint.codec;

    if codec.media_type != bp.media_type || !codec.has_encoding_name(&bp.encoding_name) {
        return false;
    }
    if codec.clock_rate != 0 && bp.clock_rate != 0 && codec.clock_rate != bp.clock_rate {
        return false;
    }

    codec
        .parameters
        .iter()
        .all(|p| bp.parameter_value(&p.name).is_none_or(|v| v == p.value))
}

/// The first (most preferred) blueprint implementing `codec`.
pub fn find_matching_blueprint<'a>(
    codec: &Codec,
    blueprints: &'a [Arc<CodecBlueprint>],
) -> Option<&'a Arc<CodecBlueprint>> {
    blueprints
        .iter()
        .find(|bp| codec_matches_blueprint(codec, bp))
}

/// Filters user codec preferences down to the ones that can be honoured.
///
/// Disable entries and payload type reservations are kept untouched. Any other
/// preference is dropped when it is of another media type, or when no blueprint
/// implements it. Order is preserved.
pub fn validate_codecs_configuration(
    media_type: MediaType,
    blueprints: &[Arc<CodecBlueprint>],
    codecs: &[Codec],
) -> Vec<Codec> {
    codecs
        .iter()
        .filter(|codec| {
            if codec.is_disable() {
                return true;
            }
            if codec.is_reserve_pt() {
                if codec.payload_type().is_some() {
                    return true;
                }
                debug!("Payload type reservation without payload type: {codec}");
                return false;
            }

            if codec.encoding_name.is_empty() {
                debug!("Codec preference without encoding name: {codec}");
                return false;
            }
            if codec.media_type != media_type {
                debug!(
                    "Codec preference of media type {} in a {media_type} session: {codec}",
                    codec.media_type
                );
                return false;
            }
            if find_matching_blueprint(codec, blueprints).is_none() {
                debug!("Codec preference {codec} rejected, no matching blueprint");
                return false;
            }
            true
        })
        .cloned()
        .collect()
}
