use super::payload_type::find_first_free_dynamic_payload_type;
use super::validate::{codec_matches_blueprint, find_matching_blueprint, validate_codecs_configuration};
use crate::codec::association::{CodecAssociation, CodecAssociations};
use crate::codec::blueprint::CodecBlueprint;
use crate::codec::{Codec, CodecId, MediaType, PayloadType};
use log::{debug, warn};
use shared::error::{Error, Result};
use std::sync::Arc;

/// What we offer for one media type.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct LocalCodecs {
    /// Offered codecs, most preferred first.
    pub codecs: Vec<Codec>,
    /// Offered codecs and payload type reservations.
    pub associations: CodecAssociations,
}

/// A codec before it has been given its payload type.
struct PendingCodec {
    blueprint: Option<Arc<CodecBlueprint>>,
    codec: Codec,
}

/// Builds the codec an accepted preference turns into with `blueprint`.
///
/// Values set in the preference win, the blueprint only fills in what the
/// preference leaves unset.
fn codec_from_preference(preference: &Codec, blueprint: &CodecBlueprint) -> Codec {
    let mut codec = preference.clone();
    if codec.payload_type().is_none() {
        codec.id = blueprint.codec.id;
    }
    if codec.clock_rate == 0 {
        codec.clock_rate = blueprint.codec.clock_rate;
    }
    if codec.channels == 0 {
        codec.channels = blueprint.codec.channels;
    }
    for p in &blueprint.codec.parameters {
        if codec.parameter(&p.name).is_none() {
            codec.add_parameter(p.name.as_str(), p.value.as_str());
        }
    }
    codec
}

/// Can `codec` keep the payload type `pt`.
///
/// Not if it is taken in the table being built, blocked by a tombstone, or
/// bound to another encoding by the current negotiation.
fn payload_type_is_usable(
    pt: PayloadType,
    codec: &Codec,
    current: &CodecAssociations,
    built: &CodecAssociations,
) -> bool {
    if built.contains(pt) {
        return false;
    }
    match current.lookup(pt) {
        None => true,
        Some(None) => false,
        Some(Some(ca)) => ca.codec.has_encoding_name(&codec.encoding_name),
    }
}

/// Gives `codec` a payload type and adds it to `local`.
///
/// Returns false once the dynamic range is exhausted.
fn add_codec(
    blueprint: Arc<CodecBlueprint>,
    mut codec: Codec,
    current: &CodecAssociations,
    local: &mut LocalCodecs,
) -> bool {
    let pt = match codec.payload_type() {
        Some(pt) if payload_type_is_usable(pt, &codec, current, &local.associations) => pt,
        _ => match find_first_free_dynamic_payload_type(&[current, &local.associations]) {
            Ok(pt) => pt,
            Err(err) => {
                warn!("Not adding {codec} and any codec after it: {err}");
                return false;
            }
        },
    };

    codec.id = CodecId::Payload(pt);
    debug!("Adding local codec {codec}");
    local
        .associations
        .insert(pt, CodecAssociation::new(blueprint, codec.clone()));
    local.codecs.push(codec);
    true
}

/// Builds the codecs we offer for `media_type`.
///
/// `blueprints` are the ones discovered for this media type, see
/// [`BlueprintCatalog::blueprints`](crate::codec::blueprint::BlueprintCatalog::blueprints).
/// Preferences come first, in their order, then every other blueprint that no
/// disable preference matches. Payload types already bound by the `current`
/// negotiation are kept for the same encoding and never handed to another.
/// A preference with an explicit payload type keeps it even when an earlier
/// preference needs one allocated. Running out of dynamic payload types
/// stops the build but keeps what was built so far.
pub fn create_local_codec_associations(
    media_type: MediaType,
    blueprints: &[Arc<CodecBlueprint>],
    codec_preferences: &[Codec],
    current: &CodecAssociations,
) -> Result<LocalCodecs> {
    let preferences = validate_codecs_configuration(media_type, blueprints, codec_preferences);
    let (disabled, preferences): (Vec<Codec>, Vec<Codec>) =
        preferences.into_iter().partition(|c| c.is_disable());

    let mut pending = vec![];
    for preference in &preferences {
        if preference.is_reserve_pt() {
            pending.push(PendingCodec {
                blueprint: None,
                codec: preference.clone(),
            });
            continue;
        }
        let Some(blueprint) = find_matching_blueprint(preference, blueprints) else {
            debug!("No blueprint for codec preference {preference}");
            continue;
        };
        pending.push(PendingCodec {
            blueprint: Some(Arc::clone(blueprint)),
            codec: codec_from_preference(preference, blueprint),
        });
    }

    let mut local = LocalCodecs::default();

    // explicit payload types and reservations go in before any allocation
    let mut placed = vec![false; pending.len()];
    for (PendingCodec { blueprint, codec }, is_placed) in pending.iter().zip(placed.iter_mut()) {
        let Some(pt) = codec.payload_type() else {
            continue;
        };
        match blueprint {
            Some(blueprint) => {
                if payload_type_is_usable(pt, codec, current, &local.associations) {
                    local
                        .associations
                        .insert(pt, CodecAssociation::new(Arc::clone(blueprint), codec.clone()));
                    *is_placed = true;
                }
            }
            None => {
                if local.associations.contains(pt) {
                    debug!("Payload type {pt} already taken, not reserving it");
                    continue;
                }
                debug!("Reserving payload type {pt}");
                local
                    .associations
                    .insert(pt, CodecAssociation::reserved(codec.clone()));
            }
        }
    }

    let mut exhausted = false;
    for (PendingCodec { blueprint, codec }, is_placed) in pending.into_iter().zip(placed) {
        let Some(blueprint) = blueprint else {
            continue;
        };
        if is_placed {
            debug!("Adding local codec {codec}");
            local.codecs.push(codec);
        } else if !exhausted && !add_codec(blueprint, codec, current, &mut local) {
            exhausted = true;
        }
    }

    if !exhausted {
        for blueprint in blueprints {
            if blueprint.codec.clock_rate == 0 {
                continue;
            }
            if local
                .associations
                .associations()
                .any(|(_, ca)| ca.has_blueprint(blueprint))
            {
                continue;
            }
            if disabled
                .iter()
                .any(|d| codec_matches_blueprint(d, blueprint))
            {
                debug!("Blueprint {} disabled by preferences", blueprint.codec);
                continue;
            }
            if !add_codec(
                Arc::clone(blueprint),
                blueprint.codec.clone(),
                current,
                &mut local,
            ) {
                break;
            }
        }
    }

    if local.codecs.is_empty() {
        return Err(Error::ErrNoUsableCodec);
    }
    Ok(local)
}
