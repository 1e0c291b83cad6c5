use crate::codec::association::{CodecAssociation, CodecAssociations};
use crate::codec::{Codec, CodecId, PAYLOAD_TYPE_MAX, PayloadType};
use crate::configuration::NegotiationConfig;
use crate::specific::sdp_negotiate_codec;
use log::{debug, warn};
use shared::error::{Error, Result};
use std::collections::BTreeSet;

/// Outcome of negotiating against a remote codec list.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct NegotiatedCodecs {
    /// Codecs usable with the peer, in the peer's preference order.
    pub codecs: Vec<Codec>,
    /// Negotiated codecs, reservations kept for our other local codecs and
    /// tombstones for every payload type that must not be reused.
    pub associations: CodecAssociations,
}

fn negotiate_with_local_association<'a>(
    pt: PayloadType,
    remote_codec: &Codec,
    local_associations: &'a CodecAssociations,
    config: &NegotiationConfig,
) -> Option<(&'a CodecAssociation, Codec)> {
    let ca = local_associations.get(pt).filter(|ca| !ca.is_reserved())?;
    let codec = sdp_negotiate_codec(
        &ca.codec,
        config.local_param_types(),
        remote_codec,
        config.remote_param_types(),
    )?;
    Some((ca, codec))
}

/// Finds the local codec a remote codec negotiates with.
///
/// The local codec at the remote payload type is tried first, then every local
/// codec in offer order, then any other live local association.
fn find_local_match<'a>(
    remote_codec: &Codec,
    local_associations: &'a CodecAssociations,
    local_codecs: &[Codec],
    config: &NegotiationConfig,
) -> Option<(PayloadType, &'a CodecAssociation, Codec)> {
    remote_codec
        .payload_type()
        .into_iter()
        .chain(local_codecs.iter().filter_map(Codec::payload_type))
        .chain(local_associations.associations().map(|(pt, _)| pt))
        .find_map(|pt| {
            negotiate_with_local_association(pt, remote_codec, local_associations, config)
                .map(|(ca, codec)| (pt, ca, codec))
        })
}

/// Negotiates the remote codecs against ours.
///
/// See [`negotiate_codecs_with_config`], with default parameter types.
pub fn negotiate_codecs(
    remote_codecs: &[Codec],
    local_associations: &CodecAssociations,
    local_codecs: &[Codec],
    previous: Option<&CodecAssociations>,
    use_local_ids: bool,
) -> Result<NegotiatedCodecs> {
    let mut config = NegotiationConfig::default();
    config.set_use_local_ids(use_local_ids);
    negotiate_codecs_with_config(
        remote_codecs,
        local_associations,
        local_codecs,
        previous,
        &config,
    )
}

/// Negotiates the remote codecs against ours.
///
/// Every remote codec is matched against the local codecs and the merged codec
/// is recorded at the remote payload type, or at the local one when
/// `use_local_ids` is set and it is still free. A remote codec that matches
/// nothing leaves a tombstone at its payload type.
///
/// Payload types of local codecs the peer did not pick are then kept as
/// reservations, and every other payload type used locally or by the
/// `previous` negotiation is tombstoned, so a later round cannot rebind them
/// to a different encoding.
///
/// Fails when no remote codec could be negotiated.
pub fn negotiate_codecs_with_config(
    remote_codecs: &[Codec],
    local_associations: &CodecAssociations,
    local_codecs: &[Codec],
    previous: Option<&CodecAssociations>,
    config: &NegotiationConfig,
) -> Result<NegotiatedCodecs> {
    if remote_codecs.is_empty() {
        return Err(Error::ErrNoRemoteCodecs);
    }

    let mut negotiated = NegotiatedCodecs::default();
    let mut seen_remote_pts = BTreeSet::new();

    for remote_codec in remote_codecs {
        let Some(remote_pt) = remote_codec.payload_type() else {
            warn!("Ignoring remote codec without payload type: {remote_codec}");
            continue;
        };
        if !seen_remote_pts.insert(remote_pt) {
            warn!("Ignoring remote codec with duplicate payload type: {remote_codec}");
            continue;
        }
        debug!("Remote codec {remote_codec}");

        let Some((local_pt, ca, mut codec)) =
            find_local_match(remote_codec, local_associations, local_codecs, config)
        else {
            debug!("No local codec matches remote codec {remote_codec}");
            if !negotiated.associations.contains(remote_pt) {
                negotiated.associations.tombstone(remote_pt);
            }
            continue;
        };

        let pt = if config.use_local_ids() && !negotiated.associations.contains(local_pt) {
            local_pt
        } else if !negotiated.associations.contains(remote_pt) {
            remote_pt
        } else {
            warn!("Payload type {remote_pt} already negotiated, ignoring {remote_codec}");
            continue;
        };

        codec.id = CodecId::Payload(pt);
        debug!("Negotiated codec {codec}");
        negotiated.associations.insert(
            pt,
            CodecAssociation {
                blueprint: ca.blueprint.clone(),
                codec: codec.clone(),
            },
        );
        negotiated.codecs.push(codec);
    }

    if negotiated.codecs.is_empty() {
        return Err(Error::ErrNoCompatibleCodec);
    }

    for pt in 0..=PAYLOAD_TYPE_MAX {
        if negotiated.associations.contains(pt) {
            continue;
        }
        match local_associations.lookup(pt) {
            Some(Some(ca)) if !ca.is_reserved() => {
                negotiated
                    .associations
                    .insert(pt, CodecAssociation::reserved(ca.codec.clone()));
            }
            Some(_) => negotiated.associations.tombstone(pt),
            None => {
                if previous.is_some_and(|previous| previous.contains(pt)) {
                    negotiated.associations.tombstone(pt);
                }
            }
        }
    }

    Ok(negotiated)
}
