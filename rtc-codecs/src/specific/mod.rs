//! Per-codec SDP offer/answer negotiation (RFC 3264).
//!
//! The local codec is what we would put in an offer, the remote codec is what
//! the peer sent. [`sdp_negotiate_codec`] merges the two into what we would put
//! in an answer, or rejects the pair. How each optional parameter is merged is
//! decided by a static rule table keyed by media type and encoding name.


mod audio;
mod rules;
mod table;
mod video;

use crate::codec::{Codec, MediaType};
use bitflags::bitflags;
use log::trace;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use unicase::UniCase;

bitflags! {
    /// What an optional parameter describes, and which side of a
    /// negotiation a caller wants parameters considered from.
    #[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct ParamTypes: u8 {
        /// Constrains what the sender of the description may send.
        const SEND = 1 << 0;
        /// Describes what the sender of the description wants to receive.
        const RECV = 1 << 1;
        /// Send parameter whose change alone must not force a renegotiation.
        const SEND_AVOID_NEGOTIATION = 1 << 2;
        /// Out-of-band configuration data of the stream.
        const CONFIG = 1 << 3;
        /// The codec is unusable without this parameter.
        const MANDATORY = 1 << 4;

        const BOTH = Self::SEND.bits() | Self::RECV.bits();
        const ALL = Self::BOTH.bits()
            | Self::SEND_AVOID_NEGOTIATION.bits()
            | Self::CONFIG.bits()
            | Self::MANDATORY.bits();
    }
}

/// Merges one parameter.
///
/// `local` and `remote` are the values of the parameter on each side, already
/// filtered by the callers' parameter types. Writing the result into
/// `negotiated` is up to the function; returning `false` rejects the codec.
pub(crate) type NegotiateParamFn = fn(
    sdp_param: &SdpParam,
    name: &str,
    local: Option<&str>,
    remote: Option<&str>,
    negotiated: &mut Codec,
) -> bool;

/// Codec-wide check run on the (alias normalized) pair before any parameter.
pub(crate) type CodecCheckFn = fn(local: &Codec, remote: &Codec) -> bool;

#[derive(Copy, Clone)]
pub(crate) struct SdpParam {
    pub(crate) name: &'static str,
    pub(crate) param_types: ParamTypes,
    pub(crate) negotiate: NegotiateParamFn,
    pub(crate) default_value: Option<&'static str>,
    pub(crate) range: Option<(u32, u32)>,
}

impl SdpParam {
    pub(crate) const fn new(
        name: &'static str,
        param_types: ParamTypes,
        negotiate: NegotiateParamFn,
    ) -> Self {
        Self {
            name,
            param_types,
            negotiate,
            default_value: None,
            range: None,
        }
    }

    pub(crate) const fn with_default(self, default_value: &'static str) -> Self {
        Self {
            default_value: Some(default_value),
            ..self
        }
    }

    pub(crate) const fn with_range(self, min: u32, max: u32) -> Self {
        Self {
            range: Some((min, max)),
            ..self
        }
    }

    /// Is a value from a side negotiating with `side_types` taken into account.
    fn applies_to(&self, side_types: ParamTypes) -> bool {
        self.param_types.contains(ParamTypes::BOTH) || self.param_types.intersects(side_types)
    }
}

pub(crate) struct SdpNegoFunction {
    pub(crate) media_type: MediaType,
    pub(crate) encoding_name: &'static str,
    pub(crate) check: Option<CodecCheckFn>,
    /// (alias, canonical name) pairs, aliases are renamed before negotiation.
    pub(crate) aliases: &'static [(&'static str, &'static str)],
    pub(crate) params: &'static [SdpParam],
}

impl SdpNegoFunction {
    fn param(&self, name: &str) -> Option<&SdpParam> {
        self.params
            .iter()
            .find(|p| UniCase::new(p.name) == UniCase::new(name))
    }

    fn canonical_name<'a>(&self, name: &'a str) -> &'a str {
        self.aliases
            .iter()
            .find(|(alias, _)| UniCase::new(*alias) == UniCase::new(name))
            .map_or(name, |&(_, canonical)| canonical)
    }
}

fn find_nego_function(codec: &Codec) -> Option<&'static SdpNegoFunction> {
    table::SDP_NEGO_FUNCTIONS
        .iter()
        .find(|nf| nf.media_type == codec.media_type && codec.has_encoding_name(nf.encoding_name))
}

/// Rule for `name`, from the codec table, then the generic audio rules.
fn find_sdp_param(
    nf: Option<&'static SdpNegoFunction>,
    media_type: MediaType,
    name: &str,
) -> Option<&'static SdpParam> {
    nf.and_then(|nf| nf.param(name)).or_else(|| {
        if media_type == MediaType::Audio {
            table::AUDIO_PARAMS
                .iter()
                .find(|p| UniCase::new(p.name) == UniCase::new(name))
        } else {
            None
        }
    })
}

fn normalize_aliases<'a>(codec: &'a Codec, nf: Option<&SdpNegoFunction>) -> Cow<'a, Codec> {
    let Some(nf) = nf.filter(|nf| !nf.aliases.is_empty()) else {
        return Cow::Borrowed(codec);
    };
    if codec
        .parameters
        .iter()
        .all(|p| nf.canonical_name(&p.name) == p.name)
    {
        return Cow::Borrowed(codec);
    }

    let mut normalized = codec.clone();
    normalized.parameters.clear();
    for p in &codec.parameters {
        normalized.add_parameter(nf.canonical_name(&p.name), p.value.clone());
    }
    Cow::Owned(normalized)
}

#[allow(clippy::too_many_arguments)]
fn negotiate_param(
    nf: Option<&'static SdpNegoFunction>,
    media_type: MediaType,
    name: &str,
    local: Option<&str>,
    local_param_types: ParamTypes,
    remote: Option<&str>,
    remote_param_types: ParamTypes,
    negotiated: &mut Codec,
) -> bool {
    let sdp_param = find_sdp_param(nf, media_type, name).unwrap_or(&table::DEFAULT_PARAM);

    let local = local.filter(|_| sdp_param.applies_to(local_param_types));
    let remote = remote.filter(|_| sdp_param.applies_to(remote_param_types));
    if local.is_none() && remote.is_none() {
        trace!("Parameter {name} not considered from either side");
        return true;
    }

    let ok = (sdp_param.negotiate)(sdp_param, name, local, remote, negotiated);
    if !ok {
        trace!(
            "Parameter {name} vetoes the codec, local={:?} remote={:?}",
            local, remote
        );
    }
    ok
}

/// Performs SDP offer/answer negotiation on a single codec pair.
///
/// `local_param_types` and `remote_param_types` select which kinds of
/// parameters are taken from each side (see [`ParamTypes`]). Returns the
/// codec to answer with, based on the remote one, or `None` if the two
/// cannot be used together.
pub fn sdp_negotiate_codec(
    local_codec: &Codec,
    local_param_types: ParamTypes,
    remote_codec: &Codec,
    remote_param_types: ParamTypes,
) -> Option<Codec> {
    if local_codec.media_type != remote_codec.media_type {
        trace!(
            "Wrong media type, local: {}, remote: {}",
            local_codec.media_type, remote_codec.media_type
        );
        return None;
    }
    if !local_codec.has_encoding_name(&remote_codec.encoding_name) {
        trace!(
            "Encoding names dont match, local: {}, remote: {}",
            local_codec.encoding_name, remote_codec.encoding_name
        );
        return None;
    }
    if local_codec.clock_rate != 0
        && remote_codec.clock_rate != 0
        && local_codec.clock_rate != remote_codec.clock_rate
    {
        trace!(
            "Clock rates differ local={} remote={}",
            local_codec.clock_rate, remote_codec.clock_rate
        );
        return None;
    }
    if local_codec.channels != 0
        && remote_codec.channels != 0
        && local_codec.channels != remote_codec.channels
    {
        trace!(
            "Channel counts differ local={} remote={}",
            local_codec.channels, remote_codec.channels
        );
        return None;
    }

    let nf = find_nego_function(remote_codec);
    let local_codec = normalize_aliases(local_codec, nf);
    let remote_codec = normalize_aliases(remote_codec, nf);

    if let Some(check) = nf.and_then(|nf| nf.check) {
        if !check(&local_codec, &remote_codec) {
            return None;
        }
    }

    let mut negotiated = Codec {
        parameters: vec![],
        ..(*remote_codec).clone()
    };
    if negotiated.channels == 0 {
        negotiated.channels = local_codec.channels;
    }
    if negotiated.clock_rate == 0 {
        negotiated.clock_rate = local_codec.clock_rate;
    }

    for remote_param in &remote_codec.parameters {
        let local_value = local_codec.parameter_value(&remote_param.name);
        if !negotiate_param(
            nf,
            remote_codec.media_type,
            &remote_param.name,
            local_value,
            local_param_types,
            Some(&remote_param.value),
            remote_param_types,
            &mut negotiated,
        ) {
            return None;
        }
    }

    for local_param in &local_codec.parameters {
        if remote_codec.parameter(&local_param.name).is_some() {
            continue;
        }
        if !negotiate_param(
            nf,
            local_codec.media_type,
            &local_param.name,
            Some(&local_param.value),
            local_param_types,
            None,
            remote_param_types,
            &mut negotiated,
        ) {
            return None;
        }
    }

    Some(negotiated)
}

/// Returns true if the codec is receivable in principle but lacks mandatory
/// configuration data (a VORBIS or THEORA header for example) that has to
/// arrive out of band before it can be used.
pub fn codec_needs_config(codec: &Codec) -> bool {
    let Some(nf) = find_nego_function(codec) else {
        return false;
    };
    nf.params.iter().any(|p| {
        p.param_types
            .contains(ParamTypes::CONFIG | ParamTypes::MANDATORY)
            && codec.parameter(p.name).is_none()
    })
}

/// Is `name` a configuration parameter of this codec.
pub fn codec_has_config_data_named(codec: &Codec, name: &str) -> bool {
    find_nego_function(codec)
        .and_then(|nf| nf.param(name))
        .is_some_and(|p| p.param_types.contains(ParamTypes::CONFIG))
}

/// Copies a codec, dropping every parameter whose type intersects `param_types`.
pub fn codec_copy_filtered(codec: &Codec, param_types: ParamTypes) -> Codec {
    let nf = find_nego_function(codec);
    let mut copy = codec.clone();
    copy.parameters.retain(|p| {
        find_sdp_param(nf, codec.media_type, &p.name)
            .is_none_or(|sdp_param| !sdp_param.param_types.intersects(param_types))
    });
    copy
}

/// Copies a codec without its configuration parameters.
pub fn codec_copy_without_config(codec: &Codec) -> Codec {
    codec_copy_filtered(codec, ParamTypes::CONFIG)
}

/// Did the configuration data of any codec present in both lists change.
///
/// Codecs are paired by payload type and encoding name.
pub fn codecs_config_changed(old_codecs: &[Codec], new_codecs: &[Codec]) -> bool {
    new_codecs.iter().any(|new_codec| {
        let Some(old_codec) = old_codecs.iter().find(|c| {
            c.id == new_codec.id && c.has_encoding_name(&new_codec.encoding_name)
        }) else {
            return false;
        };

        let config_of = |codec: &Codec| {
            let mut config: Vec<(UniCase<String>, String)> = codec
                .parameters
                .iter()
                .filter(|p| codec_has_config_data_named(codec, &p.name))
                .map(|p| (UniCase::new(p.name.clone()), p.value.clone()))
                .collect();
            config.sort();
            config
        };
        config_of(old_codec) != config_of(new_codec)
    })
}

/// Did a codec change in a way that matters to what we send.
///
/// Configuration data and parameters flagged
/// [`ParamTypes::SEND_AVOID_NEGOTIATION`] are ignored.
pub fn codec_send_changed(old_codec: &Codec, new_codec: &Codec) -> bool {
    let ignored = ParamTypes::CONFIG | ParamTypes::SEND_AVOID_NEGOTIATION;
    !codec_copy_filtered(old_codec, ignored).are_equal(&codec_copy_filtered(new_codec, ignored))
}
