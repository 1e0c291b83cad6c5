//! Which rule negotiates which parameter of which codec.

use super::audio::{param_ilbc_mode, param_telephone_events};
use super::rules::*;
use super::video::{check_h263_2000, param_h263_1998_custom, param_h264_profile_level_id};
use super::{ParamTypes, SdpNegoFunction, SdpParam};
use crate::codec::MediaType;

const SEND: ParamTypes = ParamTypes::SEND;
const RECV: ParamTypes = ParamTypes::RECV;
const BOTH: ParamTypes = ParamTypes::BOTH;
const SEND_AVOID_NEGOTIATION: ParamTypes = ParamTypes::SEND.union(ParamTypes::SEND_AVOID_NEGOTIATION);
const CONFIG: ParamTypes = ParamTypes::CONFIG;
const MANDATORY_CONFIG: ParamTypes = ParamTypes::CONFIG.union(ParamTypes::MANDATORY);

/// Applied to parameters of no table: equal or reject, copied if one sided.
pub(super) static DEFAULT_PARAM: SdpParam = SdpParam::new("", BOTH, param_equal_or_reject);

/// Fallbacks for any audio codec.
pub(super) const AUDIO_PARAMS: &[SdpParam] = &[
    SdpParam::new("ptime", RECV, param_minimum),
    SdpParam::new("maxptime", RECV, param_minimum),
];

const H261_PARAMS: &[SdpParam] = &[
    SdpParam::new("qcif", RECV, param_both_maximum).with_range(1, 4),
    SdpParam::new("cif", RECV, param_both_maximum).with_range(1, 4),
    SdpParam::new("d", RECV, param_equal_or_ignore),
];

const H263_PARAMS: &[SdpParam] = &[
    SdpParam::new("sqcif", RECV, param_both_maximum).with_range(1, 32),
    SdpParam::new("qcif", RECV, param_both_maximum).with_range(1, 32),
    SdpParam::new("cif", RECV, param_both_maximum).with_range(1, 32),
    SdpParam::new("cif4", RECV, param_both_maximum).with_range(1, 32),
    SdpParam::new("cif16", RECV, param_both_maximum).with_range(1, 32),
    SdpParam::new("custom", RECV, param_h263_1998_custom),
    SdpParam::new("d", RECV, param_equal_or_ignore),
    SdpParam::new("e", RECV, param_equal_or_ignore),
    SdpParam::new("f", RECV, param_equal_or_ignore),
    SdpParam::new("g", RECV, param_equal_or_ignore),
    SdpParam::new("bpp", RECV, param_minimum),
    SdpParam::new("hrd", RECV, param_equal_or_ignore),
];

const H263_1998_PARAMS: &[SdpParam] = &[
    SdpParam::new("sqcif", RECV, param_both_maximum).with_range(1, 32),
    SdpParam::new("qcif", RECV, param_both_maximum).with_range(1, 32),
    SdpParam::new("cif", RECV, param_both_maximum).with_range(1, 32),
    SdpParam::new("cif4", RECV, param_both_maximum).with_range(1, 32),
    SdpParam::new("cif16", RECV, param_both_maximum).with_range(1, 32),
    SdpParam::new("custom", RECV, param_h263_1998_custom),
    SdpParam::new("cpcf", RECV, param_h263_1998_custom),
    SdpParam::new("f", RECV, param_equal_or_ignore),
    SdpParam::new("i", RECV, param_equal_or_ignore),
    SdpParam::new("j", RECV, param_equal_or_ignore),
    SdpParam::new("t", RECV, param_equal_or_ignore),
    SdpParam::new("k", RECV, param_equal_or_ignore),
    SdpParam::new("n", RECV, param_equal_or_ignore),
    SdpParam::new("p", RECV, param_equal_or_ignore),
    SdpParam::new("par", RECV, param_equal_or_ignore),
    SdpParam::new("bpp", RECV, param_minimum),
    SdpParam::new("hrd", RECV, param_equal_or_ignore),
    SdpParam::new("interlace", RECV, param_equal_or_ignore),
];

const H263_2000_PARAMS: &[SdpParam] = &[
    SdpParam::new("profile", BOTH, param_equal_or_reject)
        .with_default("0")
        .with_range(0, 10),
    SdpParam::new("level", BOTH, param_minimum)
        .with_default("10")
        .with_range(0, 100),
    SdpParam::new("sqcif", RECV, param_both_maximum).with_range(1, 32),
    SdpParam::new("qcif", RECV, param_both_maximum).with_range(1, 32),
    SdpParam::new("cif", RECV, param_both_maximum).with_range(1, 32),
    SdpParam::new("cif4", RECV, param_both_maximum).with_range(1, 32),
    SdpParam::new("cif16", RECV, param_both_maximum).with_range(1, 32),
    SdpParam::new("custom", RECV, param_h263_1998_custom),
    SdpParam::new("cpcf", RECV, param_h263_1998_custom),
    SdpParam::new("par", RECV, param_equal_or_ignore),
    SdpParam::new("interlace", RECV, param_equal_or_ignore),
];

const H264_PARAMS: &[SdpParam] = &[
    SdpParam::new("profile-level-id", BOTH, param_h264_profile_level_id),
    SdpParam::new("max-mbps", SEND_AVOID_NEGOTIATION, param_minimum),
    SdpParam::new("max-fs", SEND_AVOID_NEGOTIATION, param_minimum),
    SdpParam::new("max-cpb", SEND_AVOID_NEGOTIATION, param_minimum),
    SdpParam::new("max-dpb", SEND_AVOID_NEGOTIATION, param_minimum),
    SdpParam::new("max-br", SEND_AVOID_NEGOTIATION, param_minimum),
    SdpParam::new("packetization-mode", BOTH, param_equal_or_reject).with_default("0"),
    SdpParam::new("sprop-parameter-sets", CONFIG, param_copy),
    SdpParam::new("sprop-level-parameter-sets", CONFIG, param_copy),
    SdpParam::new("sprop-interleaving-depth", CONFIG, param_copy),
    SdpParam::new("sprop-deint-buf-req", CONFIG, param_copy),
    SdpParam::new("sprop-max-don-diff", CONFIG, param_copy),
    SdpParam::new("sprop-init-buf-time", CONFIG, param_copy),
    SdpParam::new("deint-buf-cap", SEND, param_minimum),
    SdpParam::new("max-rcmd-nalu-size", SEND, param_minimum),
];

const MP4V_ES_PARAMS: &[SdpParam] = &[
    SdpParam::new("profile-level-id", RECV, param_minimum),
    SdpParam::new("config", CONFIG, param_copy),
];

const THEORA_PARAMS: &[SdpParam] = &[
    SdpParam::new("configuration", MANDATORY_CONFIG, param_copy),
    SdpParam::new("sampling", BOTH, param_equal_or_reject),
    SdpParam::new("width", BOTH, param_equal_or_reject),
    SdpParam::new("height", BOTH, param_equal_or_reject),
    SdpParam::new("delivery-method", BOTH, param_list_commas),
];

const VORBIS_PARAMS: &[SdpParam] = &[
    SdpParam::new("configuration", MANDATORY_CONFIG, param_copy),
    SdpParam::new("delivery-method", BOTH, param_list_commas),
];

const AMR_PARAMS: &[SdpParam] = &[
    SdpParam::new("octet-align", BOTH, param_equal_or_reject).with_default("0"),
    SdpParam::new("crc", BOTH, param_equal_or_reject).with_default("0"),
    SdpParam::new("robust-sorting", BOTH, param_equal_or_reject).with_default("0"),
    SdpParam::new("interleaving", BOTH, param_equal_or_reject),
    SdpParam::new("mode-set", BOTH, param_list_commas),
    SdpParam::new("mode-change-period", SEND, param_maximum),
    SdpParam::new("mode-change-neighbor", SEND, param_equal_or_ignore),
];

const G729_PARAMS: &[SdpParam] = &[
    SdpParam::new("annexb", BOTH, param_equal_or_not_default).with_default("yes"),
];

const G7221_PARAMS: &[SdpParam] = &[SdpParam::new("bitrate", BOTH, param_equal_or_reject)];

const ILBC_PARAMS: &[SdpParam] = &[SdpParam::new("mode", BOTH, param_ilbc_mode)];

const TELEPHONE_EVENT_PARAMS: &[SdpParam] =
    &[SdpParam::new("events", BOTH, param_telephone_events)];

const fn nego_function(
    media_type: MediaType,
    encoding_name: &'static str,
    params: &'static [SdpParam],
) -> SdpNegoFunction {
    SdpNegoFunction {
        media_type,
        encoding_name,
        check: None,
        aliases: &[],
        params,
    }
}

pub(super) static SDP_NEGO_FUNCTIONS: &[SdpNegoFunction] = &[
    nego_function(MediaType::Video, "H261", H261_PARAMS),
    nego_function(MediaType::Video, "H263", H263_PARAMS),
    nego_function(MediaType::Video, "H263-1998", H263_1998_PARAMS),
    SdpNegoFunction {
        check: Some(check_h263_2000),
        ..nego_function(MediaType::Video, "H263-2000", H263_2000_PARAMS)
    },
    nego_function(MediaType::Video, "H264", H264_PARAMS),
    nego_function(MediaType::Video, "MP4V-ES", MP4V_ES_PARAMS),
    nego_function(MediaType::Video, "THEORA", THEORA_PARAMS),
    nego_function(MediaType::Audio, "VORBIS", VORBIS_PARAMS),
    nego_function(MediaType::Audio, "AMR", AMR_PARAMS),
    nego_function(MediaType::Audio, "G729", G729_PARAMS),
    nego_function(MediaType::Audio, "G7221", G7221_PARAMS),
    nego_function(MediaType::Audio, "iLBC", ILBC_PARAMS),
    SdpNegoFunction {
        aliases: &[("", "events")],
        ..nego_function(MediaType::Audio, "telephone-event", TELEPHONE_EVENT_PARAMS)
    },
];
