//! Generic parameter merging rules shared by many codecs.

use super::SdpParam;
use crate::codec::Codec;
use unicase::UniCase;

/// Parses a numeric value, values out of the parameter's valid range count as absent.
pub(super) fn parse_in_range(sdp_param: &SdpParam, value: Option<&str>) -> Option<u32> {
    let v = value?.trim().parse::<u32>().ok()?;
    match sdp_param.range {
        Some((min, max)) if v < min || v > max => None,
        _ => Some(v),
    }
}

/// Like [`parse_in_range`] but falls back to the declared default.
fn numeric_or_default(sdp_param: &SdpParam, value: Option<&str>) -> Option<u32> {
    parse_in_range(sdp_param, value).or_else(|| parse_in_range(sdp_param, sdp_param.default_value))
}

fn numeric_merge(
    sdp_param: &SdpParam,
    name: &str,
    local: Option<&str>,
    remote: Option<&str>,
    negotiated: &mut Codec,
    merge: fn(u32, u32) -> u32,
) -> bool {
    let local = numeric_or_default(sdp_param, local);
    let remote = numeric_or_default(sdp_param, remote);

    let value = match (local, remote) {
        (Some(l), Some(r)) => merge(l, r),
        (Some(v), None) | (None, Some(v)) => v,
        (None, None) => return true,
    };
    negotiated.add_parameter(name, value.to_string());
    true
}

pub(super) fn param_minimum(
    sdp_param: &SdpParam,
    name: &str,
    local: Option<&str>,
    remote: Option<&str>,
    negotiated: &mut Codec,
) -> bool {
    numeric_merge(sdp_param, name, local, remote, negotiated, std::cmp::min)
}

pub(super) fn param_maximum(
    sdp_param: &SdpParam,
    name: &str,
    local: Option<&str>,
    remote: Option<&str>,
    negotiated: &mut Codec,
) -> bool {
    numeric_merge(sdp_param, name, local, remote, negotiated, std::cmp::max)
}

/// The maximum, but only when both sides set a valid value. Dropped otherwise.
pub(super) fn param_both_maximum(
    sdp_param: &SdpParam,
    name: &str,
    local: Option<&str>,
    remote: Option<&str>,
    negotiated: &mut Codec,
) -> bool {
    if let (Some(l), Some(r)) = (
        parse_in_range(sdp_param, local),
        parse_in_range(sdp_param, remote),
    ) {
        negotiated.add_parameter(name, l.max(r).to_string());
    }
    true
}

pub(super) fn param_equal_or_ignore(
    _sdp_param: &SdpParam,
    name: &str,
    local: Option<&str>,
    remote: Option<&str>,
    negotiated: &mut Codec,
) -> bool {
    if let (Some(l), Some(r)) = (local, remote) {
        if l == r {
            negotiated.add_parameter(name, r);
        }
    }
    true
}

pub(super) fn param_equal_or_reject(
    sdp_param: &SdpParam,
    name: &str,
    local: Option<&str>,
    remote: Option<&str>,
    negotiated: &mut Codec,
) -> bool {
    let local = local.or(sdp_param.default_value);
    let remote = remote.or(sdp_param.default_value);

    match (local, remote) {
        (Some(l), Some(r)) if l != r => false,
        (_, Some(v)) | (Some(v), None) => {
            negotiated.add_parameter(name, v);
            true
        }
        (None, None) => true,
    }
}

/// Keeps an agreed value, or else the side that moved away from the default.
pub(super) fn param_equal_or_not_default(
    sdp_param: &SdpParam,
    name: &str,
    local: Option<&str>,
    remote: Option<&str>,
    negotiated: &mut Codec,
) -> bool {
    if let (Some(l), Some(r)) = (local, remote) {
        if l == r {
            negotiated.add_parameter(name, r);
            return true;
        }
    }

    let Some(default_value) = sdp_param.default_value else {
        return true;
    };
    if let Some(v) = remote
        .filter(|r| *r != default_value)
        .or_else(|| local.filter(|l| *l != default_value))
    {
        negotiated.add_parameter(name, v);
    }
    true
}

/// Intersection of two comma separated lists, in remote order.
pub(super) fn param_list_commas(
    _sdp_param: &SdpParam,
    name: &str,
    local: Option<&str>,
    remote: Option<&str>,
    negotiated: &mut Codec,
) -> bool {
    match (local, remote) {
        (Some(l), Some(r)) => {
            let local_items: Vec<UniCase<&str>> = l
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(UniCase::new)
                .collect();
            let intersection: Vec<&str> = r
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty() && local_items.contains(&UniCase::new(*s)))
                .collect();
            if !intersection.is_empty() {
                negotiated.add_parameter(name, intersection.join(","));
            }
        }
        (Some(v), None) | (None, Some(v)) => negotiated.add_parameter(name, v),
        (None, None) => {}
    }
    true
}

/// Opaque data, copied through unexamined with the remote side winning.
pub(super) fn param_copy(
    _sdp_param: &SdpParam,
    name: &str,
    local: Option<&str>,
    remote: Option<&str>,
    negotiated: &mut Codec,
) -> bool {
    if let Some(v) = remote.or(local) {
        negotiated.add_parameter(name, v);
    }
    true
}
