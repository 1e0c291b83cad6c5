use super::SdpParam;
use crate::codec::Codec;
use log::{trace, warn};
use unicase::UniCase;

fn parse_fields(value: &str) -> Option<Vec<u32>> {
    value
        .split(',')
        .map(|f| f.trim().parse::<u32>().ok())
        .collect()
}

/// H.263-1998/2000 "custom" (Xmax,Ymax,MPI) and "cpcf" (cd,cf,MPI...) values.
///
/// Only merged when the two leading fields (picture size or clock divisor)
/// agree; the remaining fields take the component-wise maximum.
pub(super) fn param_h263_1998_custom(
    _sdp_param: &SdpParam,
    name: &str,
    local: Option<&str>,
    remote: Option<&str>,
    negotiated: &mut Codec,
) -> bool {
    let (Some(local), Some(remote)) = (local, remote) else {
        return true;
    };
    let (Some(local_fields), Some(remote_fields)) = (parse_fields(local), parse_fields(remote))
    else {
        trace!("Invalid {name} local={local} remote={remote}");
        return true;
    };
    if local_fields.len() < 3
        || local_fields.len() != remote_fields.len()
        || local_fields[..2] != remote_fields[..2]
    {
        trace!("{name} {local} and {remote} do not describe the same format");
        return true;
    }

    let merged = local_fields
        .iter()
        .zip(&remote_fields)
        .map(|(l, r)| l.max(r).to_string())
        .collect::<Vec<_>>()
        .join(",");
    negotiated.add_parameter(name, merged);
    true
}

/// Splits a H.264 profile-level-id into (profile_idc, profile_iop, level_idc).
pub(super) fn parse_profile_level_id(value: &str) -> Option<(u8, u8, u8)> {
    let value = value.trim();
    if value.len() != 6 || !value.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let v = u32::from_str_radix(value, 16).ok()?;
    Some(((v >> 16) as u8, (v >> 8) as u8, v as u8))
}

/// H.264 profile-level-id (RFC 6184). Without agreement on the profile the
/// parameter is dropped, which means baseline.
pub(super) fn param_h264_profile_level_id(
    _sdp_param: &SdpParam,
    name: &str,
    local: Option<&str>,
    remote: Option<&str>,
    negotiated: &mut Codec,
) -> bool {
    let (Some(local), Some(remote)) = (local, remote) else {
        return true;
    };
    let (Some(l), Some(r)) = (
        parse_profile_level_id(local),
        parse_profile_level_id(remote),
    ) else {
        trace!("Invalid {name} local={local} remote={remote}");
        return true;
    };
    if l.0 != r.0 {
        trace!("Different H.264 profiles local={local} remote={remote}");
        return true;
    }

    negotiated.add_parameter(name, format!("{:02X}{:02X}{:02X}", l.0, l.1 | r.1, l.2.min(r.2)));
    true
}

/// H.263-2000: a profile is meaningless without a level, and may be given only once.
pub(super) fn check_h263_2000(local: &Codec, remote: &Codec) -> bool {
    let valid = |codec: &Codec| {
        let count = |name: &str| {
            codec
                .parameters
                .iter()
                .filter(|p| UniCase::new(p.name.as_str()) == UniCase::new(name))
                .count()
        };
        let profiles = count("profile");
        profiles <= 1 && (profiles == 0 || count("level") > 0)
    };

    if !valid(local) || !valid(remote) {
        warn!("H263-2000 profile without level or given more than once");
        return false;
    }
    true
}
