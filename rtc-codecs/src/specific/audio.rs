use super::SdpParam;
use crate::codec::Codec;
use log::{trace, warn};

const ILBC_MODE_20: &str = "20";
const ILBC_MODE_30: &str = "30";

/// iLBC frame mode (RFC 3952): 20ms only if both sides ask for it.
pub(super) fn param_ilbc_mode(
    _sdp_param: &SdpParam,
    name: &str,
    local: Option<&str>,
    remote: Option<&str>,
    negotiated: &mut Codec,
) -> bool {
    let valid = |v: Option<&str>| v.is_none_or(|v| v == ILBC_MODE_20 || v == ILBC_MODE_30);
    if !valid(local) || !valid(remote) {
        warn!("Invalid iLBC mode local={local:?} remote={remote:?}");
        return false;
    }

    let mode = if local == Some(ILBC_MODE_20) && remote == Some(ILBC_MODE_20) {
        ILBC_MODE_20
    } else {
        ILBC_MODE_30
    };
    negotiated.add_parameter(name, mode);
    true
}

/// Parses "0-15,66" into sorted, merged, inclusive ranges.
pub(super) fn parse_events(events: &str) -> Option<Vec<(u32, u32)>> {
    let mut ranges = vec![];
    for item in events.split(',') {
        let item = item.trim();
        let (first, last) = match item.split_once('-') {
            Some((first, last)) => (first.trim(), last.trim()),
            None => (item, item),
        };
        if first.is_empty()
            || last.is_empty()
            || !first.bytes().all(|b| b.is_ascii_digit())
            || !last.bytes().all(|b| b.is_ascii_digit())
        {
            return None;
        }
        let first = first.parse::<u32>().ok()?;
        let last = last.parse::<u32>().ok()?;
        if first > last {
            return None;
        }
        ranges.push((first, last));
    }

    ranges.sort_unstable();
    let mut merged: Vec<(u32, u32)> = Vec::with_capacity(ranges.len());
    for (first, last) in ranges {
        match merged.last_mut() {
            Some(prev) if first <= prev.1.saturating_add(1) => prev.1 = prev.1.max(last),
            _ => merged.push((first, last)),
        }
    }
    Some(merged)
}

pub(super) fn format_events(ranges: &[(u32, u32)]) -> String {
    ranges
        .iter()
        .map(|&(first, last)| {
            if first == last {
                first.to_string()
            } else {
                format!("{first}-{last}")
            }
        })
        .collect::<Vec<_>>()
        .join(",")
}

fn intersect_events(a: &[(u32, u32)], b: &[(u32, u32)]) -> Vec<(u32, u32)> {
    let mut out = vec![];
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        let first = a[i].0.max(b[j].0);
        let last = a[i].1.min(b[j].1);
        if first <= last {
            out.push((first, last));
        }
        if a[i].1 < b[j].1 {
            i += 1;
        } else {
            j += 1;
        }
    }
    out
}

/// telephone-event supported events (RFC 4733), the intersection of both sides.
pub(super) fn param_telephone_events(
    _sdp_param: &SdpParam,
    name: &str,
    local: Option<&str>,
    remote: Option<&str>,
    negotiated: &mut Codec,
) -> bool {
    let (local, remote) = match (local, remote) {
        (Some(l), Some(r)) => (l, r),
        (Some(v), None) | (None, Some(v)) => {
            if parse_events(v).is_none() {
                warn!("Invalid telephone-event list {v}");
                return false;
            }
            negotiated.add_parameter(name, v);
            return true;
        }
        (None, None) => return true,
    };

    let (Some(local_events), Some(remote_events)) = (parse_events(local), parse_events(remote))
    else {
        warn!("Invalid telephone-event list local={local} remote={remote}");
        return false;
    };

    let events = intersect_events(&local_events, &remote_events);
    if events.is_empty() {
        trace!("No common telephone-event between {local} and {remote}");
        return false;
    }
    negotiated.add_parameter(name, format_events(&events));
    true
}
