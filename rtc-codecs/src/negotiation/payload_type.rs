use crate::codec::association::CodecAssociations;
use crate::codec::{DYNAMIC_PAYLOAD_TYPE_MAX, DYNAMIC_PAYLOAD_TYPE_MIN, PayloadType};
use shared::error::{Error, Result};

/// Returns the lowest dynamic payload type used by none of `maps`.
///
/// A key counts as used whether it holds a live association, a reservation or
/// a tombstone.
pub fn find_first_free_dynamic_payload_type(maps: &[&CodecAssociations]) -> Result<PayloadType> {
    (DYNAMIC_PAYLOAD_TYPE_MIN..=DYNAMIC_PAYLOAD_TYPE_MAX)
        .find(|pt| maps.iter().all(|map| !map.contains(*pt)))
        .ok_or(Error::ErrDynamicPayloadTypesExhausted)
}
