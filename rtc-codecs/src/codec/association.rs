use crate::codec::blueprint::CodecBlueprint;
use crate::codec::{Codec, PayloadType};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Binds a codec to the blueprint that implements it.
///
/// An association without a blueprint is a reservation: it holds its payload
/// type but is never offered nor negotiated.
#[derive(Debug, Clone, PartialEq)]
pub struct CodecAssociation {
    pub blueprint: Option<Arc<CodecBlueprint>>,
    pub codec: Codec,
}

impl CodecAssociation {
    pub fn new(blueprint: Arc<CodecBlueprint>, codec: Codec) -> Self {
        Self {
            blueprint: Some(blueprint),
            codec,
        }
    }

    pub fn reserved(codec: Codec) -> Self {
        Self {
            blueprint: None,
            codec,
        }
    }

    pub fn is_reserved(&self) -> bool {
        self.blueprint.is_none()
    }

    /// Same blueprint instance, not merely an equal one.
    pub fn has_blueprint(&self, blueprint: &Arc<CodecBlueprint>) -> bool {
        self.blueprint
            .as_ref()
            .is_some_and(|bp| Arc::ptr_eq(bp, blueprint))
    }
}

/// Payload-type keyed association table.
///
/// A key mapped to `None` is a tombstone: the payload type is blocked for the
/// lifetime of the table and is never handed out again.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct CodecAssociations {
    entries: BTreeMap<PayloadType, Option<CodecAssociation>>,
}

impl CodecAssociations {
    pub fn new() -> Self {
        Self::default()
    }

    /// The live association at `pt`, reservations included.
    pub fn get(&self, pt: PayloadType) -> Option<&CodecAssociation> {
        self.entries.get(&pt).and_then(|ca| ca.as_ref())
    }

    /// `None` when the key is absent, `Some(None)` for a tombstone.
    pub fn lookup(&self, pt: PayloadType) -> Option<Option<&CodecAssociation>> {
        self.entries.get(&pt).map(|ca| ca.as_ref())
    }

    /// Is `pt` used in any way, tombstones included.
    pub fn contains(&self, pt: PayloadType) -> bool {
        self.entries.contains_key(&pt)
    }

    pub fn is_tombstone(&self, pt: PayloadType) -> bool {
        matches!(self.entries.get(&pt), Some(None))
    }

    pub fn insert(&mut self, pt: PayloadType, association: CodecAssociation) {
        self.entries.insert(pt, Some(association));
    }

    pub fn tombstone(&mut self, pt: PayloadType) {
        self.entries.insert(pt, None);
    }

    /// All entries in payload type order.
    pub fn iter(&self) -> impl Iterator<Item = (PayloadType, Option<&CodecAssociation>)> {
        self.entries.iter().map(|(pt, ca)| (*pt, ca.as_ref()))
    }

    /// Live associations in payload type order.
    pub fn associations(&self) -> impl Iterator<Item = (PayloadType, &CodecAssociation)> {
        self.entries
            .iter()
            .filter_map(|(pt, ca)| ca.as_ref().map(|ca| (*pt, ca)))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
