//! Codec state of one media session.

#[cfg(test)]
mod session_test;

use crate::codec::association::CodecAssociations;
use crate::codec::blueprint::{BlueprintCatalog, CodecBlueprint};
use crate::codec::{Codec, MediaType, PayloadType};
use crate::configuration::NegotiationConfig;
use crate::negotiation::{
    LocalCodecs, NegotiatedCodecs, create_local_codec_associations, negotiate_codecs_with_config,
    validate_codecs_configuration,
};
use crate::specific::{codec_needs_config, codec_send_changed, codecs_config_changed};
use log::debug;
use shared::error::{Error, Result};
use std::sync::Arc;

/// Holds what we offer and what was negotiated for one media type.
///
/// Every setter either commits a complete new state or returns an error and
/// leaves the session untouched. Callers sharing a session between threads
/// must serialize the setters, a `&mut` borrow or a mutex is enough.
#[derive(Debug, Clone)]
pub struct CodecSession {
    media_type: MediaType,
    blueprints: Vec<Arc<CodecBlueprint>>,
    config: NegotiationConfig,

    codec_preferences: Vec<Codec>,
    local: LocalCodecs,

    remote_codecs: Vec<Codec>,
    negotiated: Option<NegotiatedCodecs>,

    config_changed: bool,
    send_codec_changed: bool,
}

impl CodecSession {
    /// Creates a session offering every blueprint of `media_type` in `catalog`.
    pub fn new(
        media_type: MediaType,
        catalog: &BlueprintCatalog,
        config: NegotiationConfig,
    ) -> Result<Self> {
        let blueprints = catalog.blueprints(media_type).to_vec();
        let local =
            create_local_codec_associations(media_type, &blueprints, &[], &CodecAssociations::new())?;

        Ok(Self {
            media_type,
            blueprints,
            config,
            codec_preferences: vec![],
            local,
            remote_codecs: vec![],
            negotiated: None,
            config_changed: false,
            send_codec_changed: false,
        })
    }

    pub fn media_type(&self) -> MediaType {
        self.media_type
    }

    pub fn config(&self) -> &NegotiationConfig {
        &self.config
    }

    fn current_associations(&self) -> CodecAssociations {
        self.negotiated
            .as_ref()
            .map(|negotiated| negotiated.associations.clone())
            .unwrap_or_default()
    }

    /// Replaces the codec preferences and rebuilds what we offer.
    ///
    /// Preferences that cannot be honoured are dropped. When remote codecs are
    /// known the negotiation is redone against the new local codecs.
    pub fn set_codec_preferences(&mut self, codec_preferences: Vec<Codec>) -> Result<()> {
        let codec_preferences =
            validate_codecs_configuration(self.media_type, &self.blueprints, &codec_preferences);

        let local = create_local_codec_associations(
            self.media_type,
            &self.blueprints,
            &codec_preferences,
            &self.current_associations(),
        )?;

        let negotiated = if self.remote_codecs.is_empty() {
            None
        } else {
            Some(self.negotiate(&self.remote_codecs, &local)?)
        };

        self.codec_preferences = codec_preferences;
        self.local = local;
        if let Some(negotiated) = negotiated {
            self.commit_negotiated(negotiated);
        }
        Ok(())
    }

    /// Negotiates the codecs the peer sent against ours.
    pub fn set_remote_codecs(&mut self, remote_codecs: Vec<Codec>) -> Result<()> {
        if self.local.codecs.is_empty() {
            return Err(Error::ErrNoLocalCodecs);
        }

        let negotiated = self.negotiate(&remote_codecs, &self.local)?;

        self.remote_codecs = remote_codecs;
        self.commit_negotiated(negotiated);
        Ok(())
    }

    fn commit_negotiated(&mut self, negotiated: NegotiatedCodecs) {
        let old_codecs = self.negotiated_codecs();
        let config_changed = codecs_config_changed(old_codecs, &negotiated.codecs);
        let send_codec_changed = match (old_codecs.first(), negotiated.codecs.first()) {
            (Some(old_send), Some(new_send)) => codec_send_changed(old_send, new_send),
            (old_send, new_send) => old_send.is_some() != new_send.is_some(),
        };

        if config_changed {
            debug!("New codec configuration data received");
        }
        if send_codec_changed {
            if let Some(new_send) = negotiated.codecs.first() {
                debug!("Send codec changed to {new_send}");
            }
        }

        self.config_changed = config_changed;
        self.send_codec_changed = send_codec_changed;
        self.negotiated = Some(negotiated);
    }

    fn negotiate(&self, remote_codecs: &[Codec], local: &LocalCodecs) -> Result<NegotiatedCodecs> {
        negotiate_codecs_with_config(
            remote_codecs,
            &local.associations,
            &local.codecs,
            self.negotiated.as_ref().map(|n| &n.associations),
            &self.config,
        )
    }

    /// Accepted codec preferences.
    pub fn codec_preferences(&self) -> &[Codec] {
        &self.codec_preferences
    }

    /// What we offer, most preferred first.
    pub fn local_codecs(&self) -> &[Codec] {
        &self.local.codecs
    }

    /// What was negotiated with the peer, empty before the first negotiation.
    pub fn negotiated_codecs(&self) -> &[Codec] {
        self.negotiated
            .as_ref()
            .map(|negotiated| negotiated.codecs.as_slice())
            .unwrap_or_default()
    }

    /// The negotiated associations, or the local ones before the first negotiation.
    pub fn codec_associations(&self) -> &CodecAssociations {
        self.negotiated
            .as_ref()
            .map_or(&self.local.associations, |negotiated| &negotiated.associations)
    }

    /// The blueprint to build the codec chain of `pt` from.
    ///
    /// `None` for unused, blocked or merely reserved payload types.
    pub fn blueprint_for_payload_type(&self, pt: PayloadType) -> Option<&Arc<CodecBlueprint>> {
        self.codec_associations()
            .get(pt)
            .and_then(|ca| ca.blueprint.as_ref())
    }

    /// Did the last negotiation bring configuration data that differs from what
    /// the codecs negotiated before carried.
    pub fn codec_config_changed(&self) -> bool {
        self.config_changed
    }

    /// Did the last negotiation change the codec we send with, ignoring
    /// configuration data and parameters that must not force a renegotiation.
    /// Always true after the first successful negotiation.
    pub fn send_codec_changed(&self) -> bool {
        self.send_codec_changed
    }

    /// True once codecs were negotiated and none of them still waits for
    /// configuration data.
    pub fn codecs_ready(&self) -> bool {
        self.negotiated.as_ref().is_some_and(|negotiated| {
            !negotiated.codecs.is_empty() && !negotiated.codecs.iter().any(codec_needs_config)
        })
    }
}
