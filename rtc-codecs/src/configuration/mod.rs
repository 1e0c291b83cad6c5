//! Settings of the negotiation and codec preferences loading.
//!
//! [`NegotiationConfig`] tunes how the negotiation engine answers a peer.
//! Codec preferences, the ordered list of codecs a user wants offered, can be
//! kept in a TOML document and loaded with [`preferences`].
//!
//! # Examples
//!
//! ```
//! use codecs::configuration::NegotiationConfig;
//! use codecs::specific::ParamTypes;
//!
//! let mut config = NegotiationConfig::default();
//!
//! // Keep our own payload types in the answer
//! config.set_use_local_ids(true);
//!
//! // Ignore what the peer wants to receive
//! config.set_param_types(ParamTypes::BOTH, ParamTypes::SEND | ParamTypes::CONFIG);
//! ```

#[cfg(test)]
mod configuration_test;

pub mod preferences;

use crate::specific::ParamTypes;
use serde::{Deserialize, Serialize};
use shared::error::{Error, Result};
use std::path::Path;

/// Settings of the negotiation engine.
///
/// A TOML document holding these settings uses kebab-case keys, every key is
/// optional:
///
/// ```toml
/// use-local-ids = true
/// local-param-types = "SEND | RECV"
/// remote-param-types = "SEND | RECV | CONFIG"
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct NegotiationConfig {
    use_local_ids: bool,
    local_param_types: ParamTypes,
    remote_param_types: ParamTypes,
}

impl Default for NegotiationConfig {
    fn default() -> Self {
        Self {
            use_local_ids: false,
            local_param_types: ParamTypes::BOTH,
            remote_param_types: ParamTypes::BOTH | ParamTypes::CONFIG,
        }
    }
}

impl NegotiationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses settings from a TOML document. Missing keys keep their default.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|err| Error::ErrInvalidNegotiationConfig(err.to_string()))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let s = std::fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }

    /// set_use_local_ids makes negotiated codecs carry the payload type of the
    /// matching local codec instead of the one the peer chose.
    pub fn set_use_local_ids(&mut self, use_local_ids: bool) {
        self.use_local_ids = use_local_ids;
    }

    /// set_param_types selects which kinds of optional parameters are taken
    /// into account from the local and from the remote codec.
    pub fn set_param_types(&mut self, local: ParamTypes, remote: ParamTypes) {
        self.local_param_types = local;
        self.remote_param_types = remote;
    }

    pub fn use_local_ids(&self) -> bool {
        self.use_local_ids
    }

    pub fn local_param_types(&self) -> ParamTypes {
        self.local_param_types
    }

    pub fn remote_param_types(&self) -> ParamTypes {
        self.remote_param_types
    }
}
