//! # Codecs - RTP codec offer/answer negotiation
//!
//! Decides, from the codecs available locally and the codec list a peer sent,
//! which encodings both sides can use, under which RTP payload types, and with
//! which parameter values. The negotiation follows the offer/answer model of
//! [RFC 3264](https://datatracker.ietf.org/doc/html/rfc3264).
//!
//! Like the rest of the sans-I/O stack this crate performs no I/O and keeps no
//! global state: every operation reads its inputs and returns fresh values.
//!
//! ## Quick Start
//!
//! ```
//! use codecs::codec::blueprint::{BlueprintCatalog, CodecBlueprint};
//! use codecs::codec::{Codec, CodecId, MediaType};
//! use codecs::configuration::NegotiationConfig;
//! use codecs::session::CodecSession;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // 1. Codecs found on this host
//! let catalog: BlueprintCatalog = [
//!     CodecBlueprint::new(Codec::new(0, "PCMU", MediaType::Audio, 8000)),
//!     CodecBlueprint::new(Codec::new(CodecId::Any, "OPUS", MediaType::Audio, 48000).with_channels(2)),
//! ]
//! .into_iter()
//! .collect();
//!
//! // 2. What we offer
//! let mut session = CodecSession::new(MediaType::Audio, &catalog, NegotiationConfig::default())?;
//! for codec in session.local_codecs() {
//!     println!("offer {codec}");
//! }
//!
//! // 3. What the peer answered
//! session.set_remote_codecs(vec![
//!     Codec::new(111, "opus", MediaType::Audio, 48000).with_channels(2),
//! ])?;
//! assert_eq!(session.negotiated_codecs()[0].payload_type(), Some(111));
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - **[`codec`]** - Codec, blueprint and payload type association types
//! - **[`negotiation`]** - Local codec building and the negotiation engine
//! - **[`specific`]** - Per-codec parameter negotiation rules
//! - **[`configuration`]** - Negotiation settings and codec preferences files
//! - **[`session`]** - Codec state of one media session

#![warn(rust_2018_idioms)]
#![allow(dead_code)]

pub use shared;

pub mod codec;
pub mod configuration;
pub mod negotiation;
pub mod session;
pub mod specific;
