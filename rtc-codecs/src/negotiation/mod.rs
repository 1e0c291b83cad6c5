//! RFC 3264 offer/answer over codec lists.
//!
//! The flow for one media type is:
//!
//! 1. [`create_local_codec_associations`] turns the discovered blueprints and
//!    the user preferences into the codecs we offer, each bound to a payload
//!    type.
//! 2. [`negotiate_codecs`] matches the peer's codecs against ours and records
//!    which payload type carries which negotiated codec.
//!
//! Both return fresh values and never modify their inputs. The associations a
//! negotiation returns are fed back as `current` into the next local build and
//! as `previous` into the next negotiation, which keeps payload types stable
//! for the lifetime of a session.


pub mod engine;
pub mod local;
pub mod payload_type;
pub mod validate;

pub use engine::{NegotiatedCodecs, negotiate_codecs, negotiate_codecs_with_config};
pub use local::{LocalCodecs, create_local_codec_associations};
pub use payload_type::find_first_free_dynamic_payload_type;
pub use validate::{codec_matches_blueprint, validate_codecs_configuration};
