//! Codec preferences kept in a TOML document.
//!
//! Every table describes one codec, in preference order. The table name is
//! `"<media>/<encoding>"`, optionally followed by `:<n>` to list the same
//! encoding more than once. The keys `id`, `clock-rate` and `channels` fill the
//! matching codec fields; any other key becomes an optional parameter.
//!
//! ```toml
//! ["audio/PCMU"]
//! id = 0
//!
//! ["video/H264"]
//! clock-rate = 90000
//! profile-level-id = "42E01F"
//!
//! ["audio/speex"]
//! id = -2
//! ```
//!
//! A negative `id` other than -1 disables every blueprint matching the entry.

use crate::codec::{Codec, CodecId, MediaType};
use log::{debug, warn};
use shared::error::{Error, Result};
use std::path::Path;

const KEY_ID: &str = "id";
const KEY_CLOCK_RATE: &str = "clock-rate";
const KEY_CHANNELS: &str = "channels";

fn value_to_string(value: &toml::Value) -> Option<String> {
    match value {
        toml::Value::String(s) => Some(s.clone()),
        toml::Value::Integer(i) => Some(i.to_string()),
        toml::Value::Float(f) => Some(f.to_string()),
        toml::Value::Boolean(b) => Some(b.to_string()),
        _ => None,
    }
}

fn value_to_u32(value: &toml::Value) -> Option<u32> {
    value.as_integer().and_then(|i| u32::try_from(i).ok())
}

fn codec_from_table(name: &str, entry: &toml::Table) -> Option<Codec> {
    let Some((media, encoding)) = name.split_once('/') else {
        warn!("Codec preference {name} is not of the form <media>/<encoding>");
        return None;
    };
    let media_type = MediaType::from(media);
    if media_type == MediaType::Unspecified {
        warn!("Codec preference {name} has unknown media type {media}");
        return None;
    }
    let encoding_name = encoding.split_once(':').map_or(encoding, |(e, _)| e);
    if encoding_name.is_empty() {
        warn!("Codec preference {name} has no encoding name");
        return None;
    }

    let mut codec = Codec::new(CodecId::Any, encoding_name, media_type, 0);
    for (key, value) in entry {
        match key.as_str() {
            KEY_ID => match value.as_integer() {
                Some(id) => {
                    let id = i32::try_from(id).unwrap_or(if id < 0 { i32::MIN } else { i32::MAX });
                    codec.id = CodecId::from(id);
                }
                None => warn!("Codec preference {name} has invalid id {value}"),
            },
            KEY_CLOCK_RATE => match value_to_u32(value) {
                Some(clock_rate) => codec.clock_rate = clock_rate,
                None => warn!("Codec preference {name} has invalid clock rate {value}"),
            },
            KEY_CHANNELS => match value_to_u32(value) {
                Some(channels) => codec.channels = channels,
                None => warn!("Codec preference {name} has invalid channels {value}"),
            },
            _ => match value_to_string(value) {
                Some(v) => codec.add_parameter(key.as_str(), v),
                None => warn!("Codec preference {name} parameter {key} is not a scalar"),
            },
        }
    }

    debug!("Loaded codec preference {codec}");
    Some(codec)
}

/// Reads codec preferences from a TOML document, in document order.
///
/// A document that is not valid TOML is an error, entries that do not describe
/// a codec are skipped.
pub fn codec_preferences_from_toml_str(s: &str) -> Result<Vec<Codec>> {
    let table: toml::Table =
        toml::from_str(s).map_err(|err| Error::ErrInvalidCodecPreferences(err.to_string()))?;

    Ok(table
        .iter()
        .filter_map(|(name, value)| match value.as_table() {
            Some(entry) => codec_from_table(name, entry),
            None => {
                warn!("Codec preference {name} is not a table");
                None
            }
        })
        .collect())
}

pub fn codec_preferences_from_file(path: impl AsRef<Path>) -> Result<Vec<Codec>> {
    let s = std::fs::read_to_string(path)?;
    codec_preferences_from_toml_str(&s)
}
