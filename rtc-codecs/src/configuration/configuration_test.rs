use super::preferences::codec_preferences_from_toml_str;
use super::*;
use crate::codec::{Codec, CodecId, MediaType};

#[test]
fn test_negotiation_config_default() {
    let config = NegotiationConfig::default();
    assert!(!config.use_local_ids());
    assert_eq!(config.local_param_types(), ParamTypes::BOTH);
    assert_eq!(
        config.remote_param_types(),
        ParamTypes::BOTH | ParamTypes::CONFIG
    );
}

#[test]
fn test_negotiation_config_setters() {
    let mut config = NegotiationConfig::new();
    config.set_use_local_ids(true);
    config.set_param_types(ParamTypes::ALL, ParamTypes::SEND);

    assert!(config.use_local_ids());
    assert_eq!(config.local_param_types(), ParamTypes::ALL);
    assert_eq!(config.remote_param_types(), ParamTypes::SEND);
}

#[test]
fn test_negotiation_config_from_toml() -> Result<()> {
    let config = NegotiationConfig::from_toml_str(
        r#"
use-local-ids = true
remote-param-types = "SEND | CONFIG"
"#,
    )?;
    assert!(config.use_local_ids());
    assert_eq!(config.local_param_types(), ParamTypes::BOTH);
    assert_eq!(
        config.remote_param_types(),
        ParamTypes::SEND | ParamTypes::CONFIG
    );

    assert_eq!(NegotiationConfig::from_toml_str("")?, NegotiationConfig::default());

    let result = NegotiationConfig::from_toml_str("use-local-ids = \"maybe\"");
    assert!(matches!(
        result,
        Err(Error::ErrInvalidNegotiationConfig(_))
    ));

    Ok(())
}

#[test]
fn test_codec_preferences_from_toml() -> Result<()> {
    let codecs = codec_preferences_from_toml_str(
        r#"
["video/H264"]
clock-rate = 90000
profile-level-id = "42E01F"
packetization-mode = 1

["audio/PCMU"]
id = 0

["audio/speex"]
id = -2

["audio/speex:2"]
clock-rate = 16000
vbr = true

["text/T140"]
id = 98

["audio/"]
id = 99

[PCMA]
id = 8

["audio/reserve-pt"]
id = 110
"#,
    )?;

    assert_eq!(codecs.len(), 5);

    let h264 = Codec::new(CodecId::Any, "H264", MediaType::Video, 90000)
        .with_parameter("profile-level-id", "42E01F")
        .with_parameter("packetization-mode", "1");
    assert!(codecs[0].are_equal(&h264));

    assert_eq!(codecs[1], Codec::new(0, "PCMU", MediaType::Audio, 0));

    assert!(codecs[2].is_disable());
    assert_eq!(codecs[2].encoding_name, "speex");

    assert_eq!(codecs[3].encoding_name, "speex");
    assert_eq!(codecs[3].id, CodecId::Any);
    assert_eq!(codecs[3].clock_rate, 16000);
    assert_eq!(codecs[3].parameter_value("vbr"), Some("true"));

    assert!(codecs[4].is_reserve_pt());
    assert_eq!(codecs[4].payload_type(), Some(110));

    Ok(())
}

#[test]
fn test_codec_preferences_invalid_toml() {
    let result = codec_preferences_from_toml_str("[audio/PCMU");
    assert!(matches!(result, Err(Error::ErrInvalidCodecPreferences(_))));
}
