use super::*;
use crate::codec::CodecId;

fn catalog() -> BlueprintCatalog {
    [
        CodecBlueprint::new(Codec::new(0, "PCMU", MediaType::Audio, 8000)),
        CodecBlueprint::new(Codec::new(CodecId::Any, "VORBIS", MediaType::Audio, 44100)),
        CodecBlueprint::new(Codec::new(CodecId::Any, "H264", MediaType::Video, 90000)),
    ]
    .into_iter()
    .collect()
}

#[test]
fn test_session_new() -> Result<()> {
    let session = CodecSession::new(MediaType::Audio, &catalog(), NegotiationConfig::default())?;

    assert_eq!(session.media_type(), MediaType::Audio);
    let names: Vec<&str> = session
        .local_codecs()
        .iter()
        .map(|c| c.encoding_name.as_str())
        .collect();
    assert_eq!(names, vec!["PCMU", "VORBIS"]);
    assert!(session.negotiated_codecs().is_empty());
    assert!(!session.codecs_ready());
    // local associations until something is negotiated
    assert_eq!(session.codec_associations().len(), 2);

    let empty = BlueprintCatalog::new();
    assert_eq!(
        CodecSession::new(MediaType::Audio, &empty, NegotiationConfig::default()).err(),
        Some(Error::ErrNoUsableCodec)
    );

    Ok(())
}

#[test]
fn test_session_negotiation() -> Result<()> {
    let catalog = catalog();
    let mut session = CodecSession::new(MediaType::Audio, &catalog, NegotiationConfig::default())?;

    session.set_remote_codecs(vec![
        Codec::new(100, "VORBIS", MediaType::Audio, 44100),
        Codec::new(0, "PCMU", MediaType::Audio, 8000),
    ])?;

    assert_eq!(session.negotiated_codecs().len(), 2);
    // VORBIS has no configuration yet
    assert!(!session.codecs_ready());

    let vorbis = catalog.blueprints(MediaType::Audio)[1].clone();
    assert!(
        session
            .blueprint_for_payload_type(100)
            .is_some_and(|bp| Arc::ptr_eq(bp, &vorbis))
    );
    // reserved for the local VORBIS, not something to build a chain for
    assert!(session.codec_associations().get(96).is_some());
    assert!(session.blueprint_for_payload_type(96).is_none());
    assert!(session.blueprint_for_payload_type(50).is_none());

    session.set_remote_codecs(vec![
        Codec::new(100, "VORBIS", MediaType::Audio, 44100)
            .with_parameter("configuration", "AAAAAZ2f4g"),
        Codec::new(0, "PCMU", MediaType::Audio, 8000),
    ])?;
    assert!(session.codecs_ready());
    assert_eq!(
        session.negotiated_codecs()[0].parameter_value("configuration"),
        Some("AAAAAZ2f4g")
    );

    Ok(())
}

#[test]
fn test_session_failed_negotiation_keeps_state() -> Result<()> {
    let mut session = CodecSession::new(MediaType::Audio, &catalog(), NegotiationConfig::default())?;
    session.set_remote_codecs(vec![Codec::new(0, "PCMU", MediaType::Audio, 8000)])?;
    let before = session.negotiated_codecs().to_vec();

    let result = session.set_remote_codecs(vec![Codec::new(9, "G722", MediaType::Audio, 8000)]);
    assert_eq!(result, Err(Error::ErrNoCompatibleCodec));
    assert_eq!(session.negotiated_codecs(), before.as_slice());

    Ok(())
}

#[test]
fn test_session_codec_preferences() -> Result<()> {
    let mut session = CodecSession::new(MediaType::Audio, &catalog(), NegotiationConfig::default())?;
    session.set_remote_codecs(vec![
        Codec::new(0, "PCMU", MediaType::Audio, 8000),
        Codec::new(96, "VORBIS", MediaType::Audio, 44100),
    ])?;

    // disabling VORBIS renegotiates without it
    session.set_codec_preferences(vec![
        Codec::new(CodecId::Disable, "VORBIS", MediaType::Audio, 0),
        Codec::new(CodecId::Any, "OPUS", MediaType::Audio, 48000),
    ])?;
    assert_eq!(session.codec_preferences().len(), 1);
    assert_eq!(session.local_codecs().len(), 1);
    assert_eq!(session.negotiated_codecs().len(), 1);
    assert_eq!(session.negotiated_codecs()[0].encoding_name, "PCMU");
    // the payload type VORBIS used stays blocked
    assert!(session.codec_associations().is_tombstone(96));

    // nothing left to offer, previous state is kept
    let result = session.set_codec_preferences(vec![
        Codec::new(CodecId::Disable, "PCMU", MediaType::Audio, 0),
        Codec::new(CodecId::Disable, "VORBIS", MediaType::Audio, 0),
    ]);
    assert_eq!(result, Err(Error::ErrNoUsableCodec));
    assert_eq!(session.local_codecs().len(), 1);
    assert_eq!(session.codec_preferences().len(), 1);

    Ok(())
}

#[test]
fn test_session_reports_codec_changes() -> Result<()> {
    let mut session = CodecSession::new(MediaType::Audio, &catalog(), NegotiationConfig::default())?;
    assert!(!session.codec_config_changed());
    assert!(!session.send_codec_changed());

    let vorbis = Codec::new(100, "VORBIS", MediaType::Audio, 44100);
    let vorbis_configured = vorbis.clone().with_parameter("configuration", "AAAAAZ2f4g");
    let pcmu = Codec::new(0, "PCMU", MediaType::Audio, 8000);

    session.set_remote_codecs(vec![vorbis.clone(), pcmu.clone()])?;
    assert!(session.send_codec_changed());
    assert!(!session.codec_config_changed());

    // configuration data alone does not change what we send
    session.set_remote_codecs(vec![vorbis_configured.clone(), pcmu.clone()])?;
    assert!(session.codec_config_changed());
    assert!(!session.send_codec_changed());

    session.set_remote_codecs(vec![vorbis_configured.clone(), pcmu.clone()])?;
    assert!(!session.codec_config_changed());
    assert!(!session.send_codec_changed());

    session.set_remote_codecs(vec![pcmu, vorbis_configured])?;
    assert!(session.send_codec_changed());
    assert!(!session.codec_config_changed());

    // a failed negotiation leaves the flags alone
    let result = session.set_remote_codecs(vec![Codec::new(9, "G722", MediaType::Audio, 8000)]);
    assert_eq!(result, Err(Error::ErrNoCompatibleCodec));
    assert!(session.send_codec_changed());

    Ok(())
}
