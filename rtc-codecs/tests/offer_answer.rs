/// Offer/answer rounds between two endpoints both negotiating with this crate,
/// checking payload type bookkeeping across rounds.
use anyhow::Result;
use codecs::codec::association::CodecAssociations;
use codecs::codec::blueprint::CodecBlueprint;
use codecs::codec::{Codec, CodecId, MediaType};
use codecs::negotiation::{
    LocalCodecs, create_local_codec_associations, find_first_free_dynamic_payload_type,
    negotiate_codecs,
};
use shared::error::Error;
use std::sync::Arc;

fn init_log() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init()
        .ok();
}

fn blueprint(
    id: impl Into<CodecId>,
    name: &str,
    media_type: MediaType,
    clock_rate: u32,
) -> Arc<CodecBlueprint> {
    Arc::new(CodecBlueprint::new(Codec::new(
        id, name, media_type, clock_rate,
    )))
}

fn build(blueprints: &[Arc<CodecBlueprint>], current: &CodecAssociations) -> Result<LocalCodecs> {
    Ok(create_local_codec_associations(
        MediaType::Audio,
        blueprints,
        &[],
        current,
    )?)
}

#[test]
fn test_offer_answer_end_to_end() -> Result<()> {
    init_log();

    let blueprints = vec![
        blueprint(0, "PCMU", MediaType::Audio, 8000),
        blueprint(CodecId::Any, "H264", MediaType::Video, 90000),
    ];
    let local = build(&blueprints, &CodecAssociations::new())?;
    assert_eq!(
        local.codecs,
        vec![
            Codec::new(0, "PCMU", MediaType::Audio, 8000),
            Codec::new(96, "H264", MediaType::Video, 90000),
        ]
    );

    let remote = vec![
        Codec::new(97, "H264", MediaType::Video, 90000)
            .with_parameter("profile-level-id", "42C01E"),
        Codec::new(0, "PCMU", MediaType::Audio, 8000),
    ];
    let negotiated = negotiate_codecs(&remote, &local.associations, &local.codecs, None, false)?;

    // profile-level-id needs both sides, we have none
    assert_eq!(
        negotiated.codecs,
        vec![
            Codec::new(97, "H264", MediaType::Video, 90000),
            Codec::new(0, "PCMU", MediaType::Audio, 8000),
        ]
    );

    let map = &negotiated.associations;
    assert_eq!(map.len(), 3);
    assert!(map.get(0).is_some_and(|ca| ca.codec.encoding_name == "PCMU"));
    assert!(
        map.get(97)
            .is_some_and(|ca| !ca.is_reserved() && ca.codec.encoding_name == "H264")
    );
    assert!(
        map.get(97)
            .and_then(|ca| ca.blueprint.as_ref())
            .is_some_and(|bp| Arc::ptr_eq(bp, &blueprints[1]))
    );
    // our own H264 payload type stays ours
    assert!(map.get(96).is_some_and(|ca| ca.is_reserved()));

    Ok(())
}

#[test]
fn test_offer_answer_is_deterministic() -> Result<()> {
    init_log();

    let blueprints = vec![
        blueprint(0, "PCMU", MediaType::Audio, 8000),
        blueprint(CodecId::Any, "SPEEX", MediaType::Audio, 16000),
        blueprint(CodecId::Any, "telephone-event", MediaType::Audio, 8000),
    ];
    let remote = vec![
        Codec::new(101, "telephone-event", MediaType::Audio, 8000)
            .with_parameter("events", "0-15"),
        Codec::new(99, "SPEEX", MediaType::Audio, 16000),
        Codec::new(8, "PCMA", MediaType::Audio, 8000),
    ];

    let first = build(&blueprints, &CodecAssociations::new())?;
    let second = build(&blueprints, &CodecAssociations::new())?;
    assert_eq!(first, second);

    let a = negotiate_codecs(&remote, &first.associations, &first.codecs, None, false)?;
    let b = negotiate_codecs(&remote, &first.associations, &first.codecs, None, false)?;
    assert_eq!(a, b);

    Ok(())
}

#[test]
fn test_offer_answer_payload_types_stay_bound() -> Result<()> {
    init_log();

    let blueprints = vec![
        blueprint(0, "PCMU", MediaType::Audio, 8000),
        blueprint(CodecId::Any, "SPEEX", MediaType::Audio, 8000),
        blueprint(CodecId::Any, "OPUS", MediaType::Audio, 48000),
    ];
    let remote = vec![
        Codec::new(111, "OPUS", MediaType::Audio, 48000),
        Codec::new(0, "PCMU", MediaType::Audio, 8000),
    ];

    let round1 = build(&blueprints, &CodecAssociations::new())?;
    let negotiated1 = negotiate_codecs(&remote, &round1.associations, &round1.codecs, None, false)?;

    let round2 = build(&blueprints, &negotiated1.associations)?;
    for (pt, ca) in round2.associations.associations() {
        assert!(
            !negotiated1.associations.is_tombstone(pt),
            "payload type {pt} was blocked"
        );
        if let Some(previous) = negotiated1.associations.get(pt) {
            assert!(
                previous.codec.has_encoding_name(&ca.codec.encoding_name),
                "payload type {pt} rebound from {} to {}",
                previous.codec,
                ca.codec
            );
        }
    }
    assert_eq!(round2.codecs[0].payload_type(), Some(0));
    assert!(round2.codecs.iter().all(|c| c.payload_type() != Some(111)));

    let negotiated2 = negotiate_codecs(
        &remote,
        &round2.associations,
        &round2.codecs,
        Some(&negotiated1.associations),
        false,
    )?;
    assert_eq!(negotiated2.codecs, negotiated1.codecs);
    // nothing used in the first round is released
    for (pt, _) in negotiated1.associations.iter() {
        assert!(negotiated2.associations.contains(pt), "payload type {pt} released");
    }

    Ok(())
}

#[test]
fn test_offer_answer_use_local_ids() -> Result<()> {
    init_log();

    let blueprints = vec![
        blueprint(0, "PCMU", MediaType::Audio, 8000),
        blueprint(CodecId::Any, "SPEEX", MediaType::Audio, 8000),
    ];
    let local = build(&blueprints, &CodecAssociations::new())?;
    let remote = vec![Codec::new(101, "SPEEX", MediaType::Audio, 8000)];

    let negotiated = negotiate_codecs(&remote, &local.associations, &local.codecs, None, true)?;
    assert_eq!(negotiated.codecs, vec![Codec::new(96, "SPEEX", MediaType::Audio, 8000)]);
    assert!(
        negotiated
            .associations
            .get(96)
            .is_some_and(|ca| !ca.is_reserved())
    );
    assert!(!negotiated.associations.contains(101));
    assert!(negotiated.associations.get(0).is_some_and(|ca| ca.is_reserved()));

    let negotiated = negotiate_codecs(&remote, &local.associations, &local.codecs, None, false)?;
    assert_eq!(negotiated.codecs, vec![Codec::new(101, "SPEEX", MediaType::Audio, 8000)]);

    Ok(())
}

/// Every payload type live in both maps carries the same encoding.
fn assert_no_aliasing(negotiated: &CodecAssociations, local: &CodecAssociations) {
    for (pt, ca) in negotiated.associations() {
        if let Some(local_ca) = local.get(pt) {
            assert!(
                ca.codec.has_encoding_name(&local_ca.codec.encoding_name),
                "payload type {pt} bound to {} and {}",
                ca.codec,
                local_ca.codec
            );
        }
        assert_eq!(ca.codec.payload_type(), Some(pt));
    }
}

#[test]
fn test_offer_answer_no_payload_type_aliasing() -> Result<()> {
    init_log();

    let blueprints = vec![
        blueprint(0, "PCMU", MediaType::Audio, 8000),
        blueprint(8, "PCMA", MediaType::Audio, 8000),
        blueprint(CodecId::Any, "SPEEX", MediaType::Audio, 16000),
        blueprint(CodecId::Any, "SPEEX", MediaType::Audio, 8000),
    ];
    let local = build(&blueprints, &CodecAssociations::new())?;

    // the peer answers with our own offer, reordered
    let mut remote = local.codecs.clone();
    remote.reverse();
    let negotiated = negotiate_codecs(&remote, &local.associations, &local.codecs, None, false)?;
    assert_eq!(negotiated.codecs.len(), 4);
    assert_no_aliasing(&negotiated.associations, &local.associations);

    // the peer picks payload types colliding with ours, we answer with ours
    let remote = vec![
        Codec::new(96, "PCMA", MediaType::Audio, 8000),
        Codec::new(97, "SPEEX", MediaType::Audio, 8000),
        Codec::new(9, "G722", MediaType::Audio, 8000),
        Codec::new(110, "SPEEX", MediaType::Audio, 16000),
    ];
    let negotiated = negotiate_codecs(&remote, &local.associations, &local.codecs, None, true)?;
    let pts: Vec<Option<u8>> = negotiated.codecs.iter().map(Codec::payload_type).collect();
    assert_eq!(pts, vec![Some(8), Some(97), Some(96)]);
    assert!(negotiated.associations.is_tombstone(9));
    assert_no_aliasing(&negotiated.associations, &local.associations);

    // and again on the next round
    let round2 = build(&blueprints, &negotiated.associations)?;
    let negotiated2 = negotiate_codecs(
        &remote,
        &round2.associations,
        &round2.codecs,
        Some(&negotiated.associations),
        true,
    )?;
    assert_no_aliasing(&negotiated2.associations, &round2.associations);
    assert_no_aliasing(&negotiated2.associations, &negotiated.associations);

    Ok(())
}

#[test]
fn test_offer_answer_between_two_endpoints() -> Result<()> {
    init_log();

    let offerer = build(
        &[
            blueprint(0, "PCMU", MediaType::Audio, 8000),
            blueprint(CodecId::Any, "SPEEX", MediaType::Audio, 8000),
            Arc::new(CodecBlueprint::new(
                Codec::new(CodecId::Any, "telephone-event", MediaType::Audio, 8000)
                    .with_parameter("events", "0-15"),
            )),
        ],
        &CodecAssociations::new(),
    )?;
    let answerer = build(
        &[
            blueprint(8, "PCMA", MediaType::Audio, 8000),
            blueprint(CodecId::Any, "SPEEX", MediaType::Audio, 8000),
            Arc::new(CodecBlueprint::new(
                Codec::new(CodecId::Any, "telephone-event", MediaType::Audio, 8000)
                    .with_parameter("events", "0-11"),
            )),
        ],
        &CodecAssociations::new(),
    )?;

    let answer = negotiate_codecs(
        &offerer.codecs,
        &answerer.associations,
        &answerer.codecs,
        None,
        false,
    )?;
    let names: Vec<&str> = answer
        .codecs
        .iter()
        .map(|c| c.encoding_name.as_str())
        .collect();
    assert_eq!(names, vec!["SPEEX", "telephone-event"]);
    assert!(answer.associations.is_tombstone(0));

    let offer = negotiate_codecs(
        &answer.codecs,
        &offerer.associations,
        &offerer.codecs,
        None,
        false,
    )?;
    assert_eq!(offer.codecs, answer.codecs);
    assert_eq!(offer.codecs[1].parameter_value("events"), Some("0-11"));

    for codec in &offer.codecs {
        let Some(pt) = codec.payload_type() else {
            panic!("negotiated codec without payload type: {codec}");
        };
        let ours = offer.associations.get(pt).map(|ca| ca.codec.encoding_name.as_str());
        let theirs = answer.associations.get(pt).map(|ca| ca.codec.encoding_name.as_str());
        assert_eq!(ours, theirs);
    }

    Ok(())
}

#[test]
fn test_offer_answer_dynamic_range_bound() -> Result<()> {
    init_log();

    let mut blueprints = vec![blueprint(0, "PCMU", MediaType::Audio, 8000)];
    for i in 0..40 {
        blueprints.push(blueprint(
            CodecId::Any,
            &format!("X-CODEC-{i}"),
            MediaType::Audio,
            8000,
        ));
    }

    let local = build(&blueprints, &CodecAssociations::new())?;
    assert_eq!(local.codecs.len(), 33);
    assert!(
        local.codecs[1..]
            .iter()
            .all(|c| c.payload_type().is_some_and(|pt| (96..=127).contains(&pt)))
    );
    assert_eq!(
        find_first_free_dynamic_payload_type(&[&local.associations]),
        Err(Error::ErrDynamicPayloadTypesExhausted)
    );

    // the peer picks the last one we could fit
    let remote = vec![Codec::new(127, "X-CODEC-31", MediaType::Audio, 8000)];
    let negotiated = negotiate_codecs(&remote, &local.associations, &local.codecs, None, false)?;
    assert_eq!(negotiated.codecs.len(), 1);
    assert!(negotiated.associations.get(127).is_some_and(|ca| !ca.is_reserved()));

    Ok(())
}
