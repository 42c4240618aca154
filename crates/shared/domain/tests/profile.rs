use pgate_domain::{ProfileGroup, ProfileId, ProfileMask};
use std::str::FromStr;
use strum::IntoEnumIterator;

#[test]
fn profile_ids_use_snake_case_names() {
    assert_eq!(ProfileId::Headset.to_string(), "headset");
    assert_eq!(ProfileId::A2dp.to_string(), "a2dp");
    assert_eq!(ProfileId::A2dpSink.to_string(), "a2dp_sink");
    assert_eq!(ProfileId::CsipSetCoordinator.as_ref(), "csip_set_coordinator");

    assert_eq!(ProfileId::from_str("hearing_aid"), Ok(ProfileId::HearingAid));
    assert_eq!(ProfileId::from_str("LE_AUDIO"), Ok(ProfileId::LeAudio));
    assert!(ProfileId::from_str("health").is_err());
}

#[test]
fn profile_ids_serde_matches_display() {
    for id in ProfileId::iter() {
        let encoded = serde_json::to_value(id).expect("serialize id");
        assert_eq!(encoded, serde_json::Value::String(id.to_string()));
    }
}

#[test]
fn le_audio_unicast_group_is_fixed() {
    let members = ProfileGroup::LeAudioUnicast.members();
    assert_eq!(members.len(), 4);
    assert!(ProfileGroup::LeAudioUnicast.contains(ProfileId::VolumeControl));
    assert!(!ProfileGroup::LeAudioUnicast.contains(ProfileId::HearingAid));
}

#[test]
fn mask_from_index_rejects_out_of_range() {
    assert_eq!(ProfileMask::from_index(2), Some(ProfileMask::A2DP));
    assert_eq!(ProfileMask::from_index(63).map(|m| m.bits()), Some(1 << 63));
    assert_eq!(ProfileMask::from_index(64), None);
}

#[test]
fn mask_serializes_as_raw_bits() {
    let mask = ProfileMask::HEADSET | ProfileMask::BATTERY;
    let encoded = serde_json::to_value(mask).expect("serialize mask");
    assert_eq!(encoded, serde_json::json!((1u64 << 1) | (1u64 << 30)));

    let unknown: ProfileMask = serde_json::from_value(serde_json::json!(1u64 << 40)).expect("decode");
    assert_eq!(unknown.bits(), 1 << 40, "unknown bits are retained");
    assert_eq!(unknown.lowest_index(), Some(40));
}

#[test]
fn mask_formats_as_hex_bits() {
    let mask = ProfileMask::HEADSET | ProfileMask::A2DP;
    assert_eq!(format!("{mask:#x}"), "0x6");
    assert_eq!(format!("{:x}", ProfileMask::BATTERY), "40000000");
}
