use pgate_resolver::catalog::{FLAG_BATTERY, FLAG_HEARING_AID, PROPERTY_ASHA_CENTRAL};
use pgate_resolver::*;

fn x_y_catalog() -> Catalog {
    Catalog::new(vec![
        FeatureEntry::resource(ProfileId::Headset, "x_supported", ProfileMask::HEADSET),
        FeatureEntry::resource(ProfileId::A2dp, "y_supported", ProfileMask::A2DP),
    ])
}

fn x_y_platform() -> ConfigPlatform {
    ConfigPlatform::new().with_resource("x_supported", true).with_resource("y_supported", false)
}

fn resolved(platform: &ConfigPlatform) -> FeatureResolver {
    let resolver = FeatureResolver::default();
    resolver.resolve(Some(&platform.context()));
    resolver
}

#[test]
fn resource_defaults_decide_without_overrides() {
    let resolver = FeatureResolver::new(x_y_catalog());
    resolver.resolve(Some(&x_y_platform().context()));

    assert_eq!(resolver.enabled_set(), vec![ProfileId::Headset]);
    assert_eq!(resolver.compute_bitmask(), ProfileMask::HEADSET);
}

#[test]
fn disabled_mask_vetoes_on_re_resolve() {
    let resolver = FeatureResolver::new(x_y_catalog());
    resolver.resolve(Some(&x_y_platform().context()));
    assert_eq!(resolver.enabled_set(), vec![ProfileId::Headset]);

    let vetoed = x_y_platform().with_disabled_mask(ProfileMask::HEADSET.bits());
    resolver.resolve(Some(&vetoed.context()));

    assert!(resolver.enabled_set().is_empty());
    assert_eq!(resolver.compute_bitmask(), ProfileMask::empty());
}

#[test]
fn builtin_catalog_enables_exactly_true_resources() {
    let platform = ConfigPlatform::new()
        .with_resource("profile_supported_battery", true)
        .with_resource("profile_supported_hs_hfp", true)
        .with_resource("profile_supported_le_audio", true)
        .with_resource("profile_supported_pan", false)
        .with_resource("profile_supported_gatt", true);

    let resolver = resolved(&platform);

    // Catalog order, not insertion order of the resources.
    assert_eq!(
        resolver.enabled_set(),
        vec![ProfileId::Headset, ProfileId::Gatt, ProfileId::LeAudio, ProfileId::Battery]
    );
}

#[test]
fn replace_flag_overrides_resource_both_ways() {
    let on = ConfigPlatform::new()
        .with_resource("profile_supported_battery", false)
        .with_setting(FLAG_BATTERY, "true");
    assert!(resolved(&on).is_enabled(ProfileId::Battery));

    let off = ConfigPlatform::new()
        .with_resource("profile_supported_battery", true)
        .with_setting(FLAG_BATTERY, "false");
    assert!(!resolved(&off).is_enabled(ProfileId::Battery));

    let via_override = ConfigPlatform::new()
        .with_resource("profile_supported_battery", true)
        .with_property(format!("{FLAG_OVERRIDE_PREFIX}{FLAG_BATTERY}"), "False");
    assert!(!resolved(&via_override).is_enabled(ProfileId::Battery));
}

#[test]
fn upgrade_only_flag_never_demotes() {
    let on_by_property = ConfigPlatform::new()
        .with_resource("profile_supported_a2dp", true)
        .with_property(PROPERTY_ASHA_CENTRAL, "true")
        .with_setting(FLAG_HEARING_AID, "false");
    assert!(resolved(&on_by_property).is_enabled(ProfileId::HearingAid));

    let on_by_flag = ConfigPlatform::new()
        .with_resource("profile_supported_a2dp", true)
        .with_setting(FLAG_HEARING_AID, "true");
    assert!(resolved(&on_by_flag).is_enabled(ProfileId::HearingAid));

    let off = ConfigPlatform::new().with_resource("profile_supported_a2dp", true);
    assert!(!resolved(&off).is_enabled(ProfileId::HearingAid));
}

#[test]
fn property_default_accepts_numeric_booleans() {
    let with_property = |value: &str| {
        ConfigPlatform::new()
            .with_resource("profile_supported_a2dp", true)
            .with_property(PROPERTY_ASHA_CENTRAL, value)
    };

    assert!(resolved(&with_property("1")).is_enabled(ProfileId::HearingAid));
    assert!(resolved(&with_property("TRUE")).is_enabled(ProfileId::HearingAid));
    assert!(!resolved(&with_property("0")).is_enabled(ProfileId::HearingAid));
    assert!(!resolved(&with_property("enabled")).is_enabled(ProfileId::HearingAid));
}

#[test]
fn component_override_forces_on_but_not_past_veto() {
    let platform = ConfigPlatform::new()
        .with_resource("profile_supported_pan", false)
        .with_resource("profile_supported_opp", false)
        .with_setting(FLAG_BATTERY, "false")
        .with_component_overrides(pgate_resolver::domain::config::DEFAULT_PACKAGE, [
            "pan",
            "battery",
            "opp",
            "not_a_profile",
        ])
        .with_disabled_mask(ProfileMask::OPP.bits());

    let resolver = resolved(&platform);
    assert_eq!(resolver.enabled_set(), vec![ProfileId::Pan, ProfileId::Battery]);
}

#[test]
fn component_overrides_use_context_package() {
    let platform = ConfigPlatform::new()
        .with_resource("profile_supported_gatt", true)
        .with_component_overrides("other.package", ["pan"]);

    let resolver = FeatureResolver::default();
    resolver.resolve(Some(&platform.context()));
    assert!(!resolver.is_enabled(ProfileId::Pan));

    resolver.resolve(Some(&platform.context().package("other.package")));
    assert!(resolver.is_enabled(ProfileId::Pan));
}

#[test]
fn missing_context_or_resources_is_a_no_op() {
    let resolver = FeatureResolver::default();
    resolver.resolve(None);
    assert!(resolver.enabled_set().is_empty());

    let platform = ConfigPlatform::new().with_resource("profile_supported_gatt", true);
    resolver.resolve(Some(&platform.context()));
    assert_eq!(resolver.enabled_set(), vec![ProfileId::Gatt]);

    // A context without resources leaves the previous result in place.
    let partial = ResolverContext::new().settings(&platform).disabled(&platform);
    resolver.resolve(Some(&partial));
    assert_eq!(resolver.enabled_set(), vec![ProfileId::Gatt]);

    resolver.resolve(None);
    assert_eq!(resolver.enabled_set(), vec![ProfileId::Gatt]);
}

#[test]
fn resolve_is_idempotent_and_replaces_state() {
    let platform = ConfigPlatform::new()
        .with_resource("profile_supported_a2dp", true)
        .with_resource("profile_supported_map", true);
    let resolver = resolved(&platform);
    let first = resolver.enabled_set();

    resolver.resolve(Some(&platform.context()));
    assert_eq!(resolver.enabled_set(), first);

    let fewer = ConfigPlatform::new().with_resource("profile_supported_map", true);
    resolver.resolve(Some(&fewer.context()));
    assert_eq!(resolver.enabled_set(), vec![ProfileId::Map]);
}

#[test]
fn resolve_keeps_supplemental_mask() {
    let platform = ConfigPlatform::new().with_resource("profile_supported_a2dp", true);
    let resolver = FeatureResolver::default();
    resolver.add_supplemental_bit(40);

    resolver.resolve(Some(&platform.context()));

    assert_eq!(resolver.supplemental_mask().bits(), 1 << 40);
    assert_eq!(resolver.compute_bitmask().bits(), (1 << 40) | ProfileMask::A2DP.bits());
}

#[test]
fn gd_scanning_switch_follows_resource() {
    let platform = ConfigPlatform::new().with_resource("enable_gd_up_to_scanning_layer", true);
    assert!(resolved(&platform).gd_enabled_up_to_scanning_layer());

    let platform = ConfigPlatform::new().with_resource("profile_supported_gatt", true);
    assert!(!resolved(&platform).gd_enabled_up_to_scanning_layer());
}

#[test]
fn platform_from_config_matches_builder() {
    let mut config = pgate_resolver::domain::config::PlatformConfig::default();
    config.resources.insert("profile_supported_hid_host".to_owned(), true);
    config.settings.insert(DISABLED_PROFILES_SETTING.to_owned(), "0".to_owned());

    let resolver = resolved(&ConfigPlatform::from(&config));
    assert_eq!(resolver.enabled_set(), vec![ProfileId::HidHost]);
}
