//! Compiled-in catalog of profiles and the metadata the resolver needs for each.

use fxhash::FxHashMap;
use pgate_domain::{ProfileId, ProfileMask};
use std::borrow::Cow;
use std::collections::hash_map::Entry;
use std::fmt;
use tracing::warn;

/// Property consulted for the hearing aid (ASHA central) default.
pub const PROPERTY_ASHA_CENTRAL: &str = "bluetooth.profile.asha.central.enabled";
/// Feature flag that can turn hearing aid support on.
pub const FLAG_HEARING_AID: &str = "settings_bluetooth_hearing_aid";
/// Feature flag that decides battery service support.
pub const FLAG_BATTERY: &str = "settings_bluetooth_battery";
/// Resource switch read alongside the profile set.
pub const RESOURCE_GD_SCANNING: &str = "enable_gd_up_to_scanning_layer";

/// Where an entry's base `supported` value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultSource {
    /// A boolean resource, keyed by name.
    Resource(&'static str),
    /// A platform property parsed as boolean; unset means `false`.
    Property(&'static str),
}

impl fmt::Display for DefaultSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resource(key) => write!(f, "resource:{key}"),
            Self::Property(name) => write!(f, "property:{name}"),
        }
    }
}

/// How a feature flag value is applied to an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverridePolicy {
    /// A set flag fully replaces the current value.
    Replace,
    /// The flag may only turn a disabled entry on, never the reverse.
    UpgradeOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagOverride {
    pub name: &'static str,
    pub policy: OverridePolicy,
}

impl fmt::Display for FlagOverride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.policy {
            OverridePolicy::Replace => write!(f, "{}", self.name),
            OverridePolicy::UpgradeOnly => write!(f, "{} (upgrade-only)", self.name),
        }
    }
}

/// One catalog row. Each entry owns exactly one bit of [`ProfileMask`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureEntry {
    pub id: ProfileId,
    pub default: DefaultSource,
    pub flag: Option<FlagOverride>,
    pub bit: ProfileMask,
}

impl FeatureEntry {
    #[must_use]
    pub const fn resource(id: ProfileId, key: &'static str, bit: ProfileMask) -> Self {
        Self { id, default: DefaultSource::Resource(key), flag: None, bit }
    }

    #[must_use]
    pub const fn property(id: ProfileId, name: &'static str, bit: ProfileMask) -> Self {
        Self { id, default: DefaultSource::Property(name), flag: None, bit }
    }

    #[must_use]
    pub const fn with_flag(mut self, name: &'static str, policy: OverridePolicy) -> Self {
        self.flag = Some(FlagOverride { name, policy });
        self
    }
}

const BUILTIN: &[FeatureEntry] = &[
    FeatureEntry::resource(ProfileId::Headset, "profile_supported_hs_hfp", ProfileMask::HEADSET),
    FeatureEntry::resource(ProfileId::A2dp, "profile_supported_a2dp", ProfileMask::A2DP),
    FeatureEntry::resource(ProfileId::A2dpSink, "profile_supported_a2dp_sink", ProfileMask::A2DP_SINK),
    FeatureEntry::resource(ProfileId::HidHost, "profile_supported_hid_host", ProfileMask::HID_HOST),
    FeatureEntry::resource(ProfileId::Pan, "profile_supported_pan", ProfileMask::PAN),
    FeatureEntry::resource(ProfileId::Gatt, "profile_supported_gatt", ProfileMask::GATT),
    FeatureEntry::resource(ProfileId::Map, "profile_supported_map", ProfileMask::MAP),
    FeatureEntry::resource(
        ProfileId::HeadsetClient,
        "profile_supported_hfpclient",
        ProfileMask::HEADSET_CLIENT,
    ),
    FeatureEntry::resource(
        ProfileId::AvrcpTarget,
        "profile_supported_avrcp_target",
        ProfileMask::AVRCP,
    ),
    FeatureEntry::resource(
        ProfileId::AvrcpController,
        "profile_supported_avrcp_controller",
        ProfileMask::AVRCP_CONTROLLER,
    ),
    FeatureEntry::resource(ProfileId::Sap, "profile_supported_sap", ProfileMask::SAP),
    FeatureEntry::resource(
        ProfileId::PbapClient,
        "profile_supported_pbapclient",
        ProfileMask::PBAP_CLIENT,
    ),
    FeatureEntry::resource(ProfileId::MapClient, "profile_supported_mapmce", ProfileMask::MAP_CLIENT),
    FeatureEntry::resource(
        ProfileId::HidDevice,
        "profile_supported_hid_device",
        ProfileMask::HID_DEVICE,
    ),
    FeatureEntry::resource(ProfileId::Opp, "profile_supported_opp", ProfileMask::OPP),
    FeatureEntry::resource(ProfileId::Pbap, "profile_supported_pbap", ProfileMask::PBAP),
    FeatureEntry::resource(
        ProfileId::VolumeControl,
        "profile_supported_vc",
        ProfileMask::VOLUME_CONTROL,
    ),
    FeatureEntry::resource(
        ProfileId::McpServer,
        "profile_supported_mcp_server",
        ProfileMask::MCP_SERVER,
    ),
    FeatureEntry::resource(
        ProfileId::LeCallControl,
        "profile_supported_le_call_control",
        ProfileMask::LE_CALL_CONTROL,
    ),
    FeatureEntry::property(ProfileId::HearingAid, PROPERTY_ASHA_CENTRAL, ProfileMask::HEARING_AID)
        .with_flag(FLAG_HEARING_AID, OverridePolicy::UpgradeOnly),
    FeatureEntry::resource(ProfileId::LeAudio, "profile_supported_le_audio", ProfileMask::LE_AUDIO),
    FeatureEntry::resource(
        ProfileId::CsipSetCoordinator,
        "profile_supported_csip_set_coordinator",
        ProfileMask::CSIP_SET_COORDINATOR,
    ),
    FeatureEntry::resource(
        ProfileId::HapClient,
        "profile_supported_hap_client",
        ProfileMask::HAP_CLIENT,
    ),
    FeatureEntry::resource(
        ProfileId::BassClient,
        "profile_supported_bass_client",
        ProfileMask::LE_AUDIO_BROADCAST_ASSISTANT,
    ),
    FeatureEntry::resource(ProfileId::Battery, "profile_supported_battery", ProfileMask::BATTERY)
        .with_flag(FLAG_BATTERY, OverridePolicy::Replace),
];

/// Ordered set of [`FeatureEntry`] rows with lookup by id.
///
/// Catalog order is the order of the resolved enabled set.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Cow<'static, [FeatureEntry]>,
    index: FxHashMap<ProfileId, usize>,
}

impl Catalog {
    /// The compiled-in profile catalog.
    #[must_use]
    pub fn builtin() -> Self {
        Self::from_entries(Cow::Borrowed(BUILTIN))
    }

    /// Builds a catalog from custom entries.
    ///
    /// If an id appears twice, the first row wins for lookups and the duplicate is logged.
    #[must_use]
    pub fn new(entries: Vec<FeatureEntry>) -> Self {
        Self::from_entries(Cow::Owned(entries))
    }

    fn from_entries(entries: Cow<'static, [FeatureEntry]>) -> Self {
        let mut index = FxHashMap::default();
        for (position, entry) in entries.iter().enumerate() {
            match index.entry(entry.id) {
                Entry::Occupied(_) => warn!(profile = %entry.id, "Duplicate catalog entry"),
                Entry::Vacant(slot) => {
                    slot.insert(position);
                },
            }
        }
        Self { entries, index }
    }

    pub fn iter(&self) -> impl Iterator<Item = &FeatureEntry> {
        self.entries.iter()
    }

    #[must_use]
    pub fn entry(&self, id: ProfileId) -> Option<&FeatureEntry> {
        self.index.get(&id).map(|&position| &self.entries[position])
    }

    #[must_use]
    pub fn mask_of(&self, id: ProfileId) -> Option<ProfileMask> {
        self.entry(id).map(|entry| entry.bit)
    }

    #[must_use]
    pub fn contains(&self, id: ProfileId) -> bool {
        self.index.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Catalog ids whose bit is set in `mask`, in catalog order.
    #[must_use]
    pub fn profiles_in(&self, mask: ProfileMask) -> Vec<ProfileId> {
        self.entries.iter().filter(|entry| mask.intersects(entry.bit)).map(|entry| entry.id).collect()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a FeatureEntry;
    type IntoIter = std::slice::Iter<'a, FeatureEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn builtin_covers_every_profile_once() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), ProfileId::iter().count());
        for id in ProfileId::iter() {
            assert!(catalog.contains(id), "{id} missing from catalog");
        }
    }

    #[test]
    fn builtin_bits_are_unique_single_bits() {
        let mut seen = ProfileMask::empty();
        for entry in &Catalog::builtin() {
            assert_eq!(entry.bit.bits().count_ones(), 1, "{} must own one bit", entry.id);
            assert!(!seen.intersects(entry.bit), "{} reuses a bit", entry.id);
            seen |= entry.bit;
        }
    }

    #[test]
    fn special_entries_carry_their_policies() {
        let catalog = Catalog::builtin();

        let hearing_aid = catalog.entry(ProfileId::HearingAid).unwrap();
        assert_eq!(hearing_aid.default, DefaultSource::Property(PROPERTY_ASHA_CENTRAL));
        assert_eq!(hearing_aid.flag.map(|f| f.policy), Some(OverridePolicy::UpgradeOnly));

        let battery = catalog.entry(ProfileId::Battery).unwrap();
        assert_eq!(battery.flag.map(|f| f.name), Some(FLAG_BATTERY));
        assert_eq!(battery.flag.map(|f| f.policy), Some(OverridePolicy::Replace));
    }

    #[test]
    fn duplicate_ids_keep_first_row() {
        let catalog = Catalog::new(vec![
            FeatureEntry::resource(ProfileId::Pan, "first", ProfileMask::PAN),
            FeatureEntry::resource(ProfileId::Pan, "second", ProfileMask::OPP),
        ]);
        assert_eq!(catalog.mask_of(ProfileId::Pan), Some(ProfileMask::PAN));
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn profiles_in_follows_catalog_order() {
        let catalog = Catalog::builtin();
        let mask = ProfileMask::BATTERY | ProfileMask::HEADSET | ProfileMask::from_bits_retain(1 << 3);
        assert_eq!(catalog.profiles_in(mask), vec![ProfileId::Headset, ProfileId::Battery]);
    }
}
