use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

/// Stable identifier of an optional profile subsystem.
///
/// The string form (`Display`/`FromStr`/serde) is `snake_case` and is what
/// configuration files and component override lists refer to.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
    IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ProfileId {
    Headset,
    #[serde(rename = "a2dp")]
    #[strum(to_string = "a2dp")]
    A2dp,
    #[serde(rename = "a2dp_sink")]
    #[strum(to_string = "a2dp_sink")]
    A2dpSink,
    HidHost,
    Pan,
    Gatt,
    Map,
    HeadsetClient,
    AvrcpTarget,
    AvrcpController,
    Sap,
    PbapClient,
    MapClient,
    HidDevice,
    Opp,
    Pbap,
    VolumeControl,
    McpServer,
    LeCallControl,
    HearingAid,
    LeAudio,
    CsipSetCoordinator,
    HapClient,
    BassClient,
    Battery,
}

/// Named, fixed groups of profiles that consumers treat as a unit.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ProfileGroup {
    /// Profiles that together make up LE audio unicast.
    LeAudioUnicast,
}

const LE_AUDIO_UNICAST: &[ProfileId] = &[
    ProfileId::LeAudio,
    ProfileId::VolumeControl,
    ProfileId::McpServer,
    ProfileId::CsipSetCoordinator,
];

impl ProfileGroup {
    /// Members of the group. Static, never mutated.
    #[must_use]
    pub const fn members(self) -> &'static [ProfileId] {
        match self {
            Self::LeAudioUnicast => LE_AUDIO_UNICAST,
        }
    }

    #[must_use]
    pub fn contains(self, id: ProfileId) -> bool {
        self.members().contains(&id)
    }
}
