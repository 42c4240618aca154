use bitflags::bitflags;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

bitflags! {
    /// Compact bitmask where each bit position stands for one profile.
    ///
    /// Bit positions follow the platform profile numbering, so positions
    /// 0, 3, 8, 14, 15 and 26 are intentionally unassigned.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
    pub struct ProfileMask: u64 {
        const HEADSET = 1 << 1;
        const A2DP = 1 << 2;
        const HID_HOST = 1 << 4;
        const PAN = 1 << 5;
        const PBAP = 1 << 6;
        const GATT = 1 << 7;
        const MAP = 1 << 9;
        const SAP = 1 << 10;
        const A2DP_SINK = 1 << 11;
        const AVRCP_CONTROLLER = 1 << 12;
        const AVRCP = 1 << 13;
        const HEADSET_CLIENT = 1 << 16;
        const PBAP_CLIENT = 1 << 17;
        const MAP_CLIENT = 1 << 18;
        const HID_DEVICE = 1 << 19;
        const OPP = 1 << 20;
        const HEARING_AID = 1 << 21;
        const LE_AUDIO = 1 << 22;
        const VOLUME_CONTROL = 1 << 23;
        const MCP_SERVER = 1 << 24;
        const CSIP_SET_COORDINATOR = 1 << 25;
        const LE_CALL_CONTROL = 1 << 27;
        const HAP_CLIENT = 1 << 28;
        const LE_AUDIO_BROADCAST_ASSISTANT = 1 << 29;
        const BATTERY = 1 << 30;
    }
}

impl ProfileMask {
    /// Mask with only the bit at `index` set, or `None` when `index` does not fit in 64 bits.
    #[must_use]
    pub fn from_index(index: u32) -> Option<Self> {
        1u64.checked_shl(index).map(Self::from_bits_retain)
    }

    /// Position of the lowest set bit, if any.
    #[must_use]
    pub const fn lowest_index(self) -> Option<u32> {
        if self.is_empty() { None } else { Some(self.bits().trailing_zeros()) }
    }
}

impl From<u64> for ProfileMask {
    fn from(bits: u64) -> Self {
        Self::from_bits_retain(bits)
    }
}

impl Serialize for ProfileMask {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(self.bits())
    }
}

impl<'de> Deserialize<'de> for ProfileMask {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let bits = u64::deserialize(deserializer)?;
        Ok(Self::from_bits_retain(bits))
    }
}
