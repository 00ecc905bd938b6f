//! Device identity and capability model
//!
//! A device is described by its host address, hardware (MAC) address and a
//! [`DeviceKind`] tag reported during discovery. Capability is derived from
//! the kind: the RM family learns and retransmits IR/RF codes, other kinds
//! (plugs, sensors) do not and are ignored by the dispatcher.

use std::fmt;
use std::str::FromStr;

/// Model family tag reported by a device during discovery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DeviceKind {
    /// RM2 universal remote
    Rm2,
    /// RM Pro universal remote
    RmPro,
    /// RM Mini universal remote
    RmMini,
    /// RM Mini B universal remote
    RmMiniB,
    /// RM4 universal remote
    Rm4,
    /// RM4 Mini universal remote
    Rm4Mini,
    /// RM4 Pro universal remote
    Rm4Pro,
    /// SP2 smart plug (no remote capability)
    Sp2,
    /// A1 environment sensor (no remote capability)
    A1,
}

impl DeviceKind {
    /// Returns the model name as reported by the hardware
    pub fn name(&self) -> &'static str {
        match self {
            DeviceKind::Rm2 => "RM2",
            DeviceKind::RmPro => "RMPRO",
            DeviceKind::RmMini => "RMMINI",
            DeviceKind::RmMiniB => "RMMINIB",
            DeviceKind::Rm4 => "RM4",
            DeviceKind::Rm4Mini => "RM4MINI",
            DeviceKind::Rm4Pro => "RM4PRO",
            DeviceKind::Sp2 => "SP2",
            DeviceKind::A1 => "A1",
        }
    }

    /// Whether this kind learns and retransmits remote codes at all
    pub fn is_remote(&self) -> bool {
        !matches!(self, DeviceKind::Sp2 | DeviceKind::A1)
    }

    /// Whether this kind supports infrared capture and replay
    pub fn supports_ir(&self) -> bool {
        self.is_remote()
    }

    /// Whether this kind supports radio-frequency capture and replay
    ///
    /// The RM family exposes the RF sweep commands across the board, so this
    /// currently tracks [`is_remote`](Self::is_remote).
    pub fn supports_rf(&self) -> bool {
        self.is_remote()
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Hardware (MAC) address of a device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MacAddr(pub [u8; 6]);

impl fmt::Display for MacAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let b = &self.0;
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            b[0], b[1], b[2], b[3], b[4], b[5]
        )
    }
}

impl FromStr for MacAddr {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0u8; 6];
        let mut parts = s.split(':');
        for byte in &mut bytes {
            let part = parts
                .next()
                .ok_or_else(|| format!("expected 6 colon-separated octets, got {s:?}"))?;
            *byte = u8::from_str_radix(part, 16)
                .map_err(|_| format!("invalid octet {part:?} in {s:?}"))?;
        }
        if parts.next().is_some() {
            return Err(format!("expected 6 colon-separated octets, got {s:?}"));
        }
        Ok(MacAddr(bytes))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for MacAddr {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for MacAddr {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Identity of a discovered device
///
/// Created once by discovery and immutable for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    /// Resolved host address the device answered on
    pub host: String,
    /// Stable hardware identifier
    pub mac: MacAddr,
    /// Model family tag
    pub kind: DeviceKind,
}

impl DeviceInfo {
    /// Create a new device identity
    pub fn new(host: impl Into<String>, mac: MacAddr, kind: DeviceKind) -> Self {
        Self {
            host: host.into(),
            mac,
            kind,
        }
    }
}

impl fmt::Display for DeviceInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} device at {} (MAC {})", self.kind, self.host, self.mac)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rm_family_is_remote_capable() {
        for kind in [
            DeviceKind::Rm2,
            DeviceKind::RmPro,
            DeviceKind::RmMini,
            DeviceKind::RmMiniB,
            DeviceKind::Rm4,
            DeviceKind::Rm4Mini,
            DeviceKind::Rm4Pro,
        ] {
            assert!(kind.is_remote(), "{kind} should be remote capable");
            assert!(kind.supports_ir());
            assert!(kind.supports_rf());
        }
    }

    #[test]
    fn plugs_and_sensors_are_not_remote_capable() {
        assert!(!DeviceKind::Sp2.is_remote());
        assert!(!DeviceKind::A1.is_remote());
        assert!(!DeviceKind::Sp2.supports_ir());
        assert!(!DeviceKind::A1.supports_rf());
    }

    #[test]
    fn mac_round_trips_through_display() {
        let mac = MacAddr([0xde, 0xad, 0xbe, 0xef, 0x00, 0x42]);
        let text = mac.to_string();
        assert_eq!(text, "de:ad:be:ef:00:42");
        assert_eq!(text.parse::<MacAddr>().unwrap(), mac);
    }

    #[test]
    fn mac_rejects_malformed_input() {
        assert!("de:ad:be:ef:00".parse::<MacAddr>().is_err());
        assert!("de:ad:be:ef:00:42:99".parse::<MacAddr>().is_err());
        assert!("zz:ad:be:ef:00:42".parse::<MacAddr>().is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn kind_deserializes_from_lowercase() {
        let kind: DeviceKind = serde_json::from_str("\"rm4pro\"").unwrap();
        assert_eq!(kind, DeviceKind::Rm4Pro);
    }
}
