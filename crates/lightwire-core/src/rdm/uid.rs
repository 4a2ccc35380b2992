use std::fmt;

/// 48-bit device identifier: a 16-bit manufacturer id plus a 32-bit
/// device id, transmitted high byte first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UId {
    pub manufacturer_id: u16,
    pub device_id: u32,
}

impl UId {
    /// Unassigned identifier.
    pub const EMPTY: UId = UId {
        manufacturer_id: 0,
        device_id: 0,
    };

    /// Addresses every responder on the wire.
    pub const BROADCAST: UId = UId {
        manufacturer_id: 0xffff,
        device_id: 0xffff_ffff,
    };

    pub fn new(manufacturer_id: u16, device_id: u32) -> Self {
        Self {
            manufacturer_id,
            device_id,
        }
    }

    pub fn from_bytes(bytes: [u8; 6]) -> Self {
        Self {
            manufacturer_id: u16::from_be_bytes([bytes[0], bytes[1]]),
            device_id: u32::from_be_bytes([bytes[2], bytes[3], bytes[4], bytes[5]]),
        }
    }

    pub fn to_bytes(self) -> [u8; 6] {
        let manufacturer = self.manufacturer_id.to_be_bytes();
        let device = self.device_id.to_be_bytes();
        [
            manufacturer[0],
            manufacturer[1],
            device[0],
            device[1],
            device[2],
            device[3],
        ]
    }
}

impl fmt::Display for UId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04x}:{:08x}", self.manufacturer_id, self.device_id)
    }
}

/// Addressing target of a device-management request. Sub-device targets
/// carry the index copied into the request header before send; equality is
/// the full identifier value plus the variant tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RdmTarget {
    Device(UId),
    SubDevice(UId, u16),
}

impl RdmTarget {
    pub fn uid(&self) -> UId {
        match *self {
            RdmTarget::Device(uid) => uid,
            RdmTarget::SubDevice(uid, _) => uid,
        }
    }

    pub fn sub_device(&self) -> Option<u16> {
        match *self {
            RdmTarget::Device(_) => None,
            RdmTarget::SubDevice(_, sub_device) => Some(sub_device),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{RdmTarget, UId};

    #[test]
    fn wire_form_round_trips() {
        let uid = UId::new(0x02ac, 0xdead_beef);
        assert_eq!(uid.to_bytes(), [0x02, 0xac, 0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(UId::from_bytes(uid.to_bytes()), uid);
    }

    #[test]
    fn reserved_values() {
        assert_eq!(UId::EMPTY.to_bytes(), [0; 6]);
        assert_eq!(UId::BROADCAST.to_bytes(), [0xff; 6]);
    }

    #[test]
    fn display_notation() {
        assert_eq!(UId::new(0x02ac, 0x1).to_string(), "02ac:00000001");
    }

    #[test]
    fn target_equality_includes_variant_tag() {
        let uid = UId::new(1, 2);
        assert_ne!(RdmTarget::Device(uid), RdmTarget::SubDevice(uid, 0));
        assert_eq!(RdmTarget::SubDevice(uid, 3).sub_device(), Some(3));
        assert_eq!(RdmTarget::Device(uid).sub_device(), None);
        assert_eq!(RdmTarget::SubDevice(uid, 3).uid(), uid);
    }
}
