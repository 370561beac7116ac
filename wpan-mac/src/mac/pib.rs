use crate::config::{MAC_DEFAULT_CHANNEL, MAC_DEFAULT_CHANNEL_PAGE, MAC_DEFAULT_PAN_ID};

/// The subset of the MAC and PHY PAN Information Base (PIB) maintained by
/// this MAC sublayer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pib {
    /// macPanId, the identifier of the PAN on which the device is operating.
    /// 0xffff if the device is not associated.
    pub pan_id: u16,
    /// macShortAddress
    pub short_address: u16,
    /// macExtendedAddress
    pub extended_address: Option<[u8; 8]>,
    /// macAssociationPermit
    pub association_permit: bool,
    /// phyCurrentChannel
    pub current_channel: u8,
    /// phyCurrentPage
    pub current_page: u8,
}

impl Default for Pib {
    fn default() -> Self {
        Self {
            pan_id: MAC_DEFAULT_PAN_ID,
            short_address: 0xffff,
            extended_address: None,
            association_permit: false,
            current_channel: MAC_DEFAULT_CHANNEL,
            current_page: MAC_DEFAULT_CHANNEL_PAGE,
        }
    }
}
