use wpan_util::{debug, trace};

use crate::{
    mac::{MacService, TimeoutHandler},
    notify::MacNotifier,
    radio::RadioControl,
    timer::MacTimer,
};

use super::scan::ScanStatus;

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Address {
    Short(u16),
    Extended([u8; 8]),
}

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoordinatorAddress {
    pub pan_id: u16,
    pub address: Address,
}

/// Describes a coordinator discovered through one of its beacons, see
/// IEEE 802.15.4-2020, section 8.2.5.2, table 8-19.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanDescriptor {
    pub coordinator: CoordinatorAddress,
    /// The channel the beacon was received on.
    pub channel: u8,
    pub channel_page: u8,
    /// Superframe specification field of the beacon.
    pub superframe_spec: u16,
    pub gts_permit: bool,
    /// LQI at which the beacon was received.
    pub link_quality: u8,
    /// Reception timestamp in symbols.
    pub timestamp: u32,
}

impl PanDescriptor {
    /// Whether both descriptors were produced by the same coordinator on the
    /// same channel.
    pub fn is_same_coordinator(&self, other: &PanDescriptor) -> bool {
        self.coordinator == other.coordinator && self.channel == other.channel
    }
}

impl<R, T, N> MacService<R, T, N>
where
    R: RadioControl,
    T: MacTimer,
    N: MacNotifier,
{
    /// Called by the reception path for every beacon received.
    ///
    /// While a scan is in progress, the descriptor is recorded unless the same
    /// coordinator was already seen on that channel. Filling up the descriptor
    /// list terminates the scan early.
    pub async fn mlme_beacon_notify_indication(&self, descriptor: PanDescriptor) {
        let mut data = self.lock_data().await;

        if !data.scan.in_progress {
            trace!("beacon received outside of a scan");
            return;
        }
        debug_assert_eq!(data.timeout_handler, Some(TimeoutHandler::ScanChannel));

        let descriptors = &mut data.scan.descriptors;
        if descriptors
            .iter()
            .any(|known| known.is_same_coordinator(&descriptor))
        {
            return;
        }

        debug!("beacon from PAN {} recorded", descriptor.coordinator.pan_id);
        let limit_reached = descriptors.push(descriptor).is_err() || descriptors.is_full();

        if limit_reached {
            data.radio.disable_rx();
            data.cancel_timer();
            self.finish_scan(data, ScanStatus::LimitReached);
        }
    }
}
