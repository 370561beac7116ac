use crate::{
    mac::{pib::Pib, MacService},
    notify::MacNotifier,
    radio::RadioControl,
    timer::MacTimer,
};

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetError {
    /// macPanId is overridden by a scan in progress and restored when the
    /// scan finishes.
    ScanInProgress,
}

/// Attributes that may be written by an upper layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetRequestAttribute {
    // IEEE 802.15.4-2020, section 8.4.3.1, table 8-94
    MacExtendedAddress([u8; 8]),
    MacAssociationPermit(bool),
    MacPanId(u16),
    MacShortAddress(u16),
}

impl<R, T, N> MacService<R, T, N>
where
    R: RadioControl,
    T: MacTimer,
    N: MacNotifier,
{
    /// Used by the next higher layer to attempt to write the given value to
    /// the indicated MAC PIB attribute.
    ///
    /// * `attribute` - Attribute to write
    pub async fn mlme_set_request(&self, attribute: &SetRequestAttribute) -> Result<(), SetError> {
        let mut data = self.lock_data().await;
        match attribute {
            SetRequestAttribute::MacPanId(pan_id) => {
                if data.scan.in_progress {
                    return Err(SetError::ScanInProgress);
                }
                data.set_pan_id(*pan_id)
            }
            SetRequestAttribute::MacShortAddress(short_address) => {
                data.pib.short_address = *short_address
            }
            SetRequestAttribute::MacExtendedAddress(extended_address) => {
                data.pib.extended_address = Some(*extended_address)
            }
            SetRequestAttribute::MacAssociationPermit(association_permit) => {
                data.pib.association_permit = *association_permit
            }
        }
        Ok(())
    }

    /// Returns a snapshot of the PIB.
    pub async fn pib(&self) -> Pib {
        self.lock_data().await.pib.clone()
    }

    /// The current value of macPanId.
    pub async fn pan_id(&self) -> u16 {
        self.lock_data().await.pib.pan_id
    }
}

#[cfg(test)]
mod tests {
    use pollster::FutureExt as _;

    use super::*;
    use crate::{
        constants::BROADCAST_PAN_ID,
        mac::{
            mlme::scan::{ScanRequest, ScanType},
            test_support::{new_mac, next_scan_confirm, Event},
        },
        notify::NotificationChannel,
    };

    #[test]
    fn set_pan_id_updates_radio_filter() {
        async {
            let notifications = NotificationChannel::new();
            let (mac, log) = new_mac(&notifications);

            mac.mlme_set_request(&SetRequestAttribute::MacPanId(0xabcd))
                .await
                .unwrap();
            assert_eq!(mac.pan_id().await, 0xabcd);
            assert_eq!(log.take(), [Event::SetPanId(0xabcd)]);
        }
        .block_on()
    }

    #[test]
    fn set_addresses() {
        async {
            let notifications = NotificationChannel::new();
            let (mac, log) = new_mac(&notifications);

            mac.mlme_set_request(&SetRequestAttribute::MacShortAddress(0x0042))
                .await
                .unwrap();
            mac.mlme_set_request(&SetRequestAttribute::MacExtendedAddress([1; 8]))
                .await
                .unwrap();
            mac.mlme_set_request(&SetRequestAttribute::MacAssociationPermit(true))
                .await
                .unwrap();

            let pib = mac.pib().await;
            assert_eq!(pib.short_address, 0x0042);
            assert_eq!(pib.extended_address, Some([1; 8]));
            assert!(pib.association_permit);
            assert!(log.take().is_empty());
        }
        .block_on()
    }

    #[test]
    fn pan_id_is_locked_during_scan() {
        async {
            let notifications = NotificationChannel::new();
            let (mac, _log) = new_mac(&notifications);
            mac.mlme_set_request(&SetRequestAttribute::MacPanId(0x0777))
                .await
                .unwrap();

            let request = ScanRequest {
                scan_type: ScanType::Passive,
                channel_page: 0,
                channels: &[11],
                duration: 0,
            };
            mac.mlme_scan_request(&request).await.unwrap();
            assert_eq!(mac.pan_id().await, BROADCAST_PAN_ID);
            assert_eq!(
                mac.mlme_set_request(&SetRequestAttribute::MacPanId(0x0888))
                    .await,
                Err(SetError::ScanInProgress)
            );

            mac.on_timer_expired();
            assert!(next_scan_confirm(&notifications).is_some());
            assert_eq!(mac.pan_id().await, 0x0777);
        }
        .block_on()
    }
}
