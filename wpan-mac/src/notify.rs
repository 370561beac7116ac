//! Asynchronous notifications from the MAC sublayer to the next higher layer.

use embassy_sync::{
    blocking_mutex::raw::{NoopRawMutex, RawMutex},
    channel::Channel,
};
use wpan_util::error;

use crate::{config::MAC_NOTIFICATION_QUEUE_DEPTH, mac::mlme::scan::ScanConfirm};

/// Confirmation primitives delivered once an admitted operation finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MacNotification {
    /// IEEE 802.15.4-2020, section 8.2.11.2
    ScanConfirm(ScanConfirm),
}

/// Hands notifications over to the next higher layer.
///
/// Called by the MAC after all locks were released. Implementations must not
/// block.
pub trait MacNotifier {
    fn notify(&self, notification: MacNotification);
}

impl<T: MacNotifier + ?Sized> MacNotifier for &T {
    fn notify(&self, notification: MacNotification) {
        (**self).notify(notification)
    }
}

/// Queue based delivery. A full queue drops the notification rather than
/// stalling the MAC.
impl<M: RawMutex, const N: usize> MacNotifier for Channel<M, MacNotification, N> {
    fn notify(&self, notification: MacNotification) {
        if self.try_send(notification).is_err() {
            error!("notification queue full, dropping notification");
        }
    }
}

/// The default notification queue for MAC and upper layer driven by the same
/// executor.
pub type NotificationChannel =
    Channel<NoopRawMutex, MacNotification, MAC_NOTIFICATION_QUEUE_DEPTH>;
