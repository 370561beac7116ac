use heapless::Vec;
use wpan_util::{debug, info, sync::Interrupted};

use crate::{
    config::MAC_MAX_PAN_DESCRIPTORS,
    constants::{scan_window, BROADCAST_PAN_ID, MAX_SCAN_CHANNELS, MAX_SCAN_DURATION},
    mac::{MacDataGuard, MacOperation, MacService, TimeoutHandler},
    notify::{MacNotification, MacNotifier},
    radio::RadioControl,
    time::SymbolDuration,
    timer::MacTimer,
};

use super::beacon::PanDescriptor;

pub type ScanChannelList = Vec<u8, MAX_SCAN_CHANNELS>;
pub type PanDescriptorList = Vec<PanDescriptor, MAC_MAX_PAN_DESCRIPTORS>;

/// IEEE 802.15.4-2020, section 8.2.11.1, table 8-53
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ScanType {
    Ed = 0,
    Active = 1,
    Passive = 2,
    Orphan = 3,
}

impl TryFrom<u8> for ScanType {
    type Error = ScanError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ScanType::Ed),
            1 => Ok(ScanType::Active),
            2 => Ok(ScanType::Passive),
            3 => Ok(ScanType::Orphan),
            _ => Err(ScanError::InvalidArgument),
        }
    }
}

/// The MLME-SCAN.request primitive parameters.
///
/// The request is copied on admission, the caller may reuse it as soon as
/// [`MacService::mlme_scan_request`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanRequest<'a> {
    pub scan_type: ScanType,
    pub channel_page: u8,
    /// Channels to scan in the given order, at most [`MAX_SCAN_CHANNELS`].
    pub channels: &'a [u8],
    /// The time spent on each channel is [aBaseSuperframeDuration × (2^n +
    /// 1)] symbols, where n is this value.
    ///
    /// ## Range
    ///
    /// 0-15
    pub duration: u8,
}

/// Final status of an admitted scan.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanStatus {
    /// At least one beacon was found.
    Success,
    /// All channels were scanned without finding a beacon.
    NoBeacon,
    /// The PAN descriptor list filled up before all channels were scanned.
    LimitReached,
}

/// Synchronous failures of [`MacService::mlme_scan_request`]. Nothing is
/// admitted if one of these is returned.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanError {
    /// Duration or channel count out of range, or unknown scan type.
    InvalidArgument,
    /// Interrupted while waiting for another MAC operation to finish.
    Interrupted,
    /// The scan type is known but not implemented.
    NotSupported,
}

impl From<Interrupted> for ScanError {
    fn from(_: Interrupted) -> Self {
        ScanError::Interrupted
    }
}

/// The MLME-SCAN.confirm primitive reports the result of an admitted scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfirm {
    pub status: ScanStatus,
    pub scan_type: ScanType,
    pub channel_page: u8,
    /// Requested channels that were not (fully) scanned, in request order.
    pub unscanned_channels: ScanChannelList,
    /// One descriptor per coordinator found.
    pub pan_descriptors: PanDescriptorList,
}

impl ScanConfirm {
    pub fn num_unscanned(&self) -> usize {
        self.unscanned_channels.len()
    }

    pub fn num_descriptors(&self) -> usize {
        self.pan_descriptors.len()
    }
}

/// The scan admitted last and its progress. Overwritten on each admission.
pub(crate) struct ScanState {
    pub(crate) scan_type: ScanType,
    pub(crate) channel_page: u8,
    pub(crate) channels: ScanChannelList,
    /// Index into `channels` of the channel currently being scanned.
    pub(crate) index: usize,
    pub(crate) descriptors: PanDescriptorList,
    /// Listening window per channel, fixed on admission.
    pub(crate) window: SymbolDuration,
    /// Only valid while a scan is in progress.
    pub(crate) pan_id_before_scan: u16,
    /// Set while the receiver is listening on behalf of the scan, i.e.
    /// between admission and finalization.
    pub(crate) in_progress: bool,
}

impl ScanState {
    pub(crate) const fn new() -> Self {
        Self {
            scan_type: ScanType::Passive,
            channel_page: 0,
            channels: Vec::new(),
            index: 0,
            descriptors: Vec::new(),
            window: SymbolDuration::from_ticks(0),
            pan_id_before_scan: BROADCAST_PAN_ID,
            in_progress: false,
        }
    }

    fn admit(&mut self, request: &ScanRequest<'_>, channels: ScanChannelList) {
        self.scan_type = request.scan_type;
        self.channel_page = request.channel_page;
        self.channels = channels;
        self.index = 0;
        self.descriptors.clear();
        self.window = scan_window(request.duration);
    }
}

impl<R, T, N> MacService<R, T, N>
where
    R: RadioControl,
    T: MacTimer,
    N: MacNotifier,
{
    /// Initiates a channel scan over a given list of channels.
    ///
    /// Waits until any other MAC operation finished. Returns as soon as the
    /// receiver listens on the first channel. The outcome of the scan is
    /// reported asynchronously through a
    /// [`MacNotification::ScanConfirm`].
    pub async fn mlme_scan_request(&self, request: &ScanRequest<'_>) -> Result<(), ScanError> {
        if request.duration > MAX_SCAN_DURATION {
            return Err(ScanError::InvalidArgument);
        }
        let channels =
            ScanChannelList::from_slice(request.channels).map_err(|_| ScanError::InvalidArgument)?;

        let mut data = self.begin_operation(MacOperation::Scan).await?;
        data.scan.admit(request, channels);

        match request.scan_type {
            ScanType::Passive => {
                self.start_passive_scan(data);
                Ok(())
            }
            ScanType::Active | ScanType::Ed | ScanType::Orphan => {
                debug!("scan type {} not supported", request.scan_type as u8);
                drop(data);
                self.end_operation();
                Err(ScanError::NotSupported)
            }
        }
    }

    fn start_passive_scan(&self, mut data: MacDataGuard<'_, R, T>) {
        // Before commencing a passive scan, macPanId is stored and set to the
        // broadcast PAN id so that beacons of all PANs pass the receive
        // filter. It is restored when the scan finishes.
        data.scan.pan_id_before_scan = data.pib.pan_id;
        data.scan.in_progress = true;

        if data.scan.channels.is_empty() {
            self.finish_scan(data, ScanStatus::NoBeacon);
            return;
        }

        info!("passive scan of {} channel(s) started", data.scan.channels.len());

        let first_channel = data.scan.channels[0];
        let page = data.scan.channel_page;
        data.set_channel(first_channel, page);
        data.set_pan_id(BROADCAST_PAN_ID);
        data.radio.enable_rx();

        let window = data.scan.window;
        data.start_timer(window, TimeoutHandler::ScanChannel);
    }

    /// Called when the listening window of the current scan channel elapsed.
    pub(crate) fn scan_channel_timeout(&self, mut data: MacDataGuard<'_, R, T>) {
        assert_eq!(
            self.current_operation(),
            MacOperation::Scan,
            "scan channel timeout without a scan in progress"
        );

        data.radio.disable_rx();
        data.scan.index += 1;

        if data.scan.index == data.scan.channels.len() {
            let status = if data.scan.descriptors.is_empty() {
                ScanStatus::NoBeacon
            } else {
                ScanStatus::Success
            };
            self.finish_scan(data, status);
            return;
        }

        let channel = data.scan.channels[data.scan.index];
        let page = data.scan.channel_page;
        debug!("scanning channel {}", channel);
        data.set_channel(channel, page);
        data.radio.enable_rx();

        let window = data.scan.window;
        data.start_timer(window, TimeoutHandler::ScanChannel);
    }

    /// Finalizes the scan in progress and delivers its confirmation.
    ///
    /// The operation lock is given back before the confirmation is assembled
    /// and before macPanId is restored. Other operations only need the data
    /// lock to proceed from there.
    pub(crate) fn finish_scan(&self, mut data: MacDataGuard<'_, R, T>, status: ScanStatus) {
        self.end_operation();

        let scan = &data.scan;
        let confirm = ScanConfirm {
            status,
            scan_type: scan.scan_type,
            channel_page: scan.channel_page,
            unscanned_channels: scan.channels.iter().skip(scan.index).copied().collect(),
            pan_descriptors: scan.descriptors.clone(),
        };

        let pan_id = data.scan.pan_id_before_scan;
        data.set_pan_id(pan_id);
        data.scan.in_progress = false;
        drop(data);

        info!(
            "scan finished, {} descriptor(s), {} channel(s) unscanned",
            confirm.num_descriptors(),
            confirm.num_unscanned()
        );
        self.notifier().notify(MacNotification::ScanConfirm(confirm));
    }
}
