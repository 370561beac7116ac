#![allow(dead_code)]

use crate::time::SymbolDuration;

// Constants of IEEE 802.15.4-2024, section 8.4.2, Table 8-35, MAC constants
/// The number of symbols forming a superframe slot when the superframe order is
/// equal to zero, as described in 6.2.1.
pub const A_BASE_SLOT_DURATION: SymbolDuration = SymbolDuration::from_ticks(60);
/// The number of slots contained in any superframe.
pub const A_NUM_SUPERFRAME_SLOTS: u8 = 16;
/// The number of symbols forming a superframe when the superframe order is
/// equal to zero.
pub const A_BASE_SUPERFRAME_DURATION: SymbolDuration =
    SymbolDuration::from_ticks(A_BASE_SLOT_DURATION.ticks() * A_NUM_SUPERFRAME_SLOTS as u64);

/// PAN id accepting frames from any PAN. Installed as the receive filter
/// while scanning.
pub const BROADCAST_PAN_ID: u16 = 0xffff;

/// Maximum number of channels in a single scan request.
pub const MAX_SCAN_CHANNELS: usize = 15;
/// Maximum value of the ScanDuration parameter.
pub const MAX_SCAN_DURATION: u8 = 15;

/// The time spent listening on each channel during a passive scan:
/// [aBaseSuperframeDuration × (2^n + 1)] symbols where n is the ScanDuration
/// parameter, see IEEE 802.15.4-2020, section 8.2.11.1.
///
/// `duration` must not exceed [`MAX_SCAN_DURATION`].
pub const fn scan_window(duration: u8) -> SymbolDuration {
    SymbolDuration::from_ticks(A_BASE_SUPERFRAME_DURATION.ticks() * ((1u64 << duration) + 1))
}
