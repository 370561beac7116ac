//! Time structures.
//!
//! MAC timing is expressed in PHY symbol periods. We use the O-QPSK 2.4 GHz
//! symbol rate throughout.

use fugit::Duration;

/// O-QPSK 250kB/s = 31.25kb/s = 62.5ksymbol/s (1 byte = 8 bit = 2 O-QPSK symbols)
pub const O_QPSK_FREQUENCY: u32 = 62_500;
pub type SymbolDuration = Duration<u64, 1, O_QPSK_FREQUENCY>;

/// Converts a symbol duration to microseconds as expected by
/// [`embedded_hal_async::delay::DelayNs::delay_us`], saturating at the
/// largest representable delay.
pub fn to_delay_micros(duration: SymbolDuration) -> u32 {
    u32::try_from(duration.to_micros()).unwrap_or(u32::MAX)
}
