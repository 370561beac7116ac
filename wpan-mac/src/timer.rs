//! One-shot timer required by the MAC sublayer.
//!
//! The MAC arms at most one timer at a time. When it expires, the timer
//! facility calls [`crate::mac::MacService::on_timer_expired`] from the
//! executor that also drives the MAC. The MAC decides at expiry which
//! handler is due; the timer itself carries no context.
//!
//! [`crate::alarm::MacAlarm`] provides an implementation on top of any
//! [`embedded_hal_async::delay::DelayNs`].

use crate::time::SymbolDuration;

pub trait MacTimer {
    /// Arms the timer to expire after the given duration. Re-arming replaces
    /// a pending deadline. Must not block.
    fn start(&mut self, duration: SymbolDuration);

    /// Disarms the timer. No expiry will be signalled for a previously armed
    /// deadline.
    fn cancel(&mut self);
}
