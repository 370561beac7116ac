//! Radio driver primitives required by the MAC sublayer.

/// Synchronous, non-blocking radio configuration.
///
/// Implementations are owned by the MAC context and only accessed while its
/// data lock is held. None of the calls may suspend.
pub trait RadioControl {
    /// Tunes the radio to the given channel on the given channel page.
    fn set_channel(&mut self, channel: u8, page: u8);

    /// Installs the PAN id receive filter.
    fn set_pan_id(&mut self, pan_id: u16);

    /// Turns the receiver on.
    fn enable_rx(&mut self);

    /// Turns the receiver off.
    fn disable_rx(&mut self);
}
