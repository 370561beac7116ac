//! [`MacTimer`] on top of an async delay provider.
//!
//! The MAC arms its timer from synchronous code, so arming only records the
//! request. [`MacAlarm::run`] must be polled on the MAC executor, e.g. joined
//! with the upper layer through `select`. It waits for the armed duration and
//! then calls [`MacService::on_timer_expired`].

use embassy_futures::select::{select, Either};
use embassy_sync::{blocking_mutex::raw::NoopRawMutex, signal::Signal};
use embedded_hal_async::delay::DelayNs;

use crate::{
    mac::MacService,
    notify::MacNotifier,
    radio::RadioControl,
    time::{to_delay_micros, SymbolDuration},
    timer::MacTimer,
};

#[derive(Debug, Clone, Copy)]
enum AlarmCommand {
    Start(SymbolDuration),
    Cancel,
}

pub struct MacAlarm {
    signal: Signal<NoopRawMutex, AlarmCommand>,
}

impl MacAlarm {
    pub const fn new() -> Self {
        Self {
            signal: Signal::new(),
        }
    }

    /// The timer to hand to [`MacService::new`].
    pub fn handle(&self) -> AlarmHandle<'_> {
        AlarmHandle { alarm: self }
    }

    /// Drives the alarm. Never returns.
    ///
    /// Only the most recent command counts: re-arming restarts the delay and
    /// cancelling abandons it. An expiry is not reported if a new command
    /// arrived in the meantime.
    pub async fn run<R, T, N, D>(&self, mac: &MacService<R, T, N>, mut delay: D) -> !
    where
        R: RadioControl,
        T: MacTimer,
        N: MacNotifier,
        D: DelayNs,
    {
        loop {
            let mut command = self.signal.wait().await;

            while let AlarmCommand::Start(duration) = command {
                match select(
                    delay.delay_us(to_delay_micros(duration)),
                    self.signal.wait(),
                )
                .await
                {
                    Either::First(()) => {
                        if !self.signal.signaled() {
                            mac.on_timer_expired();
                        }
                        break;
                    }
                    Either::Second(next) => command = next,
                }
            }
        }
    }
}

impl Default for MacAlarm {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy)]
pub struct AlarmHandle<'a> {
    alarm: &'a MacAlarm,
}

impl MacTimer for AlarmHandle<'_> {
    fn start(&mut self, duration: SymbolDuration) {
        self.alarm.signal.signal(AlarmCommand::Start(duration));
    }

    fn cancel(&mut self) {
        self.alarm.signal.signal(AlarmCommand::Cancel);
    }
}
