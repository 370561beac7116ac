//! Recording collaborators for MAC tests.

use core::{
    future::{poll_fn, Future},
    pin::Pin,
    task::Poll,
};
use std::{cell::RefCell, rc::Rc, vec::Vec};

use crate::{
    mac::{
        mlme::{
            beacon::{Address, CoordinatorAddress, PanDescriptor},
            scan::ScanConfirm,
        },
        MacService,
    },
    notify::{MacNotification, NotificationChannel},
    radio::RadioControl,
    time::SymbolDuration,
    timer::MacTimer,
};

/// A collaborator call observed by a test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Event {
    SetChannel(u8, u8),
    SetPanId(u16),
    EnableRx,
    DisableRx,
    /// Timer armed for the given number of symbols.
    TimerStart(u64),
    TimerCancel,
}

/// Shared, ordered log of collaborator calls.
#[derive(Debug, Clone, Default)]
pub(crate) struct EventLog(Rc<RefCell<Vec<Event>>>);

impl EventLog {
    fn push(&self, event: Event) {
        self.0.borrow_mut().push(event);
    }

    /// Returns and clears all events recorded so far.
    pub(crate) fn take(&self) -> Vec<Event> {
        core::mem::take(&mut *self.0.borrow_mut())
    }
}

pub(crate) struct MockRadio {
    log: EventLog,
}

impl RadioControl for MockRadio {
    fn set_channel(&mut self, channel: u8, page: u8) {
        self.log.push(Event::SetChannel(channel, page));
    }

    fn set_pan_id(&mut self, pan_id: u16) {
        self.log.push(Event::SetPanId(pan_id));
    }

    fn enable_rx(&mut self) {
        self.log.push(Event::EnableRx);
    }

    fn disable_rx(&mut self) {
        self.log.push(Event::DisableRx);
    }
}

pub(crate) struct MockTimer {
    log: EventLog,
}

impl MacTimer for MockTimer {
    fn start(&mut self, duration: SymbolDuration) {
        self.log.push(Event::TimerStart(duration.ticks()));
    }

    fn cancel(&mut self) {
        self.log.push(Event::TimerCancel);
    }
}

pub(crate) type TestMac<'n> = MacService<MockRadio, MockTimer, &'n NotificationChannel>;

pub(crate) fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a MAC with recording collaborators. Radio and timer share one log
/// so that their relative order can be asserted.
pub(crate) fn new_mac(notifications: &NotificationChannel) -> (TestMac<'_>, EventLog) {
    let log = EventLog::default();
    let timer = MockTimer { log: log.clone() };
    new_mac_with_timer(notifications, timer, log)
}

/// Creates a MAC driven by the given timer. Only radio calls are recorded
/// unless the timer shares the log.
pub(crate) fn new_mac_with_timer<T: MacTimer>(
    notifications: &NotificationChannel,
    timer: T,
    log: EventLog,
) -> (MacService<MockRadio, T, &NotificationChannel>, EventLog) {
    init_logger();
    let mac = MacService::new(MockRadio { log: log.clone() }, timer, notifications);
    (mac, log)
}

/// Pops the next scan confirmation, if any was delivered.
pub(crate) fn next_scan_confirm(notifications: &NotificationChannel) -> Option<ScanConfirm> {
    match notifications.try_receive() {
        Ok(MacNotification::ScanConfirm(confirm)) => Some(confirm),
        Err(_) => None,
    }
}

/// A beacon from a coordinator with the given short address.
pub(crate) fn descriptor(short_address: u16, channel: u8) -> PanDescriptor {
    PanDescriptor {
        coordinator: CoordinatorAddress {
            pan_id: 0xbeef,
            address: Address::Short(short_address),
        },
        channel,
        channel_page: 0,
        superframe_spec: 0xcf8f,
        gts_permit: false,
        link_quality: 200,
        timestamp: 0,
    }
}

/// Polls the given future exactly once.
pub(crate) async fn poll_once<F: Future>(mut future: Pin<&mut F>) -> Poll<F::Output> {
    poll_fn(|cx| Poll::Ready(future.as_mut().poll(cx))).await
}
