pub mod mlme;
pub mod pib;

#[cfg(test)]
pub(crate) mod test_support;

use core::cell::Cell;

use wpan_util::{
    debug,
    sync::{Interrupted, Mutex, MutexGuard, Semaphore},
    warn,
};

use crate::{notify::MacNotifier, radio::RadioControl, time::SymbolDuration, timer::MacTimer};

use self::{mlme::scan::ScanState, pib::Pib};

/// The top-level MAC operation currently in progress. At most one operation
/// may be in progress at any time.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacOperation {
    None,
    Scan,
    /// Reserved for association, serialized by the operation lock like a scan.
    Associate,
    /// Reserved for data polling, serialized by the operation lock like a scan.
    Poll,
}

/// The handler that is due when the MAC timer expires next.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TimeoutHandler {
    /// The listening window on the current scan channel elapsed.
    ScanChannel,
}

/// State shared between request primitives, timer expiry and the reception
/// path. Only accessible through the MAC data lock.
pub(crate) struct MacData<R, T> {
    pub(crate) radio: R,
    pub(crate) timer: T,
    pub(crate) pib: Pib,
    pub(crate) scan: ScanState,
    timeout_handler: Option<TimeoutHandler>,
}

pub(crate) type MacDataGuard<'svc, R, T> = MutexGuard<'svc, MacData<R, T>>;

impl<R: RadioControl, T: MacTimer> MacData<R, T> {
    pub(crate) fn set_channel(&mut self, channel: u8, page: u8) {
        self.pib.current_channel = channel;
        self.pib.current_page = page;
        self.radio.set_channel(channel, page);
    }

    pub(crate) fn set_pan_id(&mut self, pan_id: u16) {
        self.pib.pan_id = pan_id;
        self.radio.set_pan_id(pan_id);
    }

    /// Arms the MAC timer. The handler is looked up again at expiry so that it
    /// always sees the state current at that time.
    pub(crate) fn start_timer(&mut self, duration: SymbolDuration, handler: TimeoutHandler) {
        self.timeout_handler = Some(handler);
        self.timer.start(duration);
    }

    pub(crate) fn cancel_timer(&mut self) {
        self.timeout_handler = None;
        self.timer.cancel();
    }
}

/// The MAC context of a single MAC sublayer instance.
///
/// Two locks protect the context:
/// - The operation lock serializes top-level MAC operations (scan,
///   association, poll, ...). It is held for the whole duration of an
///   operation, i.e. it is taken by the request primitive and given back when
///   the operation finishes, typically from a timer or reception callback.
/// - The data lock protects the radio, the PIB and operation state. It is
///   never held across a suspension point.
///
/// The context is not synchronized across threads. Requests, timer expiry and
/// frame reception must all be driven by the same executor.
pub struct MacService<R, T, N> {
    /// Serializes top-level operations.
    op_lock: Semaphore,
    /// Only written while the operation lock is held.
    current_op: Cell<MacOperation>,
    data: Mutex<MacData<R, T>>,
    /// Delivers confirmation primitives to the next higher layer.
    notifier: N,
}

impl<R, T, N> MacService<R, T, N>
where
    R: RadioControl,
    T: MacTimer,
    N: MacNotifier,
{
    /// Creates a new [`MacService<R, T, N>`] with a default PIB.
    pub fn new(radio: R, timer: T, notifier: N) -> Self {
        Self {
            op_lock: Semaphore::new(),
            current_op: Cell::new(MacOperation::None),
            data: Mutex::new(MacData {
                radio,
                timer,
                pib: Pib::default(),
                scan: ScanState::new(),
                timeout_handler: None,
            }),
            notifier,
        }
    }

    /// The operation currently in progress.
    pub fn current_operation(&self) -> MacOperation {
        self.current_op.get()
    }

    /// Interrupts all requests currently waiting for one of the MAC locks.
    /// They return with an interruption error. Operations already admitted
    /// are not affected.
    pub fn interrupt(&self) {
        self.op_lock.interrupt();
        self.data.interrupt();
    }

    /// Must be called by the timer facility whenever the timer armed through
    /// [`MacTimer::start`] expires.
    ///
    /// Runs to completion without suspending.
    pub fn on_timer_expired(&self) {
        let mut data = self.lock_data_nonblocking();
        let Some(handler) = data.timeout_handler.take() else {
            warn!("spurious MAC timer expiry");
            return;
        };

        match handler {
            TimeoutHandler::ScanChannel => self.scan_channel_timeout(data),
        }
    }

    /// Admits a new top-level operation: waits for the operation lock, marks
    /// the operation as current and waits for the data lock.
    ///
    /// Both waits may be interrupted. If waiting for the data lock is
    /// interrupted, the operation is withdrawn and the operation lock given
    /// back before returning.
    pub(crate) async fn begin_operation(
        &self,
        operation: MacOperation,
    ) -> Result<MacDataGuard<'_, R, T>, Interrupted> {
        self.op_lock.take_interruptible().await?;
        self.current_op.set(operation);

        match self.data.lock_interruptible().await {
            Ok(data) => Ok(data),
            Err(interrupted) => {
                debug!("interrupted while waiting for the MAC data lock");
                self.end_operation();
                Err(interrupted)
            }
        }
    }

    /// Marks the current operation as finished and lets the next operation
    /// in.
    pub(crate) fn end_operation(&self) {
        self.current_op.set(MacOperation::None);
        self.op_lock.give();
    }

    /// Locks the MAC data from a context that must not suspend.
    ///
    /// The data lock is never held across a suspension point, so it must be
    /// available whenever a callback runs on the MAC executor.
    pub(crate) fn lock_data_nonblocking(&self) -> MacDataGuard<'_, R, T> {
        self.data
            .try_lock()
            .expect("MAC data lock held across a suspension point")
    }

    /// Locks the MAC data from a context that may suspend.
    pub(crate) async fn lock_data(&self) -> MacDataGuard<'_, R, T> {
        self.data.lock().await
    }

    pub(crate) fn notifier(&self) -> &N {
        &self.notifier
    }
}
