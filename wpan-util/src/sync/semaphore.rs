use core::cell::RefCell;
use core::future::Future;
use core::marker::PhantomData;
use core::pin::Pin;
use core::task::{Context, Poll};

use embassy_sync::waitqueue::MultiWakerRegistration;

/// The number of tasks that may wait on a semaphore at the same time without
/// being woken spuriously. Additional waiters are still served correctly, they
/// just cause all registered waiters to be polled once more.
const MAX_WAITERS: usize = 4;

/// Returned by interruptible acquisition when the waiting task was
/// interrupted before the semaphore could be obtained.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interrupted;

struct SemaphoreState {
    taken: bool,
    /// Incremented on every call to [`Semaphore::interrupt()`]. A pending
    /// interruptible take fails if the epoch moved since it was created.
    interrupt_epoch: u32,
    waiters: MultiWakerRegistration<MAX_WAITERS>,
}

/// A binary semaphore that is independent of the underlying async runtime.
///
/// Other than a mutex, the semaphore may be released from a different context
/// than the one that took it. This is required for operations that are
/// admitted in one call and completed from a timer or reception callback
/// later on.
///
/// The semaphore is not synchronized across threads. All users must be
/// managed by a single executor.
pub struct Semaphore {
    state: RefCell<SemaphoreState>,
    _no_send_sync: PhantomData<*mut ()>,
}

impl Default for Semaphore {
    fn default() -> Self {
        Self::new()
    }
}

impl Semaphore {
    pub const fn new() -> Self {
        Self {
            state: RefCell::new(SemaphoreState {
                taken: false,
                interrupt_epoch: 0,
                waiters: MultiWakerRegistration::new(),
            }),
            _no_send_sync: PhantomData,
        }
    }

    /// Waits until the semaphore can be taken. Cannot be interrupted.
    pub async fn take(&self) {
        let _ = self.acquire(false).await;
    }

    /// Waits until the semaphore can be taken or the waiting task is
    /// interrupted, whichever comes first.
    ///
    /// Interruptions that happen after this method was called count even if
    /// the returned future has not been polled yet.
    pub fn take_interruptible(&self) -> TakeFuture<'_> {
        self.acquire(true)
    }

    /// Takes the semaphore if it is available, never blocks.
    pub fn try_take(&self) -> bool {
        let mut state = self.state.borrow_mut();
        if state.taken {
            false
        } else {
            state.taken = true;
            true
        }
    }

    /// Releases the semaphore and wakes all waiters so that one of them can
    /// take it.
    pub fn give(&self) {
        let mut state = self.state.borrow_mut();
        debug_assert!(state.taken, "semaphore given without being taken");
        state.taken = false;
        state.waiters.wake();
    }

    /// Fails all interruptible takes that are currently pending.
    pub fn interrupt(&self) {
        let mut state = self.state.borrow_mut();
        state.interrupt_epoch = state.interrupt_epoch.wrapping_add(1);
        state.waiters.wake();
    }

    pub fn is_taken(&self) -> bool {
        self.state.borrow().taken
    }

    fn acquire(&self, interruptible: bool) -> TakeFuture<'_> {
        let epoch = interruptible.then(|| self.state.borrow().interrupt_epoch);
        TakeFuture {
            semaphore: self,
            epoch,
        }
    }
}

/// Future returned by [`Semaphore::take_interruptible()`].
pub struct TakeFuture<'sem> {
    semaphore: &'sem Semaphore,
    /// The interrupt epoch at creation time, `None` if uninterruptible.
    epoch: Option<u32>,
}

impl Future for TakeFuture<'_> {
    type Output = Result<(), Interrupted>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut state = self.semaphore.state.borrow_mut();

        if matches!(self.epoch, Some(epoch) if epoch != state.interrupt_epoch) {
            return Poll::Ready(Err(Interrupted));
        }

        if state.taken {
            state.waiters.register(cx.waker());
            Poll::Pending
        } else {
            state.taken = true;
            Poll::Ready(Ok(()))
        }
    }
}

#[cfg(test)]
mod tests {
    use core::{
        future::{poll_fn, Future},
        pin::pin,
        task::Poll,
    };

    use pollster::FutureExt as _;

    use super::{Interrupted, Semaphore};

    #[test]
    fn test_take_and_give() {
        async {
            let semaphore = Semaphore::new();
            semaphore.take().await;
            assert!(semaphore.is_taken());
            assert!(!semaphore.try_take());

            semaphore.give();
            assert!(!semaphore.is_taken());
            assert!(semaphore.try_take());
        }
        .block_on()
    }

    #[test]
    fn test_waiter_resumes_after_give() {
        async {
            let semaphore = Semaphore::new();
            assert!(semaphore.try_take());

            let mut waiter = pin!(semaphore.take_interruptible());
            poll_fn(|cx| {
                assert!(waiter.as_mut().poll(cx).is_pending());
                Poll::Ready(())
            })
            .await;

            semaphore.give();
            assert_eq!(waiter.await, Ok(()));
            assert!(semaphore.is_taken());
        }
        .block_on()
    }

    #[test]
    fn test_interrupt_fails_pending_take() {
        async {
            let semaphore = Semaphore::new();
            assert!(semaphore.try_take());

            let mut waiter = pin!(semaphore.take_interruptible());
            poll_fn(|cx| {
                assert!(waiter.as_mut().poll(cx).is_pending());
                Poll::Ready(())
            })
            .await;

            semaphore.interrupt();
            assert_eq!(waiter.await, Err(Interrupted));
            // The holder still owns the semaphore.
            assert!(semaphore.is_taken());
        }
        .block_on()
    }

    #[test]
    fn test_interrupt_before_first_poll() {
        async {
            let semaphore = Semaphore::new();
            let waiter = semaphore.take_interruptible();
            semaphore.interrupt();
            assert_eq!(waiter.await, Err(Interrupted));
            assert!(!semaphore.is_taken());
        }
        .block_on()
    }

    #[test]
    fn test_uninterruptible_take_ignores_interrupt() {
        async {
            let semaphore = Semaphore::new();
            assert!(semaphore.try_take());

            let mut waiter = pin!(semaphore.take());
            poll_fn(|cx| {
                assert!(waiter.as_mut().poll(cx).is_pending());
                Poll::Ready(())
            })
            .await;

            semaphore.interrupt();
            poll_fn(|cx| {
                assert!(waiter.as_mut().poll(cx).is_pending());
                Poll::Ready(())
            })
            .await;

            semaphore.give();
            waiter.await;
            assert!(semaphore.is_taken());
        }
        .block_on()
    }
}
