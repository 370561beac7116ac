use core::cell::UnsafeCell;
use core::marker::PhantomData;
use core::ops::{Deref, DerefMut};

use super::semaphore::{Interrupted, Semaphore};

/// A generic mutex that is independent on the underlying async runtime.
/// The idea is that this is used to synchronize different parts inside 1 single
/// task or executor that may run concurrently through `select`.
///
/// Other than the semaphore it is built on, a mutex is always released by the
/// context that locked it, i.e. when its guard is dropped.
pub struct Mutex<T> {
    value: UnsafeCell<T>,
    semaphore: Semaphore,
    _no_send_sync: PhantomData<*mut T>,
}

impl<T> Mutex<T> {
    pub const fn new(value: T) -> Self {
        Mutex {
            value: UnsafeCell::new(value),
            semaphore: Semaphore::new(),
            _no_send_sync: PhantomData,
        }
    }

    /// Waits until the lock can be acquired. Cannot be interrupted.
    pub async fn lock(&self) -> MutexGuard<'_, T> {
        self.semaphore.take().await;

        // Now that we have acquired the lock, we can return the guard
        MutexGuard { mutex: self }
    }

    /// Waits until the lock can be acquired or the waiting task is interrupted
    /// through [`Mutex::interrupt()`].
    pub async fn lock_interruptible(&self) -> Result<MutexGuard<'_, T>, Interrupted> {
        self.semaphore.take_interruptible().await?;
        Ok(MutexGuard { mutex: self })
    }

    pub fn try_lock(&self) -> Option<MutexGuard<'_, T>> {
        if self.semaphore.try_take() {
            Some(MutexGuard { mutex: self })
        } else {
            None
        }
    }

    /// Fails all interruptible lock attempts currently waiting for the lock.
    pub fn interrupt(&self) {
        self.semaphore.interrupt()
    }

    pub fn is_locked(&self) -> bool {
        self.semaphore.is_taken()
    }

    /// Get access to the protected value inside the mutex. This is similar to
    /// the Mutex::get_mut in std.
    pub fn get_mut(&mut self) -> &mut T {
        // Safety: &mut gives us exclusive access to T
        self.value.get_mut()
    }
}

/// Represents current exclusive access to the resource protected by a mutex
pub struct MutexGuard<'a, T> {
    mutex: &'a Mutex<T>,
}

impl<T> Deref for MutexGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        // Safety: Only one guard can exist at a time
        unsafe { &*self.mutex.value.get() }
    }
}

impl<T> DerefMut for MutexGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        // Safety: Only one guard can exist at a time
        unsafe { &mut *self.mutex.value.get() }
    }
}

impl<T> Drop for MutexGuard<'_, T> {
    fn drop(&mut self) {
        self.mutex.semaphore.give();
    }
}
