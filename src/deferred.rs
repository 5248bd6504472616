//! Settle-once futures backing the show and hide awaitables
//!
//! A [`Deferred`] is the writer half and settles at most once. Every
//! [`ModalFuture`] taken from it shares one slot, so clones all observe the
//! same outcome. Dropping a deferred without settling abandons its futures:
//! they stay pending forever and never surface an error.

use crate::error::ModalOutcome;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll, Waker};

/// Awaitable returned by show: settles with the modal's outcome
pub type ShowFuture = ModalFuture<ModalOutcome>;

/// Awaitable returned by hide: settles when the hide is acknowledged
pub type HideFuture = ModalFuture<()>;

struct Slot<T> {
    value: Option<T>,
    wakers: Vec<Waker>,
}

/// Writer half of a settle-once value
pub(crate) struct Deferred<T> {
    slot: Arc<Mutex<Slot<T>>>,
}

impl<T: Clone> Deferred<T> {
    pub fn new() -> Self {
        Self {
            slot: Arc::new(Mutex::new(Slot {
                value: None,
                wakers: Vec::new(),
            })),
        }
    }

    /// Stores the value and wakes every waiting future
    ///
    /// Returns `false` when already settled; the first outcome wins.
    pub fn settle(&self, value: T) -> bool {
        let mut slot = self.slot.lock().unwrap();
        if slot.value.is_some() {
            return false;
        }
        slot.value = Some(value);
        let wakers = std::mem::take(&mut slot.wakers);
        drop(slot);
        for waker in wakers {
            waker.wake();
        }
        true
    }

    pub fn future(&self) -> ModalFuture<T> {
        ModalFuture {
            slot: self.slot.clone(),
        }
    }
}

/// Shared future view of a settle-once slot
pub struct ModalFuture<T> {
    slot: Arc<Mutex<Slot<T>>>,
}

impl<T> Clone for ModalFuture<T> {
    fn clone(&self) -> Self {
        Self {
            slot: self.slot.clone(),
        }
    }
}

impl<T> ModalFuture<T> {
    /// Whether two futures observe the same underlying slot
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.slot, &b.slot)
    }

    pub fn is_settled(&self) -> bool {
        self.slot.lock().unwrap().value.is_some()
    }
}

impl<T> std::fmt::Debug for ModalFuture<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModalFuture")
            .field("settled", &self.is_settled())
            .finish()
    }
}

impl<T: Clone> Future for ModalFuture<T> {
    type Output = T;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut slot = self.slot.lock().unwrap();
        if let Some(value) = &slot.value {
            return Poll::Ready(value.clone());
        }
        if !slot.wakers.iter().any(|waker| waker.will_wake(cx.waker())) {
            slot.wakers.push(cx.waker().clone());
        }
        Poll::Pending
    }
}
