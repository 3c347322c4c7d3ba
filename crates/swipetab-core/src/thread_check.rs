//! UI-thread affinity.
//!
//! Gesture callbacks, animation ticks and transition completions all run on
//! the UI thread. State that must stay there records its creating thread in
//! a [`ThreadAffinity`] and checks it on entry.
//!
//! ```
//! use swipetab_core::ThreadAffinity;
//!
//! let affinity = ThreadAffinity::current();
//! affinity.debug_assert_same_thread();
//! assert!(affinity.check().is_ok());
//!
//! let from_worker = std::thread::spawn(move || affinity.check()).join().unwrap();
//! assert!(from_worker.is_err());
//! ```

use std::thread::{self, ThreadId};

use crate::error::{CoreError, CoreResult};

/// The thread some state is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThreadAffinity {
    owner: ThreadId,
}

impl Default for ThreadAffinity {
    fn default() -> Self {
        Self::current()
    }
}

impl ThreadAffinity {
    /// Bind to the calling thread.
    #[inline]
    pub fn current() -> Self {
        Self {
            owner: thread::current().id(),
        }
    }

    #[inline]
    pub fn owner(&self) -> ThreadId {
        self.owner
    }

    #[inline]
    pub fn is_same_thread(&self) -> bool {
        thread::current().id() == self.owner
    }

    /// `Err(WrongThread)` when called off the owning thread.
    pub fn check(&self) -> CoreResult<()> {
        if self.is_same_thread() {
            return Ok(());
        }
        let current = thread::current();
        Err(CoreError::WrongThread {
            expected: self.owner,
            actual: current.id(),
            name: current.name().unwrap_or("<unnamed>").to_owned(),
        })
    }

    /// # Panics
    ///
    /// Panics when called off the owning thread.
    #[inline]
    pub fn assert_same_thread(&self) {
        if let Err(err) = self.check() {
            wrong_thread(&err);
        }
    }

    /// [`assert_same_thread`](Self::assert_same_thread) in debug builds,
    /// nothing in release builds.
    #[inline]
    pub fn debug_assert_same_thread(&self) {
        #[cfg(debug_assertions)]
        self.assert_same_thread();
    }
}

#[cold]
#[inline(never)]
fn wrong_thread(err: &CoreError) -> ! {
    panic!("{err}: tab container state must be driven from the UI thread that created it")
}

static_assertions::assert_impl_all!(ThreadAffinity: Send, Sync, Copy);
