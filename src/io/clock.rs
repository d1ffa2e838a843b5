// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Monotonic millisecond time source.

/// Free-running millisecond counter.
///
/// The value may wrap; consumers compare timestamps with `wrapping_sub`.
pub trait Clock {
    fn now_ms(&self) -> u32;

    /// Milliseconds since `since`, correct across one counter wrap.
    #[inline]
    fn elapsed_ms(&self, since: u32) -> u32 {
        self.now_ms().wrapping_sub(since)
    }
}

impl<T: Clock + ?Sized> Clock for &T {
    #[inline]
    fn now_ms(&self) -> u32 {
        (**self).now_ms()
    }
}
