//! Original-function handle captured at initialization (spec §4.4:
//! "never re-enter... bypass the interception layer via an
//! original-function handle"; invariant 7, "no reentrance").
//!
//! An [`EscapeHandle`] wraps an I/O writer obtained *before* an adapter
//! patches its hook point, and pairs every write with a thread-local
//! reentrance guard. If the write itself triggers another interception
//! (e.g. a logging library that also does file I/O under the hood),
//! [`EscapeHandle::write`] detects that the guard is already held and
//! drops the nested write rather than recursing into
//! `sentinel_core::decide` from inside the Shutdown Reporter or the
//! audit log.

use std::cell::Cell;
use std::io::Write;
use std::sync::Mutex;

thread_local! {
    static IN_ESCAPE_WRITE: Cell<bool> = const { Cell::new(false) };
}

/// True while the current thread is inside an `EscapeHandle::write`
/// call. Adapters can consult this before calling `evaluate` to
/// short-circuit recursive invocations per invariant 7.
pub fn in_escape_write() -> bool {
    IN_ESCAPE_WRITE.with(|flag| flag.get())
}

pub struct EscapeHandle<W: Write> {
    inner: Mutex<W>,
}

impl<W: Write> EscapeHandle<W> {
    pub fn new(inner: W) -> Self {
        Self { inner: Mutex::new(inner) }
    }

    /// Write bytes using the captured original handle. No-op (returns
    /// `Ok(())` without touching `inner`) if called reentrantly.
    pub fn write(&self, bytes: &[u8]) -> std::io::Result<()> {
        if in_escape_write() {
            return Ok(());
        }
        IN_ESCAPE_WRITE.with(|flag| flag.set(true));
        let result = (|| {
            let mut guard = match self.inner.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            guard.write_all(bytes)
        })();
        IN_ESCAPE_WRITE.with(|flag| flag.set(false));
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_passes_through_to_inner_handle() {
        let handle = EscapeHandle::new(Vec::new());
        handle.write(b"hello").unwrap();
        assert_eq!(handle.inner.lock().unwrap().as_slice(), b"hello");
    }

    #[test]
    fn reentrant_write_is_dropped_not_recursed() {
        let handle = EscapeHandle::new(Vec::new());
        IN_ESCAPE_WRITE.with(|flag| flag.set(true));
        handle.write(b"nested").unwrap();
        IN_ESCAPE_WRITE.with(|flag| flag.set(false));
        assert!(handle.inner.lock().unwrap().is_empty());
    }
}
