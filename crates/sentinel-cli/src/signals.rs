//! `SIGINT`/`SIGTERM` handling for the process exit contract (spec §6):
//! "write structured report, print summary to stderr for risk >= medium
//! ... handlers must perform the report then re-raise default exit
//! (130, 143 respectively)". Grounded on `assay-core`'s
//! `kill_switch/killer.rs` use of `nix::sys::signal`, narrowed here from
//! killing another process to trapping signals delivered to this one.

use nix::sys::signal::{sigaction, SaFlags, SigAction, SigHandler, SigSet, Signal};
use std::sync::atomic::{AtomicI32, Ordering};

static RECEIVED_SIGNAL: AtomicI32 = AtomicI32::new(0);

extern "C" fn record_signal(signum: libc_signal_t) {
    RECEIVED_SIGNAL.store(signum as i32, Ordering::SeqCst);
}

// `nix::sys::signal::SigHandler::Handler` wants a bare `extern "C" fn(i32)`;
// spelled out as a type alias so the handler's signature reads plainly.
type libc_signal_t = std::os::raw::c_int;

/// Install handlers for `SIGINT` and `SIGTERM` that only record which
/// signal arrived; `poll_signal` / `take_signal` observe it cooperatively
/// from the run loop, matching spec §5's "synchronous Policy Engine
/// calls never suspend" (a real async-signal-safe handler must not do
/// I/O or take locks itself).
pub fn install() -> anyhow::Result<()> {
    let action = SigAction::new(SigHandler::Handler(record_signal), SaFlags::empty(), SigSet::empty());
    // Safety: `record_signal` only performs an atomic store, the one
    // operation POSIX guarantees is async-signal-safe.
    unsafe {
        sigaction(Signal::SIGINT, &action)?;
        sigaction(Signal::SIGTERM, &action)?;
    }
    Ok(())
}

/// Non-blocking check of whether a trapped signal has arrived since the
/// last call. Does not clear the flag.
pub fn pending() -> Option<Signal> {
    match RECEIVED_SIGNAL.load(Ordering::SeqCst) {
        0 => None,
        raw => Signal::try_from(raw).ok(),
    }
}

/// The exit code the host must use after its own shutdown report has
/// been written for the given signal (spec §6: "re-raise default exit
/// (130, 143 respectively)"). `std::process::exit` with this code
/// produces the same externally observable exit status as re-raising
/// the signal against the default disposition would.
pub fn default_exit_code(signal: Signal) -> i32 {
    match signal {
        Signal::SIGINT => 130,
        Signal::SIGTERM => 143,
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_exit_codes_match_posix_convention() {
        assert_eq!(default_exit_code(Signal::SIGINT), 130);
        assert_eq!(default_exit_code(Signal::SIGTERM), 143);
    }

    #[test]
    fn pending_is_none_before_any_signal_is_recorded() {
        assert!(pending().is_none());
    }
}
