//! Audible phase-completion notification.
//!
//! Playback is cosmetic: the caller logs a failure and carries on.

use std::io::Write;

use crate::timer::Phase;

pub trait Notifier: Send {
    fn notify(&mut self, finished: Phase) -> std::io::Result<()>;
}

/// Rings the terminal bell on stderr.
#[derive(Debug, Default)]
pub struct BellNotifier;

impl Notifier for BellNotifier {
    fn notify(&mut self, _finished: Phase) -> std::io::Result<()> {
        let mut err = std::io::stderr().lock();
        err.write_all(b"\x07")?;
        err.flush()
    }
}

/// Does nothing; for headless runs.
#[derive(Debug, Default)]
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn notify(&mut self, _finished: Phase) -> std::io::Result<()> {
        Ok(())
    }
}
