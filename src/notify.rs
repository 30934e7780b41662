//! Interaction cues.
//!
//! The page fires a cue on clicks of marked controls, on opening the detail
//! modal, and on closing it. Cues are fire-and-forget: nothing waits on them
//! and a sink that fails simply stays quiet.

use std::{
    io::{Write, stderr},
    sync::atomic::{AtomicBool, Ordering},
};

/// Sink for the page's interaction cues.
pub trait Notifier {
    fn click(&self);
    fn open(&self);
    fn close(&self);
    fn set_enabled(&self, enabled: bool);
}

/// Drops every cue.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl Notifier for Silent {
    fn click(&self) {}
    fn open(&self) {}
    fn close(&self) {}
    fn set_enabled(&self, _enabled: bool) {}
}

/// Rings the terminal bell.
///
/// Click rings once, open twice, close once; cues are dropped while disabled.
#[derive(Debug)]
pub struct Bell {
    enabled: AtomicBool,
}

impl Bell {
    pub const fn new(enabled: bool) -> Self {
        Self {
            enabled: AtomicBool::new(enabled),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    fn ring(&self, times: usize) {
        if !self.is_enabled() {
            return;
        }
        let mut err = stderr().lock();
        err.write_all(&b"\x07\x07"[..times.min(2)]).ok();
        err.flush().ok();
    }
}

impl Default for Bell {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Notifier for Bell {
    fn click(&self) {
        self.ring(1);
    }

    fn open(&self) {
        self.ring(2);
    }

    fn close(&self) {
        self.ring(1);
    }

    fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bell_enable_flag() {
        let bell = Bell::new(true);
        assert!(bell.is_enabled());
        bell.set_enabled(false);
        assert!(!bell.is_enabled());
        // Disabled cues are dropped without touching the terminal
        bell.click();
        bell.open();
        bell.close();
    }

    #[test]
    fn test_silent_accepts_every_cue() {
        let silent = Silent;
        silent.set_enabled(true);
        silent.click();
        silent.open();
        silent.close();
    }
}
