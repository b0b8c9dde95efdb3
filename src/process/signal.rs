use std::io;
use std::mem;
use std::ptr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use libc::{c_int, sigaction, SA_RESTART};
use signal_hook::consts::{SIGINT, SIGQUIT};

use crate::process::ProcessError;

/// The one piece of state shared with signal-handling context.
///
/// Handlers only ever store `true`. The main loop reads and clears it at
/// fixed checkpoints: after a failed line read, in a freshly forked child
/// before exec, and in the parent before it waits. Clones share the same
/// atomic, and a forked child sees its own copy of the value at fork time.
#[derive(Debug, Clone, Default)]
pub struct InterruptFlag(Arc<AtomicBool>);

impl InterruptFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Clears the flag, returning whether it was set.
    pub fn take(&self) -> bool {
        self.0.swap(false, Ordering::SeqCst)
    }

    pub fn raise(&self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

/// Routes SIGINT and SIGQUIT into `flag`.
///
/// The handlers are left without `SA_RESTART` so a blocked `read(2)`
/// returns `EINTR` and the main loop gets a chance to redraw the prompt.
pub fn setup_signal_handlers(flag: &InterruptFlag) -> Result<(), ProcessError> {
    for signal in [SIGINT, SIGQUIT] {
        signal_hook::flag::register(signal, Arc::clone(&flag.0))
            .map_err(ProcessError::Signal)?;
        disable_restart(signal).map_err(ProcessError::Signal)?;
    }
    Ok(())
}

fn disable_restart(signal: c_int) -> io::Result<()> {
    unsafe {
        let mut action: sigaction = mem::zeroed();
        if libc::sigaction(signal, ptr::null(), &mut action) == -1 {
            return Err(io::Error::last_os_error());
        }

        action.sa_flags &= !SA_RESTART;

        if libc::sigaction(signal, &action, ptr::null_mut()) == -1 {
            return Err(io::Error::last_os_error());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_clears() {
        let flag = InterruptFlag::new();
        assert!(!flag.take());

        flag.raise();
        assert!(flag.is_set());
        assert!(flag.take());
        assert!(!flag.is_set());
        assert!(!flag.take());
    }

    #[test]
    fn test_clones_share_state() {
        let flag = InterruptFlag::new();
        let other = flag.clone();

        other.raise();
        assert!(flag.take());
        assert!(!other.is_set());
    }

    #[test]
    fn test_signal_sets_flag() {
        let flag = InterruptFlag::new();
        setup_signal_handlers(&flag).unwrap();

        assert_eq!(unsafe { libc::raise(SIGQUIT) }, 0);
        assert!(flag.take());
    }

    #[test]
    fn test_handlers_drop_sa_restart() {
        let flag = InterruptFlag::new();
        setup_signal_handlers(&flag).unwrap();

        for signal in [SIGINT, SIGQUIT] {
            let mut action: sigaction = unsafe { mem::zeroed() };
            let rc = unsafe { libc::sigaction(signal, ptr::null(), &mut action) };
            assert_eq!(rc, 0);
            assert_eq!(action.sa_flags & SA_RESTART, 0);
        }
    }
}
