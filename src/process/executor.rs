use std::ffi::{CStr, CString};
use std::io;
use std::iter;
use std::ptr;

use libc::{c_char, c_int, pid_t};
use log::debug;

use super::{InterruptFlag, ProcessError};

const SHELL_NAME: &[u8] = b"brisk";

/// How a spawned command ended, as far as the parent can tell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildOutcome {
    Exited(i32),
    Signaled(i32),
    /// The shell was interrupted between fork and wait and did not block.
    Abandoned(pid_t),
}

impl ChildOutcome {
    pub fn success(&self) -> bool {
        matches!(self, ChildOutcome::Exited(0))
    }

    fn from_status(status: c_int) -> Self {
        if libc::WIFSIGNALED(status) {
            ChildOutcome::Signaled(libc::WTERMSIG(status))
        } else {
            ChildOutcome::Exited(libc::WEXITSTATUS(status))
        }
    }
}

/// Argument vector converted ahead of `fork` so the child never allocates.
struct ExecArgs {
    args: Vec<CString>,
    ptrs: Vec<*const c_char>,
}

impl ExecArgs {
    fn new(argv: &[String]) -> Result<Self, ProcessError> {
        if argv.is_empty() {
            return Err(ProcessError::EmptyCommand);
        }

        let args = argv
            .iter()
            .map(|arg| {
                CString::new(arg.as_str()).map_err(|_| ProcessError::InvalidArgument(arg.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let ptrs = args
            .iter()
            .map(|arg| arg.as_ptr())
            .chain(iter::once(ptr::null()))
            .collect();

        Ok(Self { args, ptrs })
    }

    fn program(&self) -> &CStr {
        &self.args[0]
    }

    /// Replaces the process image, searching `PATH`. Returns errno on failure.
    fn exec(&self) -> c_int {
        unsafe {
            libc::execvp(self.program().as_ptr(), self.ptrs.as_ptr());
        }
        io::Error::last_os_error().raw_os_error().unwrap_or(0)
    }
}

pub struct ProcessExecutor {
    interrupt: InterruptFlag,
    orphans: Vec<pid_t>,
}

impl ProcessExecutor {
    pub fn new(interrupt: InterruptFlag) -> Self {
        Self {
            interrupt,
            orphans: Vec::new(),
        }
    }

    /// Runs `argv` in a child process and waits for it.
    ///
    /// Only a failed `fork` is fatal to the shell. Anything that goes wrong
    /// inside the child shows up here as an ordinary exit status.
    pub fn spawn_process(&mut self, argv: &[String]) -> Result<ChildOutcome, ProcessError> {
        self.reap_orphans();

        let program = ExecArgs::new(argv)?;

        match unsafe { libc::fork() } {
            -1 => Err(ProcessError::Fork(io::Error::last_os_error())),
            0 => self.run_child(&program),
            pid => {
                debug!("spawned {} as pid {}", argv[0], pid);
                self.await_child(pid)
            }
        }
    }

    fn run_child(&self, program: &ExecArgs) -> ! {
        if self.interrupt.is_set() {
            unsafe { libc::_exit(libc::EXIT_FAILURE) }
        }

        let errno = program.exec();
        let reason = unsafe { CStr::from_ptr(libc::strerror(errno)) };
        let parts: [&[u8]; 6] = [
            SHELL_NAME,
            b": ",
            program.program().to_bytes(),
            b": ",
            reason.to_bytes(),
            b"\n",
        ];
        for part in parts {
            write_stderr(part);
        }

        unsafe { libc::_exit(libc::EXIT_FAILURE) }
    }

    fn await_child(&mut self, pid: pid_t) -> Result<ChildOutcome, ProcessError> {
        if self.interrupt.take() {
            debug!("interrupted before wait, leaving pid {} for later", pid);
            self.orphans.push(pid);
            return Ok(ChildOutcome::Abandoned(pid));
        }

        let mut status: c_int = 0;
        while unsafe { libc::waitpid(pid, &mut status, 0) } == -1 {
            let err = io::Error::last_os_error();
            if err.kind() != io::ErrorKind::Interrupted {
                return Err(ProcessError::Wait(err));
            }
        }

        // Ctrl-C during a foreground command was meant for the command
        self.interrupt.take();

        let outcome = ChildOutcome::from_status(status);
        debug!("pid {} finished: {:?}", pid, outcome);
        Ok(outcome)
    }

    /// Collects abandoned children that have exited since, without blocking.
    pub fn reap_orphans(&mut self) {
        self.orphans.retain(|&pid| {
            let rc = unsafe { libc::waitpid(pid, ptr::null_mut(), libc::WNOHANG) };
            if rc == pid {
                debug!("reaped abandoned pid {}", pid);
            }
            rc == 0
        });
    }

    pub fn orphans(&self) -> &[pid_t] {
        &self.orphans
    }
}

fn write_stderr(mut bytes: &[u8]) {
    while !bytes.is_empty() {
        let written = unsafe { libc::write(libc::STDERR_FILENO, bytes.as_ptr().cast(), bytes.len()) };
        if written < 0 {
            if io::Error::last_os_error().kind() == io::ErrorKind::Interrupted {
                continue;
            }
            return;
        }
        if written == 0 {
            return;
        }
        bytes = &bytes[written as usize..];
    }
}
