use std::ffi::{CStr, OsStr};
use std::fmt;
use std::io;
use std::mem;
use std::os::unix::ffi::OsStrExt;
use std::path::PathBuf;
use std::ptr;

use libc::{c_char, uid_t};

const MAX_BUFFER: usize = 1 << 20;

#[derive(Debug)]
pub enum AccountError {
    NoEntry(uid_t),
    Lookup(io::Error),
}

impl fmt::Display for AccountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountError::NoEntry(uid) => write!(f, "no passwd entry for uid {}", uid),
            AccountError::Lookup(e) => write!(f, "cannot get passwd entry: {}", e),
        }
    }
}

impl std::error::Error for AccountError {}

/// Source of user home directories.
pub trait AccountDatabase {
    fn home_of(&self, uid: uid_t) -> Result<PathBuf, AccountError>;

    fn current_home(&self) -> Result<PathBuf, AccountError> {
        self.home_of(unsafe { libc::getuid() })
    }
}

/// The system passwd database, queried through `getpwuid_r`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemAccounts;

impl AccountDatabase for SystemAccounts {
    fn home_of(&self, uid: uid_t) -> Result<PathBuf, AccountError> {
        let mut buffer: Vec<c_char> = vec![0; 1024];

        loop {
            let mut entry: libc::passwd = unsafe { mem::zeroed() };
            let mut result: *mut libc::passwd = ptr::null_mut();

            let rc = unsafe {
                libc::getpwuid_r(
                    uid,
                    &mut entry,
                    buffer.as_mut_ptr(),
                    buffer.len(),
                    &mut result,
                )
            };

            if rc == libc::ERANGE && buffer.len() < MAX_BUFFER {
                buffer.resize(buffer.len() * 2, 0);
                continue;
            }
            if rc != 0 {
                return Err(AccountError::Lookup(io::Error::from_raw_os_error(rc)));
            }
            if result.is_null() || entry.pw_dir.is_null() {
                return Err(AccountError::NoEntry(uid));
            }

            let dir = unsafe { CStr::from_ptr(entry.pw_dir) };
            return Ok(PathBuf::from(OsStr::from_bytes(dir.to_bytes())));
        }
    }
}
