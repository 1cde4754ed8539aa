use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

static BUFFER: Mutex<Option<Vec<String>>> = Mutex::new(None);
static VERBOSE: AtomicBool = AtomicBool::new(false);

fn buffer() -> MutexGuard<'static, Option<Vec<String>>> {
    BUFFER.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Enable or disable `detail!()` output
pub fn set_verbose(verbose: bool) {
    VERBOSE.store(verbose, Ordering::Relaxed);
}

pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::Relaxed)
}

/// Activate buffering. While active, `notice!()` calls store messages
/// instead of printing to stderr.
pub fn activate() {
    *buffer() = Some(Vec::new());
}

/// Deactivate buffering and return all collected messages.
pub fn drain() -> Vec<String> {
    buffer().take().unwrap_or_default()
}

/// Deactivate buffering and print everything that was collected.
pub fn flush() {
    for msg in drain() {
        eprintln!("{}", msg);
    }
}

/// Write a diagnostic notice. If buffering is active the message is stored;
/// otherwise it is printed to stderr immediately.
pub fn notice(msg: String) {
    let mut guard = buffer();
    if let Some(buf) = guard.as_mut() {
        buf.push(msg);
    } else {
        drop(guard);
        eprintln!("{}", msg);
    }
}

/// Like `notice`, but only when verbose output was requested
pub fn detail(msg: String) {
    if is_verbose() {
        notice(msg);
    }
}

/// Works like `eprintln!` but routes through the notice buffer when it is
/// active.
#[macro_export]
macro_rules! notice {
    ($($arg:tt)*) => {
        $crate::notices::notice(format!($($arg)*))
    };
}

/// `notice!` that only prints under `--verbose`
#[macro_export]
macro_rules! detail {
    ($($arg:tt)*) => {
        $crate::notices::detail(format!($($arg)*))
    };
}
