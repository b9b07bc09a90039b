//! Delivery of formatted log lines to the local syslog daemon.

use std::ffi::CString;
use std::io;
use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;

static IDENT: &[u8] = b"pae-relay\0";
static FORMAT: &[u8] = b"%s\0";

/// `MakeWriter` that hands every formatted event to `syslog(3)`.
///
/// Opens the connection with facility `LOG_DAEMON` on construction.
#[derive(Debug)]
pub struct SyslogWriter {
    _private: (),
}

impl SyslogWriter {
    pub fn open() -> Self {
        unsafe {
            libc::openlog(
                IDENT.as_ptr() as *const libc::c_char,
                libc::LOG_PID | libc::LOG_NDELAY,
                libc::LOG_DAEMON,
            )
        };
        Self { _private: () }
    }
}

impl Drop for SyslogWriter {
    fn drop(&mut self) {
        unsafe { libc::closelog() };
    }
}

/// Buffer for one event; submitted to syslog when dropped.
pub struct SyslogLine {
    priority: libc::c_int,
    buf: Vec<u8>,
}

impl io::Write for SyslogLine {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for SyslogLine {
    fn drop(&mut self) {
        let Some(message) = line_to_cstring(&self.buf) else {
            return;
        };
        unsafe {
            libc::syslog(
                self.priority,
                FORMAT.as_ptr() as *const libc::c_char,
                message.as_ptr(),
            )
        };
    }
}

impl<'a> MakeWriter<'a> for SyslogWriter {
    type Writer = SyslogLine;

    fn make_writer(&'a self) -> Self::Writer {
        SyslogLine {
            priority: libc::LOG_INFO,
            buf: Vec::new(),
        }
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        SyslogLine {
            priority: priority(meta.level()),
            buf: Vec::new(),
        }
    }
}

fn priority(level: &Level) -> libc::c_int {
    match *level {
        Level::ERROR => libc::LOG_ERR,
        Level::WARN => libc::LOG_WARNING,
        Level::INFO => libc::LOG_INFO,
        _ => libc::LOG_DEBUG,
    }
}

/// Strip the trailing newline and any interior NULs.
fn line_to_cstring(buf: &[u8]) -> Option<CString> {
    let line = buf.strip_suffix(b"\n").unwrap_or(buf);
    if line.is_empty() {
        return None;
    }
    let bytes: Vec<u8> = line.iter().copied().filter(|&b| b != 0).collect();
    CString::new(bytes).ok()
}
