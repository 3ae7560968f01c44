// src/core/sensors/sysctl_source.rs

use super::CounterSource;

#[cfg(any(
    target_os = "freebsd",
    target_os = "dragonfly",
    target_os = "netbsd",
    target_os = "macos"
))]
mod imp {
    use std::ffi::CString;

    pub const SUPPORTED: bool = true;

    pub fn sysctl_by_name(name: &str) -> Option<i32> {
        let cname = CString::new(name).ok()?;
        let mut value: libc::c_int = 0;
        let mut value_size = std::mem::size_of::<libc::c_int>();
        // SAFETY: `cname` is NUL terminated, `value`/`value_size` describe a valid buffer,
        // and no new value is written.
        let rc = unsafe {
            libc::sysctlbyname(
                cname.as_ptr(),
                (&mut value as *mut libc::c_int).cast(),
                &mut value_size,
                std::ptr::null_mut(),
                0,
            )
        };
        (rc == 0).then_some(value)
    }
}

#[cfg(not(any(
    target_os = "freebsd",
    target_os = "dragonfly",
    target_os = "netbsd",
    target_os = "macos"
)))]
mod imp {
    pub const SUPPORTED: bool = false;

    pub fn sysctl_by_name(_name: &str) -> Option<i32> {
        None
    }
}

/// Reads counters through `sysctlbyname(3)`.
pub struct SysctlSource;

impl SysctlSource {
    pub const SUPPORTED: bool = imp::SUPPORTED;

    pub(crate) fn new() -> Self {
        if !Self::SUPPORTED {
            tracing::warn!("sysctl is not available on this platform; no counters will be found");
        }
        SysctlSource
    }
}

impl CounterSource for SysctlSource {
    fn query(&self, name: &str) -> Option<i32> {
        imp::sysctl_by_name(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_name_is_unavailable() {
        let src = SysctlSource::new();
        assert_eq!(src.query("no.such.counter.really"), None);
    }

    #[test]
    fn interior_nul_is_unavailable() {
        assert_eq!(SysctlSource::new().query("hw.\0ncpu"), None);
    }

    #[cfg(target_os = "freebsd")]
    #[test]
    fn ncpu_is_positive_on_freebsd() {
        assert!(SysctlSource::new().query("hw.ncpu").unwrap() > 0);
    }
}
