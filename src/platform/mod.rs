use crate::{error::Result, source::NetSource};

#[cfg(target_os = "linux")]
mod ifaddrs;
#[cfg(target_os = "linux")]
mod linux;
#[cfg(target_os = "linux")]
pub use linux::LinuxSource;

pub fn create_source() -> Result<Box<dyn NetSource>> {
    #[cfg(target_os = "linux")]
    {
        let source = LinuxSource::new("/proc");
        if !source.is_available() {
            return Err(crate::error::NetTuiError::Platform(
                "/proc/net is not mounted".to_string(),
            ));
        }
        return Ok(Box::new(source));
    }

    #[cfg(not(target_os = "linux"))]
    return Err(crate::error::NetTuiError::Platform(
        "Unsupported platform".to_string(),
    ));
}
