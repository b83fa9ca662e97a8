//! Output device enumeration.

use cpal::traits::{DeviceTrait, HostTrait};
use cpal::{Device, Host};

use crate::{Error, Result};

/// Extract device name via `description()` (cpal 0.17+).
pub(crate) fn device_name(device: &Device) -> std::result::Result<String, cpal::DeviceNameError> {
    device.description().map(|d| d.name().to_string())
}

/// An audio output device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioDevice {
    /// Human-readable device name.
    pub name: String,
    /// Whether this is the host's default output.
    pub is_default: bool,
    /// Default sample rate in Hz.
    pub default_sample_rate: u32,
    /// Default channel count.
    pub channels: u16,
}

impl AudioDevice {
    fn from_cpal(device: &Device, default_name: Option<&str>) -> Option<Self> {
        let name = device_name(device).ok()?;
        let (default_sample_rate, channels) = device
            .default_output_config()
            .map(|c| (c.sample_rate(), c.channels()))
            .unwrap_or((patchwire_core::SAMPLE_RATE, 2));
        Some(Self {
            is_default: default_name == Some(name.as_str()),
            name,
            default_sample_rate,
            channels,
        })
    }
}

/// Lists every output device on the default host.
pub fn list_devices() -> Result<Vec<AudioDevice>> {
    let host = cpal::default_host();
    let default_name = host
        .default_output_device()
        .and_then(|d| device_name(&d).ok());

    let outputs = host
        .output_devices()
        .map_err(|e| Error::Stream(e.to_string()))?;
    Ok(outputs
        .filter_map(|d| AudioDevice::from_cpal(&d, default_name.as_deref()))
        .collect())
}

/// The host's default output device, if it has one.
pub fn default_output_device() -> Option<AudioDevice> {
    let device = cpal::default_host().default_output_device()?;
    let name = device_name(&device).ok();
    AudioDevice::from_cpal(&device, name.as_deref())
}

/// Finds an output device whose name contains `name` (case-insensitive),
/// or the default output when `name` is `None`.
pub(crate) fn find_output_device(host: &Host, name: Option<&str>) -> Result<Device> {
    let Some(search) = name else {
        return host.default_output_device().ok_or(Error::NoDevice);
    };

    let search_lower = search.to_lowercase();
    let mut devices = host
        .output_devices()
        .map_err(|e| Error::Stream(e.to_string()))?;
    devices
        .find(|device| {
            device_name(device).is_ok_and(|n| n.to_lowercase().contains(search_lower.as_str()))
        })
        .ok_or_else(|| Error::DeviceNotFound(format!("no output device matching '{search}'")))
}
