//! Platform probes for details `sysinfo` does not expose. Every probe is
//! optional: a platform without the data returns `None` and the sampler
//! falls back or leaves the field absent.

pub trait PlatformExtensions {
    /// Human-readable hardware model (e.g. "Raspberry Pi 4 Model B Rev 1.4").
    fn hardware_model() -> Option<String>;
    /// (min, max) CPU frequency bounds in MHz.
    fn cpu_freq_bounds() -> Option<(u64, u64)>;
    /// Fallback temperature reading in Celsius.
    fn thermal_zone_celsius() -> Option<f32>;
}

#[cfg(target_os = "linux")]
mod linux;
#[cfg(not(target_os = "linux"))]
mod other;

#[cfg(target_os = "linux")]
use linux as platform_impl;
#[cfg(not(target_os = "linux"))]
use other as platform_impl;

pub fn hardware_model() -> Option<String> {
    platform_impl::Platform::hardware_model()
}

pub fn cpu_freq_bounds() -> Option<(u64, u64)> {
    platform_impl::Platform::cpu_freq_bounds()
}

pub fn thermal_zone_celsius() -> Option<f32> {
    platform_impl::Platform::thermal_zone_celsius()
}
