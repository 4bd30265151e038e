use super::PlatformExtensions;

pub struct Platform;

/// Non-Linux hosts: no sysfs/procfs, so every probe reports absent and the
/// sampler falls back (CPU brand string for the model, `sysinfo` components
/// for temperature).
impl PlatformExtensions for Platform {
    fn hardware_model() -> Option<String> {
        None
    }

    fn cpu_freq_bounds() -> Option<(u64, u64)> {
        None
    }

    fn thermal_zone_celsius() -> Option<f32> {
        None
    }
}
