use super::PlatformExtensions;

pub struct Platform;

impl PlatformExtensions for Platform {
    fn hardware_model() -> Option<String> {
        // Device-tree model covers Raspberry Pi and most ARM boards; the
        // file is NUL-terminated.
        if let Ok(contents) = std::fs::read_to_string("/proc/device-tree/model") {
            let model = contents.trim_end_matches('\0').trim();
            if !model.is_empty() {
                return Some(model.to_string());
            }
        }
        // x86 fallback: "model name" line in /proc/cpuinfo. ARM kernels
        // expose a capitalized "Model" line instead.
        let cpuinfo = std::fs::read_to_string("/proc/cpuinfo").ok()?;
        for line in cpuinfo.lines() {
            let lower = line.to_ascii_lowercase();
            if lower.starts_with("model name") || lower.starts_with("model\t") {
                let value = line.split(':').nth(1)?.trim();
                if !value.is_empty() {
                    return Some(value.to_string());
                }
            }
        }
        None
    }

    fn cpu_freq_bounds() -> Option<(u64, u64)> {
        let min = read_sysfs_khz("/sys/devices/system/cpu/cpu0/cpufreq/cpuinfo_min_freq")?;
        let max = read_sysfs_khz("/sys/devices/system/cpu/cpu0/cpufreq/cpuinfo_max_freq")?;
        Some((min / 1000, max / 1000))
    }

    fn thermal_zone_celsius() -> Option<f32> {
        // Millidegrees in thermal_zone0, the zone the Pi reports its SoC on.
        let contents = std::fs::read_to_string("/sys/class/thermal/thermal_zone0/temp").ok()?;
        let millidegrees: f32 = contents.trim().parse().ok()?;
        Some(millidegrees / 1000.0)
    }
}

fn read_sysfs_khz(path: &str) -> Option<u64> {
    std::fs::read_to_string(path).ok()?.trim().parse().ok()
}
