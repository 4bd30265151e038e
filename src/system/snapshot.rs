//! The wire-facing data model: one immutable capture of all monitored
//! metrics, serialized as-is by the `/api/data` endpoint.

use serde::Serialize;

use crate::format::format_bytes;

/// One internally consistent capture of host state. Built wholesale by a
/// single sampling pass, published into the store, never mutated.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Snapshot {
    pub system: SystemInfo,
    pub cpu: CpuInfo,
    pub memory: MemoryInfo,
    pub storage: Vec<StorageEntry>,
    pub network: NetworkInfo,
    pub temperature: TemperatureInfo,
    pub processes: Vec<ProcessEntry>,
    pub timestamp: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SystemInfo {
    pub hostname: String,
    pub model: String,
    pub os: String,
    pub boot_time: String,
    pub uptime: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CpuInfo {
    /// Overall usage percent, averaged over the window since the previous
    /// refresh (same window as `cores`).
    pub usage: f32,
    pub cores: Vec<f32>,
    pub count: usize,
    pub freq: Option<CpuFrequency>,
}

/// Frequencies in MHz. `min`/`max` are zero when the platform exposes no
/// cpufreq bounds.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CpuFrequency {
    pub current: u64,
    pub min: u64,
    pub max: u64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct MemoryInfo {
    #[serde(rename = "virtual")]
    pub virtual_mem: MemoryUsage,
    pub swap: SwapUsage,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct MemoryUsage {
    pub total: u64,
    pub available: u64,
    pub used: u64,
    pub free: u64,
    pub percent: f32,
    pub total_fmt: String,
    pub available_fmt: String,
    pub used_fmt: String,
    pub free_fmt: String,
}

impl MemoryUsage {
    pub fn new(total: u64, available: u64, used: u64, free: u64) -> Self {
        MemoryUsage {
            total,
            available,
            used,
            free,
            percent: usage_percent(used, total),
            total_fmt: format_bytes(total),
            available_fmt: format_bytes(available),
            used_fmt: format_bytes(used),
            free_fmt: format_bytes(free),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SwapUsage {
    pub total: u64,
    pub used: u64,
    pub free: u64,
    pub percent: f32,
    pub total_fmt: String,
    pub used_fmt: String,
    pub free_fmt: String,
}

impl SwapUsage {
    pub fn new(total: u64, used: u64, free: u64) -> Self {
        SwapUsage {
            total,
            used,
            free,
            percent: usage_percent(used, total),
            total_fmt: format_bytes(total),
            used_fmt: format_bytes(used),
            free_fmt: format_bytes(free),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StorageEntry {
    pub device: String,
    pub mountpoint: String,
    pub fstype: String,
    pub total: u64,
    pub used: u64,
    pub free: u64,
    pub percent: f32,
    pub total_fmt: String,
    pub used_fmt: String,
    pub free_fmt: String,
}

impl StorageEntry {
    pub fn new(
        device: String,
        mountpoint: String,
        fstype: String,
        total: u64,
        used: u64,
        free: u64,
    ) -> Self {
        StorageEntry {
            device,
            mountpoint,
            fstype,
            total,
            used,
            free,
            percent: usage_percent(used, total),
            total_fmt: format_bytes(total),
            used_fmt: format_bytes(used),
            free_fmt: format_bytes(free),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct NetworkInfo {
    pub bytes_sent: u64,
    pub bytes_recv: u64,
    pub packets_sent: u64,
    pub packets_recv: u64,
    pub bytes_sent_fmt: String,
    pub bytes_recv_fmt: String,
    pub interfaces: Vec<NetInterface>,
}

/// An interface with at least one IPv4 address. Interfaces without one
/// contribute no entry.
#[derive(Debug, Clone, Serialize)]
pub struct NetInterface {
    pub name: String,
    pub ip: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TempStatus {
    Cool,
    Warm,
    Warning,
    Critical,
    Unknown,
}

impl TempStatus {
    /// Tier bands with inclusive lower bounds: exactly 45.0 is `Warm`,
    /// exactly 60.0 is `Warning`, exactly 70.0 is `Critical`.
    pub fn from_celsius(celsius: f32) -> Self {
        if celsius.is_nan() {
            TempStatus::Unknown
        } else if celsius < 45.0 {
            TempStatus::Cool
        } else if celsius < 60.0 {
            TempStatus::Warm
        } else if celsius < 70.0 {
            TempStatus::Warning
        } else {
            TempStatus::Critical
        }
    }

    /// CSS badge class consumed by the dashboard asset.
    pub fn badge_class(self) -> &'static str {
        match self {
            TempStatus::Cool => "success",
            TempStatus::Warm => "info",
            TempStatus::Warning => "warning",
            TempStatus::Critical => "danger",
            TempStatus::Unknown => "secondary",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TemperatureInfo {
    pub temperature: Option<f32>,
    pub status: TempStatus,
    pub status_class: &'static str,
}

impl TemperatureInfo {
    pub fn from_reading(reading: Option<f32>) -> Self {
        match reading.filter(|celsius| !celsius.is_nan()) {
            Some(celsius) => {
                let status = TempStatus::from_celsius(celsius);
                TemperatureInfo {
                    temperature: Some(celsius),
                    status,
                    status_class: status.badge_class(),
                }
            }
            None => TemperatureInfo::unknown(),
        }
    }

    pub fn unknown() -> Self {
        TemperatureInfo {
            temperature: None,
            status: TempStatus::Unknown,
            status_class: TempStatus::Unknown.badge_class(),
        }
    }
}

impl Default for TemperatureInfo {
    fn default() -> Self {
        TemperatureInfo::unknown()
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ProcessEntry {
    pub pid: u32,
    pub name: String,
    pub username: Option<String>,
    pub status: String,
    pub cpu_percent: f32,
    pub memory_percent: f32,
}

/// `used / total * 100`, with `total == 0` mapping to `0` rather than NaN.
pub fn usage_percent(used: u64, total: u64) -> f32 {
    if total == 0 {
        0.0
    } else {
        (used as f64 / total as f64 * 100.0) as f32
    }
}

/// Sort descending by CPU percent (NaN sorts as 0, stable among ties) and
/// keep the first `cap` entries.
pub fn rank_processes(mut processes: Vec<ProcessEntry>, cap: usize) -> Vec<ProcessEntry> {
    processes.sort_by(|a, b| cpu_key(b).total_cmp(&cpu_key(a)));
    processes.truncate(cap);
    processes
}

fn cpu_key(process: &ProcessEntry) -> f32 {
    if process.cpu_percent.is_nan() {
        0.0
    } else {
        process.cpu_percent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn proc_with_cpu(pid: u32, cpu_percent: f32) -> ProcessEntry {
        ProcessEntry {
            pid,
            name: format!("proc-{pid}"),
            cpu_percent,
            ..ProcessEntry::default()
        }
    }

    #[test]
    fn temperature_tiers_inclusive_lower_bounds() {
        assert_eq!(TempStatus::from_celsius(44.9), TempStatus::Cool);
        assert_eq!(TempStatus::from_celsius(45.0), TempStatus::Warm);
        assert_eq!(TempStatus::from_celsius(59.9), TempStatus::Warm);
        assert_eq!(TempStatus::from_celsius(60.0), TempStatus::Warning);
        assert_eq!(TempStatus::from_celsius(70.0), TempStatus::Critical);
        assert_eq!(TempStatus::from_celsius(70.1), TempStatus::Critical);
    }

    #[test]
    fn temperature_info_handles_missing_sensor() {
        let info = TemperatureInfo::from_reading(None);
        assert_eq!(info.temperature, None);
        assert_eq!(info.status, TempStatus::Unknown);
        assert_eq!(info.status_class, "secondary");
    }

    #[test]
    fn temperature_info_treats_nan_as_missing() {
        let info = TemperatureInfo::from_reading(Some(f32::NAN));
        assert_eq!(info.temperature, None);
        assert_eq!(info.status, TempStatus::Unknown);
    }

    #[test]
    fn usage_percent_guards_zero_total() {
        assert_eq!(usage_percent(500, 0), 0.0);
        assert_eq!(usage_percent(0, 1000), 0.0);
        assert!((usage_percent(512, 1024) - 50.0).abs() < f32::EPSILON);
    }

    #[test]
    fn rank_processes_sorts_descending_and_truncates() {
        let processes = (0..20).map(|i| proc_with_cpu(i, i as f32)).collect();
        let ranked = rank_processes(processes, 15);
        assert_eq!(ranked.len(), 15);
        for pair in ranked.windows(2) {
            assert!(pair[0].cpu_percent >= pair[1].cpu_percent);
        }
        assert_eq!(ranked[0].pid, 19);
    }

    #[test]
    fn rank_processes_sorts_nan_as_zero() {
        let processes = vec![
            proc_with_cpu(1, f32::NAN),
            proc_with_cpu(2, 5.0),
            proc_with_cpu(3, 0.0),
        ];
        let ranked = rank_processes(processes, 15);
        assert_eq!(ranked[0].pid, 2);
        // NaN ties with 0.0; stable sort keeps the original relative order.
        assert_eq!(ranked[1].pid, 1);
        assert_eq!(ranked[2].pid, 3);
    }

    #[test]
    fn snapshot_serializes_expected_top_level_keys() {
        let value = serde_json::to_value(Snapshot::default()).unwrap();
        let object = value.as_object().unwrap();
        for key in [
            "system",
            "cpu",
            "memory",
            "storage",
            "network",
            "temperature",
            "processes",
            "timestamp",
        ] {
            assert!(object.contains_key(key), "missing top-level key {key}");
        }
        assert!(value["memory"].get("virtual").is_some());
        assert!(value["memory"].get("swap").is_some());
        assert!(value["temperature"]["temperature"].is_null());
    }

    #[test]
    fn storage_entry_computes_percent_and_formats() {
        let entry = StorageEntry::new(
            "/dev/sda1".into(),
            "/".into(),
            "ext4".into(),
            1024 * 1024,
            512 * 1024,
            512 * 1024,
        );
        assert!((entry.percent - 50.0).abs() < 0.01);
        assert_eq!(entry.used_fmt, "512.0 KB");
        assert_eq!(entry.total_fmt, "1.0 MB");
    }
}
