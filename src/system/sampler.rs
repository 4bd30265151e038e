//! Metric collection. One [`Sampler`] owns the reusable `sysinfo` handles
//! and turns them into an immutable [`Snapshot`] per pass.

use chrono::{Local, TimeZone};
use sysinfo::{
    Components, Disks, Networks, ProcessRefreshKind, ProcessesToUpdate, System, UpdateKind, Users,
};

use super::platform;
use super::snapshot::{
    CpuFrequency, CpuInfo, MemoryInfo, MemoryUsage, NetInterface, NetworkInfo, ProcessEntry,
    Snapshot, StorageEntry, SwapUsage, SystemInfo, TemperatureInfo, rank_processes, usage_percent,
};
use crate::format::{format_bytes, format_uptime};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Produces one full [`Snapshot`] per [`sample`](Sampler::sample) call.
///
/// Probes run sequentially and each one degrades independently: an absent
/// sensor, an unreadable mount, or a vanished process leaves only its own
/// field at a default value. A sampling pass never fails wholesale.
///
/// CPU usage (overall and per-core alike) uses `sysinfo`'s non-blocking
/// delta-since-previous-refresh semantics, so both numbers share one
/// averaging window: the refresh interval.
pub struct Sampler {
    sys: System,
    disks: Disks,
    networks: Networks,
    components: Components,
    users: Users,
    top_processes: usize,
}

impl Sampler {
    /// Build the sampler and take the initial refresh that later CPU deltas
    /// are measured against.
    pub fn new(top_processes: usize) -> Self {
        let mut sys = System::new();
        sys.refresh_memory();
        sys.refresh_cpu_all();
        sys.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::everything(),
        );
        Sampler {
            sys,
            disks: Disks::new_with_refreshed_list(),
            networks: Networks::new_with_refreshed_list(),
            components: Components::new_with_refreshed_list(),
            users: Users::new_with_refreshed_list(),
            top_processes,
        }
    }

    /// Capture one internally consistent snapshot of the host.
    pub fn sample(&mut self) -> Snapshot {
        self.refresh();
        Snapshot {
            system: self.system_info(),
            cpu: self.cpu_info(),
            memory: self.memory_info(),
            storage: self.storage_info(),
            network: self.network_info(),
            temperature: self.temperature_info(),
            processes: self.process_info(),
            timestamp: Local::now().format(TIMESTAMP_FORMAT).to_string(),
        }
    }

    fn refresh(&mut self) {
        self.sys.refresh_memory();
        self.sys.refresh_cpu_all();
        self.sys.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::nothing()
                .with_memory()
                .with_cpu()
                .with_user(UpdateKind::OnlyIfNotSet),
        );
        self.disks.refresh(true);
        self.networks.refresh(true);
        self.components.refresh(true);
    }

    fn system_info(&self) -> SystemInfo {
        let os = match (System::name(), System::os_version()) {
            (Some(name), Some(version)) => format!("{name} {version}"),
            (Some(name), None) => name,
            _ => "Unknown".to_string(),
        };
        let model = platform::hardware_model()
            .or_else(|| self.sys.cpus().first().map(|cpu| cpu.brand().to_string()))
            .unwrap_or_else(|| "Unknown".to_string());
        let boot_time = Local
            .timestamp_opt(System::boot_time() as i64, 0)
            .single()
            .map(|time| time.format(TIMESTAMP_FORMAT).to_string())
            .unwrap_or_else(|| "Unknown".to_string());

        SystemInfo {
            hostname: System::host_name().unwrap_or_else(|| "unknown".to_string()),
            model,
            os,
            boot_time,
            uptime: format_uptime(System::uptime()),
        }
    }

    fn cpu_info(&self) -> CpuInfo {
        let cores: Vec<f32> = self.sys.cpus().iter().map(|cpu| cpu.cpu_usage()).collect();
        let current = self
            .sys
            .cpus()
            .first()
            .map(|cpu| cpu.frequency())
            .unwrap_or(0);
        let bounds = platform::cpu_freq_bounds();
        let freq = if current == 0 && bounds.is_none() {
            None
        } else {
            let (min, max) = bounds.unwrap_or((0, 0));
            Some(CpuFrequency { current, min, max })
        };

        CpuInfo {
            usage: self.sys.global_cpu_usage(),
            count: cores.len(),
            cores,
            freq,
        }
    }

    fn memory_info(&self) -> MemoryInfo {
        MemoryInfo {
            virtual_mem: MemoryUsage::new(
                self.sys.total_memory(),
                self.sys.available_memory(),
                self.sys.used_memory(),
                self.sys.free_memory(),
            ),
            swap: SwapUsage::new(
                self.sys.total_swap(),
                self.sys.used_swap(),
                self.sys.free_swap(),
            ),
        }
    }

    fn storage_info(&self) -> Vec<StorageEntry> {
        // Mounts the process cannot stat never make it into the disk list,
        // which gives the silent-skip behavior for restricted mounts.
        self.disks
            .list()
            .iter()
            .map(|disk| {
                let total = disk.total_space();
                let free = disk.available_space();
                StorageEntry::new(
                    disk.name().to_string_lossy().to_string(),
                    disk.mount_point().display().to_string(),
                    disk.file_system().to_string_lossy().to_string(),
                    total,
                    total.saturating_sub(free),
                    free,
                )
            })
            .collect()
    }

    fn network_info(&self) -> NetworkInfo {
        let mut bytes_sent = 0u64;
        let mut bytes_recv = 0u64;
        let mut packets_sent = 0u64;
        let mut packets_recv = 0u64;
        let mut interfaces = Vec::new();

        for (name, data) in self.networks.list() {
            bytes_sent = bytes_sent.saturating_add(data.total_transmitted());
            bytes_recv = bytes_recv.saturating_add(data.total_received());
            packets_sent = packets_sent.saturating_add(data.total_packets_transmitted());
            packets_recv = packets_recv.saturating_add(data.total_packets_received());

            for ip_network in data.ip_networks() {
                if ip_network.addr.is_ipv4() {
                    interfaces.push(NetInterface {
                        name: name.clone(),
                        ip: ip_network.addr.to_string(),
                    });
                }
            }
        }
        // The interface map has no inherent order; keep the output stable.
        interfaces.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.ip.cmp(&b.ip)));

        NetworkInfo {
            bytes_sent,
            bytes_recv,
            packets_sent,
            packets_recv,
            bytes_sent_fmt: format_bytes(bytes_sent),
            bytes_recv_fmt: format_bytes(bytes_recv),
            interfaces,
        }
    }

    fn temperature_info(&self) -> TemperatureInfo {
        let mut cpu_sensor: Option<f32> = None;
        let mut hottest: Option<f32> = None;

        for component in self.components.list() {
            let Some(reading) = component.temperature() else {
                continue;
            };
            if reading.is_nan() {
                continue;
            }
            let label = component.label().to_ascii_lowercase();
            if label.contains("cpu") || label.contains("coretemp") || label.contains("tctl") {
                cpu_sensor = Some(cpu_sensor.map_or(reading, |max| max.max(reading)));
            }
            hottest = Some(hottest.map_or(reading, |max| max.max(reading)));
        }

        TemperatureInfo::from_reading(
            cpu_sensor
                .or(hottest)
                .or_else(platform::thermal_zone_celsius),
        )
    }

    fn process_info(&self) -> Vec<ProcessEntry> {
        let total_memory = self.sys.total_memory();
        let entries: Vec<ProcessEntry> = self
            .sys
            .processes()
            .values()
            .map(|process| {
                let username = process
                    .user_id()
                    .and_then(|uid| self.users.get_user_by_id(uid))
                    .map(|user| user.name().to_string());
                ProcessEntry {
                    pid: process.pid().as_u32(),
                    name: process.name().to_string_lossy().to_string(),
                    username,
                    status: process.status().to_string(),
                    cpu_percent: process.cpu_usage(),
                    memory_percent: usage_percent(process.memory(), total_memory),
                }
            })
            .collect();
        rank_processes(entries, self.top_processes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_respects_process_cap() {
        let mut sampler = Sampler::new(3);
        let snapshot = sampler.sample();
        assert!(snapshot.processes.len() <= 3);
    }

    #[test]
    fn sample_produces_consistent_cpu_section() {
        let mut sampler = Sampler::new(15);
        let snapshot = sampler.sample();
        assert_eq!(snapshot.cpu.count, snapshot.cpu.cores.len());
        assert!(snapshot.cpu.usage.is_finite());
        for core in &snapshot.cpu.cores {
            assert!(core.is_finite());
        }
    }

    #[test]
    fn sample_storage_percentages_in_bounds() {
        let mut sampler = Sampler::new(15);
        let snapshot = sampler.sample();
        for entry in &snapshot.storage {
            assert!(entry.percent >= 0.0);
            assert!(entry.percent <= 100.0);
            if entry.total == 0 {
                assert_eq!(entry.percent, 0.0);
            }
        }
    }

    #[test]
    fn sample_timestamp_matches_wire_format() {
        let mut sampler = Sampler::new(15);
        let snapshot = sampler.sample();
        chrono::NaiveDateTime::parse_from_str(&snapshot.timestamp, TIMESTAMP_FORMAT)
            .expect("timestamp should round-trip through the wire format");
    }
}
