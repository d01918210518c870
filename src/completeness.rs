//! Completeness check: every gateway reporting a metric family should report all of it.
//!
//! Valid metrics are grouped by their `gateway` dimension. A group that contains any key of a
//! family (by key prefix) is expected to contain that family's full key set; the difference
//! is reported per gateway and family.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Dimension used to group metrics by originating device.
pub const GATEWAY_DIMENSION: &str = "gateway";
/// Group name for metrics without a gateway dimension.
pub const UNKNOWN_GATEWAY: &str = "unknown";

const SYSTEM_STATS: &[&str] = &[
    "aviatrix.gateway.cpu.idle",
    "aviatrix.gateway.cpu.usage",
    "aviatrix.gateway.memory.avail",
    "aviatrix.gateway.memory.total",
    "aviatrix.gateway.memory.free",
    "aviatrix.gateway.memory.used",
    "aviatrix.gateway.memory.usage",
    "aviatrix.gateway.disk.avail",
    "aviatrix.gateway.disk.total",
    "aviatrix.gateway.disk.used",
    "aviatrix.gateway.disk.used.percent",
];

const NETWORK_STATS: &[&str] = &[
    "aviatrix.gateway.net.bytes_rx",
    "aviatrix.gateway.net.bytes_tx",
    "aviatrix.gateway.net.bytes_total_rate",
    "aviatrix.gateway.net.rx_cumulative",
    "aviatrix.gateway.net.tx_cumulative",
    "aviatrix.gateway.net.rx_tx_cumulative",
];

/// A group of metrics expected to arrive together from one gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricFamily {
    /// CPU, memory and disk gauges.
    SystemStats,
    /// Network throughput gauges.
    NetworkStats,
}

impl MetricFamily {
    pub const ALL: [MetricFamily; 2] = [MetricFamily::SystemStats, MetricFamily::NetworkStats];

    /// Any key with this prefix implies the whole family is expected.
    pub fn trigger_prefix(self) -> &'static str {
        match self {
            MetricFamily::SystemStats => "aviatrix.gateway.cpu",
            MetricFamily::NetworkStats => "aviatrix.gateway.net",
        }
    }

    pub fn expected_keys(self) -> &'static [&'static str] {
        match self {
            MetricFamily::SystemStats => SYSTEM_STATS,
            MetricFamily::NetworkStats => NETWORK_STATS,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MetricFamily::SystemStats => "sys_stats",
            MetricFamily::NetworkStats => "net_stats gauge",
        }
    }
}

/// One gateway missing part of a family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletenessIssue {
    pub gateway: String,
    pub family: MetricFamily,
    /// Sorted.
    pub missing: Vec<String>,
}

impl std::fmt::Display for CompletenessIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Gateway '{}' missing {} metrics: [{}]",
            self.gateway,
            self.family.label(),
            self.missing
                .iter()
                .map(|k| format!("'{}'", k))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

/// Metric keys observed per gateway.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GatewayMetricSet {
    gateways: BTreeMap<String, BTreeSet<String>>,
}

impl GatewayMetricSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from (key, dimensions) pairs of valid lines.
    pub fn from_metrics<'a, I>(metrics: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a BTreeMap<String, String>)>,
    {
        let mut set = Self::new();
        for (key, dimensions) in metrics {
            set.insert(key, dimensions);
        }
        set
    }

    pub fn insert(&mut self, key: &str, dimensions: &BTreeMap<String, String>) {
        let gateway = dimensions
            .get(GATEWAY_DIMENSION)
            .map(String::as_str)
            .unwrap_or(UNKNOWN_GATEWAY);
        // avoid allocating for keys already seen on this gateway
        match self.gateways.get_mut(gateway) {
            Some(keys) => {
                if !keys.contains(key) {
                    keys.insert(key.to_string());
                }
            }
            None => {
                self.gateways
                    .insert(gateway.to_string(), BTreeSet::from([key.to_string()]));
            }
        }
    }

    pub fn keys(&self, gateway: &str) -> Option<&BTreeSet<String>> {
        self.gateways.get(gateway)
    }

    pub fn gateways(&self) -> impl Iterator<Item = &str> {
        self.gateways.keys().map(String::as_str)
    }

    /// Run the completeness check. Issues are ordered by gateway, then family.
    pub fn check(&self) -> Vec<CompletenessIssue> {
        let mut issues = Vec::new();
        for (gateway, keys) in &self.gateways {
            for family in MetricFamily::ALL {
                let prefix = family.trigger_prefix();
                if !keys.iter().any(|k| k.starts_with(prefix)) {
                    continue;
                }
                let mut missing: Vec<String> = family
                    .expected_keys()
                    .iter()
                    .filter(|k| !keys.contains(**k))
                    .map(|k| k.to_string())
                    .collect();
                if missing.is_empty() {
                    continue;
                }
                missing.sort();
                issues.push(CompletenessIssue {
                    gateway: gateway.clone(),
                    family,
                    missing,
                });
            }
        }
        issues
    }
}
