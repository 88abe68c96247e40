//! Top-N process ranking by CPU.

use std::cmp::Ordering;

use sourtop_sampler::{ProcessEntry, ProcessInfo};

pub const DEFAULT_TOP_N: usize = 10;

/// Highest CPU first, at most `limit` rows. Equal CPU keeps platform order (stable sort),
/// and processes that exited mid-enumeration are dropped.
pub fn rank(entries: &[ProcessEntry], limit: usize) -> Vec<ProcessInfo> {
    let mut procs: Vec<ProcessInfo> = entries
        .iter()
        .filter_map(ProcessEntry::alive)
        .cloned()
        .map(|mut p| {
            if p.cpu_usage.is_nan() {
                p.cpu_usage = 0.0;
            }
            p
        })
        .collect();
    procs.sort_by(|a, b| {
        b.cpu_usage
            .partial_cmp(&a.cpu_usage)
            .unwrap_or(Ordering::Equal)
    });
    procs.truncate(limit);
    procs
}
