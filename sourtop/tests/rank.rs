//! Top-N process ranking.
mod common;

use common::proc;
use sourtop::rank::{rank, DEFAULT_TOP_N};
use sourtop::sampler::ProcessEntry;

fn fifteen() -> Vec<ProcessEntry> {
    let cpus = [
        3.0, 55.5, 0.0, 12.0, 99.9, 12.0, 7.25, 40.0, 0.5, 12.0, 61.0, 2.0, 88.0, 7.25, 1.0,
    ];
    cpus.iter()
        .enumerate()
        .map(|(i, c)| proc(100 + i as u32, &format!("p{i}"), *c))
        .collect()
}

fn pids(v: &[sourtop::sampler::ProcessInfo]) -> Vec<u32> {
    v.iter().map(|p| p.pid).collect()
}

#[test]
fn top_ten_by_cpu_descending() {
    let ranked = rank(&fifteen(), DEFAULT_TOP_N);
    assert_eq!(ranked.len(), 10);
    assert_eq!(
        pids(&ranked),
        vec![104, 112, 110, 101, 107, 103, 105, 109, 106, 113]
    );
    assert!(ranked.windows(2).all(|w| w[0].cpu_usage >= w[1].cpu_usage));
}

#[test]
fn ranking_is_deterministic_and_ties_keep_platform_order() {
    let input = fifteen();
    let first = rank(&input, DEFAULT_TOP_N);
    for _ in 0..20 {
        assert_eq!(rank(&input, DEFAULT_TOP_N), first);
    }
    // the three 12.0% entries appear in enumeration order
    let twelve: Vec<u32> = first
        .iter()
        .filter(|p| p.cpu_usage == 12.0)
        .map(|p| p.pid)
        .collect();
    assert_eq!(twelve, vec![103, 105, 109]);
}

#[test]
fn exited_processes_are_dropped() {
    let input = vec![
        proc(1, "a", 5.0),
        ProcessEntry::Exited { pid: 2 },
        proc(3, "b", 50.0),
        ProcessEntry::Exited { pid: 4 },
    ];
    let ranked = rank(&input, DEFAULT_TOP_N);
    assert_eq!(pids(&ranked), vec![3, 1]);
}

#[test]
fn nan_cpu_sorts_as_idle() {
    let input = vec![proc(1, "weird", f32::NAN), proc(2, "busy", 3.0), proc(3, "idle", 0.0)];
    let ranked = rank(&input, DEFAULT_TOP_N);
    assert_eq!(pids(&ranked), vec![2, 1, 3]);
    assert_eq!(ranked[1].cpu_usage, 0.0);
}

#[test]
fn limit_is_respected() {
    assert!(rank(&fifteen(), 0).is_empty());
    assert_eq!(rank(&fifteen(), 3).len(), 3);
    assert_eq!(rank(&fifteen(), 50).len(), 15);
    assert!(rank(&[], DEFAULT_TOP_N).is_empty());
}
