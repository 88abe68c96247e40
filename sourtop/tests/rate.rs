//! Network rate derivation from cumulative counters.
mod common;

use std::time::{Duration, Instant};

use common::sample_at;
use sourtop::rate::{rate, NetRates, RateCalculator, RateState, EPSILON_SECS};

fn state(sent: u64, received: u64, at: Instant) -> RateState {
    RateState { sent, received, at }
}

#[test]
fn first_tick_reports_zero() {
    let base = Instant::now();
    let s = sample_at(base, 0, 10_000, 20_000);
    assert_eq!(rate(&s, None), Some(NetRates::default()));

    let mut calc = RateCalculator::new();
    assert_eq!(calc.update(&s), Some(NetRates::default()));
    assert_eq!(calc.state(), Some(&state(10_000, 20_000, s.taken_at)));
}

#[test]
fn rate_is_delta_bytes_over_delta_time() {
    let base = Instant::now();
    let cases = [
        (1u64, 0u64, 0u64),
        (1, 2_048, 1_048_576),
        (2, 10_000, 0),
        (5, 123_456_789, 987_654_321),
        (3, u32::MAX as u64, 1),
    ];
    for (secs, d_sent, d_recv) in cases {
        let prev = state(1_000, 50_000, base);
        let cur = sample_at(base, secs, 1_000 + d_sent, 50_000 + d_recv);
        let r = rate(&cur, Some(&prev)).unwrap();
        assert!(r.sent_per_sec >= 0.0 && r.recv_per_sec >= 0.0);
        let dt = secs as f64;
        assert!((r.sent_per_sec - d_sent as f64 / dt).abs() < 1e-6, "{r:?}");
        assert!((r.recv_per_sec - d_recv as f64 / dt).abs() < 1e-6, "{r:?}");
    }
}

#[test]
fn counter_reset_clamps_to_zero() {
    let base = Instant::now();
    let prev = state(9_000_000, 4_000, base);
    // sent counter went backwards (interface restart); received still grows
    let cur = sample_at(base, 1, 1_000, 6_000);
    let r = rate(&cur, Some(&prev)).unwrap();
    assert_eq!(r.sent_per_sec, 0.0);
    assert_eq!(r.recv_per_sec, 2_000.0);
}

#[test]
fn zero_elapsed_does_not_divide_by_zero() {
    let base = Instant::now();
    let prev = state(100, 100, base + Duration::from_secs(1));
    let cur = sample_at(base, 1, 100, 150);
    let r = rate(&cur, Some(&prev)).unwrap();
    assert_eq!(r.sent_per_sec, 0.0);
    assert!(r.recv_per_sec.is_finite());
    assert!((r.recv_per_sec - 50.0 / EPSILON_SECS).abs() < 1.0);

    // a timestamp older than the stored one behaves the same as zero elapsed
    let older = sample_at(base, 0, 100, 100);
    let r = rate(&older, Some(&prev)).unwrap();
    assert_eq!(r, NetRates::default());
}

#[test]
fn each_tick_is_diffed_against_the_one_right_before() {
    let base = Instant::now();
    let mut calc = RateCalculator::new();
    calc.update(&sample_at(base, 0, 0, 0));
    calc.update(&sample_at(base, 1, 1_000, 1_000));
    let r = calc.update(&sample_at(base, 2, 1_500, 4_000)).unwrap();
    assert_eq!(r.sent_per_sec, 500.0);
    assert_eq!(r.recv_per_sec, 3_000.0);
}

#[test]
fn missing_counters_clear_state() {
    let base = Instant::now();
    let mut calc = RateCalculator::new();
    calc.update(&sample_at(base, 0, 0, 0));

    let mut blind = sample_at(base, 1, 0, 0);
    blind.network = None;
    assert_eq!(calc.update(&blind), None);
    assert!(calc.state().is_none());

    // back again: treated as a first tick rather than diffed against tick 0
    let r = calc.update(&sample_at(base, 2, 8_000, 8_000));
    assert_eq!(r, Some(NetRates::default()));

    calc.reset();
    assert!(calc.state().is_none());
}
