//! CPU utilization ratios derived from jiffy counters.
//!
//! All functions are pure and guard every division: a degenerate input
//! yields 0.0, never NaN, infinity or a negative ratio.

use crate::system::CpuStates;

/// Active share of all CPU time since boot, in [0, 1].
pub fn system_cpu_utilization(states: &CpuStates) -> f64 {
    let total = states.total();
    if total == 0 {
        return 0.0;
    }
    states.active() as f64 / total as f64
}

/// Active share between two samples of the aggregate counters.
///
/// Counters are monotonic, so a sample that went backwards (e.g. swapped
/// arguments or a counter reset) contributes a zero delta.
pub fn cpu_utilization_between(previous: &CpuStates, current: &CpuStates) -> f64 {
    let delta_total = current.total().saturating_sub(previous.total());
    if delta_total == 0 {
        return 0.0;
    }
    let delta_idle = current.idle_total().saturating_sub(previous.idle_total());
    let delta_active = delta_total.saturating_sub(delta_idle);
    (delta_active as f64 / delta_total as f64).clamp(0.0, 1.0)
}

/// Average CPU share of a process over its lifetime.
///
/// Ticks are converted to seconds in floating point before the ratio is taken.
/// The result can exceed 1.0 for multi-threaded processes on several cores.
pub fn process_cpu_utilization(active_ticks: u64, uptime_seconds: i64, clk_tck: u64) -> f64 {
    if active_ticks == 0 || uptime_seconds <= 0 || clk_tck == 0 {
        return 0.0;
    }
    let active_seconds = active_ticks as f64 / clk_tck as f64;
    active_seconds / uptime_seconds as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn states(counters: &[u64]) -> CpuStates {
        CpuStates::from_counters(counters)
    }

    #[test]
    fn test_system_utilization_basic() {
        // active = 100 + 0 + 50 = 150, total = 150 + 850 = 1000
        let s = states(&[100, 0, 50, 800, 50, 0, 0, 0, 0, 0]);
        assert!((system_cpu_utilization(&s) - 0.15).abs() < 1e-12);
    }

    #[test]
    fn test_system_utilization_zero_total() {
        assert_eq!(system_cpu_utilization(&CpuStates::default()), 0.0);
    }

    #[test]
    fn test_system_utilization_scale_invariant() {
        let base = [12, 3, 45, 600, 7, 8, 9, 10, 11, 12];
        let scaled: Vec<u64> = base.iter().map(|v| v * 37).collect();
        let a = system_cpu_utilization(&states(&base));
        let b = system_cpu_utilization(&states(&scaled));
        assert!((a - b).abs() < 1e-12);
    }

    #[test]
    fn test_system_utilization_bounds() {
        let all_idle = states(&[0, 0, 0, 500, 0, 0, 0, 0, 0, 0]);
        let all_busy = states(&[500, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(system_cpu_utilization(&all_idle), 0.0);
        assert_eq!(system_cpu_utilization(&all_busy), 1.0);
    }

    #[test]
    fn test_utilization_between_samples() {
        let prev = states(&[100, 0, 100, 800, 0, 0, 0, 0, 0, 0]);
        let curr = states(&[130, 0, 120, 850, 0, 0, 0, 0, 0, 0]);
        // delta total = 100, delta idle = 50
        assert!((cpu_utilization_between(&prev, &curr) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_utilization_between_identical_samples() {
        let s = states(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
        assert_eq!(cpu_utilization_between(&s, &s), 0.0);
    }

    #[test]
    fn test_utilization_between_reversed_samples() {
        let prev = states(&[100, 0, 100, 800]);
        let curr = states(&[130, 0, 120, 850]);
        assert_eq!(cpu_utilization_between(&curr, &prev), 0.0);
    }

    #[test]
    fn test_process_utilization_zero_active() {
        assert_eq!(process_cpu_utilization(0, 1000, 100), 0.0);
        assert_eq!(process_cpu_utilization(0, 0, 100), 0.0);
    }

    #[test]
    fn test_process_utilization_degenerate_uptime() {
        assert_eq!(process_cpu_utilization(500, 0, 100), 0.0);
        assert_eq!(process_cpu_utilization(500, -3, 100), 0.0);
        assert_eq!(process_cpu_utilization(500, 10, 0), 0.0);
    }

    #[test]
    fn test_process_utilization_keeps_fractional_ticks() {
        // 150 ticks at 100 Hz = 1.5s over 10s
        let v = process_cpu_utilization(150, 10, 100);
        assert!((v - 0.15).abs() < 1e-12);
    }
}
