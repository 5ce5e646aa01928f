//! Property tests for the signal state machine invariants.
//!
//! Uses proptest to verify, over arbitrary bar series and lookbacks:
//! 1. Open/close mutual exclusivity per bar
//! 2. At most one unmatched open at any prefix
//! 3. Close signals pair in sign with the preceding open
//! 4. No signal before the indicator warmup completes
//! 5. Determinism of the whole pipeline

use bandsqueeze::domain::indicator::IndicatorSet;
use bandsqueeze::domain::ohlcv::OhlcvBar;
use bandsqueeze::domain::params::StrategyParams;
use bandsqueeze::domain::signal::generate_signals;
use chrono::NaiveDate;
use proptest::prelude::*;

fn make_bars(closes: &[f64]) -> Vec<OhlcvBar> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| OhlcvBar {
            date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap() + chrono::Days::new(i as u64),
            open: close,
            high: close + 0.5,
            low: close - 0.5,
            close,
            volume: 1000.0,
        })
        .collect()
}

fn arb_closes() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(50.0..150.0f64, 0..120)
        .prop_map(|v| v.into_iter().map(|p| (p * 100.0).round() / 100.0).collect())
}

fn arb_params() -> impl Strategy<Value = StrategyParams> {
    (2usize..8, 2usize..15, 1u32..30).prop_map(|(window, bandwidth_window, width_x10)| {
        StrategyParams {
            window,
            width: width_x10 as f64 / 10.0,
            bandwidth_window,
            ..StrategyParams::default()
        }
    })
}

/// Walk both signal arrays and check every sequencing invariant at once.
fn assert_signal_invariants(open: &[f64], close: &[f64], warmup: usize) {
    assert_eq!(open.len(), close.len());
    let mut position = 0.0;
    for i in 0..open.len() {
        for v in [open[i], close[i]] {
            assert!(
                v == -1.0 || v == 0.0 || v == 1.0,
                "value outside unit range at bar {i}"
            );
        }
        assert!(
            !(open[i] != 0.0 && close[i] != 0.0),
            "open and close on the same bar {i}"
        );
        if i + 1 < warmup {
            assert!(
                open[i] == 0.0 && close[i] == 0.0,
                "signal during warmup at bar {i}"
            );
        }
        if open[i] != 0.0 {
            assert!(position == 0.0, "open while a position is held at bar {i}");
            position = open[i];
        }
        if close[i] != 0.0 {
            assert!(position == close[i], "close without a matching open at bar {i}");
            position = 0.0;
        }
    }
}

proptest! {
    #[test]
    fn signal_sequencing_invariants_hold(closes in arb_closes(), params in arb_params()) {
        let bars = make_bars(&closes);
        let set = IndicatorSet::compute(&bars, &params);
        let signals = generate_signals(&set);
        assert_signal_invariants(
            &signals.open_signal,
            &signals.close_signal,
            params.warmup(),
        );
    }

    #[test]
    fn pipeline_is_deterministic(closes in arb_closes(), params in arb_params()) {
        let bars = make_bars(&closes);
        let first = IndicatorSet::compute(&bars, &params);
        let second = IndicatorSet::compute(&bars, &params);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(generate_signals(&first), generate_signals(&second));
    }

    #[test]
    fn degenerate_bars_never_panic(closes in arb_closes(), params in arb_params()) {
        let mut bars = make_bars(&closes);
        // Flatten every third bar into a zero-range, zero-volume observation.
        for bar in bars.iter_mut().step_by(3) {
            bar.high = bar.close;
            bar.low = bar.close;
            bar.volume = 0.0;
        }
        let set = IndicatorSet::compute(&bars, &params);
        for v in set.intensity.iter().flatten() {
            prop_assert!(v.is_finite());
        }
        let signals = generate_signals(&set);
        prop_assert_eq!(signals.open_signal.len(), bars.len());
    }
}
