//! Position state machine and signal generation.
//!
//! The one genuinely stateful, order-dependent piece of the core: a pure
//! transition function over a tagged state, walked across the annotated
//! series in time order. A missing indicator never satisfies a condition.

use crate::domain::indicator::IndicatorSet;

/// Open-position state for one instrument. Flat means no open position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionState {
    Flat,
    Long,
    Short,
}

/// The indicator cells the rule set consumes for a single bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalInputs {
    pub thin_band_indicator: Option<f64>,
    pub thick_band_indicator: Option<f64>,
    pub percent_b: Option<f64>,
}

/// Outcome of evaluating one bar: the next state and the two signal cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub next: PositionState,
    pub open_signal: f64,
    pub close_signal: f64,
}

impl Transition {
    fn hold(state: PositionState) -> Transition {
        Transition {
            next: state,
            open_signal: 0.0,
            close_signal: 0.0,
        }
    }
}

fn flag_set(value: Option<f64>) -> bool {
    matches!(value, Some(v) if v == 1.0)
}

/// Evaluate the entry/exit rules for one bar.
///
/// Flat tests the short entry then the long entry (mutually exclusive, since
/// percent_b cannot be below 0 and above 1 at once); an open position tests
/// only its own exit. At most one transition fires per bar.
pub fn step(state: PositionState, inputs: &SignalInputs) -> Transition {
    match state {
        PositionState::Flat => {
            if !flag_set(inputs.thin_band_indicator) {
                return Transition::hold(state);
            }
            match inputs.percent_b {
                Some(pb) if pb < 0.0 => Transition {
                    next: PositionState::Short,
                    open_signal: -1.0,
                    close_signal: 0.0,
                },
                Some(pb) if pb > 1.0 => Transition {
                    next: PositionState::Long,
                    open_signal: 1.0,
                    close_signal: 0.0,
                },
                _ => Transition::hold(state),
            }
        }
        PositionState::Long => {
            if flag_set(inputs.thick_band_indicator) {
                Transition {
                    next: PositionState::Flat,
                    open_signal: 0.0,
                    close_signal: 1.0,
                }
            } else {
                Transition::hold(state)
            }
        }
        PositionState::Short => {
            if flag_set(inputs.thick_band_indicator) {
                Transition {
                    next: PositionState::Flat,
                    open_signal: 0.0,
                    close_signal: -1.0,
                }
            } else {
                Transition::hold(state)
            }
        }
    }
}

/// The two signal columns for one instrument, index-aligned with its bars,
/// plus the state left after the final bar.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalColumns {
    pub open_signal: Vec<f64>,
    pub close_signal: Vec<f64>,
    pub final_state: PositionState,
}

impl SignalColumns {
    pub fn len(&self) -> usize {
        self.open_signal.len()
    }

    pub fn is_empty(&self) -> bool {
        self.open_signal.is_empty()
    }
}

/// Walk the annotated series in time order, starting Flat, and fill
/// pre-sized positional output buffers. No forced close at end of series.
pub fn generate_signals(indicators: &IndicatorSet) -> SignalColumns {
    let len = indicators.len();
    let mut open_signal = vec![0.0; len];
    let mut close_signal = vec![0.0; len];
    let mut state = PositionState::Flat;

    for i in 0..len {
        let inputs = SignalInputs {
            thin_band_indicator: indicators.thin_band_indicator[i],
            thick_band_indicator: indicators.thick_band_indicator[i],
            percent_b: indicators.percent_b[i],
        };
        let transition = step(state, &inputs);
        open_signal[i] = transition.open_signal;
        close_signal[i] = transition.close_signal;
        state = transition.next;
    }

    SignalColumns {
        open_signal,
        close_signal,
        final_state: state,
    }
}
