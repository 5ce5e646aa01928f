//! Missing-aware rolling-window helpers.
//!
//! Every helper returns a vector the same length as its input. A cell is
//! `None` until a full window of present observations is available, and any
//! missing observation inside the window makes the result missing too, so
//! missing-ness propagates through dependent columns instead of turning into
//! infinities or partial-window estimates.

/// Rolling mean over `window` observations.
pub fn rolling_mean(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    rolling_apply(values, window, |w| {
        w.iter().sum::<f64>() / w.len() as f64
    })
}

/// Rolling sample standard deviation (ddof = 1) over `window` observations.
/// A window shorter than 2 has no sample variance; every cell is missing.
pub fn rolling_std(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    if window < 2 {
        return vec![None; values.len()];
    }
    rolling_apply(values, window, |w| {
        let mean = w.iter().sum::<f64>() / w.len() as f64;
        let sum_sq: f64 = w.iter().map(|v| (v - mean) * (v - mean)).sum();
        (sum_sq / (w.len() - 1) as f64).sqrt()
    })
}

/// Rolling maximum over `window` observations.
pub fn rolling_max(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    rolling_apply(values, window, |w| w.iter().copied().fold(f64::MIN, f64::max))
}

/// Rolling minimum over `window` observations.
pub fn rolling_min(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    rolling_apply(values, window, |w| w.iter().copied().fold(f64::MAX, f64::min))
}

/// Bar-to-bar first difference. The first cell is always missing.
pub fn diff(values: &[Option<f64>]) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    for i in 1..values.len() {
        out[i] = match (values[i - 1], values[i]) {
            (Some(prev), Some(cur)) => Some(cur - prev),
            _ => None,
        };
    }
    out
}

/// Keep a computed value only when it is finite.
pub fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

fn rolling_apply<F>(values: &[Option<f64>], window: usize, f: F) -> Vec<Option<f64>>
where
    F: Fn(&[f64]) -> f64,
{
    let mut out = vec![None; values.len()];
    if window == 0 {
        return out;
    }
    let mut buf = Vec::with_capacity(window);
    for i in 0..values.len() {
        if i + 1 < window {
            continue;
        }
        buf.clear();
        for v in &values[i + 1 - window..=i] {
            match v {
                Some(x) => buf.push(*x),
                None => break,
            }
        }
        if buf.len() == window {
            out[i] = finite(f(&buf));
        }
    }
    out
}
