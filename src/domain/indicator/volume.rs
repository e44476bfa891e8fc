//! Volume ratio: current quote volume relative to its recent average.
//!
//! ratio = V[last] / mean(V[last-n..last])  (current bar excluded)
//! 0 if the current volume is not positive.
//! Warmup: needs n+1 volumes.

pub fn volume_ratio(quote_volumes: &[f64], lookback: usize) -> Option<f64> {
    if lookback == 0 || quote_volumes.len() < lookback + 1 {
        return None;
    }
    let last = quote_volumes.len() - 1;
    let current = quote_volumes[last];
    if current <= 0.0 {
        return Some(0.0);
    }
    let preceding = &quote_volumes[last - lookback..last];
    let avg = preceding.iter().sum::<f64>() / lookback as f64;
    if avg <= 0.0 {
        return None;
    }
    Some(current / avg)
}
