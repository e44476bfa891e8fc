//! ADX (Average Directional Index).
//!
//! For bars 1..=n accumulate TR, +DM and -DM, giving the first DX.
//! Every later bar applies Wilder's recurrence
//!   S = S - S/n + current
//! to all three sums and yields one more DX.
//!
//!   +DI = 100 * S(+DM) / S(TR),  -DI = 100 * S(-DM) / S(TR)
//!   DX  = 100 * |+DI - -DI| / (+DI + -DI), 0 if S(TR) <= 0 or +DI + -DI <= 0
//!
//! ADX = mean of the first n DX values, then ADX = (ADX*(n-1) + DX)/n
//! for each remaining DX.
//!
//! Warmup: needs 2n+1 bars.

use crate::domain::candle::true_range;

pub fn average_directional_index(
    highs: &[f64],
    lows: &[f64],
    closes: &[f64],
    period: usize,
) -> Option<f64> {
    let size = highs.len().min(lows.len()).min(closes.len());
    if period == 0 || size < period * 2 + 1 {
        return None;
    }

    let mut tr_sum = 0.0;
    let mut plus_dm_sum = 0.0;
    let mut minus_dm_sum = 0.0;
    for i in 1..=period {
        let (tr, plus_dm, minus_dm) = directional_movement(highs, lows, closes, i);
        tr_sum += tr;
        plus_dm_sum += plus_dm;
        minus_dm_sum += minus_dm;
    }

    let n = period as f64;
    let mut dx_values = Vec::with_capacity(size - period);
    dx_values.push(directional_index(tr_sum, plus_dm_sum, minus_dm_sum));

    for i in (period + 1)..size {
        let (tr, plus_dm, minus_dm) = directional_movement(highs, lows, closes, i);
        tr_sum = tr_sum - tr_sum / n + tr;
        plus_dm_sum = plus_dm_sum - plus_dm_sum / n + plus_dm;
        minus_dm_sum = minus_dm_sum - minus_dm_sum / n + minus_dm;
        dx_values.push(directional_index(tr_sum, plus_dm_sum, minus_dm_sum));
    }

    if dx_values.len() < period {
        return None;
    }

    let mut adx = dx_values[..period].iter().sum::<f64>() / n;
    for dx in &dx_values[period..] {
        adx = (adx * (n - 1.0) + dx) / n;
    }
    Some(adx)
}

/// (true range, +DM, -DM) for bar `i` against bar `i - 1`.
fn directional_movement(highs: &[f64], lows: &[f64], closes: &[f64], i: usize) -> (f64, f64, f64) {
    let tr = true_range(highs[i], lows[i], closes[i - 1]);
    let up_move = highs[i] - highs[i - 1];
    let down_move = lows[i - 1] - lows[i];
    let plus_dm = if up_move > down_move && up_move > 0.0 {
        up_move
    } else {
        0.0
    };
    let minus_dm = if down_move > up_move && down_move > 0.0 {
        down_move
    } else {
        0.0
    };
    (tr, plus_dm, minus_dm)
}

fn directional_index(tr_sum: f64, plus_dm_sum: f64, minus_dm_sum: f64) -> f64 {
    if tr_sum <= 0.0 {
        return 0.0;
    }
    let plus_di = 100.0 * (plus_dm_sum / tr_sum);
    let minus_di = 100.0 * (minus_dm_sum / tr_sum);
    let di_sum = plus_di + minus_di;
    if di_sum <= 0.0 {
        return 0.0;
    }
    100.0 * (plus_di - minus_di).abs() / di_sum
}
