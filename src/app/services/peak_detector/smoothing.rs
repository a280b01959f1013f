//! Fixed-window Savitzky-Golay smoothing
//!
//! Interior points are convolved with the closed-form symmetric
//! coefficients of a cubic least-squares fit (identical to the quadratic
//! case on a symmetric window, since odd moments vanish). The leading and
//! trailing half-windows are evaluated from a cubic fitted over the first
//! and last full window, so the output length always matches the input.

use crate::{Error, Result};

/// Smooth a series with a Savitzky-Golay filter of the given odd window
///
/// Fails with a short-series error when the input has fewer points than
/// the window; callers treat that as recoverable per series.
pub fn savgol_filter(values: &[f64], window: usize) -> Result<Vec<f64>> {
    debug_assert!(window % 2 == 1, "smoothing window must be odd");

    let n = values.len();
    if n < window {
        return Err(Error::series_too_short(n, window));
    }

    let half = window / 2;
    let coeffs = central_coefficients(half);
    let mut smoothed = vec![0.0; n];

    for i in half..n - half {
        let mut acc = 0.0;
        for (k, c) in coeffs.iter().enumerate() {
            acc += c * values[i + k - half];
        }
        smoothed[i] = acc;
    }

    let head = fit_cubic(&values[..window]);
    for (i, value) in smoothed.iter_mut().take(half).enumerate() {
        *value = eval_cubic(&head, i as f64);
    }

    let tail = fit_cubic(&values[n - window..]);
    for i in n - half..n {
        smoothed[i] = eval_cubic(&tail, (i - (n - window)) as f64);
    }

    Ok(smoothed)
}

/// Closed-form symmetric smoothing coefficients for a cubic fit over a
/// window of half-width `m`:
///
/// `c_j = 3 (3m^2 + 3m - 1 - 5 j^2) / ((2m+3)(2m+1)(2m-1))`
fn central_coefficients(half: usize) -> Vec<f64> {
    let m = half as f64;
    let norm = (2.0 * m + 3.0) * (2.0 * m + 1.0) * (2.0 * m - 1.0);

    (-(half as isize)..=half as isize)
        .map(|j| {
            let j = j as f64;
            3.0 * (3.0 * m * m + 3.0 * m - 1.0 - 5.0 * j * j) / norm
        })
        .collect()
}

/// Least-squares cubic fit over `ys` at positions 0..len, via the 4x4
/// normal equations
fn fit_cubic(ys: &[f64]) -> [f64; 4] {
    let mut moments = [0.0f64; 7];
    let mut rhs = [0.0f64; 4];

    for (t, &y) in ys.iter().enumerate() {
        let t = t as f64;
        let mut power = 1.0;
        for (p, moment) in moments.iter_mut().enumerate() {
            *moment += power;
            if p < 4 {
                rhs[p] += y * power;
            }
            power *= t;
        }
    }

    let mut system = [[0.0f64; 5]; 4];
    for r in 0..4 {
        for c in 0..4 {
            system[r][c] = moments[r + c];
        }
        system[r][4] = rhs[r];
    }

    solve4(system)
}

/// Gaussian elimination with partial pivoting on an augmented 4x5 system
///
/// The moment matrix of distinct sample positions is full rank, so the
/// pivots never vanish for any window this crate uses.
fn solve4(mut a: [[f64; 5]; 4]) -> [f64; 4] {
    for col in 0..4 {
        let mut pivot = col;
        for row in col + 1..4 {
            if a[row][col].abs() > a[pivot][col].abs() {
                pivot = row;
            }
        }
        a.swap(col, pivot);

        for row in col + 1..4 {
            let factor = a[row][col] / a[col][col];
            for c in col..5 {
                a[row][c] -= factor * a[col][c];
            }
        }
    }

    let mut x = [0.0f64; 4];
    for row in (0..4).rev() {
        let mut acc = a[row][4];
        for col in row + 1..4 {
            acc -= a[row][col] * x[col];
        }
        x[row] = acc / a[row][row];
    }
    x
}

fn eval_cubic(coeffs: &[f64; 4], t: f64) -> f64 {
    coeffs[0] + t * (coeffs[1] + t * (coeffs[2] + t * coeffs[3]))
}
