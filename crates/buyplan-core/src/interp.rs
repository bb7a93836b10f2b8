//! Sampling and piecewise-linear interpolation helpers.

/// `count` evenly spaced values from `start` to `end`, both inclusive.
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count as f64 - 1.0);
            let mut out: Vec<f64> = (0..count).map(|i| start + step * i as f64).collect();
            // pin the last sample so it is exactly `end`
            out[count - 1] = end;
            out
        }
    }
}

/// Linear interpolation of `x` through the points `(xs[i], ys[i])`.
///
/// `xs` must be increasing. Outside `[xs[0], xs[last]]` the nearest
/// endpoint's `y` is returned. Returns `None` for empty or mismatched input.
pub fn interp(x: f64, xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.is_empty() || xs.len() != ys.len() {
        return None;
    }
    let last = xs.len() - 1;
    if x <= xs[0] {
        return Some(ys[0]);
    }
    if x >= xs[last] {
        return Some(ys[last]);
    }

    // Find bracketing points
    for i in 0..last {
        let (x0, x1) = (xs[i], xs[i + 1]);
        if x >= x0 && x <= x1 {
            if x1 == x0 {
                return Some(ys[i]);
            }
            let (y0, y1) = (ys[i], ys[i + 1]);
            return Some(y0 + (x - x0) * (y1 - y0) / (x1 - x0));
        }
    }
    Some(ys[last])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linspace_includes_both_ends() {
        let xs = linspace(0.0, 1.0, 5);
        assert_eq!(xs, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(linspace(0.0, 1.0, 500).len(), 500);
        assert_eq!(*linspace(0.0, 1.0, 500).last().unwrap(), 1.0);
        assert!(linspace(0.0, 1.0, 0).is_empty());
    }

    #[test]
    fn interp_between_knots() {
        let xs = [0.125, 0.375];
        let ys = [0.2, 0.5];
        let y = interp(0.25, &xs, &ys).unwrap();
        assert!((y - 0.35).abs() < 1e-12);
    }

    #[test]
    fn interp_clamps_outside_range() {
        let xs = [0.125, 0.375, 0.625, 0.875];
        let ys = [0.2, 0.5, 0.4, 0.2];
        assert_eq!(interp(0.0, &xs, &ys), Some(0.2));
        assert_eq!(interp(1.0, &xs, &ys), Some(0.2));
        assert_eq!(interp(0.625, &xs, &ys), Some(0.4));
    }

    #[test]
    fn interp_rejects_bad_input() {
        assert_eq!(interp(0.5, &[], &[]), None);
        assert_eq!(interp(0.5, &[0.0, 1.0], &[1.0]), None);
    }
}
