/// Panics unless `actual` is within `atol + rtol * |expected|` of `expected`.
pub fn assert_float_eq(actual: f64, expected: f64, atol: f64, rtol: f64, msg: &str) {
    let tol = atol + rtol * expected.abs();
    assert!(
        (actual - expected).abs() <= tol,
        "floats not almost equal, {}\nactual:   {}\nexpected: {}\ntol:      {}",
        msg,
        actual,
        expected,
        tol
    );
}

pub fn assert_float_eq_f64(actual: f64, expected: f64) {
    assert_float_eq(actual, expected, 1e-12, 1e-12, "");
}
