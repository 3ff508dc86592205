#[cfg(test)]
use crate::DataType;

/// Compares relative to the magnitude of `expected`, a few ulps of slack.
#[cfg(test)]
pub fn assert_close<T: DataType>(actual: T, expected: T) {
    let slack = T::epsilon() * T::from(8).unwrap() * expected.abs().max(T::one());
    assert!(
        (actual - expected).abs() <= slack,
        "{} is not close to {}",
        actual,
        expected
    );
}
