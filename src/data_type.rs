use num::Float;
use std::{
    fmt::{Debug, Display},
    str::FromStr,
};

/// Gathers [`Float`](num::Float), `FromStr`, `Debug`, and `Display` in one trait.
/// Every type that is used as number of an evaluation tree needs to implement at least
/// this, e.g., `f32` and `f64`.
pub trait DataType: Float + FromStr + Debug + Display {}
impl<T: Float + FromStr + Debug + Display> DataType for T {}
