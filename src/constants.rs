/// Initial capacity of a freshly constructed [`crate::Arr`].
pub const DEFAULT_ARR_CAPACITY: usize = 8;

/// Spaces per nesting level in the streaming renderer.
pub const DEFAULT_INDENT: usize = 2;

/// Digit count at which an integer literal widens from `i32` to `i64`.
pub const INT_WIDEN_DIGITS: usize = 9;

/// Digit count at which an integer literal widens from `i64` to `f64`.
pub const LONG_WIDEN_DIGITS: usize = 16;

/// Fractional digits of visualized scientific notation, per float width.
pub const FLOAT_SCI_PRECISION: usize = 4;
pub const DOUBLE_SCI_PRECISION: usize = 8;
pub const LDOUBLE_SCI_PRECISION: usize = 12;
