//! Fixed-point math for token amounts

pub mod pure_math;

pub use pure_math::{to_base_units, to_display_string, display_amount, format_units, multiply_and_divide};
