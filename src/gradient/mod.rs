pub mod backprop;
pub mod check;
pub mod method;
pub mod partials;

pub use backprop::backprop;
pub use check::{numeric_gradient, max_abs_difference};
pub use method::GradientMethod;
pub use partials::compute_partials;
