pub mod integrate;
pub mod stencil;

pub use integrate::{cumulative_trapezoid, trapezoid};
pub use stencil::{first_derivative, second_derivative};
