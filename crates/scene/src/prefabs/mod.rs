pub mod globe;
pub mod markers;
pub mod shapes;

pub use globe::*;
pub use markers::*;
pub use shapes::*;
