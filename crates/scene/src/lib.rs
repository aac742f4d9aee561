pub mod components;
pub mod draw;
pub mod light;
pub mod material;
pub mod mesh;
pub mod object;
pub mod prefabs;
pub mod resources;

pub use draw::*;
pub use light::*;
pub use material::*;
pub use mesh::*;
pub use object::*;
pub use resources::*;
