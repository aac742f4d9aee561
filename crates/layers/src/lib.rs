pub mod arcs;
pub mod hex;
