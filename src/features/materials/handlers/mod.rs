mod material_handler;

pub use material_handler::*;
