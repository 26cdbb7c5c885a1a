pub mod codec;
pub mod surface;
