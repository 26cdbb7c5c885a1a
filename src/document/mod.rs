pub mod css;
pub mod model;
pub mod parse;
pub mod write;
