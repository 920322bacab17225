mod encoder;
mod galois;

pub use encoder::*;
