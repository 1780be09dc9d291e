mod attention;
mod positional;

pub use attention::MultiHeadAttention;
pub use positional::sinusoidal_encoding;
