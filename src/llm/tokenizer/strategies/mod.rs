mod byte;
mod word;

pub use byte::{ByteTokenizer, BYTE_VOCAB};
pub use word::WordTokenizer;
