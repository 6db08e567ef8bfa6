pub mod materialize;

pub use materialize::{is_compressed, Decompressor, Materialized, Materializer, PixelDataDecompressor};
