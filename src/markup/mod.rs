pub mod block;
pub mod classifier;
pub mod normalize;
pub mod reassemble;
pub mod scan;
pub mod segmenter;
