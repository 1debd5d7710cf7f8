pub mod annotate;
pub mod downsample;
pub mod penalty;
