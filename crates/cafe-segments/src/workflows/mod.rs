pub mod import;
pub mod segmentation;
