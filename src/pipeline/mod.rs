//! Classification pipeline components.

mod coordinator;
mod processor;

pub use coordinator::{collect_input_files, export_path_for};
pub use processor::{EnrichedResult, classify_image, classify_image_bytes, run_batch};
