//! Classifier adapter around an ONNX image classification model.

mod classifier;
mod labels;
mod preprocess;

pub use classifier::{Classify, PlantClassifier, Prediction};
pub use labels::read_labels;
pub use preprocess::to_input_tensor;
