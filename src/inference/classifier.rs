//! ONNX session wrapper for plant classification.

use crate::config::{InferenceDevice, ModelConfig};
use crate::error::{Error, Result};
use crate::inference::{preprocess, read_labels};
use image::RgbImage;
use ort::execution_providers::CUDAExecutionProvider;
use ort::session::Session;
use ort::session::builder::GraphOptimizationLevel;
use ort::value::Tensor;
use std::sync::Mutex;
use tracing::{info, warn};

/// Top-1 classification result.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    /// Class label from the labels file.
    pub label: String,
    /// Raw model confidence (0.0 - 1.0).
    pub confidence: f32,
    /// Class index in the model's output vector.
    pub index: usize,
}

/// Classification seam for the pipeline.
///
/// The pipeline is written against this trait so process-wide model state
/// can be replaced with a table-backed fake under test.
pub trait Classify {
    /// Classify decoded pixels, returning the single best prediction.
    ///
    /// `Ok(None)` means the model produced no usable result ("no
    /// detection") and is distinct from an inference error.
    fn classify(&self, pixels: &RgbImage) -> Result<Option<Prediction>>;
}

/// Wrapper around an ONNX image classification session.
///
/// The session is loaded once at startup and treated as an immutable
/// shared resource for the process lifetime. Inference is a single
/// blocking forward pass with no internal concurrency; the mutex exists
/// only because the runtime requires exclusive access per call.
pub struct PlantClassifier {
    session: Mutex<Session>,
    labels: Vec<String>,
    input_size: u32,
    input_name: String,
    output_name: String,
}

impl PlantClassifier {
    /// Build a classifier from model configuration.
    pub fn from_config(model_config: &ModelConfig, device: InferenceDevice) -> Result<Self> {
        if !model_config.path.exists() {
            return Err(Error::ModelFileNotFound {
                path: model_config.path.clone(),
            });
        }
        if !model_config.labels.exists() {
            return Err(Error::LabelsFileNotFound {
                path: model_config.labels.clone(),
            });
        }

        let labels = read_labels(&model_config.labels)?;

        let mut builder = Session::builder()
            .and_then(|b| b.with_optimization_level(GraphOptimizationLevel::Level3))
            .map_err(|e| Error::ClassifierBuild {
                reason: e.to_string(),
            })?;

        // CUDA registration is best-effort; the runtime falls back to CPU
        // when the provider is unavailable.
        match device {
            InferenceDevice::Cpu => {
                info!("Requested device: CPU");
            }
            InferenceDevice::Auto | InferenceDevice::Gpu => {
                if device == InferenceDevice::Gpu {
                    info!("Requested device: GPU (CUDA, fallback to CPU)");
                }
                builder = builder
                    .with_execution_providers([CUDAExecutionProvider::default().build()])
                    .map_err(|e| Error::ClassifierBuild {
                        reason: e.to_string(),
                    })?;
            }
        }

        let session =
            builder
                .commit_from_file(&model_config.path)
                .map_err(|e| Error::ClassifierBuild {
                    reason: e.to_string(),
                })?;

        let input_name = session
            .inputs
            .first()
            .map(|i| i.name.clone())
            .ok_or_else(|| Error::ClassifierBuild {
                reason: "model has no inputs".to_string(),
            })?;
        let output_name = session
            .outputs
            .first()
            .map(|o| o.name.clone())
            .ok_or_else(|| Error::ClassifierBuild {
                reason: "model has no outputs".to_string(),
            })?;

        let input_size = model_config.input_size;
        info!(
            "Loaded model: {} ({} classes, {}x{} input)",
            model_config.path.display(),
            labels.len(),
            input_size,
            input_size
        );

        Ok(Self {
            session: Mutex::new(session),
            labels,
            input_size,
            input_name,
            output_name,
        })
    }

    /// Class labels, index-aligned with the model output vector.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Expected model input size (square, pixels).
    pub fn input_size(&self) -> u32 {
        self.input_size
    }

    fn label_for(&self, index: usize) -> String {
        self.labels.get(index).map_or_else(
            || {
                warn!("Model output index {index} has no label; labels file too short?");
                format!("class-{index}")
            },
            Clone::clone,
        )
    }
}

impl Classify for PlantClassifier {
    fn classify(&self, pixels: &RgbImage) -> Result<Option<Prediction>> {
        let tensor = preprocess::to_input_tensor(pixels, self.input_size);
        let input = Tensor::from_array(tensor).map_err(|e| Error::Inference {
            reason: e.to_string(),
        })?;

        let mut session = self.session.lock().map_err(|_| Error::Inference {
            reason: "session lock poisoned".to_string(),
        })?;

        let outputs = session
            .run(ort::inputs![self.input_name.as_str() => input])
            .map_err(|e| Error::Inference {
                reason: e.to_string(),
            })?;

        let (_, probabilities) = outputs[self.output_name.as_str()]
            .try_extract_tensor::<f32>()
            .map_err(|e| Error::Inference {
                reason: e.to_string(),
            })?;

        Ok(top1(probabilities).map(|(index, confidence)| Prediction {
            label: self.label_for(index),
            confidence,
            index,
        }))
    }
}

/// Arg-max over the output probability vector.
///
/// Ties resolve to the lowest index: only a strictly greater probability
/// displaces the current best.
fn top1(probabilities: &[f32]) -> Option<(usize, f32)> {
    let mut best: Option<(usize, f32)> = None;
    for (index, &probability) in probabilities.iter().enumerate() {
        match best {
            Some((_, top)) if probability <= top => {}
            _ => best = Some((index, probability)),
        }
    }
    best
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_top1_selects_highest() {
        assert_eq!(top1(&[0.1, 0.7, 0.2]), Some((1, 0.7)));
    }

    #[test]
    fn test_top1_tie_breaks_to_lowest_index() {
        assert_eq!(top1(&[0.2, 0.5, 0.5, 0.1]), Some((1, 0.5)));
        assert_eq!(top1(&[0.5, 0.5]), Some((0, 0.5)));
    }

    #[test]
    fn test_top1_empty_vector_is_none() {
        assert_eq!(top1(&[]), None);
    }

    #[test]
    fn test_top1_single_class() {
        assert_eq!(top1(&[0.3]), Some((0, 0.3)));
    }
}
