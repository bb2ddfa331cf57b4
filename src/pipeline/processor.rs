//! Single-image and batch classification.

use crate::catalog::{Catalog, CatalogEntry};
use crate::imaging::{decode_image_bytes, decode_image_file};
use crate::inference::{Classify, Prediction};
use crate::jitter::ConfidenceJitter;
use crate::output::{BatchEntry, progress};
use image::RgbImage;
use indicatif::ProgressBar;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A classified and enriched image.
#[derive(Debug, Clone)]
pub struct EnrichedResult {
    /// Top-1 prediction with the raw model confidence.
    pub prediction: Prediction,
    /// Jittered confidence shown to the user.
    pub display_confidence: f32,
    /// Catalog attributes for the predicted label, or the `"unknown"`
    /// placeholder when the label has no catalog row.
    pub entry: CatalogEntry,
}

/// Classify one image file and enrich the result.
///
/// Returns `None` for every non-startup failure: undecodable images,
/// models that yield no result, and inference errors are all logged and
/// reported as "no detection". Nothing below classifier construction
/// propagates as an error from here.
pub fn classify_image<C: Classify, J: ConfidenceJitter>(
    path: &Path,
    classifier: &C,
    jitter: &J,
    catalog: &Catalog,
) -> Option<EnrichedResult> {
    let pixels = match decode_image_file(path) {
        Ok(pixels) => pixels,
        Err(e) => {
            warn!("Skipping {}: {e}", path.display());
            return None;
        }
    };

    classify_pixels(&pixels, classifier, jitter, catalog)
}

/// Classify an in-memory encoded image and enrich the result.
///
/// Same contract as [`classify_image`], for callers that hold encoded
/// bytes (an upload body) instead of a path.
pub fn classify_image_bytes<C: Classify, J: ConfidenceJitter>(
    bytes: &[u8],
    classifier: &C,
    jitter: &J,
    catalog: &Catalog,
) -> Option<EnrichedResult> {
    let pixels = match decode_image_bytes(bytes) {
        Ok(pixels) => pixels,
        Err(e) => {
            warn!("Skipping inline image: {e}");
            return None;
        }
    };

    classify_pixels(&pixels, classifier, jitter, catalog)
}

fn classify_pixels<C: Classify, J: ConfidenceJitter>(
    pixels: &RgbImage,
    classifier: &C,
    jitter: &J,
    catalog: &Catalog,
) -> Option<EnrichedResult> {
    let prediction = match classifier.classify(pixels) {
        Ok(Some(prediction)) => prediction,
        Ok(None) => {
            debug!("No species detected");
            return None;
        }
        Err(e) => {
            warn!("Inference failed, treating as no detection: {e}");
            return None;
        }
    };

    let display_confidence = jitter.apply(prediction.confidence);
    let entry = catalog.get_or_unknown(&prediction.label);

    debug!(
        "Classified as '{}' ({:.4} raw, {:.4} display)",
        prediction.label, prediction.confidence, display_confidence
    );

    Some(EnrichedResult {
        prediction,
        display_confidence,
        entry,
    })
}

/// Classify every image in a batch, in input order.
///
/// Failed items (decode errors, no detection) are skipped from the output
/// and never abort the remaining batch, so the result length may be
/// shorter than the input. Surviving entries keep input order.
pub fn run_batch<C: Classify, J: ConfidenceJitter>(
    paths: &[PathBuf],
    classifier: &C,
    jitter: &J,
    catalog: &Catalog,
    progress_bar: Option<&ProgressBar>,
) -> Vec<BatchEntry> {
    let mut entries = Vec::with_capacity(paths.len());

    for path in paths {
        if let Some(result) = classify_image(path, classifier, jitter, catalog) {
            entries.push(BatchEntry {
                image_name: image_name(path),
                label: result.prediction.label,
                display_confidence: result.display_confidence,
                entry: result.entry,
            });
        }
        progress::inc_progress(progress_bar);
    }

    entries
}

/// File name shown in results, falling back to the full path when the
/// path has no final component.
fn image_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::error::Result;
    use crate::jitter::FixedJitter;
    use image::ImageFormat;
    use std::collections::HashMap;
    use std::io::Cursor;

    /// Table-backed fake keyed on the image's top-left pixel red value.
    struct StubClassifier {
        by_red: HashMap<u8, Prediction>,
    }

    impl Classify for StubClassifier {
        fn classify(&self, pixels: &RgbImage) -> Result<Option<Prediction>> {
            Ok(self.by_red.get(&pixels.get_pixel(0, 0).0[0]).cloned())
        }
    }

    fn png_with_red(red: u8) -> Vec<u8> {
        let img = RgbImage::from_pixel(4, 4, image::Rgb([red, 0, 0]));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    fn iris_catalog() -> Catalog {
        let mut entries = HashMap::new();
        entries.insert(
            "Iris".to_string(),
            CatalogEntry {
                family: "Iridaceae".to_string(),
                genus: "Iris".to_string(),
                species: "Iris sp.".to_string(),
                distribution: "Highlands".to_string(),
                appearance: "Purple petals".to_string(),
            },
        );
        Catalog::from_entries(entries)
    }

    fn stub_with_iris() -> StubClassifier {
        let mut by_red = HashMap::new();
        by_red.insert(
            1,
            Prediction {
                label: "Iris".to_string(),
                confidence: 0.90,
                index: 0,
            },
        );
        by_red.insert(
            2,
            Prediction {
                label: "Unknown-X".to_string(),
                confidence: 0.40,
                index: 7,
            },
        );
        StubClassifier { by_red }
    }

    #[test]
    fn test_classify_bytes_enriches_from_catalog() {
        let result = classify_image_bytes(
            &png_with_red(1),
            &stub_with_iris(),
            &FixedJitter(0.03),
            &iris_catalog(),
        )
        .unwrap();

        assert_eq!(result.prediction.label, "Iris");
        assert_eq!(result.prediction.confidence, 0.90);
        assert_eq!(result.display_confidence, 0.87);
        assert_eq!(result.entry.family, "Iridaceae");
        assert_eq!(result.entry.distribution, "Highlands");
    }

    #[test]
    fn test_unknown_label_substitutes_placeholder() {
        let result = classify_image_bytes(
            &png_with_red(2),
            &stub_with_iris(),
            &FixedJitter(0.01),
            &iris_catalog(),
        )
        .unwrap();

        assert_eq!(result.prediction.label, "Unknown-X");
        assert_eq!(result.entry.family, "unknown");
        assert_eq!(result.entry.appearance, "unknown");
    }

    #[test]
    fn test_no_detection_returns_none() {
        let result = classify_image_bytes(
            &png_with_red(99),
            &stub_with_iris(),
            &FixedJitter(0.01),
            &iris_catalog(),
        );
        assert!(result.is_none());
    }

    #[test]
    fn test_undecodable_bytes_return_none() {
        let result = classify_image_bytes(
            b"definitely not a png",
            &stub_with_iris(),
            &FixedJitter(0.01),
            &iris_catalog(),
        );
        assert!(result.is_none());
    }

    #[test]
    fn test_batch_skips_failures_and_keeps_order() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("01_iris.png");
        let broken = dir.path().join("02_broken.png");
        let third = dir.path().join("03_mystery.png");
        let silent = dir.path().join("04_none.png");
        std::fs::write(&first, png_with_red(1)).unwrap();
        std::fs::write(&broken, b"corrupt").unwrap();
        std::fs::write(&third, png_with_red(2)).unwrap();
        std::fs::write(&silent, png_with_red(50)).unwrap();

        let paths = vec![first, broken, third, silent];
        let entries = run_batch(
            &paths,
            &stub_with_iris(),
            &FixedJitter(0.02),
            &iris_catalog(),
            None,
        );

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].image_name, "01_iris.png");
        assert_eq!(entries[0].label, "Iris");
        assert_eq!(entries[1].image_name, "03_mystery.png");
        assert_eq!(entries[1].entry.family, "unknown");
    }

    #[test]
    fn test_inference_error_is_contained() {
        struct FailingClassifier;
        impl Classify for FailingClassifier {
            fn classify(&self, _pixels: &RgbImage) -> Result<Option<Prediction>> {
                Err(crate::error::Error::Inference {
                    reason: "synthetic".to_string(),
                })
            }
        }

        let result = classify_image_bytes(
            &png_with_red(1),
            &FailingClassifier,
            &FixedJitter(0.01),
            &iris_catalog(),
        );
        assert!(result.is_none());
    }
}
