//! ONNX Runtime session handling and the fixed preprocessing pipeline.

use crate::error::{Error, Result};
use image::imageops::FilterType;
use image::DynamicImage;
use ndarray::Array4;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Value;
use std::path::Path;

/// Input resolution the model expects.
pub const INPUT_SIZE: u32 = 224;

/// ImageNet normalization mean (RGB order).
pub const IMAGE_NET_MEAN: [f32; 3] = [0.485, 0.456, 0.406];

/// ImageNet normalization standard deviation (RGB order).
pub const IMAGE_NET_STD: [f32; 3] = [0.229, 0.224, 0.225];

/// Load an ONNX session from a model file, CPU execution only.
pub fn load_session(model_path: &Path) -> Result<Session> {
    let _ = ort::init().with_name("orange-sorter").commit();

    let session = Session::builder()?
        .with_optimization_level(GraphOptimizationLevel::Level3)?
        .with_intra_threads(4)?
        .with_execution_providers([
            ort::execution_providers::CPUExecutionProvider::default().build(),
        ])?
        .commit_from_file(model_path)?;

    Ok(session)
}

/// Turn a decoded image into a single-item NCHW batch.
///
/// The pipeline is fixed: resize to exactly 224x224 (no aspect preservation),
/// convert to RGB, scale to [0,1] and apply ImageNet mean/std.
pub fn preprocess(image: &DynamicImage) -> Result<Array4<f32>> {
    let resized = image.resize_exact(INPUT_SIZE, INPUT_SIZE, FilterType::Triangle);
    let rgb = resized.to_rgb8();

    let hw = (INPUT_SIZE * INPUT_SIZE) as usize;
    let mut data = vec![0f32; 3 * hw];
    for (i, pixel) in rgb.pixels().enumerate() {
        for c in 0..3 {
            data[c * hw + i] = (pixel[c] as f32 / 255.0 - IMAGE_NET_MEAN[c]) / IMAGE_NET_STD[c];
        }
    }

    let tensor = Array4::from_shape_vec(
        (1, 3, INPUT_SIZE as usize, INPUT_SIZE as usize),
        data,
    )?;

    Ok(tensor)
}

/// Run the session on one preprocessed batch and return the top-1 label with
/// its softmax probability.
pub fn run_top1(
    session: &mut Session,
    input: Array4<f32>,
    labels: &[String],
) -> Result<(String, f32)> {
    let input_name = session.inputs()[0].name().to_string();

    let input_tensor = Value::from_array(input)?;
    let outputs = session.run(ort::inputs![input_name.as_str() => input_tensor])?;

    let output = outputs
        .values()
        .next()
        .ok_or_else(|| Error::Inference("model produced no outputs".to_string()))?;

    let (_, logits) = output.try_extract_tensor::<f32>()?;

    let probabilities = softmax(logits);
    top_prediction(&probabilities, labels)
        .ok_or_else(|| Error::Inference("model output was empty".to_string()))
}

/// Numerically stable softmax over raw logits.
fn softmax(logits: &[f32]) -> Vec<f32> {
    let max_logit = logits.iter().fold(f32::NEG_INFINITY, |a, &b| a.max(b));
    let exp_sum: f32 = logits.iter().map(|&x| (x - max_logit).exp()).sum();
    logits
        .iter()
        .map(|&x| (x - max_logit).exp() / exp_sum)
        .collect()
}

/// Highest-probability entry, with a `class_{idx}` fallback when the label
/// table is shorter than the output vector.
fn top_prediction(probabilities: &[f32], labels: &[String]) -> Option<(String, f32)> {
    let (idx, &confidence) = probabilities
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))?;

    let label = labels
        .get(idx)
        .cloned()
        .unwrap_or_else(|| format!("class_{}", idx));

    Some((label, confidence))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn test_preprocess_shape() {
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(64, 48, Rgb([10, 20, 30])));
        let tensor = preprocess(&image).unwrap();
        assert_eq!(tensor.shape(), &[1, 3, 224, 224]);
    }

    #[test]
    fn test_preprocess_normalizes_solid_color() {
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(224, 224, Rgb([255, 255, 255])));
        let tensor = preprocess(&image).unwrap();

        for c in 0..3 {
            let expected = (1.0 - IMAGE_NET_MEAN[c]) / IMAGE_NET_STD[c];
            let got = tensor[[0, c, 0, 0]];
            assert!((got - expected).abs() < 1e-5, "channel {c}: {got} vs {expected}");
        }
    }

    #[test]
    fn test_softmax_sums_to_one() {
        let probs = softmax(&[1.0, 2.0, 3.0]);
        let sum: f32 = probs.iter().sum();
        assert!((sum - 1.0).abs() < 1e-6);
        assert!(probs[2] > probs[1] && probs[1] > probs[0]);
    }

    #[test]
    fn test_top_prediction_picks_argmax() {
        let labels: Vec<String> = vec!["tench".into(), "orange".into(), "screwdriver".into()];
        let (label, confidence) = top_prediction(&[0.1, 0.7, 0.2], &labels).unwrap();
        assert_eq!(label, "orange");
        assert!((confidence - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_top_prediction_label_fallback() {
        let labels: Vec<String> = vec!["tench".into()];
        let (label, _) = top_prediction(&[0.1, 0.9], &labels).unwrap();
        assert_eq!(label, "class_1");
    }

    #[test]
    fn test_top_prediction_empty_output() {
        assert!(top_prediction(&[], &[]).is_none());
    }
}
