//! BERT 5-star sentiment classifier on candle.
//!
//! Downloads `config.json`, the tokenizer and the weights from the Hugging Face
//! hub once, then serves synchronous predictions for the lifetime of the
//! process. Only compiled with the `ml` feature.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use candle_core::{DType, Device, IndexOp, Tensor, D};
use candle_nn::{Linear, Module, VarBuilder};
use candle_transformers::models::bert::{BertModel, Config as BertConfig};
use hf_hub::api::tokio::{ApiBuilder, ApiRepo};
use hf_hub::{Repo, RepoType};
use tokenizers::models::wordpiece::WordPiece;
use tokenizers::normalizers::BertNormalizer;
use tokenizers::pre_tokenizers::bert::BertPreTokenizer;
use tokenizers::processors::bert::BertProcessing;
use tokenizers::{
    DecoderWrapper, Model, ModelWrapper, NormalizerWrapper, PostProcessorWrapper,
    PreTokenizerWrapper, Tokenizer, TokenizerBuilder, TruncationParams,
};

use crate::config::constants::CLASSIFIER_MAX_TOKENS;
use crate::sentiment::model::{
    parse_star_label, ClassifierConfig, InferenceError, ModelLoadError, StarClassifier,
    StarPrediction,
};

/// Loaded BERT encoder with pooler and classification head
pub struct BertStarClassifier {
    tokenizer: Tokenizer,
    model: BertModel,
    pooler: Linear,
    classifier: Linear,
    device: Device,
    id2label: HashMap<usize, String>,
}

impl BertStarClassifier {
    /// Downloads (or reuses cached) model files and builds the classifier
    pub async fn load(config: &ClassifierConfig) -> Result<Self, ModelLoadError> {
        let mut builder = ApiBuilder::new();
        if let Some(dir) = &config.cache_dir {
            builder = builder.with_cache_dir(dir.clone());
        }
        let api = builder
            .build()
            .map_err(|e| ModelLoadError::Download(format!("Failed to create hub client: {e}")))?;

        let repo = match &config.revision {
            Some(rev) => api.repo(Repo::with_revision(
                config.model_id.clone(),
                RepoType::Model,
                rev.clone(),
            )),
            None => api.model(config.model_id.clone()),
        };

        let config_path = repo
            .get("config.json")
            .await
            .map_err(|e| ModelLoadError::Download(format!("config.json: {e}")))?;
        let config_json: serde_json::Value = std::fs::read_to_string(&config_path)
            .map_err(|e| ModelLoadError::Config(e.to_string()))
            .and_then(|raw| {
                serde_json::from_str(&raw).map_err(|e| ModelLoadError::Config(e.to_string()))
            })?;

        let tokenizer = load_tokenizer(&repo).await?;

        let device = Device::Cpu;
        let vb = load_weights(&repo, &device).await?;

        let bert_config: BertConfig = serde_json::from_value(config_json.clone())
            .map_err(|e| ModelLoadError::Config(format!("Invalid BERT config: {e}")))?;

        let id2label = extract_id2label(&config_json);
        let num_labels = if id2label.is_empty() { 5 } else { id2label.len() };

        let model = BertModel::load(vb.pp("bert"), &bert_config)
            .map_err(|e| ModelLoadError::Weights(format!("BERT encoder: {e}")))?;
        let pooler = candle_nn::linear(
            bert_config.hidden_size,
            bert_config.hidden_size,
            vb.pp("bert.pooler.dense"),
        )
        .map_err(|e| ModelLoadError::Weights(format!("Pooler: {e}")))?;
        let classifier =
            candle_nn::linear(bert_config.hidden_size, num_labels, vb.pp("classifier"))
                .map_err(|e| ModelLoadError::Weights(format!("Classifier head: {e}")))?;

        tracing::debug!(labels = num_labels, "BERT star classifier built");

        Ok(Self {
            tokenizer,
            model,
            pooler,
            classifier,
            device,
            id2label,
        })
    }

    fn probabilities(&self, text: &str) -> Result<Vec<f32>, InferenceError> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| InferenceError::Tokenization(e.to_string()))?;

        let input_ids = to_batch(encoding.get_ids(), &self.device)?;
        let token_type_ids = to_batch(encoding.get_type_ids(), &self.device)?;
        let attention_mask = to_batch(encoding.get_attention_mask(), &self.device)?;

        let forward = || -> candle_core::Result<Vec<f32>> {
            let hidden = self
                .model
                .forward(&input_ids, &token_type_ids, Some(&attention_mask))?;
            // * [CLS] token at position 0, then the tanh pooler
            let cls = hidden.i((.., 0))?;
            let pooled = self.pooler.forward(&cls)?.tanh()?;
            let logits = self.classifier.forward(&pooled)?;
            let probs = candle_nn::ops::softmax(&logits, D::Minus1)?;
            probs.squeeze(0)?.to_dtype(DType::F32)?.to_vec1::<f32>()
        };

        forward().map_err(|e| InferenceError::Forward(e.to_string()))
    }
}

impl StarClassifier for BertStarClassifier {
    fn predict(&self, text: &str) -> Result<StarPrediction, InferenceError> {
        let probs = self.probabilities(text)?;

        let (best, confidence) = probs
            .iter()
            .copied()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .ok_or_else(|| InferenceError::Forward("Empty logits".to_string()))?;

        let stars = match self.id2label.get(&best) {
            Some(label) => parse_star_label(label)?,
            // * No label map: class index 0 is one star
            None => (best + 1) as f64,
        };

        Ok(StarPrediction {
            stars,
            confidence: f64::from(confidence),
        })
    }
}

fn to_batch(values: &[u32], device: &Device) -> Result<Tensor, InferenceError> {
    Tensor::new(values, device)
        .and_then(|t| t.unsqueeze(0))
        .map_err(|e| InferenceError::Forward(format!("Tensor creation failed: {e}")))
}

/// Prefers `tokenizer.json`; repos that only ship `vocab.txt` get a WordPiece pipeline
async fn load_tokenizer(repo: &ApiRepo) -> Result<Tokenizer, ModelLoadError> {
    let mut tokenizer = match repo.get("tokenizer.json").await {
        Ok(path) => Tokenizer::from_file(&path).map_err(|e| ModelLoadError::Tokenizer(e.to_string()))?,
        Err(e) => {
            tracing::debug!(error = %e, "No tokenizer.json, building WordPiece from vocab.txt");
            let vocab = repo
                .get("vocab.txt")
                .await
                .map_err(|e| ModelLoadError::Download(format!("vocab.txt: {e}")))?;
            let lowercase = match repo.get("tokenizer_config.json").await {
                Ok(path) => read_do_lower_case(&path),
                Err(_) => true,
            };
            tokenizer_from_vocab(&vocab, lowercase)?
        }
    };

    tokenizer
        .with_truncation(Some(TruncationParams {
            max_length: CLASSIFIER_MAX_TOKENS,
            ..Default::default()
        }))
        .map_err(|e| ModelLoadError::Tokenizer(e.to_string()))?;

    Ok(tokenizer)
}

fn read_do_lower_case(path: &Path) -> bool {
    std::fs::read_to_string(path)
        .ok()
        .and_then(|raw| serde_json::from_str::<serde_json::Value>(&raw).ok())
        .and_then(|v| v.get("do_lower_case").and_then(|b| b.as_bool()))
        .unwrap_or(true)
}

fn tokenizer_from_vocab(vocab: &Path, lowercase: bool) -> Result<Tokenizer, ModelLoadError> {
    let vocab_path = vocab
        .to_str()
        .ok_or_else(|| ModelLoadError::Tokenizer("Non UTF-8 vocab path".to_string()))?;

    let wordpiece = WordPiece::from_file(vocab_path)
        .unk_token("[UNK]".to_string())
        .build()
        .map_err(|e| ModelLoadError::Tokenizer(e.to_string()))?;

    let special = |token: &str| {
        wordpiece
            .token_to_id(token)
            .ok_or_else(|| ModelLoadError::Tokenizer(format!("Missing {token} in vocab")))
    };
    let cls_id = special("[CLS]")?;
    let sep_id = special("[SEP]")?;

    let built = TokenizerBuilder::<
        ModelWrapper,
        NormalizerWrapper,
        PreTokenizerWrapper,
        PostProcessorWrapper,
        DecoderWrapper,
    >::new()
    .with_model(wordpiece.into())
    .with_normalizer(Some(BertNormalizer::new(true, true, None, lowercase).into()))
    .with_pre_tokenizer(Some(BertPreTokenizer.into()))
    .with_post_processor(Some(
        BertProcessing::new(("[SEP]".to_string(), sep_id), ("[CLS]".to_string(), cls_id)).into(),
    ))
    .build()
    .map_err(|e| ModelLoadError::Tokenizer(e.to_string()))?;

    Ok(Tokenizer::from(built))
}

/// Safetensors when published, otherwise the PyTorch checkpoint
async fn load_weights(repo: &ApiRepo, device: &Device) -> Result<VarBuilder<'static>, ModelLoadError> {
    match repo.get("model.safetensors").await {
        Ok(path) => {
            // SAFETY: the cached weight file is read-only and outlives the VarBuilder.
            unsafe { VarBuilder::from_mmaped_safetensors(&[path], DType::F32, device) }
                .map_err(|e| ModelLoadError::Weights(e.to_string()))
        }
        Err(e) => {
            tracing::debug!(error = %e, "No model.safetensors, falling back to pytorch_model.bin");
            let path: PathBuf = repo
                .get("pytorch_model.bin")
                .await
                .map_err(|e| ModelLoadError::Download(format!("pytorch_model.bin: {e}")))?;
            VarBuilder::from_pth(path, DType::F32, device)
                .map_err(|e| ModelLoadError::Weights(e.to_string()))
        }
    }
}

/// `{"id2label": {"0": "1 star", ...}}` -> index map
fn extract_id2label(config_json: &serde_json::Value) -> HashMap<usize, String> {
    config_json
        .get("id2label")
        .and_then(|v| v.as_object())
        .map(|map| {
            map.iter()
                .filter_map(|(k, v)| Some((k.parse::<usize>().ok()?, v.as_str()?.to_string())))
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_id2label() {
        let json = serde_json::json!({
            "id2label": {"0": "1 star", "1": "2 stars", "4": "5 stars"}
        });
        let map = extract_id2label(&json);
        assert_eq!(map.len(), 3);
        assert_eq!(map[&4], "5 stars");
    }

    #[test]
    fn test_extract_id2label_missing() {
        assert!(extract_id2label(&serde_json::json!({})).is_empty());
    }
}
