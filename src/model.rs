use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlImageElement;

use crate::config::ModelPaths;
use crate::error::{ModelLoadError, PredictionError};
use crate::types::Prediction;

#[wasm_bindgen]
extern "C" {
    /// Model object produced by `tmImage.load`.
    #[derive(Debug, Clone)]
    pub type TmImageModel;

    #[wasm_bindgen(catch, js_namespace = tmImage, js_name = load)]
    fn tm_image_load(model_url: &str, metadata_url: &str) -> Result<js_sys::Promise, JsValue>;

    #[wasm_bindgen(method, catch, js_name = predict)]
    fn tm_predict(this: &TmImageModel, image: &HtmlImageElement) -> Result<js_sys::Promise, JsValue>;
}

/// Anything that can label an image.
#[allow(async_fn_in_trait)]
pub trait Classifier: Clone {
    type Input: Clone;

    async fn predict(&self, input: &Self::Input) -> Result<Vec<Prediction>, PredictionError>;
}

impl Classifier for TmImageModel {
    type Input = HtmlImageElement;

    async fn predict(&self, input: &HtmlImageElement) -> Result<Vec<Prediction>, PredictionError> {
        let promise = self
            .tm_predict(input)
            .map_err(|e| PredictionError::Rejected(describe(&e)))?;
        let value = JsFuture::from(promise)
            .await
            .map_err(|e| PredictionError::Rejected(describe(&e)))?;

        serde_wasm_bindgen::from_value(value).map_err(|e| PredictionError::Decode(e.to_string()))
    }
}

fn library_available() -> bool {
    js_sys::Reflect::has(&js_sys::global(), &JsValue::from_str("tmImage")).unwrap_or(false)
}

/// Load the Teachable Machine image model from the configured paths.
pub async fn load(paths: &ModelPaths) -> Result<TmImageModel, ModelLoadError> {
    if !library_available() {
        return Err(ModelLoadError::LibraryUnavailable);
    }

    let promise = tm_image_load(&paths.model, &paths.metadata)
        .map_err(|e| ModelLoadError::Rejected(describe(&e)))?;
    let model = JsFuture::from(promise)
        .await
        .map_err(|e| ModelLoadError::Rejected(describe(&e)))?;

    Ok(model.unchecked_into())
}

fn describe(value: &JsValue) -> String {
    value
        .dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| value.as_string())
        .unwrap_or_else(|| format!("{value:?}"))
}
