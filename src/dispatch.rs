use crate::error::PredictionError;
use crate::model::Classifier;
use crate::types::Prediction;

pub const NO_IMAGE: &str = "Please upload an image first.";
pub const MODEL_NOT_READY: &str = "Model not ready. Please wait or reload.";
pub const PREDICTION_FAILED: &str = "Prediction failed. Please try another image.";

/// Assistant reply to a submitted message.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Classified(Prediction),
    NoImage,
    ModelNotReady,
    Failed(PredictionError),
}

impl Reply {
    pub fn message(&self) -> String {
        match self {
            Reply::Classified(top) => format!(
                "I think this is {} ({:.1}%)",
                top.class_name,
                round_tenths(top.probability * 100.0)
            ),
            Reply::NoImage => NO_IMAGE.to_string(),
            Reply::ModelNotReady => MODEL_NOT_READY.to_string(),
            Reply::Failed(_) => PREDICTION_FAILED.to_string(),
        }
    }
}

/// Rounds to one decimal with halves going away from zero; `{:.1}` alone
/// would send 6.25 to 6.2.
fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Highest-probability prediction. Ties keep the earlier entry and
/// non-finite probabilities are skipped.
pub fn top_prediction(predictions: Vec<Prediction>) -> Option<Prediction> {
    predictions
        .into_iter()
        .filter(|p| p.probability.is_finite())
        .fold(None, |best: Option<Prediction>, p| match best {
            Some(b) if b.probability >= p.probability => Some(b),
            _ => Some(p),
        })
}

/// Snapshot taken when a message is submitted; resolving it runs the
/// model without holding on to the session.
pub struct PendingReply<C: Classifier> {
    pub model: Option<C>,
    pub image: Option<C::Input>,
}

impl<C: Classifier> PendingReply<C> {
    pub async fn resolve(self) -> Reply {
        let Some(image) = self.image else {
            return Reply::NoImage;
        };
        let Some(model) = self.model else {
            return Reply::ModelNotReady;
        };

        match model.predict(&image).await {
            Ok(predictions) => match top_prediction(predictions) {
                Some(top) => Reply::Classified(top),
                None => Reply::Failed(PredictionError::Empty),
            },
            Err(e) => Reply::Failed(e),
        }
    }
}
