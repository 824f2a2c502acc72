use sieve_core::{FeatureVector, Label, Result, SieveError};
use sieve_models::{BatchPrediction, NaiveBayes};
use tracing::info;

use crate::config::{PriorKind, RunConfig};
use crate::datasets::Dataset;
use crate::io::write_predictions_to_path;
use crate::metrics::ClassificationReport;
use crate::preprocessors::Vocabulary;

/// A vocabulary and the model trained on its bag-of-words vectors.
#[derive(Debug, Clone)]
pub struct SpamFilter {
    vocabulary: Vocabulary,
    model: NaiveBayes,
}

impl SpamFilter {
    /// Builds the vocabulary from the training texts and fits the model.
    pub fn train(dataset: &Dataset, cutoff: usize, prior: PriorKind) -> Result<Self> {
        let texts = dataset.texts();
        let labels = dataset.labels();

        let vocabulary = Vocabulary::fit(&texts, cutoff)?;
        let x = vocabulary.vectorize_all(&texts)?;

        let mut model = NaiveBayes::new();
        model.fit(&x, &labels, &prior.build(&labels))?;

        Ok(Self { vocabulary, model })
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn model(&self) -> &NaiveBayes {
        &self.model
    }

    pub fn classify(&self, text: &str) -> Result<Label> {
        self.model.predict(&self.vocabulary.vectorize(text))
    }

    /// Classifies every text; a text whose prediction fails maps to `None`.
    pub fn classify_all<S: AsRef<str>>(&self, texts: &[S]) -> Result<Vec<Option<Label>>> {
        let vectors: Vec<FeatureVector> = texts
            .iter()
            .map(|t| self.vocabulary.vectorize(t.as_ref()))
            .collect();
        let predictions = self.model.predict_batch(&vectors)?;
        Ok(predictions.iter().map(BatchPrediction::label).collect())
    }
}

/// Outcome of [`run`].
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub train_size: usize,
    pub test_size: usize,
    pub vocabulary_size: usize,
    pub predictions: Vec<Option<Label>>,
    pub report: ClassificationReport,
}

/// Reads the data, trains, evaluates on the test set and optionally writes
/// the predictions.
pub fn run(config: &RunConfig) -> Result<RunSummary> {
    config.validate()?;

    let train_path = config
        .train
        .as_ref()
        .ok_or_else(|| SieveError::InvalidHyperparameter {
            name: "train".into(),
            value: "<missing>".into(),
        })?;

    let (train, test) = match &config.test {
        Some(test) => (Dataset::from_path(train_path)?, Dataset::from_path(test)?),
        None => Dataset::from_path(train_path)?.split(config.test_ratio)?,
    };

    info!(
        train = train.len(),
        test = test.len(),
        cutoff = config.cutoff,
        "training spam filter"
    );

    let filter = SpamFilter::train(&train, config.cutoff, config.prior)?;

    let texts = test.texts();
    let predictions = filter.classify_all(&texts)?;
    let report =
        ClassificationReport::evaluate_partial(&test.labels(), &predictions, config.positive_class)?;

    info!(
        accuracy = report.accuracy(),
        f1 = report.f1(),
        "evaluated test set"
    );

    if let Some(output) = &config.output {
        write_predictions_to_path(output, &texts, &predictions)?;
        info!(path = %output.display(), "wrote predictions");
    }

    Ok(RunSummary {
        train_size: train.len(),
        test_size: test.len(),
        vocabulary_size: filter.vocabulary().len(),
        predictions,
        report,
    })
}
