use serde::{Serialize, Deserialize};

use crate::dataset::case::TrainingCase;
use crate::dataset::table::CaseFiles;
use crate::error::Result;
use crate::network::network::Network;
use crate::train::hyperparameters::Hyperparameters;
use crate::train::trainer::Trainer;

/// Everything needed to start a training run: the layer widths, the
/// hyperparameters, the training set and optionally a starting weight tensor.
///
/// Stored as JSON so a run can be described before any training happens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Input width, hidden widths, output width.
    pub layer_widths: Vec<usize>,
    pub hyperparameters: Hyperparameters,
    #[serde(default)]
    pub training_cases: Vec<TrainingCase>,
    /// Plain-text activations and truths files. When set, the cases are read
    /// from them instead of `training_cases`.
    #[serde(default)]
    pub case_files: Option<CaseFiles>,
    /// `[layer][source][destination]`; randomized from the hyperparameters
    /// when absent.
    #[serde(default)]
    pub initial_weights: Option<Vec<Vec<Vec<f64>>>>,
}

impl RunConfig {
    /// Builds the network, seeds its weights and hands everything to a
    /// validated `Trainer`.
    pub fn into_trainer(self) -> Result<Trainer> {
        let mut network = Network::build(self.layer_widths)?;
        if let Some(ref weights) = self.initial_weights {
            network.set_weights(weights)?;
        }

        let cases = match self.case_files {
            Some(ref files) => files.load()?,
            None => self.training_cases,
        };

        let mut trainer = Trainer::new(network, cases, self.hyperparameters)?;
        if self.initial_weights.is_none() {
            trainer.randomize_weights();
        }
        Ok(trainer)
    }

    /// Serializes the config to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes a `RunConfig` from a JSON file.
    pub fn load_json(path: &str) -> Result<RunConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }
}
