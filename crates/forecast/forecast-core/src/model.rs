//! Sales forecast model
//!
//! Two-state machine: untrained, or trained with a fitted scaler and
//! regressor. Training persists both artifacts through an [`ArtifactStore`]
//! before swapping the in-memory state, so a failed training call leaves the
//! previous model in place. Prediction on an untrained model first tries to
//! load persisted artifacts.
//!
//! Both artifacts carry the id of the training run that produced them; a
//! regressor and scaler from different runs are refused on load.

use crate::confidence::assemble_predictions;
use crate::features::feature_rows;
use crate::regression::LinearRegressor;
use crate::scaler::StandardScaler;
use crate::store::InMemoryArtifactStore;
use forecast_spi::{
    ArtifactBundle, ArtifactStore, FeatureScaler, ForecastError, Regressor, Result,
    SalesPrediction, SalesRecord, FEATURE_COUNT,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

static LAST_TRAINING_ID: AtomicU64 = AtomicU64::new(0);

/// Wall-clock nanoseconds, bumped so ids stay unique within the process
fn next_training_id() -> u64 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    let bump = |last: u64| Some(now.max(last.saturating_add(1)));
    let previous = match LAST_TRAINING_ID.fetch_update(Ordering::SeqCst, Ordering::SeqCst, bump) {
        Ok(last) | Err(last) => last,
    };
    now.max(previous.saturating_add(1))
}

/// Serialized form of one artifact
#[derive(Serialize, Deserialize)]
struct Artifact<T> {
    training_id: u64,
    body: T,
}

fn encode<T: Serialize>(training_id: u64, body: T, what: &str) -> Result<Vec<u8>> {
    bincode::serialize(&Artifact { training_id, body })
        .map_err(|e| ForecastError::Serialization(format!("{what}: {e}")))
}

fn decode<T: DeserializeOwned>(bytes: &[u8], what: &str) -> Result<Artifact<T>> {
    bincode::deserialize(bytes).map_err(|e| ForecastError::Serialization(format!("{what}: {e}")))
}

/// A scaler and regressor fitted together on the calendar feature schema
#[derive(Debug, Clone, PartialEq)]
pub struct TrainedModel {
    training_id: u64,
    scaler: StandardScaler,
    regressor: LinearRegressor,
}

impl TrainedModel {
    /// Fit a fresh scaler and regressor on historical records
    pub fn fit(records: &[SalesRecord]) -> Result<Self> {
        if records.is_empty() {
            return Err(ForecastError::InsufficientData {
                required: 1,
                actual: 0,
            });
        }

        let dates: Vec<&str> = records.iter().map(|r| r.date.as_str()).collect();
        let amounts: Vec<f64> = records.iter().map(|r| r.amount).collect();
        let rows = feature_rows(&dates)?;

        let mut scaler = StandardScaler::new();
        let scaled = scaler.fit_transform(&rows)?;

        let mut regressor = LinearRegressor::new();
        regressor.fit(&scaled, &amounts)?;

        Ok(Self {
            training_id: next_training_id(),
            scaler,
            regressor,
        })
    }

    /// Predict one amount per date, in input order
    pub fn predict<S: AsRef<str>>(&self, dates: &[S]) -> Result<Vec<f64>> {
        let rows = feature_rows(dates)?;
        if rows.is_empty() {
            return Ok(Vec::new());
        }
        let scaled = self.scaler.transform(&rows)?;
        self.regressor.predict(&scaled)
    }

    pub fn scaler(&self) -> &StandardScaler {
        &self.scaler
    }

    pub fn regressor(&self) -> &LinearRegressor {
        &self.regressor
    }

    /// Id of the training run that produced this model
    pub fn training_id(&self) -> u64 {
        self.training_id
    }

    fn to_bundle(&self) -> Result<ArtifactBundle> {
        let regressor = encode(self.training_id, &self.regressor, "regressor")?;
        let scaler = encode(self.training_id, &self.scaler, "scaler")?;
        Ok(ArtifactBundle::new(regressor, scaler))
    }

    fn from_bundle(bundle: &ArtifactBundle) -> Result<Self> {
        let regressor: Artifact<LinearRegressor> = decode(&bundle.regressor, "regressor")?;
        let scaler: Artifact<StandardScaler> = decode(&bundle.scaler, "scaler")?;

        if regressor.training_id != scaler.training_id {
            return Err(ForecastError::ArtifactMismatch(format!(
                "regressor is from training {}, scaler from training {}",
                regressor.training_id, scaler.training_id
            )));
        }
        let training_id = regressor.training_id;
        let (regressor, scaler) = (regressor.body, scaler.body);

        let expected = Some(FEATURE_COUNT);
        if regressor.n_features() != expected || scaler.n_features() != expected {
            return Err(ForecastError::ArtifactMismatch(format!(
                "expected {} features, regressor has {:?}, scaler has {:?}",
                FEATURE_COUNT,
                regressor.n_features(),
                scaler.n_features()
            )));
        }

        Ok(Self {
            training_id,
            scaler,
            regressor,
        })
    }
}

enum ModelState {
    Untrained,
    Trained(TrainedModel),
}

/// Forecast model owning its state and the store it persists to
pub struct SalesForecastModel {
    state: ModelState,
    store: Arc<dyn ArtifactStore>,
}

impl fmt::Debug for SalesForecastModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SalesForecastModel")
            .field("trained", &self.is_trained())
            .field("store", &self.store.describe())
            .finish()
    }
}

impl SalesForecastModel {
    /// Create an untrained model persisting to `store`
    pub fn new(store: Arc<dyn ArtifactStore>) -> Self {
        Self {
            state: ModelState::Untrained,
            store,
        }
    }

    /// Create an untrained model backed by a fresh in-memory store
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryArtifactStore::new()))
    }

    pub fn is_trained(&self) -> bool {
        matches!(self.state, ModelState::Trained(_))
    }

    /// The fitted scaler and regressor, if trained
    pub fn trained(&self) -> Option<&TrainedModel> {
        match &self.state {
            ModelState::Trained(model) => Some(model),
            ModelState::Untrained => None,
        }
    }

    /// Fit on `records`, persist the artifacts, then replace the current state.
    ///
    /// Any failure leaves the previous state untouched.
    pub fn train(&mut self, records: &[SalesRecord]) -> Result<()> {
        let model = TrainedModel::fit(records)?;
        self.store.save(&model.to_bundle()?)?;

        tracing::info!(
            records = records.len(),
            r_squared = model.regressor.r_squared(),
            store = %self.store.describe(),
            "forecast model trained"
        );
        self.state = ModelState::Trained(model);
        Ok(())
    }

    /// Load persisted artifacts.
    ///
    /// Returns `Ok(false)` and leaves the state unchanged when nothing has
    /// been persisted.
    pub fn load(&mut self) -> Result<bool> {
        let Some(bundle) = self.store.load()? else {
            tracing::debug!(store = %self.store.describe(), "no persisted artifacts");
            return Ok(false);
        };
        let model = TrainedModel::from_bundle(&bundle)?;

        tracing::info!(store = %self.store.describe(), "forecast model loaded");
        self.state = ModelState::Trained(model);
        Ok(true)
    }

    /// Trained model, loading from the store first if necessary
    pub fn ensure_ready(&mut self) -> Result<&TrainedModel> {
        if !self.is_trained() && !self.load()? {
            return Err(ForecastError::ModelNotReady);
        }
        self.trained().ok_or(ForecastError::ModelNotReady)
    }

    /// Predict one amount per date, loading persisted artifacts if untrained
    pub fn predict<S: AsRef<str>>(&mut self, dates: &[S]) -> Result<Vec<f64>> {
        self.ensure_ready()?.predict(dates)
    }

    /// Predict without attempting a load
    pub fn predict_ready<S: AsRef<str>>(&self, dates: &[S]) -> Result<Vec<f64>> {
        self.trained()
            .ok_or(ForecastError::ModelNotReady)?
            .predict(dates)
    }

    /// Predictions with confidence bands, loading persisted artifacts if untrained
    pub fn forecast<S: AsRef<str>>(&mut self, dates: &[S]) -> Result<Vec<SalesPrediction>> {
        let predictions = self.predict(dates)?;
        Ok(assemble_predictions(dates, &predictions))
    }

    /// Predictions with confidence bands, without attempting a load
    pub fn forecast_ready<S: AsRef<str>>(&self, dates: &[S]) -> Result<Vec<SalesPrediction>> {
        let predictions = self.predict_ready(dates)?;
        Ok(assemble_predictions(dates, &predictions))
    }
}
