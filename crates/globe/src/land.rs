//! Land data sources and the background tessellation worker.
//!
//! Loading and tessellating run on one named worker thread per request. The
//! result comes back over a bounded channel and is picked up by
//! [`LandLoader::poll`] during the frame update. Every request bumps a
//! generation counter; results from older generations are dropped.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, TryRecvError, bounded};
use formats::land::{LandDataError, LandFeatures};
use layers::hex::{HexParams, HexTessellation, tessellate};
use tracing::{debug, warn};

/// Supplier of land polygons. Called from the worker thread.
pub trait LandSource: Send + Sync {
    fn load(&self) -> Result<LandFeatures, LandDataError>;

    fn describe(&self) -> String {
        "land source".to_string()
    }
}

/// GeoJSON FeatureCollection on disk.
#[derive(Debug, Clone)]
pub struct FileLandSource {
    path: PathBuf,
}

impl FileLandSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl LandSource for FileLandSource {
    fn load(&self) -> Result<LandFeatures, LandDataError> {
        LandFeatures::from_path(&self.path)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Features already in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticLandSource {
    features: LandFeatures,
}

impl StaticLandSource {
    pub fn new(features: LandFeatures) -> Self {
        Self { features }
    }
}

impl LandSource for StaticLandSource {
    fn load(&self) -> Result<LandFeatures, LandDataError> {
        Ok(self.features.clone())
    }

    fn describe(&self) -> String {
        format!("{} in-memory polygons", self.features.polygon_count())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LandError {
    #[error("failed to load land from {source_name}")]
    Source {
        source_name: String,
        #[source]
        source: LandDataError,
    },
    #[error("failed to start the land worker")]
    Spawn(#[source] std::io::Error),
    #[error("land worker exited without a result")]
    WorkerLost,
}

/// Load from `source` and tessellate, on the calling thread.
pub fn load_and_tessellate(
    source: &dyn LandSource,
    params: &HexParams,
) -> Result<HexTessellation, LandError> {
    let features = source.load().map_err(|source_err| LandError::Source {
        source_name: source.describe(),
        source: source_err,
    })?;
    Ok(tessellate(&features, params))
}

#[derive(Debug)]
struct LandOutcome {
    generation: u64,
    result: Result<HexTessellation, LandError>,
}

#[derive(Debug, Default)]
pub struct LandLoader {
    generation: u64,
    pending: Option<Receiver<LandOutcome>>,
}

impl LandLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Start a new load, superseding any in flight. Returns the generation
    /// of the new request.
    pub fn start(&mut self, source: Arc<dyn LandSource>, params: HexParams) -> Result<u64, LandError> {
        self.cancel();
        let generation = self.generation;
        let (sender, receiver) = bounded::<LandOutcome>(1);
        std::thread::Builder::new()
            .name("land-tessellation".into())
            .spawn(move || {
                let result = load_and_tessellate(source.as_ref(), &params);
                // the receiver is gone when the globe was disposed or rebuilt
                let _ = sender.send(LandOutcome { generation, result });
            })
            .map_err(LandError::Spawn)?;
        debug!(generation, "land load started");
        self.pending = Some(receiver);
        Ok(generation)
    }

    /// Non-blocking check for a finished load of the current generation.
    pub fn poll(&mut self) -> Option<Result<HexTessellation, LandError>> {
        let receiver = self.pending.as_ref()?;
        match receiver.try_recv() {
            Ok(outcome) => self.accept(outcome),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.pending = None;
                Some(Err(LandError::WorkerLost))
            }
        }
    }

    /// Block up to `timeout` for the current load.
    pub fn wait(&mut self, timeout: Duration) -> Option<Result<HexTessellation, LandError>> {
        let receiver = self.pending.as_ref()?;
        match receiver.recv_timeout(timeout) {
            Ok(outcome) => self.accept(outcome),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => {
                self.pending = None;
                Some(Err(LandError::WorkerLost))
            }
        }
    }

    /// Abandon the load in flight, if any. The worker runs to completion and
    /// its result is discarded. Returns whether a load was pending.
    pub fn cancel(&mut self) -> bool {
        self.generation += 1;
        self.pending.take().is_some()
    }

    fn accept(&mut self, outcome: LandOutcome) -> Option<Result<HexTessellation, LandError>> {
        self.pending = None;
        if outcome.generation != self.generation {
            warn!(
                stale = outcome.generation,
                current = self.generation,
                "dropping stale land result"
            );
            return None;
        }
        Some(outcome.result)
    }
}

#[cfg(test)]
mod tests {
    use super::{
        FileLandSource, LandError, LandLoader, LandSource, StaticLandSource, load_and_tessellate,
    };
    use formats::land::{LandDataError, LandFeatures, LandPolygon};
    use foundation::math::LatLng;
    use layers::hex::HexParams;
    use std::sync::Arc;
    use std::time::Duration;

    fn square() -> LandPolygon {
        LandPolygon::new(vec![vec![
            LatLng::new(0.0, 0.0),
            LatLng::new(0.0, 10.0),
            LatLng::new(10.0, 10.0),
            LatLng::new(10.0, 0.0),
            LatLng::new(0.0, 0.0),
        ]])
    }

    fn params() -> HexParams {
        HexParams {
            resolution: 2,
            ..HexParams::default()
        }
    }

    struct FailingSource;

    impl LandSource for FailingSource {
        fn load(&self) -> Result<LandFeatures, LandDataError> {
            Err(LandDataError::NotAFeatureCollection)
        }
    }

    #[test]
    fn worker_delivers_tessellation() {
        let mut loader = LandLoader::new();
        let source = Arc::new(StaticLandSource::new(LandFeatures::from_polygons(vec![square()])));
        loader.start(source, params()).expect("spawn");
        assert!(loader.is_loading());
        let result = loader
            .wait(Duration::from_secs(30))
            .expect("finished")
            .expect("tessellated");
        assert!(result.mesh.is_some());
        assert!(!loader.is_loading());
        assert!(loader.poll().is_none());
    }

    #[test]
    fn source_failures_are_reported() {
        let mut loader = LandLoader::new();
        loader.start(Arc::new(FailingSource), params()).expect("spawn");
        let err = loader.wait(Duration::from_secs(30)).expect("finished").unwrap_err();
        assert!(matches!(err, LandError::Source { .. }));
    }

    #[test]
    fn cancelled_loads_never_deliver() {
        let mut loader = LandLoader::new();
        let source = Arc::new(StaticLandSource::new(LandFeatures::from_polygons(vec![square()])));
        let first = loader.start(source, params()).expect("spawn");
        assert!(loader.cancel());
        assert!(loader.generation() > first);
        assert!(!loader.is_loading());
        assert!(loader.wait(Duration::from_millis(10)).is_none());
        assert!(!loader.cancel());
    }

    #[test]
    fn missing_file_names_the_path() {
        let source = FileLandSource::new("/no/such/land.geojson");
        let err = load_and_tessellate(&source, &params()).unwrap_err();
        assert!(err.to_string().contains("/no/such/land.geojson"));
    }
}
