//! Default, in-process implementations of the §6.2/§6.3 trait seams: repos
//! backed by `parking_lot::RwLock<HashMap>`, a local-filesystem object
//! store, and canned evaluation/gaze collaborators. A real deployment swaps
//! these for database-, S3-, and service-backed implementations without
//! touching `interview-core`, `interview-orchestrator`, or `interview-service`.

pub mod evaluation;
pub mod object_store;
pub mod repository;

pub use evaluation::{MockEvaluationClient, MockGazeAnalyzer};
pub use object_store::LocalObjectStore;
pub use repository::{
    InMemoryCompanyRepository, InMemoryGazeRepository, InMemoryInterviewRepository,
    InMemoryMediaRepository, InMemoryResumeRepository,
};
