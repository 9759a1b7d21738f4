//! Triage engine: classifier client, file loading and effect execution.
mod client;
mod engine;
mod file;
mod types;

pub use client::{interpret_response, Classifier, ClientSettings, ReqwestClassifier, HEALTH_PATH};
pub use engine::EngineHandle;
pub use file::{load_candidate, LoadError};
pub use types::EngineEvent;
