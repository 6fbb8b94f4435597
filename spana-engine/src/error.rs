use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("access log error: {0}")]
    AccessLog(#[from] spana_accesslog::AccessLogError),

    #[error("simulation error: {0}")]
    Simulation(#[from] spana_core::SimulationError),

    #[error("metadata error: {0}")]
    Metadata(#[from] spana_metadata::MetadataError),
}
