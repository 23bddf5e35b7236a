use reqwest::StatusCode;

/// Network-level failure before a usable status line and body were read.
#[derive(Debug, Clone, thiserror::Error)]
#[error("no se pudo contactar al motor en '{url}': {detail}")]
pub struct TransportFault {
    pub url: String,
    pub detail: String,
}

/// Any failed `POST /execute`. The operator only ever sees one fixed string
/// for these; the variant detail is for the log.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ExecutionFailure {
    #[error(transparent)]
    Transport(#[from] TransportFault),
    #[error("el motor respondió HTTP {0}")]
    Status(StatusCode),
    #[error("respuesta inválida del motor: {0}")]
    Decode(String),
}

/// Any failed `GET /discos`, including a successful but empty answer.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TopologyError {
    #[error(transparent)]
    Transport(#[from] TransportFault),
    #[error("el motor respondió HTTP {0}")]
    Status(StatusCode),
    #[error("respuesta inválida del motor: {0}")]
    Decode(String),
    #[error("No hay discos disponibles en la respuesta.")]
    Empty,
}
