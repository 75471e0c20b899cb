use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use player_registry_app::workflow::player::{
    create::CreatePlayerError, delete::DeletePlayerError, get::GetPlayerError,
    list::ListPlayersError, update::UpdatePlayerError,
};

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let (status, msg) = match self {
            ServiceError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ServiceError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ServiceError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        let body = serde_json::json!({ "error": msg });
        (status, Json(body)).into_response()
    }
}

const PLAYER_NOT_FOUND: &str = "Player not found";
const STORAGE_FAILURE: &str = "Player storage is unavailable";

impl From<CreatePlayerError> for ServiceError {
    fn from(value: CreatePlayerError) -> Self {
        match value {
            CreatePlayerError::Invalid(e) => ServiceError::BadRequest(e.to_string()),
            CreatePlayerError::RepositoryError => {
                ServiceError::Internal(STORAGE_FAILURE.to_string())
            }
        }
    }
}

impl From<GetPlayerError> for ServiceError {
    fn from(value: GetPlayerError) -> Self {
        match value {
            GetPlayerError::Invalid(e) => ServiceError::BadRequest(e.to_string()),
            GetPlayerError::NotFound => ServiceError::NotFound(PLAYER_NOT_FOUND.to_string()),
            GetPlayerError::RepositoryError => ServiceError::Internal(STORAGE_FAILURE.to_string()),
        }
    }
}

impl From<UpdatePlayerError> for ServiceError {
    fn from(value: UpdatePlayerError) -> Self {
        match value {
            UpdatePlayerError::Invalid(e) => ServiceError::BadRequest(e.to_string()),
            UpdatePlayerError::NotFound => ServiceError::NotFound(PLAYER_NOT_FOUND.to_string()),
            UpdatePlayerError::RepositoryError => {
                ServiceError::Internal(STORAGE_FAILURE.to_string())
            }
        }
    }
}

impl From<DeletePlayerError> for ServiceError {
    fn from(value: DeletePlayerError) -> Self {
        match value {
            DeletePlayerError::Invalid(e) => ServiceError::BadRequest(e.to_string()),
            DeletePlayerError::NotFound => ServiceError::NotFound(PLAYER_NOT_FOUND.to_string()),
            DeletePlayerError::RepositoryError => {
                ServiceError::Internal(STORAGE_FAILURE.to_string())
            }
        }
    }
}

impl From<ListPlayersError> for ServiceError {
    fn from(value: ListPlayersError) -> Self {
        match value {
            ListPlayersError::Invalid(e) => ServiceError::BadRequest(e.to_string()),
            ListPlayersError::RepositoryError => {
                ServiceError::Internal(STORAGE_FAILURE.to_string())
            }
        }
    }
}
