use std::sync::Arc;

use crate::domain::{
    PlayerId, RepoRetrieveError,
    player::{Player, PlayerPatch, PlayerRepository},
    validation::{ValidationError, check_player_id},
};

#[async_trait::async_trait]
pub trait UpdatePlayerUseCase {
    async fn update_player(
        &self,
        id: PlayerId,
        patch: PlayerPatch,
    ) -> Result<Player, UpdatePlayerError>;
}

#[derive(Debug)]
pub enum UpdatePlayerError {
    Invalid(ValidationError),
    NotFound,
    RepositoryError,
}

pub struct UpdatePlayerUseCaseImpl<R: PlayerRepository> {
    player_repository: Arc<R>,
}

impl<R: PlayerRepository> UpdatePlayerUseCaseImpl<R> {
    pub fn new(player_repository: Arc<R>) -> Self {
        Self { player_repository }
    }

    fn map_retrieve_error(id: PlayerId, error: RepoRetrieveError) -> UpdatePlayerError {
        match error {
            RepoRetrieveError::NotFound => UpdatePlayerError::NotFound,
            RepoRetrieveError::StorageError(e) => {
                log::error!("Failed to update player {}: {}", id, e);
                UpdatePlayerError::RepositoryError
            }
        }
    }
}

#[async_trait::async_trait]
impl<R: PlayerRepository + Send + Sync + 'static> UpdatePlayerUseCase
    for UpdatePlayerUseCaseImpl<R>
{
    async fn update_player(
        &self,
        id: PlayerId,
        patch: PlayerPatch,
    ) -> Result<Player, UpdatePlayerError> {
        check_player_id(id).map_err(UpdatePlayerError::Invalid)?;

        let current = self
            .player_repository
            .get_player(id)
            .await
            .map_err(|e| Self::map_retrieve_error(id, e))?;

        let updated = patch.apply_to(&current).map_err(|e| {
            log::debug!("Rejected update of player {}: {}", id, e);
            UpdatePlayerError::Invalid(e)
        })?;

        let stored = self
            .player_repository
            .update_player(updated)
            .await
            .map_err(|e| Self::map_retrieve_error(id, e))?;

        log::info!("Updated player {}", id);
        Ok(stored)
    }
}
