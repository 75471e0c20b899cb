use std::sync::Arc;

use crate::domain::{
    PlayerId, RepoRetrieveError,
    player::PlayerRepository,
    validation::{ValidationError, check_player_id},
};

#[async_trait::async_trait]
pub trait DeletePlayerUseCase {
    async fn delete_player(&self, id: PlayerId) -> Result<(), DeletePlayerError>;
}

#[derive(Debug)]
pub enum DeletePlayerError {
    Invalid(ValidationError),
    NotFound,
    RepositoryError,
}

pub struct DeletePlayerUseCaseImpl<R: PlayerRepository> {
    player_repository: Arc<R>,
}

impl<R: PlayerRepository> DeletePlayerUseCaseImpl<R> {
    pub fn new(player_repository: Arc<R>) -> Self {
        Self { player_repository }
    }
}

#[async_trait::async_trait]
impl<R: PlayerRepository + Send + Sync + 'static> DeletePlayerUseCase
    for DeletePlayerUseCaseImpl<R>
{
    async fn delete_player(&self, id: PlayerId) -> Result<(), DeletePlayerError> {
        check_player_id(id).map_err(DeletePlayerError::Invalid)?;

        let result = match self.player_repository.get_player(id).await {
            Ok(_) => self.player_repository.delete_player(id).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(()) => {
                log::info!("Deleted player {}", id);
                Ok(())
            }
            Err(RepoRetrieveError::NotFound) => Err(DeletePlayerError::NotFound),
            Err(RepoRetrieveError::StorageError(e)) => {
                log::error!("Failed to delete player {}: {}", id, e);
                Err(DeletePlayerError::RepositoryError)
            }
        }
    }
}
