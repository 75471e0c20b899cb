use std::sync::Arc;

use crate::domain::{
    RepoError,
    player::{Player, PlayerDraft, PlayerRepository},
    validation::ValidationError,
};

#[async_trait::async_trait]
pub trait CreatePlayerUseCase {
    async fn create_player(&self, draft: PlayerDraft) -> Result<Player, CreatePlayerError>;
}

#[derive(Debug)]
pub enum CreatePlayerError {
    Invalid(ValidationError),
    RepositoryError,
}

pub struct CreatePlayerUseCaseImpl<R: PlayerRepository> {
    player_repository: Arc<R>,
}

impl<R: PlayerRepository> CreatePlayerUseCaseImpl<R> {
    pub fn new(player_repository: Arc<R>) -> Self {
        Self { player_repository }
    }
}

#[async_trait::async_trait]
impl<R: PlayerRepository + Send + Sync + 'static> CreatePlayerUseCase
    for CreatePlayerUseCaseImpl<R>
{
    async fn create_player(&self, draft: PlayerDraft) -> Result<Player, CreatePlayerError> {
        let new_player = draft.validate().map_err(|e| {
            log::debug!("Rejected player creation: {}", e);
            CreatePlayerError::Invalid(e)
        })?;

        match self.player_repository.create_player(new_player).await {
            Ok(player) => {
                log::info!("Created player {} ({})", player.id, player.name);
                Ok(player)
            }
            Err(RepoError::StorageError(e)) => {
                log::error!("Failed to store new player: {}", e);
                Err(CreatePlayerError::RepositoryError)
            }
        }
    }
}
