use std::sync::Arc;

use crate::domain::{
    PlayerId, RepoRetrieveError,
    player::{Player, PlayerRepository},
    validation::{ValidationError, check_player_id},
};

#[async_trait::async_trait]
pub trait GetPlayerUseCase {
    async fn get_player(&self, id: PlayerId) -> Result<Player, GetPlayerError>;
}

#[derive(Debug)]
pub enum GetPlayerError {
    Invalid(ValidationError),
    NotFound,
    RepositoryError,
}

pub struct GetPlayerUseCaseImpl<R: PlayerRepository> {
    player_repository: Arc<R>,
}

impl<R: PlayerRepository> GetPlayerUseCaseImpl<R> {
    pub fn new(player_repository: Arc<R>) -> Self {
        Self { player_repository }
    }
}

#[async_trait::async_trait]
impl<R: PlayerRepository + Send + Sync + 'static> GetPlayerUseCase for GetPlayerUseCaseImpl<R> {
    async fn get_player(&self, id: PlayerId) -> Result<Player, GetPlayerError> {
        check_player_id(id).map_err(GetPlayerError::Invalid)?;
        match self.player_repository.get_player(id).await {
            Ok(player) => Ok(player),
            Err(RepoRetrieveError::NotFound) => Err(GetPlayerError::NotFound),
            Err(RepoRetrieveError::StorageError(e)) => {
                log::error!("Failed to load player {}: {}", id, e);
                Err(GetPlayerError::RepositoryError)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::testing::{InMemoryPlayerRepository, sample_player};

    use super::*;

    #[tokio::test]
    async fn test_get_existing_player() {
        let repo = Arc::new(InMemoryPlayerRepository::default());
        let stored = repo.insert(sample_player("Gimli", 500));
        let use_case = GetPlayerUseCaseImpl::new(repo);

        let player = use_case.get_player(stored.id).await.unwrap();
        assert_eq!(player, stored);
    }

    #[tokio::test]
    async fn test_get_missing_player() {
        let repo = Arc::new(InMemoryPlayerRepository::default());
        let use_case = GetPlayerUseCaseImpl::new(repo);

        assert!(matches!(
            use_case.get_player(PlayerId(999_999)).await,
            Err(GetPlayerError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_get_non_positive_id_skips_lookup() {
        let repo = Arc::new(InMemoryPlayerRepository::default());
        let use_case = GetPlayerUseCaseImpl::new(repo.clone());

        for id in [0, -1] {
            assert!(matches!(
                use_case.get_player(PlayerId(id)).await,
                Err(GetPlayerError::Invalid(ValidationError::NonPositiveId(_)))
            ));
        }
        assert_eq!(repo.read_count(), 0);
    }
}
