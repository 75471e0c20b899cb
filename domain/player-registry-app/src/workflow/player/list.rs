use std::sync::Arc;

use crate::domain::{
    RepoError,
    filter::PlayerFilter,
    player::{Player, PlayerQuery, PlayerRepository},
    validation::ValidationError,
};

#[async_trait::async_trait]
pub trait ListPlayersUseCase {
    async fn list_players(&self, query: PlayerQuery) -> Result<Vec<Player>, ListPlayersError>;
    async fn count_players(&self, filter: PlayerFilter) -> Result<u64, ListPlayersError>;
}

#[derive(Debug)]
pub enum ListPlayersError {
    Invalid(ValidationError),
    RepositoryError,
}

pub struct ListPlayersUseCaseImpl<R: PlayerRepository> {
    player_repository: Arc<R>,
}

impl<R: PlayerRepository> ListPlayersUseCaseImpl<R> {
    pub fn new(player_repository: Arc<R>) -> Self {
        Self { player_repository }
    }
}

#[async_trait::async_trait]
impl<R: PlayerRepository + Send + Sync + 'static> ListPlayersUseCase
    for ListPlayersUseCaseImpl<R>
{
    async fn list_players(&self, query: PlayerQuery) -> Result<Vec<Player>, ListPlayersError> {
        if query.pagination.page_size == 0 {
            return Err(ListPlayersError::Invalid(ValidationError::EmptyPage));
        }
        log::debug!(
            "Listing players: {:?}, order {:?}, page {:?}",
            query.filter.predicates(),
            query.order,
            query.pagination
        );
        match self.player_repository.query_players(query).await {
            Ok(players) => Ok(players),
            Err(RepoError::StorageError(e)) => {
                log::error!("Error querying players: {}", e);
                Err(ListPlayersError::RepositoryError)
            }
        }
    }

    async fn count_players(&self, filter: PlayerFilter) -> Result<u64, ListPlayersError> {
        log::debug!("Counting players: {:?}", filter.predicates());
        match self.player_repository.count_players(filter).await {
            Ok(count) => Ok(count),
            Err(RepoError::StorageError(e)) => {
                log::error!("Error counting players: {}", e);
                Err(ListPlayersError::RepositoryError)
            }
        }
    }
}
