use std::sync::Arc;

use crate::{
    domain::player::PlayerRepository,
    workflow::player::{
        create::{CreatePlayerUseCase, CreatePlayerUseCaseImpl},
        delete::{DeletePlayerUseCase, DeletePlayerUseCaseImpl},
        get::{GetPlayerUseCase, GetPlayerUseCaseImpl},
        list::{ListPlayersUseCase, ListPlayersUseCaseImpl},
        update::{UpdatePlayerUseCase, UpdatePlayerUseCaseImpl},
    },
};

pub mod domain;
pub mod workflow;

#[cfg(test)]
pub(crate) mod testing;

pub struct Application {
    pub player_create_use_case: Box<dyn CreatePlayerUseCase + Send + Sync + 'static>,
    pub player_get_use_case: Box<dyn GetPlayerUseCase + Send + Sync + 'static>,
    pub player_update_use_case: Box<dyn UpdatePlayerUseCase + Send + Sync + 'static>,
    pub player_delete_use_case: Box<dyn DeletePlayerUseCase + Send + Sync + 'static>,
    pub player_list_use_case: Box<dyn ListPlayersUseCase + Send + Sync + 'static>,
}

pub fn build_application<R: PlayerRepository + Send + Sync + 'static>(
    player_repository: Arc<R>,
) -> Application {
    Application {
        player_create_use_case: Box::new(CreatePlayerUseCaseImpl::new(player_repository.clone())),
        player_get_use_case: Box::new(GetPlayerUseCaseImpl::new(player_repository.clone())),
        player_update_use_case: Box::new(UpdatePlayerUseCaseImpl::new(player_repository.clone())),
        player_delete_use_case: Box::new(DeletePlayerUseCaseImpl::new(player_repository.clone())),
        player_list_use_case: Box::new(ListPlayersUseCaseImpl::new(player_repository)),
    }
}
