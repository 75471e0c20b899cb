use std::str::FromStr;

use chrono::DateTime;
use player_registry_app::domain::{
    PlayerId, RepoError, RepoRetrieveError,
    filter::{PlayerFilter, PlayerPredicate, RangeSelector},
    player::{
        NewPlayer, Player, PlayerOrder, PlayerQuery, PlayerRepository, Profession, Race,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Select, Set,
};

use crate::entity::player;

pub struct PlayerRepositoryImpl {
    db: DatabaseConnection,
}

impl PlayerRepositoryImpl {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn model_to_player(model: player::Model) -> Result<Player, String> {
        let race = Race::from_str(&model.race)
            .map_err(|_| format!("Unknown race {:?} for player {}", model.race, model.id))?;
        let profession = Profession::from_str(&model.profession).map_err(|_| {
            format!(
                "Unknown profession {:?} for player {}",
                model.profession, model.id
            )
        })?;
        let birthday = DateTime::from_timestamp_millis(model.birthday)
            .ok_or_else(|| format!("Invalid birthday for player {}", model.id))?;

        Ok(Player {
            id: PlayerId(model.id),
            name: model.name,
            title: model.title,
            race,
            profession,
            birthday,
            experience: model.experience,
            banned: model.banned,
            level: model.level,
            until_next_level: model.until_next_level,
        })
    }

    fn filtered(filter: &PlayerFilter) -> Select<player::Entity> {
        let condition = filter
            .predicates()
            .iter()
            .fold(Condition::all(), add_predicate);
        player::Entity::find().filter(condition)
    }
}

fn add_range<T, C>(condition: Condition, column: C, range: RangeSelector<T>) -> Condition
where
    T: Into<sea_orm::Value>,
    C: ColumnTrait,
{
    match range {
        RangeSelector::Between(min, max) => condition.add(column.between(min, max)),
        RangeSelector::AtLeast(min) => condition.add(column.gte(min)),
        RangeSelector::AtMost(max) => condition.add(column.lte(max)),
    }
}

fn add_predicate(condition: Condition, predicate: &PlayerPredicate) -> Condition {
    match predicate {
        PlayerPredicate::NameContains(part) => condition.add(player::Column::Name.contains(part)),
        PlayerPredicate::TitleContains(part) => {
            condition.add(player::Column::Title.contains(part))
        }
        PlayerPredicate::RaceIs(race) => condition.add(player::Column::Race.eq(race.as_str())),
        PlayerPredicate::ProfessionIs(profession) => {
            condition.add(player::Column::Profession.eq(profession.as_str()))
        }
        PlayerPredicate::Birthday(range) => add_range(condition, player::Column::Birthday, *range),
        PlayerPredicate::Banned(banned) => condition.add(player::Column::Banned.eq(*banned)),
        PlayerPredicate::Level(range) => add_range(condition, player::Column::Level, *range),
        PlayerPredicate::Experience(range) => {
            add_range(condition, player::Column::Experience, *range)
        }
    }
}

fn order_column(order: PlayerOrder) -> player::Column {
    match order {
        PlayerOrder::Id => player::Column::Id,
        PlayerOrder::Name => player::Column::Name,
        PlayerOrder::Experience => player::Column::Experience,
        PlayerOrder::Birthday => player::Column::Birthday,
        PlayerOrder::Level => player::Column::Level,
    }
}

#[async_trait::async_trait]
impl PlayerRepository for PlayerRepositoryImpl {
    async fn create_player(&self, player: NewPlayer) -> Result<Player, RepoError> {
        let new_player = player::ActiveModel {
            id: Default::default(), // Auto-increment
            name: Set(player.name),
            title: Set(player.title),
            race: Set(player.race.as_str().to_string()),
            profession: Set(player.profession.as_str().to_string()),
            birthday: Set(player.birthday.timestamp_millis()),
            experience: Set(player.experience),
            level: Set(player.level),
            until_next_level: Set(player.until_next_level),
            banned: Set(player.banned),
        };

        let model = new_player
            .insert(&self.db)
            .await
            .map_err(|e| RepoError::StorageError(e.to_string()))?;
        Self::model_to_player(model).map_err(RepoError::StorageError)
    }

    async fn get_player(&self, id: PlayerId) -> Result<Player, RepoRetrieveError> {
        let model = player::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| RepoRetrieveError::StorageError(e.to_string()))?
            .ok_or(RepoRetrieveError::NotFound)?;
        Self::model_to_player(model).map_err(RepoRetrieveError::StorageError)
    }

    async fn update_player(&self, updated: Player) -> Result<Player, RepoRetrieveError> {
        let model = player::Entity::find_by_id(updated.id.0)
            .one(&self.db)
            .await
            .map_err(|e| RepoRetrieveError::StorageError(e.to_string()))?
            .ok_or(RepoRetrieveError::NotFound)?;

        let mut model: player::ActiveModel = model.into();
        model.name = Set(updated.name);
        model.title = Set(updated.title);
        model.race = Set(updated.race.as_str().to_string());
        model.profession = Set(updated.profession.as_str().to_string());
        model.birthday = Set(updated.birthday.timestamp_millis());
        model.experience = Set(updated.experience);
        model.level = Set(updated.level);
        model.until_next_level = Set(updated.until_next_level);
        model.banned = Set(updated.banned);

        let model = model
            .update(&self.db)
            .await
            .map_err(|e| RepoRetrieveError::StorageError(e.to_string()))?;
        Self::model_to_player(model).map_err(RepoRetrieveError::StorageError)
    }

    async fn delete_player(&self, id: PlayerId) -> Result<(), RepoRetrieveError> {
        let result = player::Entity::delete_by_id(id.0)
            .exec(&self.db)
            .await
            .map_err(|e| RepoRetrieveError::StorageError(e.to_string()))?;
        if result.rows_affected == 0 {
            return Err(RepoRetrieveError::NotFound);
        }
        Ok(())
    }

    async fn query_players(&self, query: PlayerQuery) -> Result<Vec<Player>, RepoError> {
        let mut select = Self::filtered(&query.filter)
            .order_by_asc(order_column(query.order));
        if query.order != PlayerOrder::Id {
            select = select.order_by_asc(player::Column::Id);
        }

        let models = select
            .offset(query.pagination.offset())
            .limit(query.pagination.page_size)
            .all(&self.db)
            .await
            .map_err(|e| RepoError::StorageError(e.to_string()))?;

        models
            .into_iter()
            .map(|model| Self::model_to_player(model).map_err(RepoError::StorageError))
            .collect()
    }

    async fn count_players(&self, filter: PlayerFilter) -> Result<u64, RepoError> {
        Self::filtered(&filter)
            .count(&self.db)
            .await
            .map_err(|e| RepoError::StorageError(e.to_string()))
    }
}
