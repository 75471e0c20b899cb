use std::str::FromStr;

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
};
use chrono::{DateTime, Utc};
use player_registry_app::domain::{
    Pagination, PlayerId,
    filter::{PlayerCriteria, PlayerFilter},
    player::{Player, PlayerDraft, PlayerOrder, PlayerPatch, PlayerQuery, Profession, Race},
};

use crate::{AppState, error::ServiceError};

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JsonPlayer {
    pub id: i64,
    pub name: String,
    pub title: String,
    pub race: String,
    pub profession: String,
    pub birthday: i64,
    pub banned: bool,
    pub experience: i32,
    pub level: i32,
    pub until_next_level: i32,
}

impl From<Player> for JsonPlayer {
    fn from(player: Player) -> Self {
        Self {
            id: player.id.0,
            name: player.name,
            title: player.title,
            race: player.race.to_string(),
            profession: player.profession.to_string(),
            birthday: player.birthday.timestamp_millis(),
            banned: player.banned,
            experience: player.experience,
            level: player.level,
            until_next_level: player.until_next_level,
        }
    }
}

/// Request body for create and update. Unknown fields, including `id` and the
/// derived level fields, are ignored.
#[derive(serde::Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct JsonPlayerBody {
    pub name: Option<String>,
    pub title: Option<String>,
    pub race: Option<String>,
    pub profession: Option<String>,
    pub birthday: Option<i64>,
    pub banned: Option<bool>,
    pub experience: Option<i32>,
}

#[derive(serde::Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct JsonPlayerQuery {
    pub name: Option<String>,
    pub title: Option<String>,
    pub race: Option<String>,
    pub profession: Option<String>,
    pub after: Option<i64>,
    pub before: Option<i64>,
    pub banned: Option<bool>,
    pub min_experience: Option<i32>,
    pub max_experience: Option<i32>,
    pub min_level: Option<i32>,
    pub max_level: Option<i32>,
    pub order: Option<String>,
    pub page_number: Option<u64>,
    pub page_size: Option<u64>,
}

fn parse_race(value: Option<&str>) -> Result<Option<Race>, ServiceError> {
    value
        .map(|s| {
            Race::from_str(s).map_err(|_| ServiceError::BadRequest(format!("Unknown race: {}", s)))
        })
        .transpose()
}

fn parse_profession(value: Option<&str>) -> Result<Option<Profession>, ServiceError> {
    value
        .map(|s| {
            Profession::from_str(s)
                .map_err(|_| ServiceError::BadRequest(format!("Unknown profession: {}", s)))
        })
        .transpose()
}

fn parse_birthday(value: Option<i64>) -> Result<Option<DateTime<Utc>>, ServiceError> {
    value
        .map(|millis| {
            DateTime::from_timestamp_millis(millis)
                .ok_or_else(|| ServiceError::BadRequest(format!("Invalid birthday: {}", millis)))
        })
        .transpose()
}

impl JsonPlayerQuery {
    fn criteria(&self) -> Result<PlayerCriteria, ServiceError> {
        Ok(PlayerCriteria {
            name: self.name.clone(),
            title: self.title.clone(),
            race: parse_race(self.race.as_deref())?,
            profession: parse_profession(self.profession.as_deref())?,
            after: self.after,
            before: self.before,
            banned: self.banned,
            min_level: self.min_level,
            max_level: self.max_level,
            min_experience: self.min_experience,
            max_experience: self.max_experience,
        })
    }

    fn order(&self) -> Result<PlayerOrder, ServiceError> {
        self.order
            .as_deref()
            .map(|s| {
                PlayerOrder::from_str(s)
                    .map_err(|_| ServiceError::BadRequest(format!("Unknown order: {}", s)))
            })
            .transpose()
            .map(Option::unwrap_or_default)
    }

    fn pagination(&self) -> Pagination {
        let defaults = Pagination::default();
        Pagination {
            page_number: self.page_number.unwrap_or(defaults.page_number),
            page_size: self.page_size.unwrap_or(defaults.page_size),
        }
    }
}

impl JsonPlayerBody {
    fn into_draft(self) -> Result<PlayerDraft, ServiceError> {
        Ok(PlayerDraft {
            race: parse_race(self.race.as_deref())?,
            profession: parse_profession(self.profession.as_deref())?,
            birthday: parse_birthday(self.birthday)?,
            name: self.name,
            title: self.title,
            experience: self.experience,
            banned: self.banned,
        })
    }

    fn into_patch(self) -> Result<PlayerPatch, ServiceError> {
        Ok(PlayerPatch {
            race: parse_race(self.race.as_deref())?,
            profession: parse_profession(self.profession.as_deref())?,
            birthday: parse_birthday(self.birthday)?,
            name: self.name,
            title: self.title,
            experience: self.experience,
            banned: self.banned,
        })
    }
}

fn bad_query(rejection: QueryRejection) -> ServiceError {
    ServiceError::BadRequest(rejection.body_text())
}

fn bad_path(rejection: PathRejection) -> ServiceError {
    ServiceError::BadRequest(rejection.body_text())
}

fn bad_body(rejection: JsonRejection) -> ServiceError {
    ServiceError::BadRequest(rejection.body_text())
}

pub async fn list_players(
    State(app_state): State<AppState>,
    query: Result<Query<JsonPlayerQuery>, QueryRejection>,
) -> Result<Json<Vec<JsonPlayer>>, ServiceError> {
    let Query(query) = query.map_err(bad_query)?;
    let player_query = PlayerQuery {
        filter: PlayerFilter::compose(query.criteria()?),
        order: query.order()?,
        pagination: query.pagination(),
    };

    let players = app_state
        .app
        .player_list_use_case
        .list_players(player_query)
        .await?;
    Ok(Json(players.into_iter().map(JsonPlayer::from).collect()))
}

pub async fn count_players(
    State(app_state): State<AppState>,
    query: Result<Query<JsonPlayerQuery>, QueryRejection>,
) -> Result<Json<u64>, ServiceError> {
    let Query(query) = query.map_err(bad_query)?;
    let filter = PlayerFilter::compose(query.criteria()?);

    let count = app_state
        .app
        .player_list_use_case
        .count_players(filter)
        .await?;
    Ok(Json(count))
}

pub async fn get_player(
    State(app_state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<JsonPlayer>, ServiceError> {
    let Path(id) = id.map_err(bad_path)?;
    let player = app_state
        .app
        .player_get_use_case
        .get_player(PlayerId(id))
        .await?;
    Ok(Json(player.into()))
}

pub async fn create_player(
    State(app_state): State<AppState>,
    body: Result<Json<JsonPlayerBody>, JsonRejection>,
) -> Result<Json<JsonPlayer>, ServiceError> {
    let Json(body) = body.map_err(bad_body)?;
    let player = app_state
        .app
        .player_create_use_case
        .create_player(body.into_draft()?)
        .await?;
    Ok(Json(player.into()))
}

pub async fn update_player(
    State(app_state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<JsonPlayerBody>, JsonRejection>,
) -> Result<Json<JsonPlayer>, ServiceError> {
    let Path(id) = id.map_err(bad_path)?;
    let Json(body) = body.map_err(bad_body)?;
    let player = app_state
        .app
        .player_update_use_case
        .update_player(PlayerId(id), body.into_patch()?)
        .await?;
    Ok(Json(player.into()))
}

pub async fn delete_player(
    State(app_state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<(), ServiceError> {
    let Path(id) = id.map_err(bad_path)?;
    app_state
        .app
        .player_delete_use_case
        .delete_player(PlayerId(id))
        .await?;
    Ok(())
}
