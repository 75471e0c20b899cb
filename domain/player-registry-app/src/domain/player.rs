use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::domain::{
    Pagination, PlayerId, RepoError, RepoRetrieveError, filter::PlayerFilter,
    leveling::LevelProgress,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Race {
    Human,
    Dwarf,
    Elf,
    Giant,
    Orc,
    Troll,
    Hobbit,
}

impl Race {
    pub const ALL: [Race; 7] = [
        Race::Human,
        Race::Dwarf,
        Race::Elf,
        Race::Giant,
        Race::Orc,
        Race::Troll,
        Race::Hobbit,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Race::Human => "HUMAN",
            Race::Dwarf => "DWARF",
            Race::Elf => "ELF",
            Race::Giant => "GIANT",
            Race::Orc => "ORC",
            Race::Troll => "TROLL",
            Race::Hobbit => "HOBBIT",
        }
    }
}

impl FromStr for Race {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Race::ALL
            .into_iter()
            .find(|race| race.as_str() == s)
            .ok_or(())
    }
}

impl std::fmt::Display for Race {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Profession {
    Warrior,
    Rogue,
    Sorcerer,
    Cleric,
    Paladin,
    Nazgul,
    Warlock,
    Druid,
}

impl Profession {
    pub const ALL: [Profession; 8] = [
        Profession::Warrior,
        Profession::Rogue,
        Profession::Sorcerer,
        Profession::Cleric,
        Profession::Paladin,
        Profession::Nazgul,
        Profession::Warlock,
        Profession::Druid,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Profession::Warrior => "WARRIOR",
            Profession::Rogue => "ROGUE",
            Profession::Sorcerer => "SORCERER",
            Profession::Cleric => "CLERIC",
            Profession::Paladin => "PALADIN",
            Profession::Nazgul => "NAZGUL",
            Profession::Warlock => "WARLOCK",
            Profession::Druid => "DRUID",
        }
    }
}

impl FromStr for Profession {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Profession::ALL
            .into_iter()
            .find(|profession| profession.as_str() == s)
            .ok_or(())
    }
}

impl std::fmt::Display for Profession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub title: String,
    pub race: Race,
    pub profession: Profession,
    pub birthday: DateTime<Utc>,
    pub experience: i32,
    pub banned: bool,
    pub level: i32,
    pub until_next_level: i32,
}

impl Player {
    pub fn progress(&self) -> LevelProgress {
        LevelProgress {
            level: self.level,
            until_next_level: self.until_next_level,
        }
    }

    pub(crate) fn recompute_level(&mut self) {
        let progress = LevelProgress::from_experience(self.experience);
        self.level = progress.level;
        self.until_next_level = progress.until_next_level;
    }
}

/// A fully validated player that has not been stored yet.
#[derive(Clone, Debug, PartialEq)]
pub struct NewPlayer {
    pub name: String,
    pub title: String,
    pub race: Race,
    pub profession: Profession,
    pub birthday: DateTime<Utc>,
    pub experience: i32,
    pub banned: bool,
    pub level: i32,
    pub until_next_level: i32,
}

impl NewPlayer {
    pub fn with_id(self, id: PlayerId) -> Player {
        Player {
            id,
            name: self.name,
            title: self.title,
            race: self.race,
            profession: self.profession,
            birthday: self.birthday,
            experience: self.experience,
            banned: self.banned,
            level: self.level,
            until_next_level: self.until_next_level,
        }
    }
}

/// Creation input as received from a client; every field may be missing.
#[derive(Clone, Debug, Default)]
pub struct PlayerDraft {
    pub name: Option<String>,
    pub title: Option<String>,
    pub race: Option<Race>,
    pub profession: Option<Profession>,
    pub birthday: Option<DateTime<Utc>>,
    pub experience: Option<i32>,
    pub banned: Option<bool>,
}

/// Partial update; `None` leaves the stored value untouched.
#[derive(Clone, Debug, Default)]
pub struct PlayerPatch {
    pub name: Option<String>,
    pub title: Option<String>,
    pub race: Option<Race>,
    pub profession: Option<Profession>,
    pub birthday: Option<DateTime<Utc>>,
    pub experience: Option<i32>,
    pub banned: Option<bool>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlayerOrder {
    #[default]
    Id,
    Name,
    Experience,
    Birthday,
    Level,
}

impl FromStr for PlayerOrder {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ID" => Ok(PlayerOrder::Id),
            "NAME" => Ok(PlayerOrder::Name),
            "EXPERIENCE" => Ok(PlayerOrder::Experience),
            "BIRTHDAY" => Ok(PlayerOrder::Birthday),
            "LEVEL" => Ok(PlayerOrder::Level),
            _ => Err(()),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct PlayerQuery {
    pub filter: PlayerFilter,
    pub order: PlayerOrder,
    pub pagination: Pagination,
}

#[async_trait::async_trait]
pub trait PlayerRepository {
    async fn create_player(&self, player: NewPlayer) -> Result<Player, RepoError>;
    async fn get_player(&self, id: PlayerId) -> Result<Player, RepoRetrieveError>;
    async fn update_player(&self, player: Player) -> Result<Player, RepoRetrieveError>;
    async fn delete_player(&self, id: PlayerId) -> Result<(), RepoRetrieveError>;
    async fn query_players(&self, query: PlayerQuery) -> Result<Vec<Player>, RepoError>;
    async fn count_players(&self, filter: PlayerFilter) -> Result<u64, RepoError>;
}
