use std::{
    collections::BTreeMap,
    sync::{
        Mutex,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
};

use chrono::{TimeZone, Utc};

use crate::domain::{
    PlayerId, RepoError, RepoRetrieveError,
    filter::PlayerFilter,
    leveling::LevelProgress,
    player::{
        NewPlayer, Player, PlayerOrder, PlayerQuery, PlayerRepository, Profession, Race,
    },
};

/// Validated player with the given name and experience, ready to insert.
pub fn sample_player(name: &str, experience: i32) -> NewPlayer {
    let progress = LevelProgress::from_experience(experience);
    NewPlayer {
        name: name.to_string(),
        title: "Wanderer".to_string(),
        race: Race::Hobbit,
        profession: Profession::Rogue,
        birthday: Utc.with_ymd_and_hms(2012, 9, 22, 0, 0, 0).unwrap(),
        experience,
        banned: false,
        level: progress.level,
        until_next_level: progress.until_next_level,
    }
}

/// Store double that evaluates filters with [`PlayerFilter::matches`] and
/// counts the reads and writes it serves.
#[derive(Default)]
pub struct InMemoryPlayerRepository {
    players: Mutex<BTreeMap<i64, Player>>,
    next_id: AtomicUsize,
    reads: AtomicUsize,
    writes: AtomicUsize,
    failing: AtomicBool,
}

impl InMemoryPlayerRepository {
    /// Inserts directly, bypassing the read/write counters.
    pub fn insert(&self, player: NewPlayer) -> Player {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) as i64 + 1;
        let player = player.with_id(PlayerId(id));
        self.players.lock().unwrap().insert(id, player.clone());
        player
    }

    pub fn get(&self, id: PlayerId) -> Option<Player> {
        self.players.lock().unwrap().get(&id.0).cloned()
    }

    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn fail_storage(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    fn check_storage(&self) -> Result<(), String> {
        if self.failing.load(Ordering::SeqCst) {
            Err("storage offline".to_string())
        } else {
            Ok(())
        }
    }

    fn matching(&self, filter: &PlayerFilter) -> Vec<Player> {
        self.players
            .lock()
            .unwrap()
            .values()
            .filter(|player| filter.matches(player))
            .cloned()
            .collect()
    }
}

#[async_trait::async_trait]
impl PlayerRepository for InMemoryPlayerRepository {
    async fn create_player(&self, player: NewPlayer) -> Result<Player, RepoError> {
        self.check_storage().map_err(RepoError::StorageError)?;
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(self.insert(player))
    }

    async fn get_player(&self, id: PlayerId) -> Result<Player, RepoRetrieveError> {
        self.check_storage()
            .map_err(RepoRetrieveError::StorageError)?;
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.get(id).ok_or(RepoRetrieveError::NotFound)
    }

    async fn update_player(&self, player: Player) -> Result<Player, RepoRetrieveError> {
        self.check_storage()
            .map_err(RepoRetrieveError::StorageError)?;
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut players = self.players.lock().unwrap();
        match players.get_mut(&player.id.0) {
            Some(stored) => {
                *stored = player.clone();
                Ok(player)
            }
            None => Err(RepoRetrieveError::NotFound),
        }
    }

    async fn delete_player(&self, id: PlayerId) -> Result<(), RepoRetrieveError> {
        self.check_storage()
            .map_err(RepoRetrieveError::StorageError)?;
        self.writes.fetch_add(1, Ordering::SeqCst);
        match self.players.lock().unwrap().remove(&id.0) {
            Some(_) => Ok(()),
            None => Err(RepoRetrieveError::NotFound),
        }
    }

    async fn query_players(&self, query: PlayerQuery) -> Result<Vec<Player>, RepoError> {
        self.check_storage().map_err(RepoError::StorageError)?;
        self.reads.fetch_add(1, Ordering::SeqCst);
        let mut players = self.matching(&query.filter);
        match query.order {
            PlayerOrder::Id => players.sort_by_key(|p| p.id),
            PlayerOrder::Name => players.sort_by(|a, b| (&a.name, a.id).cmp(&(&b.name, b.id))),
            PlayerOrder::Experience => players.sort_by_key(|p| (p.experience, p.id)),
            PlayerOrder::Birthday => players.sort_by_key(|p| (p.birthday, p.id)),
            PlayerOrder::Level => players.sort_by_key(|p| (p.level, p.id)),
        }
        Ok(players
            .into_iter()
            .skip(query.pagination.offset() as usize)
            .take(query.pagination.page_size as usize)
            .collect())
    }

    async fn count_players(&self, filter: PlayerFilter) -> Result<u64, RepoError> {
        self.check_storage().map_err(RepoError::StorageError)?;
        self.reads.fetch_add(1, Ordering::SeqCst);
        Ok(self.matching(&filter).len() as u64)
    }
}
