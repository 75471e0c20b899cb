use crate::domain::player::{Player, Profession, Race};

/// When a birthday range has both bounds, the upper bound is pulled back by
/// this many milliseconds before it is compared.
pub const BIRTHDAY_UPPER_BOUND_SHIFT_MS: i64 = 3_600_001;

/// Optional listing criteria as they arrive from a client. Birthday bounds are
/// epoch milliseconds.
#[derive(Debug, Clone, Default)]
pub struct PlayerCriteria {
    pub name: Option<String>,
    pub title: Option<String>,
    pub race: Option<Race>,
    pub profession: Option<Profession>,
    pub after: Option<i64>,
    pub before: Option<i64>,
    pub banned: Option<bool>,
    pub min_level: Option<i32>,
    pub max_level: Option<i32>,
    pub min_experience: Option<i32>,
    pub max_experience: Option<i32>,
}

/// Inclusive range built from an optional lower and upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeSelector<T> {
    Between(T, T),
    AtLeast(T),
    AtMost(T),
}

impl<T: PartialOrd + Copy> RangeSelector<T> {
    pub fn from_bounds(min: Option<T>, max: Option<T>) -> Option<Self> {
        match (min, max) {
            (Some(min), Some(max)) => Some(RangeSelector::Between(min, max)),
            (Some(min), None) => Some(RangeSelector::AtLeast(min)),
            (None, Some(max)) => Some(RangeSelector::AtMost(max)),
            (None, None) => None,
        }
    }

    pub fn contains(&self, value: T) -> bool {
        match *self {
            RangeSelector::Between(min, max) => min <= value && value <= max,
            RangeSelector::AtLeast(min) => min <= value,
            RangeSelector::AtMost(max) => value <= max,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlayerPredicate {
    NameContains(String),
    TitleContains(String),
    RaceIs(Race),
    ProfessionIs(Profession),
    /// Epoch milliseconds.
    Birthday(RangeSelector<i64>),
    Banned(bool),
    Level(RangeSelector<i32>),
    Experience(RangeSelector<i32>),
}

impl PlayerPredicate {
    /// Text matching is case-insensitive, like `LIKE` on the default collations.
    pub fn matches(&self, player: &Player) -> bool {
        match self {
            PlayerPredicate::NameContains(part) => contains_ignore_case(&player.name, part),
            PlayerPredicate::TitleContains(part) => contains_ignore_case(&player.title, part),
            PlayerPredicate::RaceIs(race) => player.race == *race,
            PlayerPredicate::ProfessionIs(profession) => player.profession == *profession,
            PlayerPredicate::Birthday(range) => range.contains(player.birthday.timestamp_millis()),
            PlayerPredicate::Banned(banned) => player.banned == *banned,
            PlayerPredicate::Level(range) => range.contains(player.level),
            PlayerPredicate::Experience(range) => range.contains(player.experience),
        }
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Conjunction of predicates. An empty filter matches every player.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerFilter {
    predicates: Vec<PlayerPredicate>,
}

impl PlayerFilter {
    pub fn compose(criteria: PlayerCriteria) -> Self {
        let mut filter = PlayerFilter::default();
        if let Some(name) = criteria.name {
            filter.push(PlayerPredicate::NameContains(name));
        }
        if let Some(title) = criteria.title {
            filter.push(PlayerPredicate::TitleContains(title));
        }
        if let Some(race) = criteria.race {
            filter.push(PlayerPredicate::RaceIs(race));
        }
        if let Some(profession) = criteria.profession {
            filter.push(PlayerPredicate::ProfessionIs(profession));
        }
        if let Some(range) = birthday_range(criteria.after, criteria.before) {
            filter.push(PlayerPredicate::Birthday(range));
        }
        if let Some(banned) = criteria.banned {
            filter.push(PlayerPredicate::Banned(banned));
        }
        if let Some(range) = RangeSelector::from_bounds(criteria.min_level, criteria.max_level) {
            filter.push(PlayerPredicate::Level(range));
        }
        if let Some(range) =
            RangeSelector::from_bounds(criteria.min_experience, criteria.max_experience)
        {
            filter.push(PlayerPredicate::Experience(range));
        }
        filter
    }

    pub fn push(&mut self, predicate: PlayerPredicate) {
        self.predicates.push(predicate);
    }

    pub fn predicates(&self) -> &[PlayerPredicate] {
        &self.predicates
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    pub fn matches(&self, player: &Player) -> bool {
        self.predicates
            .iter()
            .all(|predicate| predicate.matches(player))
    }
}

fn birthday_range(after: Option<i64>, before: Option<i64>) -> Option<RangeSelector<i64>> {
    match (after, before) {
        (Some(after), Some(before)) => Some(RangeSelector::Between(
            after,
            before.saturating_sub(BIRTHDAY_UPPER_BOUND_SHIFT_MS),
        )),
        (after, before) => RangeSelector::from_bounds(after, before),
    }
}
