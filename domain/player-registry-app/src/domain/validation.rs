use chrono::{DateTime, Datelike, Utc};
use thiserror::Error;
use validator::ValidateLength;

use crate::domain::{
    PlayerId,
    leveling::{LevelProgress, MAX_EXPERIENCE},
    player::{NewPlayer, Player, PlayerDraft, PlayerPatch},
};

pub const MAX_NAME_LENGTH: u64 = 12;
pub const MAX_TITLE_LENGTH: u64 = 30;
pub const MIN_BIRTHDAY_YEAR: i32 = 2000;
pub const MAX_BIRTHDAY_YEAR: i32 = 3000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerField {
    Name,
    Title,
    Race,
    Profession,
    Birthday,
    Experience,
    Banned,
}

impl std::fmt::Display for PlayerField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PlayerField::Name => "name",
            PlayerField::Title => "title",
            PlayerField::Race => "race",
            PlayerField::Profession => "profession",
            PlayerField::Birthday => "birthday",
            PlayerField::Experience => "experience",
            PlayerField::Banned => "banned",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("player id must be positive, got {0}")]
    NonPositiveId(i64),

    #[error("{0} is required")]
    Missing(PlayerField),

    #[error("{field} must be between 1 and {max} characters long")]
    Length { field: PlayerField, max: u64 },

    #[error(
        "birthday year {0} is outside of {min}..={max}",
        min = MIN_BIRTHDAY_YEAR,
        max = MAX_BIRTHDAY_YEAR
    )]
    BirthdayOutOfRange(i32),

    #[error("experience {0} is outside of 0..={max}", max = MAX_EXPERIENCE)]
    ExperienceOutOfRange(i32),

    #[error("page size must be at least 1")]
    EmptyPage,
}

type Rule<T> = fn(&T) -> Result<(), ValidationError>;

/// Checked in order before the completeness check turns the draft into a [`NewPlayer`].
const DRAFT_RULES: [Rule<PlayerDraft>; 4] = [
    draft_name,
    draft_title,
    draft_experience,
    draft_birthday,
];

const PATCH_RULES: [Rule<PlayerPatch>; 4] = [
    patch_name,
    patch_title,
    patch_birthday,
    patch_experience,
];

fn run_rules<T>(rules: &[Rule<T>], value: &T) -> Result<(), ValidationError> {
    rules.iter().try_for_each(|rule| rule(value))
}

fn draft_name(draft: &PlayerDraft) -> Result<(), ValidationError> {
    match &draft.name {
        Some(name) => check_text(name, PlayerField::Name, MAX_NAME_LENGTH),
        None => Err(ValidationError::Missing(PlayerField::Name)),
    }
}

fn draft_title(draft: &PlayerDraft) -> Result<(), ValidationError> {
    match &draft.title {
        Some(title) => check_text(title, PlayerField::Title, MAX_TITLE_LENGTH),
        None => Err(ValidationError::Missing(PlayerField::Title)),
    }
}

fn draft_experience(draft: &PlayerDraft) -> Result<(), ValidationError> {
    match draft.experience {
        Some(experience) => check_experience(experience),
        None => Err(ValidationError::Missing(PlayerField::Experience)),
    }
}

fn draft_birthday(draft: &PlayerDraft) -> Result<(), ValidationError> {
    draft.birthday.as_ref().map_or(Ok(()), check_birthday)
}

fn patch_name(patch: &PlayerPatch) -> Result<(), ValidationError> {
    patch
        .name
        .as_ref()
        .map_or(Ok(()), |name| check_text(name, PlayerField::Name, MAX_NAME_LENGTH))
}

fn patch_title(patch: &PlayerPatch) -> Result<(), ValidationError> {
    patch
        .title
        .as_ref()
        .map_or(Ok(()), |title| check_text(title, PlayerField::Title, MAX_TITLE_LENGTH))
}

fn patch_birthday(patch: &PlayerPatch) -> Result<(), ValidationError> {
    patch.birthday.as_ref().map_or(Ok(()), check_birthday)
}

fn patch_experience(patch: &PlayerPatch) -> Result<(), ValidationError> {
    patch.experience.map_or(Ok(()), check_experience)
}

fn check_text<S>(value: &S, field: PlayerField, max: u64) -> Result<(), ValidationError>
where
    S: ValidateLength<u64>,
{
    if value.validate_length(Some(1), Some(max), None) {
        Ok(())
    } else {
        Err(ValidationError::Length { field, max })
    }
}

fn check_birthday(birthday: &DateTime<Utc>) -> Result<(), ValidationError> {
    let year = birthday.year();
    if (MIN_BIRTHDAY_YEAR..=MAX_BIRTHDAY_YEAR).contains(&year) {
        Ok(())
    } else {
        Err(ValidationError::BirthdayOutOfRange(year))
    }
}

fn check_experience(experience: i32) -> Result<(), ValidationError> {
    if (0..=MAX_EXPERIENCE).contains(&experience) {
        Ok(())
    } else {
        Err(ValidationError::ExperienceOutOfRange(experience))
    }
}

pub fn check_player_id(id: PlayerId) -> Result<(), ValidationError> {
    if id.is_valid() {
        Ok(())
    } else {
        Err(ValidationError::NonPositiveId(id.0))
    }
}

impl PlayerDraft {
    /// Validates every field and computes the derived level attributes.
    pub fn validate(self) -> Result<NewPlayer, ValidationError> {
        run_rules(&DRAFT_RULES, &self)?;

        let Some(name) = self.name else {
            return Err(ValidationError::Missing(PlayerField::Name));
        };
        let Some(title) = self.title else {
            return Err(ValidationError::Missing(PlayerField::Title));
        };
        let Some(race) = self.race else {
            return Err(ValidationError::Missing(PlayerField::Race));
        };
        let Some(profession) = self.profession else {
            return Err(ValidationError::Missing(PlayerField::Profession));
        };
        let Some(birthday) = self.birthday else {
            return Err(ValidationError::Missing(PlayerField::Birthday));
        };
        let Some(experience) = self.experience else {
            return Err(ValidationError::Missing(PlayerField::Experience));
        };
        let Some(banned) = self.banned else {
            return Err(ValidationError::Missing(PlayerField::Banned));
        };

        let progress = LevelProgress::from_experience(experience);
        Ok(NewPlayer {
            name,
            title,
            race,
            profession,
            birthday,
            experience,
            banned,
            level: progress.level,
            until_next_level: progress.until_next_level,
        })
    }
}

impl PlayerPatch {
    /// Returns `player` with the supplied fields replaced. Nothing is applied
    /// unless every supplied field is valid.
    pub fn apply_to(self, player: &Player) -> Result<Player, ValidationError> {
        run_rules(&PATCH_RULES, &self)?;

        let mut updated = player.clone();
        if let Some(name) = self.name {
            updated.name = name;
        }
        if let Some(title) = self.title {
            updated.title = title;
        }
        if let Some(race) = self.race {
            updated.race = race;
        }
        if let Some(profession) = self.profession {
            updated.profession = profession;
        }
        if let Some(birthday) = self.birthday {
            updated.birthday = birthday;
        }
        if let Some(experience) = self.experience {
            updated.experience = experience;
        }
        if let Some(banned) = self.banned {
            updated.banned = banned;
        }
        updated.id = player.id;
        updated.recompute_level();
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use crate::domain::player::{Profession, Race};

    use super::*;

    fn birthday(year: i32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, 6, 15, 12, 0, 0).unwrap()
    }

    fn full_draft() -> PlayerDraft {
        PlayerDraft {
            name: Some("Ragnar".to_string()),
            title: Some("Lord of the North".to_string()),
            race: Some(Race::Human),
            profession: Some(Profession::Warrior),
            birthday: Some(birthday(2005)),
            experience: Some(1000),
            banned: Some(false),
        }
    }

    fn stored_player() -> Player {
        full_draft()
            .validate()
            .expect("valid draft")
            .with_id(PlayerId(7))
    }

    #[test]
    fn test_draft_computes_level() {
        let player = full_draft().validate().unwrap();
        assert_eq!(player.level, 4);
        assert_eq!(player.until_next_level, 500);
    }

    #[test]
    fn test_draft_name_length_boundary() {
        let mut draft = full_draft();
        draft.name = Some("A".repeat(12));
        assert!(draft.clone().validate().is_ok());

        draft.name = Some("A".repeat(13));
        assert_eq!(
            draft.validate(),
            Err(ValidationError::Length {
                field: PlayerField::Name,
                max: MAX_NAME_LENGTH
            })
        );
    }

    #[test]
    fn test_draft_length_counts_characters() {
        let mut draft = full_draft();
        draft.name = Some("ÄÖÜäöüßÆØÅæø".to_string());
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_draft_title_length_boundary() {
        let mut draft = full_draft();
        draft.title = Some("T".repeat(30));
        assert!(draft.clone().validate().is_ok());

        draft.title = Some("T".repeat(31));
        assert!(matches!(
            draft.validate(),
            Err(ValidationError::Length {
                field: PlayerField::Title,
                ..
            })
        ));
    }

    #[test]
    fn test_draft_missing_fields() {
        let cases: [(fn(&mut PlayerDraft), PlayerField); 7] = [
            (|d| d.name = None, PlayerField::Name),
            (|d| d.title = None, PlayerField::Title),
            (|d| d.race = None, PlayerField::Race),
            (|d| d.profession = None, PlayerField::Profession),
            (|d| d.birthday = None, PlayerField::Birthday),
            (|d| d.experience = None, PlayerField::Experience),
            (|d| d.banned = None, PlayerField::Banned),
        ];
        for (clear, field) in cases {
            let mut draft = full_draft();
            clear(&mut draft);
            assert_eq!(draft.validate(), Err(ValidationError::Missing(field)));
        }
    }

    #[test]
    fn test_draft_rules_run_in_order() {
        let draft = PlayerDraft {
            name: Some("N".repeat(20)),
            experience: Some(-1),
            ..Default::default()
        };
        assert!(matches!(
            draft.validate(),
            Err(ValidationError::Length {
                field: PlayerField::Name,
                ..
            })
        ));

        let draft = PlayerDraft {
            name: Some("Ok".to_string()),
            title: Some("Ok".to_string()),
            experience: Some(MAX_EXPERIENCE + 1),
            ..Default::default()
        };
        assert_eq!(
            draft.validate(),
            Err(ValidationError::ExperienceOutOfRange(MAX_EXPERIENCE + 1))
        );
    }

    #[test]
    fn test_draft_rejects_out_of_range_values() {
        let mut draft = full_draft();
        draft.experience = Some(-1);
        assert_eq!(
            draft.validate(),
            Err(ValidationError::ExperienceOutOfRange(-1))
        );

        let mut draft = full_draft();
        draft.birthday = Some(birthday(1999));
        assert_eq!(
            draft.validate(),
            Err(ValidationError::BirthdayOutOfRange(1999))
        );

        let mut draft = full_draft();
        draft.name = Some(String::new());
        assert!(draft.validate().is_err());
    }

    #[test]
    fn test_patch_only_banned_keeps_everything_else() {
        let player = stored_player();
        let patch = PlayerPatch {
            banned: Some(true),
            ..Default::default()
        };
        let updated = patch.apply_to(&player).unwrap();

        assert!(updated.banned);
        assert_eq!(updated.id, player.id);
        assert_eq!(updated.name, player.name);
        assert_eq!(updated.title, player.title);
        assert_eq!(updated.birthday, player.birthday);
        assert_eq!(updated.experience, player.experience);
        assert_eq!(
            updated.progress(),
            LevelProgress::from_experience(player.experience)
        );
    }

    #[test]
    fn test_patch_experience_recomputes_level() {
        let player = stored_player();
        let patch = PlayerPatch {
            experience: Some(300),
            ..Default::default()
        };
        let updated = patch.apply_to(&player).unwrap();
        assert_eq!(updated.level, 2);
        assert_eq!(updated.until_next_level, 300);
    }

    #[test]
    fn test_patch_rejects_invalid_fields() {
        let player = stored_player();
        let invalid = [
            PlayerPatch {
                name: Some(String::new()),
                ..Default::default()
            },
            PlayerPatch {
                name: Some("N".repeat(13)),
                ..Default::default()
            },
            PlayerPatch {
                title: Some("T".repeat(31)),
                ..Default::default()
            },
            PlayerPatch {
                birthday: Some(birthday(3001)),
                ..Default::default()
            },
            PlayerPatch {
                experience: Some(-1),
                ..Default::default()
            },
            PlayerPatch {
                experience: Some(MAX_EXPERIENCE + 1),
                ..Default::default()
            },
        ];
        for patch in invalid {
            assert!(patch.apply_to(&player).is_err());
        }
    }

    #[test]
    fn test_patch_birthday_year_bounds_inclusive() {
        let player = stored_player();
        for year in [MIN_BIRTHDAY_YEAR, MAX_BIRTHDAY_YEAR] {
            let patch = PlayerPatch {
                birthday: Some(birthday(year)),
                ..Default::default()
            };
            assert!(patch.apply_to(&player).is_ok());
        }
    }

    #[test]
    fn test_check_player_id() {
        assert!(check_player_id(PlayerId(1)).is_ok());
        assert_eq!(
            check_player_id(PlayerId(0)),
            Err(ValidationError::NonPositiveId(0))
        );
        assert_eq!(
            check_player_id(PlayerId(-1)),
            Err(ValidationError::NonPositiveId(-1))
        );
    }
}
