//! Practice records and where they are kept.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::difficulty::Difficulty;
use crate::error::PracticeError;

/// Milliseconds since the Unix epoch.
pub type Timestamp = u64;

/// A described practice routine and the skill levels it is offered at.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Practice {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub skill_levels: Vec<Difficulty>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_directions: Option<String>,
    #[serde(default)]
    pub practice_tips: Vec<String>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

impl Practice {
    pub fn new(title: &str, description: &str) -> Self {
        Practice {
            title: title.to_string(),
            description: description.to_string(),
            skill_levels: vec![Difficulty::Beginner],
            ..Practice::default()
        }
    }

    pub fn validate(&self) -> Result<(), PracticeError> {
        if self.title.trim().is_empty() {
            return Err(PracticeError::InvalidPractice("title is empty".to_string()));
        }
        if self.skill_levels.is_empty() {
            return Err(PracticeError::InvalidPractice(
                "no skill level selected".to_string(),
            ));
        }
        Ok(())
    }

    pub fn offered_at(&self, level: Difficulty) -> bool {
        self.skill_levels.contains(&level)
    }

    /// Add `level` if missing, remove it if present.
    pub fn toggle_skill_level(&mut self, level: Difficulty) {
        if let Some(index) = self.skill_levels.iter().position(|&l| l == level) {
            self.skill_levels.remove(index);
        } else {
            self.skill_levels.push(level);
        }
    }
}

/// Fields to change on an existing practice; `None` leaves a field alone.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct PracticeUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub skill_levels: Option<Vec<Difficulty>>,
    pub custom_directions: Option<String>,
    pub practice_tips: Option<Vec<String>>,
}

impl PracticeUpdate {
    fn apply_to(self, practice: &mut Practice) {
        if let Some(title) = self.title {
            practice.title = title;
        }
        if let Some(description) = self.description {
            practice.description = description;
        }
        if let Some(skill_levels) = self.skill_levels {
            practice.skill_levels = skill_levels;
        }
        if let Some(custom_directions) = self.custom_directions {
            practice.custom_directions = Some(custom_directions);
        }
        if let Some(practice_tips) = self.practice_tips {
            practice.practice_tips = practice_tips;
        }
    }
}

/// Practices offered at `level`.
pub fn filter_by_skill_level(practices: &[Practice], level: Difficulty) -> Vec<&Practice> {
    practices.iter().filter(|p| p.offered_at(level)).collect()
}

pub trait PracticeRepository {
    fn list(&self) -> Vec<Practice>;

    fn list_by_skill_level(&self, level: Difficulty) -> Vec<Practice> {
        self.list()
            .into_iter()
            .filter(|p| p.offered_at(level))
            .collect()
    }

    fn get(&self, id: &str) -> Option<Practice>;

    /// Store a new practice and return its id.
    fn create(&mut self, practice: Practice) -> Result<String, PracticeError>;

    fn update(&mut self, id: &str, update: PracticeUpdate) -> Result<Practice, PracticeError>;

    fn delete(&mut self, id: &str) -> Result<(), PracticeError>;
}

pub struct InMemoryPracticeRepository {
    practices: BTreeMap<String, Practice>,
    next_id: u64,
    clock: Box<dyn Fn() -> Timestamp>,
}

impl InMemoryPracticeRepository {
    pub fn new<C>(clock: C) -> Self
    where
        C: Fn() -> Timestamp + 'static,
    {
        InMemoryPracticeRepository {
            practices: BTreeMap::new(),
            next_id: 1,
            clock: Box::new(clock),
        }
    }

    pub fn len(&self) -> usize {
        self.practices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.practices.is_empty()
    }
}

impl PracticeRepository for InMemoryPracticeRepository {
    fn list(&self) -> Vec<Practice> {
        self.practices.values().cloned().collect()
    }

    fn get(&self, id: &str) -> Option<Practice> {
        self.practices.get(id).cloned()
    }

    fn create(&mut self, mut practice: Practice) -> Result<String, PracticeError> {
        practice.validate()?;

        let id = format!("practice-{}", self.next_id);
        self.next_id += 1;

        let now = (self.clock)();
        practice.id = Some(id.clone());
        practice.created_at = Some(now);
        practice.updated_at = Some(now);

        log::debug!("created practice {} ({})", id, practice.title);
        self.practices.insert(id.clone(), practice);
        Ok(id)
    }

    fn update(&mut self, id: &str, update: PracticeUpdate) -> Result<Practice, PracticeError> {
        let existing = self
            .practices
            .get(id)
            .ok_or_else(|| PracticeError::PracticeNotFound(id.to_string()))?;

        let mut updated = existing.clone();
        update.apply_to(&mut updated);
        updated.validate()?;
        updated.updated_at = Some((self.clock)());

        self.practices.insert(id.to_string(), updated.clone());
        Ok(updated)
    }

    fn delete(&mut self, id: &str) -> Result<(), PracticeError> {
        self.practices
            .remove(id)
            .ok_or_else(|| PracticeError::PracticeNotFound(id.to_string()))?;
        log::debug!("deleted practice {}", id);
        Ok(())
    }
}
