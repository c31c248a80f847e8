use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::route::PageId;

use super::core::Store;
use super::keys::StorageKey;

pub type QuestionId = u32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedAnswer {
    pub answer: String,
    /// RFC 3339 UTC instant with millisecond precision.
    pub timestamp: String,
}

type RawAnswers = BTreeMap<String, SavedAnswer>;

impl Store {
    pub fn last_visited_page(&self) -> Option<PageId> {
        self.get(StorageKey::LastVisitedPage, None)
    }

    pub fn set_last_visited_page(&self, page: &PageId) {
        self.set(StorageKey::LastVisitedPage, page);
    }

    pub fn save_answer(&self, question: QuestionId, answer: &str) -> SavedAnswer {
        self.save_answer_at(question, answer, Utc::now())
    }

    pub fn save_answer_at(
        &self,
        question: QuestionId,
        answer: &str,
        at: DateTime<Utc>,
    ) -> SavedAnswer {
        let saved = SavedAnswer {
            answer: answer.to_string(),
            timestamp: at.to_rfc3339_opts(SecondsFormat::Millis, true),
        };
        let mut answers: RawAnswers = self.get(StorageKey::Answers, RawAnswers::new());
        answers.insert(question.to_string(), saved.clone());
        self.set(StorageKey::Answers, &answers);
        info!(question, "Saved answer");
        saved
    }

    pub fn answer(&self, question: QuestionId) -> Option<SavedAnswer> {
        let mut answers: RawAnswers = self.get(StorageKey::Answers, RawAnswers::new());
        answers.remove(&question.to_string())
    }

    pub fn all_answers(&self) -> BTreeMap<QuestionId, SavedAnswer> {
        let answers: RawAnswers = self.get(StorageKey::Answers, RawAnswers::new());
        answers
            .into_iter()
            .filter_map(|(id, saved)| match id.parse::<QuestionId>() {
                Ok(id) => Some((id, saved)),
                Err(_) => {
                    warn!(id = %id, "Skipping answer with non-numeric question id");
                    None
                }
            })
            .collect()
    }

    pub fn mark_question_asked(&self, question: QuestionId) {
        let mut asked = self.asked_questions();
        if !asked.contains(&question) {
            asked.push(question);
            self.set(StorageKey::AskedQuestions, &asked);
        }
    }

    pub fn asked_questions(&self) -> Vec<QuestionId> {
        self.get(StorageKey::AskedQuestions, Vec::new())
    }

    pub fn reset_asked_questions(&self) {
        self.set(StorageKey::AskedQuestions, &Vec::<QuestionId>::new());
        info!("Reset asked questions");
    }

    /// Flips a timeline card and returns whether it is now open.
    pub fn toggle_timeline_card(&self, card: &str) -> bool {
        let mut open = self.open_timeline_cards();
        let now_open = match open.iter().position(|id| id == card) {
            Some(index) => {
                open.remove(index);
                false
            }
            None => {
                open.push(card.to_string());
                true
            }
        };
        self.set(StorageKey::OpenTimelineCards, &open);
        now_open
    }

    pub fn is_timeline_card_open(&self, card: &str) -> bool {
        self.open_timeline_cards().iter().any(|id| id == card)
    }

    pub fn open_timeline_cards(&self) -> Vec<String> {
        self.get(StorageKey::OpenTimelineCards, Vec::new())
    }

    pub fn mark_surprise_seen(&self) {
        self.set(StorageKey::SurpriseSeen, &true);
    }

    pub fn surprise_seen(&self) -> bool {
        self.get(StorageKey::SurpriseSeen, false)
    }

    /// Stores reading progress, clamped to `0.0..=1.0`.
    pub fn save_message_progress(&self, progress: f64) {
        let progress = if progress.is_finite() {
            progress.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.set(StorageKey::MessageProgress, &progress);
    }

    pub fn message_progress(&self) -> f64 {
        self.get(StorageKey::MessageProgress, 0.0)
    }

    pub fn kiss_count(&self) -> u32 {
        self.get(StorageKey::KissCount, 0)
    }

    pub fn add_kiss(&self) -> u32 {
        let count = self.kiss_count().saturating_add(1);
        self.set(StorageKey::KissCount, &count);
        count
    }

    pub fn birthday_modal_seen(&self) -> bool {
        self.get(StorageKey::BirthdayModalSeen, false)
    }

    pub fn mark_birthday_modal_seen(&self) {
        self.set(StorageKey::BirthdayModalSeen, &true);
    }
}
