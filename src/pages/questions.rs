use serde::Deserialize;
use tracing::{debug, info};

use crate::event::KeyInput;
use crate::lifecycle::{PageContext, PageModule};
use crate::route::{PageId, QUESTIONS_PAGE};
use crate::store::{QuestionId, SavedAnswer, Store};

const EXPORT_HEADER: &str = "=== OUR LOVE STORY - ANSWERS ===\n\n";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub text: String,
}

impl Question {
    pub fn new(id: QuestionId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved(SavedAnswer),
    /// Blank after trimming; nothing stored.
    EmptyAnswer,
    NoQuestion,
}

/// Flashcard deck over an injected question bank.
#[derive(Debug, Default)]
pub struct Questions {
    bank: Vec<Question>,
    index: usize,
    flipped: bool,
    draft: String,
}

impl Questions {
    pub fn new(bank: Vec<Question>) -> Self {
        Self {
            bank,
            ..Self::default()
        }
    }

    pub fn bank(&self) -> &[Question] {
        &self.bank
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> Option<&Question> {
        self.bank.get(self.index)
    }

    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    /// Answer text shown for the current card: the saved answer, or whatever
    /// was typed since.
    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Shows question `index`, wrapping past either end of the bank.
    pub fn go_to(&mut self, index: i64, store: &Store) {
        let Ok(len) = i64::try_from(self.bank.len()) else {
            return;
        };
        if len == 0 {
            return;
        }
        self.index = usize::try_from(index.rem_euclid(len)).unwrap_or_default();
        self.flipped = false;

        let Some(question) = self.bank.get(self.index) else {
            return;
        };
        let id = question.id;
        self.draft = store
            .answer(id)
            .map(|saved| saved.answer)
            .unwrap_or_default();
        store.mark_question_asked(id);
        debug!(question = id, index = self.index, "Question shown");
    }

    pub fn next(&mut self, store: &Store) {
        self.go_to(self.position() + 1, store);
    }

    pub fn previous(&mut self, store: &Store) {
        self.go_to(self.position() - 1, store);
    }

    /// Turns the card over. Returns whether the answer side is now up.
    pub fn flip(&mut self) -> bool {
        self.flipped = !self.flipped;
        self.flipped
    }

    pub fn save(&mut self, answer: &str, store: &Store) -> SaveOutcome {
        let Some(question) = self.current() else {
            return SaveOutcome::NoQuestion;
        };
        let answer = answer.trim();
        if answer.is_empty() {
            return SaveOutcome::EmptyAnswer;
        }
        let saved = store.save_answer(question.id, answer);
        self.draft = saved.answer.clone();
        SaveOutcome::Saved(saved)
    }

    /// Saves the current draft, as the save button does.
    pub fn save_draft(&mut self, store: &Store) -> SaveOutcome {
        let draft = std::mem::take(&mut self.draft);
        let outcome = self.save(&draft, store);
        if !matches!(outcome, SaveOutcome::Saved(_)) {
            self.draft = draft;
        }
        outcome
    }

    pub fn answered_count(&self, store: &Store) -> usize {
        let answers = store.all_answers();
        self.bank
            .iter()
            .filter(|question| answers.contains_key(&question.id))
            .count()
    }

    /// One entry per question: whether it has a saved answer.
    pub fn progress_dots(&self, store: &Store) -> Vec<bool> {
        let answers = store.all_answers();
        self.bank
            .iter()
            .map(|question| answers.contains_key(&question.id))
            .collect()
    }

    pub fn counter_label(&self, store: &Store) -> String {
        format!(
            "Question {} of {} ({} answered)",
            self.index + 1,
            self.bank.len(),
            self.answered_count(store)
        )
    }

    /// Plain-text transcript of every answered question in bank order, or
    /// `None` when nothing in the bank has been answered.
    pub fn export(&self, store: &Store) -> Option<String> {
        let answers = store.all_answers();
        let mut text = String::from(EXPORT_HEADER);
        let mut exported = 0;
        for question in &self.bank {
            if let Some(saved) = answers.get(&question.id) {
                text.push_str(&format!("Q: {}\nA: {}\n\n", question.text, saved.answer));
                exported += 1;
            }
        }
        if exported == 0 {
            return None;
        }
        info!(exported, "Exported answers");
        Some(text)
    }

    fn position(&self) -> i64 {
        i64::try_from(self.index).unwrap_or_default()
    }
}

impl PageModule for Questions {
    fn name(&self) -> &'static str {
        "questions"
    }

    fn routes(&self) -> Vec<PageId> {
        vec![PageId::new(QUESTIONS_PAGE)]
    }

    fn on_page_loaded(&mut self, ctx: &PageContext<'_>) {
        self.index = 0;
        self.flipped = false;
        self.draft.clear();
        self.go_to(0, ctx.store);
    }

    fn on_key(&mut self, key: &KeyInput, store: &Store) -> bool {
        match key {
            KeyInput::ArrowRight => self.next(store),
            KeyInput::ArrowLeft => self.previous(store),
            _ => return false,
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::{Question, Questions, SaveOutcome};
    use crate::event::{KeyInput, NavReason, PageLoaded};
    use crate::lifecycle::{PageContext, PageModule};
    use crate::route::PageId;
    use crate::store::Store;

    fn bank() -> Vec<Question> {
        vec![
            Question::new(1, "Favorite memory?"),
            Question::new(2, "Next trip?"),
            Question::new(3, "Our song?"),
        ]
    }

    fn loaded(bank: Vec<Question>, store: &Store) -> Questions {
        let mut questions = Questions::new(bank);
        let event = PageLoaded {
            page: PageId::new("questions.html"),
            reason: NavReason::NavButton,
        };
        questions.on_page_loaded(&PageContext {
            event: &event,
            store,
            content: None,
        });
        questions
    }

    #[test]
    fn index_wraps_in_both_directions_and_resets_the_flip() {
        let store = Store::in_memory();
        let mut deck = loaded(bank(), &store);
        assert_eq!(deck.current().map(|q| q.id), Some(1));

        deck.flip();
        deck.previous(&store);
        assert_eq!(deck.index(), 2);
        assert!(!deck.is_flipped());

        deck.next(&store);
        assert_eq!(deck.index(), 0);
        deck.go_to(-4, &store);
        assert_eq!(deck.index(), 2);
        assert_eq!(store.asked_questions(), vec![1, 3]);
    }

    #[test]
    fn save_trims_and_rejects_blank_answers() {
        let store = Store::in_memory();
        let mut deck = loaded(bank(), &store);

        assert_eq!(deck.save("   \n", &store), SaveOutcome::EmptyAnswer);
        assert_eq!(store.answer(1), None);

        let SaveOutcome::Saved(saved) = deck.save("  the beach  ", &store) else {
            panic!("answer should be saved");
        };
        assert_eq!(saved.answer, "the beach");
        assert_eq!(deck.draft(), "the beach");
        assert_eq!(deck.counter_label(&store), "Question 1 of 3 (1 answered)");
        assert_eq!(deck.progress_dots(&store), vec![true, false, false]);
    }

    #[test]
    fn saved_answers_are_restored_when_revisiting_a_card() {
        let store = Store::in_memory();
        let mut deck = loaded(bank(), &store);
        deck.next(&store);
        deck.set_draft("Kyoto");
        assert!(matches!(deck.save_draft(&store), SaveOutcome::Saved(_)));

        let mut again = loaded(bank(), &store);
        assert_eq!(again.draft(), "");
        again.next(&store);
        assert_eq!(again.draft(), "Kyoto");
    }

    #[test]
    fn export_lists_answers_in_bank_order() {
        let store = Store::in_memory();
        let mut deck = loaded(bank(), &store);
        assert_eq!(deck.export(&store), None);

        deck.go_to(2, &store);
        deck.save("ours", &store);
        deck.go_to(0, &store);
        deck.save("the beach", &store);

        assert_eq!(
            deck.export(&store).as_deref(),
            Some(
                "=== OUR LOVE STORY - ANSWERS ===\n\nQ: Favorite memory?\nA: the beach\n\nQ: Our song?\nA: ours\n\n"
            )
        );
    }

    #[test]
    fn empty_bank_is_inert() {
        let store = Store::in_memory();
        let mut deck = loaded(Vec::new(), &store);
        deck.next(&store);
        assert_eq!(deck.current(), None);
        assert_eq!(deck.save("hello", &store), SaveOutcome::NoQuestion);
        assert_eq!(deck.counter_label(&store), "Question 1 of 0 (0 answered)");
    }

    #[test]
    fn arrow_keys_move_through_the_deck() {
        let store = Store::in_memory();
        let mut deck = loaded(bank(), &store);
        assert!(deck.on_key(&KeyInput::ArrowRight, &store));
        assert_eq!(deck.index(), 1);
        assert!(deck.on_key(&KeyInput::ArrowLeft, &store));
        assert_eq!(deck.index(), 0);
        assert!(!deck.on_key(&KeyInput::Escape, &store));
    }
}
