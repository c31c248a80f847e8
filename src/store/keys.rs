/// How long a persisted entry lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageTier {
    /// Survives reloads and new browser sessions (`localStorage`).
    Durable,
    /// Survives reloads within the current tab only (`sessionStorage`).
    Session,
}

/// The enumerated set of persisted entries. Nothing outside this set is ever
/// read, written or cleared by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    LastVisitedPage,
    Answers,
    OpenTimelineCards,
    AskedQuestions,
    SurpriseSeen,
    MessageProgress,
    KissCount,
    BirthdayModalSeen,
}

impl StorageKey {
    pub const ALL: [StorageKey; 8] = [
        StorageKey::LastVisitedPage,
        StorageKey::Answers,
        StorageKey::OpenTimelineCards,
        StorageKey::AskedQuestions,
        StorageKey::SurpriseSeen,
        StorageKey::MessageProgress,
        StorageKey::KissCount,
        StorageKey::BirthdayModalSeen,
    ];

    /// Item name in browser storage. Matches the names the site has always
    /// written so existing visitors keep their data.
    pub fn name(self) -> &'static str {
        match self {
            Self::LastVisitedPage => "lastVisitedPage",
            Self::Answers => "love_answers",
            Self::OpenTimelineCards => "openTimelineCards",
            Self::AskedQuestions => "askedQuestions",
            Self::SurpriseSeen => "surpriseSeen",
            Self::MessageProgress => "messageProgress",
            Self::KissCount => "birthdayKisses",
            Self::BirthdayModalSeen => "birthdayModalSeen",
        }
    }

    pub fn tier(self) -> StorageTier {
        match self {
            Self::BirthdayModalSeen => StorageTier::Session,
            Self::LastVisitedPage
            | Self::Answers
            | Self::OpenTimelineCards
            | Self::AskedQuestions
            | Self::SurpriseSeen
            | Self::MessageProgress
            | Self::KissCount => StorageTier::Durable,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::{StorageKey, StorageTier};

    #[test]
    fn every_key_has_a_unique_name() {
        let names: HashSet<_> = StorageKey::ALL.iter().map(|key| key.name()).collect();
        assert_eq!(names.len(), StorageKey::ALL.len());
    }

    #[test]
    fn only_the_birthday_modal_flag_is_session_scoped() {
        let session: Vec<_> = StorageKey::ALL
            .iter()
            .filter(|key| key.tier() == StorageTier::Session)
            .collect();
        assert_eq!(session, vec![&StorageKey::BirthdayModalSeen]);
    }
}
