//! Built-in content used when no remote generator is reachable.

use async_trait::async_trait;
use rand::seq::SliceRandom;

use super::ContentProvider;
use crate::market::Company;
use crate::quest::{QuestDraft, OFFLINE_QUESTS};

/// `{company}` is replaced with the company name.
pub const OFFLINE_NEWS: &[&str] = &[
    "Whispers on the digital street say {company} is about to unveil a game-changing product. Stock prices are buzzing!",
    "A surprise audit reveals {company} has been secretly stockpiling good ideas. Experts predict a surge in innovation.",
    "{company} just poached a top mind from a rival corporation. Big things are expected!",
    "Analysts are upgrading their ratings for {company} after a series of smart, strategic moves. The future looks bright!",
    "Rumor has it {company} is testing a revolutionary new technology. The market is holding its breath.",
    "Leaked documents suggest {company} has exceeded all of its quarterly goals. Insiders are celebrating.",
    "{company}'s recent charity drive has won them massive public support. Their brand has never been stronger.",
    "A bold marketing campaign from {company} has gone viral, capturing the attention of millions.",
    "There's a growing sense of optimism as {company} reportedly secures a major contract.",
    "A reliable source reports that {company} is on the verge of a major breakthrough! Early investors are buzzing.",
];

#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineProvider;

impl OfflineProvider {
    pub fn random_quest(&self) -> QuestDraft {
        let (text, reward) = OFFLINE_QUESTS
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(("Drink a glass of water.", 5));
        QuestDraft {
            text: text.to_string(),
            reward,
        }
    }

    pub fn random_news(&self, company: &Company) -> String {
        let template = OFFLINE_NEWS
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or("Rumors are swirling around {company}! Something big might be happening soon.");
        template.replace("{company}", company.name)
    }
}

#[async_trait]
impl ContentProvider for OfflineProvider {
    fn name(&self) -> &str {
        "offline"
    }

    async fn generate_quest(&self) -> QuestDraft {
        self.random_quest()
    }

    async fn investment_news(&self, company: &Company) -> String {
        self.random_news(company)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::COMPANIES;

    #[test]
    fn quests_come_from_the_table() {
        let provider = OfflineProvider;
        for _ in 0..50 {
            let draft = provider.random_quest();
            assert!(OFFLINE_QUESTS
                .iter()
                .any(|(text, reward)| *text == draft.text && *reward == draft.reward));
        }
    }

    #[test]
    fn news_names_the_company() {
        let provider = OfflineProvider;
        for company in COMPANIES {
            let news = provider.random_news(company);
            assert!(news.contains(company.name));
            assert!(!news.contains("{company}"));
        }
    }

    #[test]
    fn every_template_has_a_placeholder() {
        assert!(OFFLINE_NEWS.iter().all(|t| t.contains("{company}")));
    }
}
