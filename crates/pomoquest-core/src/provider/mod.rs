//! Content providers: quests and investment news.
//!
//! A provider never fails. The remote client can, so [`Generative`] wraps
//! it and substitutes offline content on any error, and [`Paced`] holds each
//! answer back until a minimum delay has elapsed.

mod gemini;
mod offline;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::config::ProviderConfig;
use crate::credentials;
use crate::market::Company;
use crate::quest::QuestDraft;

pub use gemini::GeminiClient;
pub use offline::{OfflineProvider, OFFLINE_NEWS};

#[async_trait]
pub trait ContentProvider: Send + Sync {
    /// Short label for logs and status output.
    fn name(&self) -> &str;

    async fn generate_quest(&self) -> QuestDraft;

    async fn investment_news(&self, company: &Company) -> String;
}

/// Remote generation with an offline fallback.
pub struct Generative {
    remote: Option<GeminiClient>,
    offline: OfflineProvider,
}

impl Generative {
    pub fn new(remote: Option<GeminiClient>) -> Self {
        Self {
            remote,
            offline: OfflineProvider,
        }
    }

    pub fn offline() -> Self {
        Self::new(None)
    }

    pub fn is_remote(&self) -> bool {
        self.remote.is_some()
    }
}

#[async_trait]
impl ContentProvider for Generative {
    fn name(&self) -> &str {
        if self.remote.is_some() {
            "gemini"
        } else {
            "offline"
        }
    }

    async fn generate_quest(&self) -> QuestDraft {
        let Some(remote) = &self.remote else {
            return self.offline.random_quest();
        };
        match remote.quest().await {
            Ok(draft) => draft,
            Err(e) => {
                tracing::warn!(error = %e, "quest generation failed, using offline quest");
                self.offline.random_quest()
            }
        }
    }

    async fn investment_news(&self, company: &Company) -> String {
        let Some(remote) = &self.remote else {
            return self.offline.random_news(company);
        };
        match remote.news(company).await {
            Ok(news) => news,
            Err(e) => {
                tracing::warn!(company = company.id, error = %e, "news generation failed, using offline news");
                self.offline.random_news(company)
            }
        }
    }
}

/// Holds every answer until a minimum latency has passed.
pub struct Paced<P> {
    inner: P,
    quest_floor: Duration,
    news_floor: Duration,
}

impl<P> Paced<P> {
    pub fn new(inner: P, quest_floor: Duration, news_floor: Duration) -> Self {
        Self {
            inner,
            quest_floor,
            news_floor,
        }
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }
}

#[async_trait]
impl<P: ContentProvider> ContentProvider for Paced<P> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn generate_quest(&self) -> QuestDraft {
        let (draft, ()) = tokio::join!(
            self.inner.generate_quest(),
            tokio::time::sleep(self.quest_floor)
        );
        draft
    }

    async fn investment_news(&self, company: &Company) -> String {
        let (news, ()) = tokio::join!(
            self.inner.investment_news(company),
            tokio::time::sleep(self.news_floor)
        );
        news
    }
}

/// Build the provider described by `cfg`.
///
/// Without a usable API key the remote client is skipped entirely.
pub fn from_config(cfg: &ProviderConfig) -> Arc<dyn ContentProvider> {
    let remote = match credentials::resolve_api_key(cfg) {
        Some(key) => match GeminiClient::new(cfg, key) {
            Ok(client) => Some(client),
            Err(e) => {
                tracing::warn!(error = %e, "cannot build text-generation client, staying offline");
                None
            }
        },
        None => {
            tracing::debug!("no API key configured, using offline content");
            None
        }
    };
    Arc::new(Paced::new(
        Generative::new(remote),
        Duration::from_millis(cfg.quest_latency_ms),
        Duration::from_millis(cfg.news_latency_ms),
    ))
}
