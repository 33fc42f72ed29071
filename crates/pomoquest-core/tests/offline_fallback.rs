//! Provider selection without any API key.
//!
//! Kept in its own test binary: it clears `GEMINI_API_KEY` for the process.

use pomoquest_core::config::ProviderConfig;
use pomoquest_core::credentials::API_KEY_ENV;
use pomoquest_core::market;
use pomoquest_core::provider::{self, OFFLINE_NEWS};
use pomoquest_core::quest::OFFLINE_QUESTS;

/// Test: no key in config, env or keyring routes every request to the
/// offline tables without an error.
#[tokio::test]
async fn test_no_credential_serves_offline_content() {
    std::env::remove_var(API_KEY_ENV);
    let cfg = ProviderConfig {
        api_key: None,
        keyring: false,
        quest_latency_ms: 0,
        news_latency_ms: 0,
        ..ProviderConfig::default()
    };

    let provider = provider::from_config(&cfg);
    assert_eq!(provider.name(), "offline");

    let draft = provider.generate_quest().await;
    assert!(OFFLINE_QUESTS
        .iter()
        .any(|(text, reward)| *text == draft.text && *reward == draft.reward));

    let company = market::company("code_crafters").unwrap();
    let news = provider.investment_news(company).await;
    assert!(news.contains(company.name));
    assert!(OFFLINE_NEWS
        .iter()
        .any(|template| template.replace("{company}", company.name) == news));
}
