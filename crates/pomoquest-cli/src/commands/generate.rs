//! One-shot quest and news generation. Nothing is charged or stored.

use pomoquest_core::{market, provider, Config, ValidationError};

pub async fn quest() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let provider = provider::from_config(&config.provider);
    let draft = provider.generate_quest().await;
    println!("{}", serde_json::to_string_pretty(&draft)?);
    Ok(())
}

pub async fn news(company_id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let company = market::company(company_id).ok_or_else(|| ValidationError::InvalidValue {
        field: "company",
        message: format!("unknown company '{company_id}'"),
    })?;
    let config = Config::load()?;
    let provider = provider::from_config(&config.provider);
    println!("{}", provider.investment_news(company).await);
    Ok(())
}
