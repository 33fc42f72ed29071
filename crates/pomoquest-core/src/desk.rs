//! Investment desk: buy a share, then read the news about it.

use std::sync::Arc;

use crate::action::Action;
use crate::events::{Event, RejectReason};
use crate::flight::FlightGate;
use crate::market::{self, Company};
use crate::provider::ContentProvider;
use crate::store::Store;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Investment {
    Completed {
        company: &'static Company,
        shares: u32,
        news: String,
    },
    UnknownCompany(String),
    /// Research for some company is still running.
    InFlight,
    Unaffordable { cost: u64, balance: u64 },
}

/// One gate for the whole desk, whatever the company.
pub struct InvestmentDesk {
    store: Arc<Store>,
    provider: Arc<dyn ContentProvider>,
    gate: FlightGate,
}

impl InvestmentDesk {
    pub fn new(store: Arc<Store>, provider: Arc<dyn ContentProvider>) -> Self {
        Self {
            store,
            provider,
            gate: FlightGate::new(),
        }
    }

    pub fn is_researching(&self) -> bool {
        self.gate.is_busy()
    }

    pub async fn invest(&self, company_id: &str) -> Investment {
        let Some(company) = market::company(company_id) else {
            return Investment::UnknownCompany(company_id.to_string());
        };
        let Some(_permit) = self.gate.try_acquire() else {
            tracing::debug!(company = company.id, "investment suppressed, research in flight");
            return Investment::InFlight;
        };

        let events = self.store.dispatch(Action::Invest {
            company_id: company.id.to_string(),
            cost: company.cost,
        });
        let shares = match events.first() {
            Some(Event::Invested { shares, .. }) => *shares,
            Some(Event::Rejected {
                reason: RejectReason::InsufficientFunds { cost, balance },
                ..
            }) => {
                return Investment::Unaffordable {
                    cost: *cost,
                    balance: *balance,
                }
            }
            _ => {
                return Investment::Unaffordable {
                    cost: company.cost,
                    balance: self.store.snapshot().coins,
                }
            }
        };

        let news = self.provider.investment_news(company).await;
        tracing::info!(company = company.id, shares, "investment completed");
        Investment::Completed {
            company,
            shares,
            news,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::OfflineProvider;

    fn desk() -> (Arc<Store>, InvestmentDesk) {
        let store = Arc::new(Store::default());
        let desk = InvestmentDesk::new(store.clone(), Arc::new(OfflineProvider));
        (store, desk)
    }

    #[tokio::test]
    async fn buys_a_share_with_news() {
        let (store, desk) = desk();
        let Investment::Completed {
            company,
            shares,
            news,
        } = desk.invest("pixel_power").await
        else {
            panic!("Expected a completed investment");
        };
        assert_eq!(company.id, "pixel_power");
        assert_eq!(shares, 1);
        assert!(news.contains("Pixel Power Inc."));
        assert_eq!(store.snapshot().coins, 0);
    }

    #[tokio::test]
    async fn unknown_company_touches_nothing() {
        let (store, desk) = desk();
        assert_eq!(
            desk.invest("acme").await,
            Investment::UnknownCompany("acme".into())
        );
        assert_eq!(store.snapshot(), crate::snapshot::Snapshot::default());
    }

    #[tokio::test]
    async fn expensive_company_is_unaffordable() {
        let (store, desk) = desk();
        assert_eq!(
            desk.invest("pomo_pro").await,
            Investment::Unaffordable {
                cost: 100,
                balance: 50
            }
        );
        assert_eq!(store.snapshot().shares("pomo_pro"), 0);
    }
}
