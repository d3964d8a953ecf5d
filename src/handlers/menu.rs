//! Menu option dispatch

use std::fmt::Write as _;
use tracing::warn;
use crate::handlers::engine::{DialogEngine, Reply};
use crate::handlers::texts;
use crate::models::PortfolioAnalytics;
use crate::state::context::subscribe;
use crate::state::{Flow, GasStep, HistoryStep, Session};
use crate::utils::errors::Result;
use crate::utils::logging::{log_api_error, log_user_action};

/// Handle an option code typed while the menu is shown
pub async fn dispatch(engine: &DialogEngine, session: &mut Session, input: &str) -> Result<Reply> {
    let address = session.address.clone();
    let store = engine.store();

    let reply = match input {
        "1" => {
            session.transition(store, Flow::Idle).await?;
            market_sentiment(engine, &address).await
        }
        "2" => {
            subscribe(store, &address).await?;
            session.transition(store, Flow::Idle).await?;
            log_user_action(&address, "subscribe", None);
            Reply::text(texts::SUBSCRIBED, true)
        }
        "3" => {
            session.transition(store, Flow::Idle).await?;
            account_balance(engine, &address).await?
        }
        "4" => {
            session.transition(store, Flow::History(HistoryStep::AwaitingAddress)).await?;
            Reply::text(texts::ASK_WALLET, false)
        }
        "5" => {
            session.transition(store, Flow::Idle).await?;
            portfolio(engine, &address).await?
        }
        "6" => {
            session.transition(store, Flow::GasAlert(GasStep::AwaitingNetwork)).await?;
            Reply::text(texts::ASK_NETWORK, false)
        }
        _ => Reply::text(texts::INVALID_MENU_OPTION, true),
    };

    Ok(reply)
}

pub async fn market_sentiment(engine: &DialogEngine, address: &str) -> Reply {
    match engine.fetch(address, engine.provider().market_summary()).await {
        Ok(summary) => Reply::text(summary, true),
        Err(e) => {
            log_api_error("market_summary", &e.to_string(), Some(address));
            Reply::text(texts::MARKET_SENTIMENT_FAILED, true)
        }
    }
}

pub async fn account_balance(engine: &DialogEngine, address: &str) -> Result<Reply> {
    let Some(wallet) = engine.resolve_wallet(address).await? else {
        return Ok(Reply::text(texts::WALLET_REQUIRED, true));
    };

    Ok(match engine.fetch(address, engine.provider().account_balance(&wallet)).await {
        Ok(balances) => Reply::text(balances, true),
        Err(e) => {
            log_api_error("account_balance", &e.to_string(), Some(address));
            Reply::text(texts::BALANCE_FAILED, true)
        }
    })
}

pub async fn portfolio(engine: &DialogEngine, address: &str) -> Result<Reply> {
    let Some(wallet) = engine.resolve_wallet(address).await? else {
        return Ok(Reply::text(texts::WALLET_REQUIRED, true));
    };

    Ok(match engine.fetch(address, engine.provider().portfolio_analytics(&wallet)).await {
        Ok(analytics) => Reply::text(format_portfolio(&analytics), true),
        Err(e) => {
            warn!(address = address, wallet = %wallet, "Portfolio analytics unavailable");
            log_api_error("portfolio_analytics", &e.to_string(), Some(address));
            Reply::text(texts::PORTFOLIO_FAILED, true)
        }
    })
}

pub fn format_portfolio(analytics: &PortfolioAnalytics) -> String {
    let mut message = String::from("Portfolio Analytics:\n");
    let _ = writeln!(message, "Total Value: ${:.2}\n", analytics.total_value);
    message.push_str("Performance:\n");
    let _ = writeln!(message, "Daily: {:.2}%\n", analytics.daily_change * 100.0);
    message.push_str("Top Holdings:");

    for holding in &analytics.top_holdings {
        let _ = write!(message, "\n{}: {:.2}%", holding.symbol, holding.share * 100.0);
    }

    message
}
