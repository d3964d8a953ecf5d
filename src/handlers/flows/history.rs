//! Transaction history flow: collect a wallet, collect a chain, fetch

use crate::handlers::engine::{DialogEngine, Reply};
use crate::handlers::texts;
use crate::models::Chain;
use crate::state::{Flow, HistoryStep, Session};
use crate::utils::errors::Result;
use crate::utils::helpers::is_wallet_address;
use crate::utils::logging::{log_api_error, log_user_action};

pub async fn advance(
    engine: &DialogEngine,
    session: &mut Session,
    step: HistoryStep,
    input: &str,
) -> Result<Reply> {
    match step {
        HistoryStep::AwaitingAddress => {
            if !is_wallet_address(input) {
                return Ok(Reply::text(texts::INVALID_WALLET, false));
            }

            let flow = Flow::History(HistoryStep::AwaitingChain { wallet: Some(input.to_string()) });
            session.transition(engine.store(), flow).await?;
            Ok(Reply::text(texts::ASK_CHAIN, false))
        }
        HistoryStep::AwaitingChain { wallet } => {
            let Some(chain) = Chain::from_choice(input) else {
                return Ok(Reply::text(texts::INVALID_CHAIN, false));
            };
            let Some(wallet) = wallet else {
                return engine.reset_corrupted(session, "no pending wallet for the history flow").await;
            };

            let address = session.address.clone();
            let result = engine
                .fetch(&address, engine.provider().transaction_history(&wallet, chain))
                .await;

            // The flow ends here whatever the provider answered.
            session.transition(engine.store(), Flow::Idle).await?;

            match result {
                Ok(history) => {
                    log_user_action(&address, "transaction_history", Some(chain.slug()));
                    Ok(Reply::text(history, true))
                }
                Err(e) => {
                    log_api_error("transaction_history", &e.to_string(), Some(chain.slug()));
                    Ok(Reply::text(texts::HISTORY_FAILED, true))
                }
            }
        }
    }
}
