//! Gas alert flow: pick a network, show its prices, optionally set a threshold

use crate::handlers::engine::{DialogEngine, Reply};
use crate::handlers::texts;
use crate::models::{GasPrices, Network};
use crate::state::context::keys;
use crate::state::{Flow, GasStep, Session};
use crate::utils::errors::Result;
use crate::utils::helpers::parse_threshold;
use crate::utils::logging::{log_api_error, log_user_action};

pub async fn advance(
    engine: &DialogEngine,
    session: &mut Session,
    step: GasStep,
    input: &str,
) -> Result<Reply> {
    let store = engine.store();

    match step {
        GasStep::AwaitingNetwork => {
            let Some(network) = Network::from_choice(input) else {
                session.transition(store, Flow::Idle).await?;
                return Ok(Reply::text(texts::INVALID_NETWORK, true));
            };

            let address = session.address.clone();
            match engine.fetch(&address, engine.provider().gas_prices(network)).await {
                Ok(prices) => {
                    session
                        .transition(store, Flow::GasAlert(GasStep::AwaitingConfirmation { network: Some(network) }))
                        .await?;
                    Ok(Reply::text(prices_message(network, &prices), false))
                }
                Err(e) => {
                    log_api_error("gas_prices", &e.to_string(), Some(network.display_name()));
                    session.transition(store, Flow::Idle).await?;
                    Ok(Reply::text(texts::GAS_FAILED, true))
                }
            }
        }
        GasStep::AwaitingConfirmation { network } => {
            if input == "1" {
                session
                    .transition(store, Flow::GasAlert(GasStep::AwaitingThreshold { network }))
                    .await?;
                Ok(Reply::text(texts::ASK_THRESHOLD, false))
            } else {
                session.transition(store, Flow::Idle).await?;
                Ok(Reply::text(texts::NO_ALERT, true))
            }
        }
        GasStep::AwaitingThreshold { network } => {
            let Some(threshold) = parse_threshold(input) else {
                return Ok(Reply::text(texts::INVALID_THRESHOLD, false));
            };
            let Some(network) = network else {
                return engine.reset_corrupted(session, "no pending network for the gas alert flow").await;
            };

            let address = session.address.clone();
            store.set(&keys::alert(&address, network), &threshold.to_string()).await?;
            session.transition(store, Flow::Idle).await?;

            let details = format!("{}:{}", network.id(), threshold);
            log_user_action(&address, "set_gas_alert", Some(details.as_str()));
            Ok(Reply::text(
                format!(
                    "Alert set! You'll be notified when the gas price on {} drops below {} Gwei.",
                    network.display_name(),
                    threshold
                ),
                true,
            ))
        }
    }
}

pub fn prices_message(network: Network, prices: &GasPrices) -> String {
    format!(
        "Current gas prices for {}:\nSafe: {:.2} Gwei\nStandard: {:.2} Gwei\nFast: {:.2} Gwei\nBase Fee: {:.2} Gwei\n\n\
         Would you like to set up an alert?\n1. Yes\n2. No",
        network.display_name(),
        prices.safe,
        prices.standard,
        prices.fast,
        prices.base_fee
    )
}
