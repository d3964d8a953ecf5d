//! Fixed reply texts

pub const MENU: &str = "Welcome to OnChain.xyz! Choose an option:
1. Current Market Sentiment
2. Subscribe to daily Market Sentiment
3. Get account balance
4. Check wallet transaction history
5. Get Portfolio Analytics
6. Gas price alerts";

pub const WAIT_NOTICE: &str = "Please wait, I'm processing your request...";
pub const GENERIC_ERROR: &str = "An error occurred. Please try again.";
pub const INVALID_MENU_OPTION: &str = "Invalid option. Please choose a number between 1 and 6.";

pub const UNSUBSCRIBED: &str = "You are now unsubscribed. You will no longer receive Current Market Sentiment.";
pub const SUBSCRIBED: &str = "You are now subscribed to daily BTC price updates.\n\nType 'stop' to unsubscribe";

pub const MARKET_SENTIMENT_FAILED: &str =
    "Sorry, there was an error fetching the market sentiment. Please try again later.";
pub const BALANCE_FAILED: &str = "Sorry, there was an error fetching your account balance. Please try again later.";
pub const PORTFOLIO_FAILED: &str =
    "Sorry, there was an error calculating your portfolio analytics. Please try again later.";
pub const PRICE_FAILED: &str = "Sorry, there was an error fetching the Bitcoin price. Please try again later.";
pub const WALLET_REQUIRED: &str =
    "No wallet is linked to this chat yet. Link one with /wallet <address> and try again.";

// Transaction history
pub const ASK_WALLET: &str = "Please enter the wallet address you'd like to check:";
pub const INVALID_WALLET: &str = "Invalid Ethereum address. Please try again with a valid address.";
pub const ASK_CHAIN: &str = "Select the blockchain:\n1. Ethereum\n2. Polygon\n3. Binance Smart Chain";
pub const INVALID_CHAIN: &str =
    "Invalid option. Please select 1 for Ethereum, 2 for Polygon, or 3 for Binance Smart Chain.";
pub const HISTORY_FAILED: &str =
    "Sorry, there was an error fetching the transaction history. Please try again later.";

// Gas alerts
pub const ASK_NETWORK: &str = "Select a network to check gas prices:\n1. Ethereum\n2. Polygon";
pub const INVALID_NETWORK: &str = "Invalid option. Please try again.";
pub const GAS_FAILED: &str = "Sorry, there was an error fetching gas prices. Please try again later.";
pub const ASK_THRESHOLD: &str = "Enter the gas price (in Gwei) below which you'd like to be notified:";
pub const NO_ALERT: &str = "Alright, no alert will be set. Is there anything else I can help you with?";
pub const INVALID_THRESHOLD: &str = "Invalid gas price. Please enter a positive number.";
