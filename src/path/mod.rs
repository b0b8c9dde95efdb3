mod account;

pub use account::{AccountDatabase, AccountError, SystemAccounts};
