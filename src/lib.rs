pub mod catalog;
pub mod error;
pub mod ledger;
pub mod menu;
pub mod model;
pub mod prompt;
