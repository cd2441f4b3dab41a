pub mod catalog;
pub mod cells;
pub mod constraints;
pub mod ledger;
pub mod shared;
