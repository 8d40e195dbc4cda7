//! Compute (Nova) bindings

pub mod defsecrules;
pub mod startstop;
