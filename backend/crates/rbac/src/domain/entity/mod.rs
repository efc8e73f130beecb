//! Entity Module

pub mod decision;
pub mod principal;
pub mod role;
