//! Value Object Module

pub mod action;
pub mod resource_kind;
pub mod role_name;
