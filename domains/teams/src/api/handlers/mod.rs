//! HTTP handlers for the Teams domain

pub mod team_users;
pub mod teams;
