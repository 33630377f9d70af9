//! LUMEN admin panel library exports.

pub mod api_client;
pub mod config;
pub mod error;
pub mod events;
pub mod keys;
pub mod nav;
pub mod notifications;
pub mod pages;
pub mod state;
pub mod table;
pub mod theme;
pub mod views;
pub mod widgets;
