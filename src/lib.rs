pub mod attributes;
pub mod background;
pub mod config;
pub mod data_provider;
pub mod endpoints;
pub mod error;
pub mod events;
pub mod formatting;
pub mod i18n;
pub mod models;
pub mod types;
pub mod views;
pub mod widget;

#[cfg(any(test, feature = "development"))]
pub mod fixtures;

#[cfg(any(test, feature = "development"))]
pub mod dev;
