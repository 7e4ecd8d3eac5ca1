pub mod asset_service;
pub mod asset_store;
