pub mod beneficiaries;
pub mod configuration;
pub mod delivery;
pub mod export;
pub mod labels;
pub mod manifest;
pub mod metrics;
pub mod orders;
