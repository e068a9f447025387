pub mod beneficiaries;
pub mod configuration;
pub mod export;
pub mod health;
pub mod labels;
pub mod metrics;
pub mod orders;
