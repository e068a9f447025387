pub mod beneficiary;
pub mod delivery;
pub mod manifest;
pub mod menu;
pub mod order;
pub mod regime;
pub mod weekday;
