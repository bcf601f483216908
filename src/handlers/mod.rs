pub mod legacy;
pub mod purchase_orders;
pub mod reports;
pub mod system;
