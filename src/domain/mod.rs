pub mod entities;
pub mod gateways;
