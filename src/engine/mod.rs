pub mod booking;
pub mod history;
pub mod payment;
pub mod pricing;
pub mod runner;
pub mod tracking;
