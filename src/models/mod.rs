pub mod drone;
pub mod location;
pub mod payment;
pub mod profile;
pub mod ride;
pub mod route;
