pub mod models;
pub mod session;
pub mod sites;
pub mod theme;
