pub mod datetime;
pub mod fetch;
pub mod table;
