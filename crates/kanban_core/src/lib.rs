pub mod clock;
pub mod config;
pub mod error;
pub mod form;
pub mod model;
pub mod notify;
pub mod report;
pub mod seed;
pub mod storage;
pub mod store;
