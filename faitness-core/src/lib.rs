pub mod db;
pub mod error;
pub mod logging;
pub mod validation;

#[cfg(feature = "client")]
pub mod tools;
