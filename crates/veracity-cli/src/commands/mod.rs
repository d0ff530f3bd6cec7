//! Command implementations.

pub mod analyze;
pub mod check;
pub mod config;
pub mod extract;
pub mod fact_check;

pub use self::analyze::execute_analyze;
pub use self::check::execute_check;
pub use self::config::execute_config;
pub use self::extract::execute_extract;
pub use self::fact_check::execute_fact_check;
