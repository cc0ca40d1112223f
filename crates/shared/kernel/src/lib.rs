//! Kernel utilities shared across slices.
//! Keep this crate lightweight; it owns loading of the global `stacker.toml` configuration.
//!
//! ## Config loading
//! ```rust,ignore
//! use stk_kernel::config::load_config_or_default;
//! use stk_kernel::domain::config::StackerConfig;
//!
//! let cfg: StackerConfig = load_config_or_default("stacker.toml")?;
//! ```
pub mod config;

pub use stk_domain as domain;
