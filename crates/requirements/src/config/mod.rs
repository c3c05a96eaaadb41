//! Validator configuration.
//!
//! - [`Configuration`]: the immutable policy switches bound to each validator
//! - [`ConfigurationUpdater`]: stages a copy-on-write update of a factory's configuration
//! - [`ExceptionTransformer`]: maps a failure's error to the error the caller wants
//! - [`StringMappers`]: renders values inside failure messages
//! - [`ConfigurationSettings`]: the serde-loadable subset of a configuration

mod configuration;
mod string_mappers;
mod transformer;
mod updater;

pub use configuration::{Configuration, ConfigurationBuilder, ConfigurationSettings, EqualityMethod};
pub use string_mappers::{MutableStringMappers, StringMapper, StringMappers};
pub use transformer::ExceptionTransformer;
pub use updater::ConfigurationUpdater;
