//! Tree API clients.
//!
//! [`TreeApi`] speaks the v1 tree API and [`TreeApiV2`] the v2 one. Both are
//! cheap to construct (no I/O) and safe to share behind an `Arc`.

pub mod default;
pub mod v1;
pub mod v2;

pub use default::{default_tree_api, get_entries};
pub use v1::TreeApi;
pub use v2::TreeApiV2;

use crate::config::{ApiVersion, ClientConfig};
use crate::{Error, ErrorContext, Result};

fn ensure_version(config: &ClientConfig, expected: ApiVersion) -> Result<()> {
    if config.version != expected {
        return Err(Error::construction_with_context(
            format!(
                "{} client cannot be built from a {} configuration",
                expected, config.version
            ),
            ErrorContext::new()
                .with_field_path("version")
                .with_source("client_constructor"),
        ));
    }
    Ok(())
}
