//! MQTT5 topic format substitution, extraction, wildcard matching, and
//! validation (spec §4.4), plus the shared-subscription prefix and
//! any-executor sentinel carried over from the original token header.

mod error;
mod extract;
mod filter;
mod format;
mod tokens;
mod validate;
mod values;

pub use error::TopicError;
pub use extract::extract;
pub use filter::matches_filter;
pub use format::{format, format_shared};
pub use tokens::{ANY_EXECUTOR_ID, MULTI_LEVEL_WILDCARD, SERVICE_GROUP_PREFIX, SINGLE_LEVEL_WILDCARD};
pub use validate::validate_format;
pub use values::{ExtractedTokens, TopicValues};
