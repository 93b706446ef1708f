//! Gradle cache restore contract
//!
//! Defines the key templates the step restores by, the request handed to
//! the restorer, and the restorer seam itself.
//!
//! # Key resolution
//!
//! | Order | Template | Match |
//! |-------|----------|-------|
//! | 1 | `{{ .OS }}-{{ .Arch }}-gradle-cache-{{ checksum ... }}` | exact |
//! | 2 | `{{ .OS }}-{{ .Arch }}-gradle-cache-` | prefix, most recent |
//!
//! Placeholders are resolved by the cache client, not here.

pub mod keys;
pub mod request;
pub mod restorer;

pub use keys::{cache_keys, CACHE_KEYS, CHECKSUM_GLOBS, KEY_PREFIX};
pub use request::{RestoreRequest, STEP_ID};
pub use restorer::{
    CommandRestorer, CommandRestorerFactory, Restorer, RestorerFactory, CACHE_CLIENT_ENV_VAR,
    DEFAULT_CACHE_CLIENT, REQUEST_ENV_VAR,
};
