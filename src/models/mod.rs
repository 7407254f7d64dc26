//! Data transfer objects (DTOs) for the request boundary and the remote API.
//!
//! - `repository`: RepositoryReference parsed from a user-supplied URL
//! - `remote`: RemoteEntry, one item of a contents API directory listing
//! - `snapshot`: FlatFile plus the fetchRepo request/response bodies

pub mod remote;
pub mod repository;
pub mod snapshot;

pub use remote::*;
pub use repository::*;
pub use snapshot::*;
