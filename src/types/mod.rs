//! Request and response payloads of the Nessie tree API.
//!
//! Only the fields callers commonly read are modelled; unknown fields are
//! ignored on decode so newer servers keep working.

pub mod entries;
pub mod references;

pub use entries::{ContentKey, EntriesResponse, Entry, GetEntriesRequest};
pub use references::{NessieConfiguration, Reference, ReferencesResponse};
