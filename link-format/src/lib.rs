//! FILENAME: link-format/src/lib.rs
//! Shareable-link encoding for dashboard state.
//!
//! Layers:
//!   - radix: base-36 segment rendering
//!   - dictionary: dataset-derived value dictionaries and their hash
//!   - token: the compact index token (current format)
//!   - short: the legacy base64url JSON token
//!   - query: query-string parsing and the restore priority ladder
//!   - error: decode failure reasons

pub mod dictionary;
pub mod error;
pub mod query;
pub mod radix;
pub mod short;
pub mod token;

pub use dictionary::{build_dictionaries, dictionary_hash, Dictionaries, SCOPE_SEP};
pub use error::LinkError;
pub use query::{resolve_query, share_query, QueryParams, QueryResolution};
pub use short::{decode_short_token, encode_short_token, try_decode_short_token};
pub use token::{
    decode_index_token, encode_index_token, try_decode_index_token, DecodedIndexToken,
    TOKEN_VERSION,
};
