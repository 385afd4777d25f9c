use nutype::nutype;

pub mod contact;
pub mod email_address;

/// Identifier of the origin of a request, used as the rate limiter's
/// per-bucket key. Usually a client IP address, but any opaque string works;
/// requests without a usable origin all share the `"unknown"` bucket.
#[nutype(derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Display,
    From,
    Deref,
    Serialize,
    Deserialize,
))]
pub struct SourceId(String);

impl SourceId {
    pub const UNKNOWN: &'static str = "unknown";
}
