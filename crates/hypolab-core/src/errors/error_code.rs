//! Stable machine-readable error codes.

pub const UNKNOWN_VARIABLE: &str = "HYPO_UNKNOWN_VARIABLE";
pub const DUPLICATE_VARIABLE: &str = "HYPO_DUPLICATE_VARIABLE";
pub const SELF_LOOP: &str = "HYPO_SELF_LOOP";
pub const DUPLICATE_EDGE: &str = "HYPO_DUPLICATE_EDGE";
pub const MISSING_LOCKED_VALUE: &str = "HYPO_MISSING_LOCKED_VALUE";
pub const UNMANIPULABLE_VARIABLE: &str = "HYPO_UNMANIPULABLE_VARIABLE";
pub const NOT_FOUND: &str = "HYPO_NOT_FOUND";
pub const DUPLICATE_NAME: &str = "HYPO_DUPLICATE_NAME";
pub const CONFIG_PARSE: &str = "HYPO_CONFIG_PARSE";
pub const CONFIG_IO: &str = "HYPO_CONFIG_IO";

/// Maps an error value to one of the codes above.
pub trait LabErrorCode {
    fn error_code(&self) -> &'static str;
}
