//! Shared constants for test infrastructure

// Layer IDs (64 lowercase hex characters)
pub const LAYER_TOP: &str = "1111111111111111111111111111111111111111111111111111111111111111";
pub const LAYER_MID: &str = "2222222222222222222222222222222222222222222222222222222222222222";
pub const LAYER_BASE: &str = "3333333333333333333333333333333333333333333333333333333333333333";
pub const LAYER_OTHER: &str = "abcdefabcdefabcdefabcdefabcdefabcdefabcdefabcdefabcdefabcdefabcd";

// Blob digests paired with the layers above
pub const BLOB_TOP: &str = "sha256:a3ed95caeb02ffe68cdd9fd84406680ae93d633cb16422d00e8a7c22955b46d4";
pub const BLOB_MID: &str = "sha256:8ddc19f16526912237dd8af81971d5e4dd0587907234be2b83e249518d5b673f";
pub const BLOB_BASE: &str = "sha256:56bec22e355981d8ba0878c6c2f23b21f422f30ab0aba188b54f1ffeff59c190";

pub const MANIFEST_DIGEST: &str =
    "sha256:e6693c20186f837fc393390135d8a598a96a833917917789d63766cab6c59582";

// Credentials
pub const TEST_USERNAME: &str = "user";
pub const TEST_PASSWORD: &str = "pass";
/// `Basic base64("user:pass")`
pub const TEST_BASIC_AUTH: &str = "Basic dXNlcjpwYXNz";

pub const BASIC_CHALLENGE: &str = "Basic realm=\"cifetch-test\"";
pub const BEARER_CHALLENGE: &str =
    "Bearer realm=\"https://auth.example.com/token\",service=\"registry.example.com\"";
