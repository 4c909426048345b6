/// Configuration constants for the policy service API
pub mod api {
    /// Path of the namespace read RPC, relative to the endpoint
    pub const READ_NAMESPACE_PATH: &str = "/v0/namespace/read";

    /// Metadata key carrying the bearer credential
    pub const AUTHORIZATION_HEADER: &str = "authorization";

    /// Connect timeout in seconds
    pub const CONNECT_TIMEOUT_SECS: u64 = 10;

    /// Whole-request timeout in seconds
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;
}

/// Configuration constants for the context store
pub mod context {
    /// Directory under $HOME holding the store
    pub const DIR_NAME: &str = ".zed";

    /// Store file name
    pub const FILE_NAME: &str = "config.json";

    /// Env var selecting a context for one invocation
    pub const ENV_VAR: &str = "ZED_CONTEXT";

    /// Env var overriding the store path
    pub const PATH_ENV_VAR: &str = "ZED_CONFIG";

    /// How long a writer waits for the store lock, in milliseconds
    pub const LOCK_TIMEOUT_MS: u64 = 5_000;

    /// Lock files older than this are considered abandoned, in milliseconds
    pub const LOCK_STALE_MS: u64 = 30_000;

    /// Delay between lock attempts, in milliseconds
    pub const LOCK_RETRY_MS: u64 = 25;
}

/// Environment inputs for defaults used without a context
pub mod env {
    pub const ENDPOINT: &str = "ZED_ENDPOINT";
    pub const TENANT: &str = "ZED_TENANT";
    pub const TOKEN: &str = "ZED_TOKEN";
}

/// Default values for CLI
pub mod defaults {
    /// Default policy service endpoint
    pub const ENDPOINT: &str = "grpc.authzed.com:443";

    /// Default log level
    pub const LOG_LEVEL: &str = "warn";
}
