//! Settings and request-scoped types shared across the gateway crates.

pub mod context;
pub mod settings;

pub use context::RequestContext;

/// Environment variable set by the AWS Lambda runtime.
const LAMBDA_RUNTIME_ENV: &str = "AWS_LAMBDA_RUNTIME_API";

/// Whether the process runs inside the AWS Lambda runtime.
pub fn running_on_lambda() -> bool {
    std::env::var_os(LAMBDA_RUNTIME_ENV).is_some()
}
