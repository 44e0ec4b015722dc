#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("ESA_ACCESS_TOKEN environment variable is required")]
    MissingAccessToken,

    #[error("Invalid header value: {0}")]
    InvalidHeader(String),

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}
