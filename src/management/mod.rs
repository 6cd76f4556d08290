mod session;
mod storage;

pub use session::SessionManager;
pub use session::TOKEN_KEY;
pub use session::build_login_url;
pub use session::extract_access_token;
pub use storage::FileStorage;
pub use storage::MemoryStorage;
pub use storage::Storage;
pub use storage::StorageError;
