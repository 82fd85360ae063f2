/// Base URL used when `API_BASE_URL` is not configured.
/// The dev server proxies `/api` to the backend's `/api/v1`.
pub const DEFAULT_API_BASE_URL: &str = "/api";

/// localStorage key of the persisted bearer token
pub const DEFAULT_TOKEN_STORAGE_KEY: &str = "token";

/// Id of the element the app mounts into
pub const APP_ROOT_ID: &str = "app";

pub const NAME_MAX_LEN: usize = 64;
pub const SUR_NAME_MAX_LEN: usize = 64;
pub const FULL_NAME_MAX_LEN: usize = 130;

pub const LOGIN_FAILED_FALLBACK: &str = "Login failed";
pub const FETCH_USERS_FAILED_FALLBACK: &str = "Failed to fetch users";
