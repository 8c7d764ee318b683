pub const SAFE_METHODS: [&str; 4] = ["GET", "HEAD", "OPTIONS", "TRACE"];

pub const DEFAULT_CSRF_COOKIE: &str = "csrftoken";
pub const DEFAULT_CSRF_HEADER: &str = "X-CSRFToken";

pub const ACTION_ATTRIBUTE: &str = "data-action";
pub const ACTION_MARKER: &str = "like";
pub const ITEM_ID_ATTRIBUTE: &str = "data-store-id";
pub const URL_ATTRIBUTE: &str = "data-url";
pub const COUNTER_ATTRIBUTE: &str = "name";
pub const COUNTER_PREFIX: &str = "count_";

pub const ICON_TAG: &str = "i";
pub const LIKED_ICON_CLASS: &str = "fas fa-lg fa-heart like-red";
pub const UNLIKED_ICON_CLASS: &str = "far fa-lg fa-heart";
