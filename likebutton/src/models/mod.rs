pub mod action;
pub mod action_url;
pub mod item_id;
pub mod like_button;
pub mod toggle_response;
