//! Like-button toggle protocol.
//!
//! A [`controller::ToggleController`] binds to every like button of a page, posts the toggle to the
//! button's action URL with the anti-forgery token attached by the [`request::RequestLayer`], and
//! applies the server's `{liked, count}` answer to the button and to every counter of the item.

pub mod app;
pub mod constants;
pub mod controller;
pub mod dom;
pub mod errors;
pub mod markup;
pub mod models;
pub mod request;
pub mod token;
pub mod transport;
pub mod utils;
