//! HTML-страницы блога.

pub(crate) mod home;
pub(crate) mod layout;
pub(crate) mod post;
pub(crate) mod rich_text;
