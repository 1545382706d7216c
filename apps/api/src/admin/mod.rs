// Admin panel API: cookie session gate plus list / hide / delete / stats.

pub mod auth;
pub mod handlers;
