// Public surface: submit, list, and serve wrappeds; sample seeding.

pub mod content;
pub mod handlers;
pub mod seed;
pub mod validation;
