pub mod github;
pub mod page;
