pub mod add;
pub mod config;
pub mod day;
pub mod delete;
pub mod show;
pub mod theme;
pub mod view;
