pub mod articles;
pub mod auth;
pub mod calculator;
pub mod categories;
pub mod gallery;
pub mod organization;
pub mod pages;
pub mod prices;
pub mod project_images;
pub mod projects;
pub mod search;
pub mod uploads;
