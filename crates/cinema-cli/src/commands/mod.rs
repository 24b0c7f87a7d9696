pub mod activity;
pub mod browse;
pub mod clear;
pub mod config;
pub mod context;
pub mod interactive;
pub mod loading;
pub mod prompts;
pub mod render;
pub mod session;
pub mod toggle;
