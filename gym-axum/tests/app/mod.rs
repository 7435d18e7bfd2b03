mod application;
pub use application::TestApp;

mod client;
pub use client::*;
