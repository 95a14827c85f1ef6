pub mod fixture;
mod view_test;
