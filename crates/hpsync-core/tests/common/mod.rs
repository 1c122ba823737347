#![allow(dead_code)]

pub mod homepage_server;
