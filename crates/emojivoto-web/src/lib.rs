#![doc = include_str!("../README.md")]

pub mod bot;
pub mod gateway;
