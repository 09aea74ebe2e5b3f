//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the port traits
//! defined in cubebot-core on top of embedded-hal 1.0:
//!
//! - Motor controllers (servo-style PWM speed controllers)
//! - Limit switches (reed switches on a digital input)

#![no_std]
#![deny(unsafe_code)]

pub mod motor;
pub mod switch;
