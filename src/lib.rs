//! Read the active Kerberos ticket granting ticket out of the Linux kernel
//! keyring credential cache.
//!
//! The cache is found by walking `_persistent.<uid>` and `_krb` from an anchor
//! keyring, following the collection's primary pointer to a subsidiary, and
//! reading that subsidiary's default principal and its realm's TGT. The result
//! is a [`ccache::KeyringCredential`] for a Kerberos client to consume.

// #![deny(warnings)]

#![warn(unused_extern_crates)]
// Enable some groups of clippy lints.
#![deny(clippy::suspicious)]
#![deny(clippy::perf)]
// Specific lints to enforce.
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::await_holding_lock)]
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::trivially_copy_pass_by_ref)]
#![deny(clippy::disallowed_types)]
#![deny(clippy::manual_let_else)]
#![allow(clippy::unreachable)]

pub mod ccache;
pub mod config;
pub mod constants;
pub mod error;
