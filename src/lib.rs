//! Menulink Billing - Payment and Subscription Reconciliation Engine
//!
//! This crate turns payment-gateway transactions into durable, consistent
//! subscription entitlements for tenant accounts. It reconciles two
//! independent at-least-once confirmation channels (the client-initiated
//! verify call and the gateway-initiated webhook) into one authoritative
//! record without double-crediting or losing a legitimate payment.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
