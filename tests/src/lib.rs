//! End-to-end checks of the ARP engine against simulated link segments.

mod engine;
mod support;
