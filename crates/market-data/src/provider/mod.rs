//! Quote provider abstractions and implementations.
//!
//! The core crate only depends on the [`QuoteProvider`] trait; concrete
//! providers live in submodules and are wired by the application.

mod traits;

pub mod brapi;

pub use traits::QuoteProvider;
