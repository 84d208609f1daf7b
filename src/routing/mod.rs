//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Request path
//!     → router.rs (route lookup)
//!     → matcher.rs (evaluate pattern segments)
//!     → Return: RouteMatch or None
//!
//! Route Compilation (at startup):
//!     RouteConfig[]
//!     → Compile patterns
//!     → Freeze as immutable RouteTable
//! ```
//!
//! The subdomain rewriter consults a [`Resolver`] to decide whether a path
//! already reaches a route before attempting a rewrite.

pub mod matcher;
pub mod router;

pub use router::{Resolver, RouteMatch, RouteTable};
