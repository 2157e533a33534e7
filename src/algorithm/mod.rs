//! Algorithm implementations
//!
//! This module contains the segregation measures and the district ranking
//! built on them.

pub mod segregation;
