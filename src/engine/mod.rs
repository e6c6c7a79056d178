//! Apply engine - parallel targeted applies reporting into a shared registry

pub mod executor;
