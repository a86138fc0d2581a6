//! `ats-spatial` — path network, edge geometry, and routing.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                   |
//! |-------------|------------------------------------------------------------|
//! | [`network`] | `PathNetwork` (CSR + R-tree), `PathNetworkBuilder`         |
//! | [`line`]    | `LengthIndexedLine` — 1-D polyline parameterization        |
//! | [`router`]  | `Router` trait, `Route`, `AStarRouter`                     |
//! | [`error`]   | `SpatialError`, `SpatialResult<T>`                         |
//!
//! # Geometry model
//!
//! Each undirected path segment owns one polyline geometry shared by its two
//! directed edges.  The movement engine parameterizes the polyline by arc
//! length (`LengthIndexedLine`) and decides traversal direction at edge
//! entry, so geometry orientation is independent of travel direction.

pub mod error;
pub mod line;
pub mod network;
pub mod router;


pub use error::{SpatialError, SpatialResult};
pub use line::LengthIndexedLine;
pub use network::{PathNetwork, PathNetworkBuilder};
pub use router::{AStarRouter, Route, Router};
