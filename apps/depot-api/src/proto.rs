//! Generated gRPC server code for the inventory protocol.
//!
//! This module includes the Rust code generated from
//! `proto/depot_inventory.proto`. Well-known types map to `prost_types`
//! (`Timestamp`) and `()` (`Empty`).

tonic::include_proto!("depot.inventory.v1");
