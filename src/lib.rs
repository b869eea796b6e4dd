//! tfsync - sync Terraform state with live AWS resources.
//!
//! The pipeline is: `terraform init`, then for each resource kind with a
//! matching local configuration stub, enumerate live objects through the
//! paginated AWS listing APIs and bring untracked ones under management with
//! `terraform import`. Which kinds exist, how their APIs paginate and how
//! addresses and provider IDs are formatted is all declared in a descriptor
//! table (see [`resource`]); the enumeration and import loop itself is
//! kind-agnostic.

pub mod aws;
pub mod config;
pub mod resource;
pub mod sync;
pub mod terraform;
