//! Core library for kube-rightsize
//!
//! This crate provides the core functionality for:
//! - Parsing and formatting Kubernetes resource quantities
//! - Deriving request/limit suggestions from live usage
//! - Resolving a pod's top-level workload controller
//! - Patching workload pod templates in place
//! - Scanning pods for containers with missing resource settings

pub mod cluster;
pub mod gate;
pub mod manifest;
pub mod models;
pub mod observability;
pub mod owner;
pub mod patch;
pub mod quantity;
pub mod scanner;
pub mod suggest;

pub use cluster::{ClusterApi, ClusterError, KubeCluster};
pub use gate::{confirm_patch, Confirmer, GateDecision, GateError};
pub use models::*;
pub use observability::ScanLogger;
pub use patch::{dispatch, DispatchOutcome, Workload, WorkloadKind};
pub use quantity::{QuantityError, ResourceQuantity};
pub use scanner::{ScanError, ScanReporter, ScanSettings, ScanSummary, Scanner};
pub use suggest::{suggest_limit, validate_buffer_percent, SuggestError, Suggester};
