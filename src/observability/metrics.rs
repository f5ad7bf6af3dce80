//! Connector metrics.
//!
//! # Metrics
//! - `connector_contracts_registered` (gauge): contracts in the registry
//! - `connector_clients_built_total` (counter): chain clients constructed
//! - `connector_connection_state` (gauge): lifecycle state code
//!
//! Recorded through the `metrics` facade; the embedding application decides
//! whether a recorder/exporter is installed.

use crate::connector::lifecycle::ConnectionState;

pub fn record_registry_size(size: usize) {
    metrics::gauge!("connector_contracts_registered").set(size as f64);
}

pub fn record_client_built() {
    metrics::counter!("connector_clients_built_total").increment(1);
}

pub fn record_connection_state(state: ConnectionState) {
    metrics::gauge!("connector_connection_state").set(f64::from(state.code()));
}
