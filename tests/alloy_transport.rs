//! Alloy client against a local IPC socket standing in for a node.
#![cfg(unix)]

use std::time::Duration;

use serde_json::json;
use tokio::io::AsyncReadExt;
use tokio::net::UnixListener;
use tokio::time::timeout;

use contract_connector::blockchain::ClientError;
use contract_connector::connector::{initialize, ConnectionState};

const ADDRESS: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";

#[tokio::test]
async fn test_close_releases_ipc_connection() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("node.ipc");
    let listener = UnixListener::bind(&path).unwrap();

    let settings = json!({
        "provider": path.to_str().unwrap(),
        "contracts": [{ "contractName": "Migrations", "abi": [], "address": ADDRESS }]
    });
    let connector = initialize(&settings).await.unwrap();
    let (mut server, _) = timeout(Duration::from_secs(5), listener.accept())
        .await
        .unwrap()
        .unwrap();

    // Handles are alive for the whole test; they must not keep the socket open.
    let handle = connector.contract("Migrations").unwrap();
    assert!(handle.instance().is_ok());

    connector.close().await.unwrap();
    assert_eq!(connector.state(), ConnectionState::Disconnected);
    assert!(matches!(handle.instance(), Err(ClientError::Closed)));

    let mut buf = [0u8; 64];
    let read = timeout(Duration::from_secs(5), server.read(&mut buf)).await;
    assert!(matches!(read, Ok(Ok(0))), "connection still open after close: {read:?}");
}
