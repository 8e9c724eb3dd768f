//! Known-node helpers.

use serde::Deserialize;

use crate::error::ClientError;
use crate::types::NodeInfo;

/// Default URL of the production super-node directory.
pub const DEFAULT_SUPER_NODES_URL: &str = "https://supernodes.nem.io/nodes/";

#[derive(Deserialize)]
struct NodeInfoArray {
    #[serde(default)]
    nodes: Vec<NodeInfo>,
}

/// Fixed, long-lived test network nodes.
pub fn test_nodes() -> Vec<NodeInfo> {
    ["104.128.226.60", "23.228.67.85", "50.3.87.123"]
        .into_iter()
        .map(|host| NodeInfo {
            host: host.to_string(),
            port: 7890,
        })
        .collect()
}

/// Fetch the production super-node list from a directory URL.
///
/// # Arguments
/// * `node_list_url` - Directory URL; [`DEFAULT_SUPER_NODES_URL`] for the
///   public directory.
pub async fn super_nodes(node_list_url: &str) -> Result<Vec<NodeInfo>, ClientError> {
    let resp = reqwest::get(node_list_url).await?;
    let status = resp.status();
    if !status.is_success() {
        let message = resp.text().await.unwrap_or_default();
        return Err(ClientError::Server {
            status_code: status.as_u16(),
            message,
        });
    }
    let array: NodeInfoArray = serde_json::from_str(&resp.text().await?)?;
    Ok(array.nodes)
}
