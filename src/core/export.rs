// PeerLens - core/export.rs
//
// CSV and JSON export of the (filtered) peer list.
// Core layer: writes to any Write trait object.

use crate::core::model::Peer;
use crate::util::constants;
use crate::util::error::ExportError;
use std::io::Write;
use std::path::PathBuf;

/// Export peers to CSV format.
///
/// Writes: name, tunnel_address, status, local_networks, last_handshake,
/// endpoint_address, comment. Local networks are joined into one cell.
pub fn export_csv<W: Write>(
    peers: &[Peer],
    writer: W,
    export_path: &PathBuf,
) -> Result<usize, ExportError> {
    check_export_size(peers.len())?;

    let mut csv_writer = csv::Writer::from_writer(writer);

    // Header
    csv_writer
        .write_record([
            "name",
            "tunnel_address",
            "status",
            "local_networks",
            "last_handshake",
            "endpoint_address",
            "comment",
        ])
        .map_err(|e| ExportError::Csv {
            path: export_path.clone(),
            source: e,
        })?;

    let mut count = 0;
    for peer in peers {
        csv_writer
            .write_record([
                &peer.name,
                &peer.tunnel_address,
                peer.status.as_str(),
                &peer.local_networks.join(constants::CSV_NETWORK_SEPARATOR),
                &peer.last_handshake,
                &peer.endpoint_address,
                &peer.comment,
            ])
            .map_err(|e| ExportError::Csv {
                path: export_path.clone(),
                source: e,
            })?;
        count += 1;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        path: export_path.clone(),
        source: e,
    })?;

    Ok(count)
}

/// Export peers to JSON format (array of objects).
pub fn export_json<W: Write>(
    peers: &[Peer],
    writer: W,
    export_path: &PathBuf,
) -> Result<usize, ExportError> {
    check_export_size(peers.len())?;

    serde_json::to_writer_pretty(writer, peers).map_err(|e| ExportError::Json {
        path: export_path.clone(),
        source: e,
    })?;
    Ok(peers.len())
}

fn check_export_size(count: usize) -> Result<(), ExportError> {
    if count > constants::MAX_EXPORT_PEERS {
        return Err(ExportError::TooManyPeers {
            count,
            max: constants::MAX_EXPORT_PEERS,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::PeerStatus;

    fn make_peer(name: &str) -> Peer {
        Peer {
            id: name.to_string(),
            name: name.to_string(),
            tunnel_address: "10.0.0.5".to_string(),
            local_networks: vec!["192.168.1.0/24".to_string(), "192.168.2.0/24".to_string()],
            status: PeerStatus::Active,
            last_handshake: "15s".to_string(),
            comment: "branch".to_string(),
            endpoint_address: "203.0.113.7".to_string(),
        }
    }

    #[test]
    fn test_csv_export() {
        let peers = vec![make_peer("MC7"), make_peer("MC8")];
        let mut buf = Vec::new();
        let count = export_csv(&peers, &mut buf, &PathBuf::from("out.csv")).unwrap();
        assert_eq!(count, 2);

        let output = String::from_utf8(buf).unwrap();
        assert!(output.contains("name,tunnel_address,status"));
        assert!(output.contains("MC7"));
        assert!(output.contains("192.168.1.0/24;192.168.2.0/24"));
    }

    #[test]
    fn test_json_export() {
        let peers = vec![make_peer("MC7")];
        let mut buf = Vec::new();
        let count = export_json(&peers, &mut buf, &PathBuf::from("out.json")).unwrap();
        assert_eq!(count, 1);

        let output = String::from_utf8(buf).unwrap();
        assert!(output.contains("\"tunnel_address\": \"10.0.0.5\""));
        assert!(output.contains("\"status\": \"active\""));
    }

    #[test]
    fn test_empty_list_exports_header_only() {
        let mut buf = Vec::new();
        let count = export_csv(&[], &mut buf, &PathBuf::from("out.csv")).unwrap();
        assert_eq!(count, 0);

        let output = String::from_utf8(buf).unwrap();
        assert_eq!(output.lines().count(), 1);
    }
}
