//! Version-tagged binary encoding of batches and responses.
//!
//! Every payload starts with a single format-version byte followed by the
//! bincode encoding of the value. The version byte lets either side of the
//! boundary reject a payload from a different protocol revision with a
//! typed error instead of misreading it.

use thiserror::Error;
use trellis_core::{LayoutChangedResponse, NodeBatch};

/// Current wire format revision.
pub const WIRE_VERSION: u8 = 1;

/// Failure while crossing the serialization boundary.
///
/// Decode failures mean the payload should be discarded and the layout
/// state treated as unchanged; the caller retries on its next mutation.
#[derive(Debug, Error)]
pub enum WireError {
    #[error("empty payload")]
    Empty,
    #[error("unsupported wire version {found} (expected {expected})")]
    Version { found: u8, expected: u8 },
    #[error("malformed payload: {0}")]
    Decode(#[source] bincode::Error),
    #[error("encoding failed: {0}")]
    Encode(#[source] bincode::Error),
}

fn encode<T: serde::Serialize>(value: &T) -> Result<Vec<u8>, WireError> {
    let body = bincode::serialize(value).map_err(WireError::Encode)?;
    let mut payload = Vec::with_capacity(body.len() + 1);
    payload.push(WIRE_VERSION);
    payload.extend_from_slice(&body);
    Ok(payload)
}

fn decode<T: serde::de::DeserializeOwned>(payload: &[u8]) -> Result<T, WireError> {
    let (&version, body) = payload.split_first().ok_or(WireError::Empty)?;
    if version != WIRE_VERSION {
        return Err(WireError::Version { found: version, expected: WIRE_VERSION });
    }
    bincode::deserialize(body).map_err(WireError::Decode)
}

/// Serializes a node batch for transport.
pub fn encode_batch(batch: &NodeBatch) -> Result<Vec<u8>, WireError> {
    encode(batch)
}

/// Reconstructs a node batch from transported bytes.
pub fn decode_batch(payload: &[u8]) -> Result<NodeBatch, WireError> {
    decode(payload)
}

/// Serializes a changed-layout response for transport.
pub fn encode_response(response: &LayoutChangedResponse) -> Result<Vec<u8>, WireError> {
    encode(response)
}

/// Reconstructs a changed-layout response from transported bytes.
pub fn decode_response(payload: &[u8]) -> Result<LayoutChangedResponse, WireError> {
    decode(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_core::{Layout, LayoutId, LayoutNode, LayoutStyle};

    fn sample_batch() -> NodeBatch {
        NodeBatch::new()
            .node(
                LayoutNode::new(LayoutId(1), LayoutStyle::column().with_size(800.0, 600.0))
                    .with_name("root"),
            )
            .node(
                LayoutNode::new(LayoutId(2), LayoutStyle::default())
                    .with_parent(LayoutId(1))
                    .measured()
                    .with_fixed_size(Some(120.0), None),
            )
            .edge(LayoutId(1), vec![LayoutId(2)])
    }

    #[test]
    fn test_batch_round_trip() {
        let batch = sample_batch();
        let payload = encode_batch(&batch).unwrap();
        assert_eq!(payload[0], WIRE_VERSION);
        let decoded = decode_batch(&payload).unwrap();
        assert_eq!(decoded, batch);
    }

    #[test]
    fn test_response_round_trip() {
        let mut response = LayoutChangedResponse::unchanged(41);
        response.changed_layouts.insert(
            LayoutId(7),
            Layout { order: 2, width: 10.5, height: 20.25, left: 1.0, top: 2.0, ..Default::default() },
        );
        let payload = encode_response(&response).unwrap();
        let decoded = decode_response(&payload).unwrap();
        assert_eq!(decoded, response);
    }

    #[test]
    fn test_empty_payload_is_rejected() {
        assert!(matches!(decode_batch(&[]), Err(WireError::Empty)));
    }

    #[test]
    fn test_version_mismatch_is_rejected() {
        let mut payload = encode_batch(&sample_batch()).unwrap();
        payload[0] = WIRE_VERSION + 1;
        match decode_batch(&payload) {
            Err(WireError::Version { found, expected }) => {
                assert_eq!(found, WIRE_VERSION + 1);
                assert_eq!(expected, WIRE_VERSION);
            }
            other => panic!("expected version error, got {other:?}"),
        }
    }

    #[test]
    fn test_corrupt_body_is_a_decode_error() {
        let mut payload = encode_batch(&sample_batch()).unwrap();
        payload.truncate(payload.len() / 2);
        assert!(matches!(decode_batch(&payload), Err(WireError::Decode(_))));
    }
}
