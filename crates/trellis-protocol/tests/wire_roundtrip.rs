//! Property tests: any batch or response survives the wire unchanged.

use proptest::prelude::*;
use trellis_core::{
    Dimension, DimensionRect, ItemSpacing, Layout, LayoutChangedResponse, LayoutId, LayoutNode,
    LayoutStyle, NodeBatch,
};
use trellis_protocol::{
    decode_batch, decode_response, encode_batch, encode_response, WIRE_VERSION,
};

fn arb_dimension() -> impl Strategy<Value = Dimension> {
    prop_oneof![
        Just(Dimension::Undefined),
        Just(Dimension::Auto),
        (-1000.0f32..1000.0).prop_map(Dimension::Points),
        (0.0f32..1.0).prop_map(Dimension::Percent),
    ]
}

fn arb_rect() -> impl Strategy<Value = DimensionRect> {
    (arb_dimension(), arb_dimension(), arb_dimension(), arb_dimension())
        .prop_map(|(left, right, top, bottom)| DimensionRect { left, right, top, bottom })
}

fn arb_style() -> impl Strategy<Value = LayoutStyle> {
    (
        arb_dimension(),
        arb_dimension(),
        arb_rect(),
        arb_rect(),
        0.0f32..10.0,
        prop_oneof![(0.0f32..50.0).prop_map(ItemSpacing::Fixed), Just(ItemSpacing::Auto)],
    )
        .prop_map(|(width, height, margin, padding, flex_grow, item_spacing)| LayoutStyle {
            width,
            height,
            margin,
            padding,
            flex_grow,
            item_spacing,
            ..Default::default()
        })
}

fn arb_node() -> impl Strategy<Value = LayoutNode> {
    (
        any::<u32>(),
        proptest::option::of(any::<u32>()),
        proptest::option::of(any::<u32>()),
        arb_style(),
        "[a-z]{0,12}",
        any::<bool>(),
    )
        .prop_map(|(id, parent, child_index, style, name, measure_content)| LayoutNode {
            id: LayoutId(id),
            parent: parent.map(LayoutId),
            child_index,
            style,
            name,
            measure_content,
            fixed_width: None,
            fixed_height: None,
        })
}

fn arb_batch() -> impl Strategy<Value = NodeBatch> {
    (
        proptest::collection::vec(arb_node(), 0..8),
        proptest::collection::vec(
            (any::<u32>(), proptest::collection::vec(any::<u32>().prop_map(LayoutId), 0..6)),
            0..4,
        ),
    )
        .prop_map(|(nodes, edges)| {
            let mut batch = NodeBatch { nodes, ..Default::default() };
            for (parent, children) in edges {
                batch = batch.edge(LayoutId(parent), children);
            }
            batch
        })
}

fn arb_response() -> impl Strategy<Value = LayoutChangedResponse> {
    (
        any::<u64>(),
        proptest::collection::hash_map(
            any::<u32>().prop_map(LayoutId),
            (any::<u32>(), -5000.0f32..5000.0, -5000.0f32..5000.0).prop_map(
                |(order, width, top)| Layout { order, width, top, ..Default::default() },
            ),
            0..16,
        ),
    )
        .prop_map(|(layout_state, changed_layouts)| LayoutChangedResponse {
            layout_state,
            changed_layouts,
        })
}

proptest! {
    #[test]
    fn batch_round_trips(batch in arb_batch()) {
        let payload = encode_batch(&batch).unwrap();
        prop_assert_eq!(payload[0], WIRE_VERSION);
        let decoded = decode_batch(&payload).unwrap();
        prop_assert_eq!(decoded, batch);
    }

    #[test]
    fn response_round_trips(response in arb_response()) {
        let payload = encode_response(&response).unwrap();
        let decoded = decode_response(&payload).unwrap();
        prop_assert_eq!(decoded, response);
    }

    #[test]
    fn garbage_never_panics(bytes in proptest::collection::vec(any::<u8>(), 0..256)) {
        let _ = decode_batch(&bytes);
        let _ = decode_response(&bytes);
    }
}

#[test]
fn wire_structs_also_serialize_as_json() {
    // The wire model stays plain serde data, so hosts can log payloads in
    // a readable form when debugging a boundary disagreement.
    let batch = NodeBatch::new()
        .node(LayoutNode::new(LayoutId(1), LayoutStyle::column()).with_name("root"));
    let json = serde_json::to_string(&batch).unwrap();
    let back: NodeBatch = serde_json::from_str(&json).unwrap();
    assert_eq!(back, batch);
}
