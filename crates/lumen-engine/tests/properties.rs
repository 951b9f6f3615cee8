//! End-to-end checks of the vertex engine and contour finder through the public API.

use lumen_engine::coords::{ColorRgba, Vec2, Vec3};
use lumen_engine::hull::{find_contour, find_convex_hull, signed_area};
use lumen_engine::logging::{LoggingConfig, init_logging};
use lumen_engine::vertex::{
    AttributeDescriptor, VertexSchema, VertexWriter, WriterError, parse_vertex_schema,
};

fn setup() {
    init_logging(LoggingConfig::for_tests());
}

fn v(x: f32, y: f32) -> Vec2 {
    Vec2::new(x, y)
}

// ─── Schema ──────────────────────────────────────────────────────────

#[test]
fn packing_is_deterministic() {
    setup();
    let descs = [
        AttributeDescriptor::new("position", "float2"),
        AttributeDescriptor::new("color", "ubyte3").normalized(),
    ];
    let a = parse_vertex_schema(&descs).unwrap();
    let b = parse_vertex_schema(&descs).unwrap();

    assert_eq!(a, b);
    assert_eq!(a.attributes()[0].offset, 0);
    assert_eq!(a.attributes()[1].offset, 8);
    assert_eq!(a.total_size(), 11);
}

#[test]
fn struct_of_arrays_attributes_advance_independently() {
    setup();
    let schema = VertexSchema::new(&[
        AttributeDescriptor::new("a", "float").with_offset(0).with_stride(4),
        AttributeDescriptor::new("b", "float2").with_offset(16).with_stride(8),
    ])
    .unwrap();

    let mut buf = schema.allocate(2);
    let mut w = VertexWriter::new(&schema, &mut buf);
    w.write_attribute(1, "a", 1.25f32).unwrap();
    w.write_attribute(1, "b", v(2.5, -3.0)).unwrap();

    assert_eq!(&buf[4..8], 1.25f32.to_ne_bytes());
    assert_eq!(&buf[24..28], 2.5f32.to_ne_bytes());
    assert_eq!(&buf[28..32], (-3.0f32).to_ne_bytes());
}

// ─── Writer ──────────────────────────────────────────────────────────

#[test]
fn normalized_color_round_trip() {
    setup();
    let schema = VertexSchema::new(&[AttributeDescriptor::new("color", "ubyte4").normalized()])
        .unwrap();
    let mut buf = schema.allocate(1);
    let mut w = VertexWriter::new(&schema, &mut buf);

    let written = [0.6f32, 0.4, 0.2, 1.0];
    w.write_attribute(0, "color", &written).unwrap();
    let read = w.read_attribute(0, "color").unwrap();
    for (a, b) in written.iter().zip(read.as_slice()) {
        assert!((a - b).abs() <= 1.0 / 255.0, "{a} vs {b}");
    }

    assert_eq!(u32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]), 0xFF33_6699);
    assert_eq!(ColorRgba::new(0.6, 0.4, 0.2, 1.0).to_packed_u32(), 0xFF33_6699);
}

#[test]
fn arity_mismatch_is_an_error() {
    setup();
    let schema = VertexSchema::new(&[AttributeDescriptor::new("position", "float3")]).unwrap();
    let mut buf = schema.allocate(1);
    let mut w = VertexWriter::new(&schema, &mut buf);

    let err = w.write_attribute(0, "position", &[1.0f32, 2.0]).unwrap_err();
    assert!(matches!(err, WriterError::ArityMismatch { expected: 3, got: 2, .. }));

    let err = w
        .write_attribute(0, "position", Vec3::new(1.0, 2.0, 3.0))
        .and_then(|()| w.write_attribute(0, "position", &[1.0f32, 2.0, 3.0, 4.0]))
        .unwrap_err();
    assert!(matches!(err, WriterError::ArityMismatch { expected: 3, got: 4, .. }));
}

#[test]
fn fluent_writer_fills_interleaved_buffer() {
    setup();
    let schema = VertexSchema::new(&[
        AttributeDescriptor::new("position", "float3"),
        AttributeDescriptor::new("color", "ubyte4").normalized(),
    ])
    .unwrap();
    let corners = [Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0)];

    let mut buf = schema.allocate(corners.len());
    let mut w = VertexWriter::new(&schema, &mut buf).fluent();
    for p in corners {
        w.set("position", p)
            .unwrap()
            .set("color", ColorRgba::white())
            .unwrap()
            .advance();
    }
    assert_eq!(w.vertex_index(), 3);

    let stride = schema.total_size();
    assert_eq!(stride, 16);
    for i in 0..corners.len() {
        assert_eq!(&buf[i * stride + 12..i * stride + 16], [255, 255, 255, 255]);
    }
}

// ─── Hull ────────────────────────────────────────────────────────────

#[test]
fn unit_square_hull_excludes_centroid() {
    setup();
    let pts = [v(0.0, 0.0), v(1.0, 0.0), v(1.0, 1.0), v(0.0, 1.0), v(0.5, 0.5)];
    let hull = find_convex_hull(&pts);

    assert_eq!(hull.len(), 4);
    assert!(!hull.contains(&v(0.5, 0.5)));
    assert!(signed_area(&hull) < 0.0);
    assert!(signed_area(&find_contour(&pts)) > 0.0);
}

#[test]
fn collinear_and_tiny_inputs() {
    setup();
    assert_eq!(
        find_convex_hull(&[v(0.0, 0.0), v(1.0, 0.0), v(2.0, 0.0)]),
        [v(0.0, 0.0), v(2.0, 0.0)]
    );
    assert_eq!(find_convex_hull(&[v(5.0, 5.0)]), [v(5.0, 5.0)]);
    assert_eq!(
        find_convex_hull(&[v(5.0, 5.0), v(1.0, 1.0)]),
        [v(5.0, 5.0), v(1.0, 1.0)]
    );
}

#[test]
fn hull_encloses_every_input_point() {
    setup();
    // Deterministic pseudo-random cloud (LCG).
    let mut state = 0x2545_F491u32;
    let mut next = || {
        state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        (state >> 8) as f32 / (1u32 << 24) as f32 * 100.0 - 50.0
    };
    let pts: Vec<Vec2> = (0..200).map(|_| v(next(), next())).collect();

    let contour = find_contour(&pts);
    assert!(contour.len() >= 3);
    assert!(signed_area(&contour) > 0.0);

    let n = contour.len();
    for i in 0..n {
        let a = contour[i];
        let b = contour[(i + 1) % n];
        for &p in &pts {
            // CCW: every point is on the left of (or on) each edge.
            assert!((b - a).cross(p - a) >= -1e-3, "{p:?} outside edge {a:?} -> {b:?}");
        }
    }

    assert_eq!(find_contour(&pts), contour);
}

#[test]
fn regular_polygon_keeps_every_vertex() {
    setup();
    let pts: Vec<Vec2> = (0..24)
        .map(|i| {
            let t = i as f32 / 24.0 * std::f32::consts::TAU;
            v(t.cos() * 10.0, t.sin() * 10.0)
        })
        .collect();
    assert_eq!(find_contour(&pts).len(), 24);
}
