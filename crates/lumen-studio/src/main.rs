use anyhow::{Context, Result};
use lumen_engine::coords::{ColorRgba, Vec2, Vec3};
use lumen_engine::hull::{find_contour, signed_area};
use lumen_engine::logging::{LoggingConfig, init_logging};
use lumen_engine::vertex::{AttributeDescriptor, VertexSchema, VertexWriter};

/// Demo settings, read from `LUMEN_*` environment variables.
#[derive(Debug, Clone)]
struct StudioConfig {
    /// `LUMEN_LOG`, `env_logger` filter syntax.
    log_filter: Option<String>,
    /// `LUMEN_YAW` / `LUMEN_PITCH`, degrees.
    yaw_deg: f32,
    pitch_deg: f32,
}

impl StudioConfig {
    fn from_env() -> Result<Self> {
        Ok(Self {
            log_filter: std::env::var("LUMEN_LOG").ok(),
            yaw_deg: env_f32("LUMEN_YAW", 35.0)?,
            pitch_deg: env_f32("LUMEN_PITCH", 25.0)?,
        })
    }
}

fn env_f32(key: &str, default: f32) -> Result<f32> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key}={raw:?} is not a number")),
        Err(_) => Ok(default),
    }
}

fn main() -> Result<()> {
    let config = StudioConfig::from_env()?;
    init_logging(LoggingConfig {
        env_filter: config.log_filter.clone(),
        ..LoggingConfig::default()
    });

    println!();
    println!("  ╔════════════════════════════════════════╗");
    println!("  ║           LUMEN STUDIO v0.1            ║");
    println!("  ║   vertex schema  ·  silhouette hull    ║");
    println!("  ╚════════════════════════════════════════╝");
    println!();

    // ── cube primitive ────────────────────────────────────────────────────
    let mesh_schema = VertexSchema::new(&[
        AttributeDescriptor::new("position", "float3"),
        AttributeDescriptor::new("color", "ubyte4").normalized(),
    ])
    .context("cube vertex schema")?;

    let corners = cube_corners(config.yaw_deg, config.pitch_deg);
    let mut mesh_buf = mesh_schema.allocate(corners.len());
    {
        let mut w = VertexWriter::new(&mesh_schema, &mut mesh_buf).fluent();
        for (i, &p) in corners.iter().enumerate() {
            let shade = 0.4 + 0.6 * (i as f32 / (corners.len() - 1) as f32);
            w.set("position", p)?
                .set("color", ColorRgba::new(shade, shade, 1.0, 1.0))?
                .advance();
        }
    }
    let bindings = mesh_schema.gpu_bindings().context("cube gpu layout")?;
    log::info!(
        "cube: {} vertices, {} bytes, {} gpu binding(s), stride {}",
        corners.len(),
        mesh_buf.len(),
        bindings.len(),
        mesh_schema.total_size()
    );

    // ── silhouette contour ────────────────────────────────────────────────
    let projected: Vec<Vec2> = corners.iter().map(|p| p.xy()).collect();
    let contour = find_contour(&projected);
    log::info!(
        "contour: {} of {} points on the outline, area {:.3}",
        contour.len(),
        projected.len(),
        signed_area(&contour)
    );

    // Closed line strip: first point repeated at the end.
    let line_schema = VertexSchema::new(&[
        AttributeDescriptor::new("position", "float2"),
        AttributeDescriptor::new("color", "ubyte4").normalized(),
    ])
    .context("contour vertex schema")?;
    let position = line_schema
        .location_of("position")
        .context("contour schema has no position")?;
    let color = line_schema
        .location_of("color")
        .context("contour schema has no color")?;

    let strip_len = contour.len() + 1;
    let mut line_buf = line_schema.allocate(strip_len);
    let mut w = VertexWriter::new(&line_schema, &mut line_buf);
    for (i, &p) in contour.iter().chain(contour.first()).enumerate() {
        w.write_attribute(i, position, p)?;
        w.write_attribute(i, color, ColorRgba::new(1.0, 0.6, 0.1, 1.0))?;
    }

    for (i, p) in contour.iter().enumerate() {
        println!("  outline[{i}]  ({:>7.3}, {:>7.3})", p.x, p.y);
    }
    println!();
    println!(
        "  {} line-strip vertices, {} bytes ready for upload",
        strip_len,
        line_buf.len()
    );
    Ok(())
}

/// Unit cube corners rotated by yaw (around Y) then pitch (around X).
fn cube_corners(yaw_deg: f32, pitch_deg: f32) -> Vec<Vec3> {
    let (sy, cy) = yaw_deg.to_radians().sin_cos();
    let (sp, cp) = pitch_deg.to_radians().sin_cos();

    let mut out = Vec::with_capacity(8);
    for &x in &[-0.5f32, 0.5] {
        for &y in &[-0.5f32, 0.5] {
            for &z in &[-0.5f32, 0.5] {
                let (x1, z1) = (x * cy + z * sy, -x * sy + z * cy);
                let (y2, z2) = (y * cp - z1 * sp, y * sp + z1 * cp);
                out.push(Vec3::new(x1, y2, z2));
            }
        }
    }
    out
}
