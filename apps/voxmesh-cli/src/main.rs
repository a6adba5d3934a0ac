//! voxmesh command line front end.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand, ValueEnum};
use glam::Vec3;
use tracing::info;
use tracing_subscriber::EnvFilter;
use voxmesh_core::FieldConfig;
use voxmesh_mesh::{
    generate_field_mesh, generate_isosurface_mesh, write_raw, write_stl, LevelSetParams, MeshBuffer,
    MeshMode, MeshOptions, SurfaceNets, DEFAULT_WORLD_SCALE,
};

#[derive(Parser, Debug)]
#[command(name = "voxmesh", version, about = "Extract triangle meshes from voxel fields")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Face-cull a procedural occupancy field.
    Field(FieldArgs),
    /// Extract a sphere isosurface with surface nets.
    Sphere(SphereArgs),
}

#[derive(Args, Debug)]
struct FieldArgs {
    /// TOML file with field settings; flags override it.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    field_bits: Option<u32>,
    #[arg(long)]
    frequency: Option<f64>,
    #[arg(long)]
    threshold: Option<f64>,
    #[arg(long)]
    scale: Option<f32>,
    /// Mesh x-slabs on the rayon pool.
    #[arg(long)]
    parallel: bool,
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args, Debug)]
struct SphereArgs {
    /// Sphere center as `X,Y,Z`.
    #[arg(long, value_parser = parse_vec3, default_value = "1.5,2,3")]
    center: Vec3,
    #[arg(long, default_value_t = 50.0)]
    radius: f32,
    #[arg(long, default_value_t = 4.0)]
    voxel_size: f32,
    #[arg(long, default_value_t = 4.0)]
    band_width: f32,
    #[arg(long, default_value_t = DEFAULT_WORLD_SCALE)]
    world_scale: f32,
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Output file; without it only the summary is printed.
    #[arg(short, long)]
    output: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = Format::Raw)]
    format: Format,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    /// Little-endian f32 triples, nine per triangle.
    Raw,
    /// Binary STL.
    Stl,
}

fn parse_vec3(s: &str) -> Result<Vec3, String> {
    let parts = s
        .split(',')
        .map(|p| p.trim().parse::<f32>().map_err(|e| format!("{p:?}: {e}")))
        .collect::<Result<Vec<_>, _>>()?;
    match parts.as_slice() {
        &[x, y, z] => Ok(Vec3::new(x, y, z)),
        _ => Err(format!("expected X,Y,Z, got {s:?}")),
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Field(args) => run_field(args),
        Command::Sphere(args) => run_sphere(args),
    }
}

fn run_field(args: FieldArgs) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => FieldConfig::load(path)
            .with_context(|| format!("failed to load field config {}", path.display()))?,
        None => FieldConfig::default(),
    };
    if let Some(bits) = args.field_bits {
        config = config.with_field_bits(bits);
    }
    if let Some(frequency) = args.frequency {
        config = config.with_frequency(frequency);
    }
    if let Some(threshold) = args.threshold {
        config = config.with_threshold(threshold);
    }
    if let Some(scale) = args.scale {
        config = config.with_scale(scale);
    }
    config.validate().context("invalid field configuration")?;

    let mode = if args.parallel {
        MeshMode::Parallel
    } else {
        MeshMode::Sequential
    };
    info!(
        size = config.field_size(),
        frequency = config.frequency,
        threshold = config.threshold,
        scale = config.scale,
        ?mode,
        "Meshing occupancy field"
    );

    let mesh = generate_field_mesh(&config, &MeshOptions::default().with_mode(mode))
        .context("field meshing failed")?;
    finish(&mesh, &args.output)
}

fn run_sphere(args: SphereArgs) -> anyhow::Result<()> {
    let params = LevelSetParams::default()
        .with_center(args.center)
        .with_radius(args.radius)
        .with_voxel_size(args.voxel_size)
        .with_band_width(args.band_width);
    info!(
        center = %params.center,
        radius = params.radius,
        voxel_size = params.voxel_size,
        "Extracting sphere isosurface"
    );

    let mesh = generate_isosurface_mesh(SurfaceNets, &params, args.world_scale)
        .context("isosurface extraction failed")?;
    finish(&mesh, &args.output)
}

fn finish(mesh: &MeshBuffer, output: &OutputArgs) -> anyhow::Result<()> {
    match mesh.bounds() {
        Some(bounds) => info!(
            triangles = mesh.triangle_count(),
            floats = mesh.len(),
            min = %bounds.min,
            max = %bounds.max,
            "Mesh ready"
        ),
        None => info!("Mesh is empty"),
    }

    if let Some(path) = &output.output {
        write_mesh(mesh, path, output.format)?;
        info!(path = %path.display(), format = ?output.format, "Wrote mesh");
    }
    Ok(())
}

fn write_mesh(mesh: &MeshBuffer, path: &Path, format: Format) -> anyhow::Result<()> {
    if path.is_dir() {
        bail!("{} is a directory", path.display());
    }
    let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let writer = BufWriter::new(file);
    match format {
        Format::Raw => write_raw(mesh, writer),
        Format::Stl => write_stl(mesh, writer, Some("voxmesh")),
    }
    .with_context(|| format!("failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_center() {
        assert_eq!(parse_vec3("1.5, 2,3").unwrap(), Vec3::new(1.5, 2.0, 3.0));
        assert!(parse_vec3("1,2").is_err());
        assert!(parse_vec3("a,b,c").is_err());
    }

    #[test]
    fn sphere_defaults_match_reference_scene() {
        let cli = Cli::parse_from(["voxmesh", "sphere"]);
        let Command::Sphere(args) = cli.command else {
            panic!("expected sphere command");
        };
        assert_eq!(args.center, Vec3::new(1.5, 2.0, 3.0));
        assert_eq!(args.radius, 50.0);
        assert_eq!(args.world_scale, 10.0);
        assert!(args.output.output.is_none());
    }

    #[test]
    fn out_of_range_field_bits_is_rejected() {
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new("info"))
            .with_test_writer()
            .finish();
        let cli = Cli::parse_from(["voxmesh", "field", "--field-bits", "40"]);
        let Command::Field(args) = cli.command else {
            panic!("expected field command");
        };

        let result = tracing::subscriber::with_default(subscriber, || run_field(args));
        let err = result.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<voxmesh_core::Error>(),
            Some(voxmesh_core::Error::Configuration { field: "fieldBits", .. })
        ));
    }

    #[test]
    fn field_flags_parse() {
        let cli = Cli::parse_from(["voxmesh", "field", "--field-bits", "4", "--parallel", "-o", "out.stl", "--format", "stl"]);
        let Command::Field(args) = cli.command else {
            panic!("expected field command");
        };
        assert_eq!(args.field_bits, Some(4));
        assert!(args.parallel);
        assert!(matches!(args.output.format, Format::Stl));
    }
}
