//! Meshing throughput.
//!
//! Run with: cargo bench -p voxmesh-mesh --bench meshing

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use voxmesh_core::FieldConfig;
use voxmesh_field::build_occupancy;
use voxmesh_mesh::{FaceCullMesher, IsosurfaceAdapter, LevelSetParams, MeshMode, SurfaceNets};

fn bench_face_cull(c: &mut Criterion) {
    let mut group = c.benchmark_group("face_cull");

    for bits in [5, 6, 7] {
        let config = FieldConfig::default().with_field_bits(bits);
        let grid = build_occupancy(&config).unwrap();
        group.throughput(Throughput::Elements(grid.len() as u64));

        for mode in [MeshMode::Sequential, MeshMode::Parallel] {
            let mesher = FaceCullMesher::new(config.scale).unwrap().with_mode(mode);
            group.bench_function(format!("{mode:?}_{}", grid.size()), |b| {
                b.iter(|| black_box(mesher.mesh(&grid).unwrap()))
            });
        }
    }

    group.finish();
}

fn bench_build_grid(c: &mut Criterion) {
    let config = FieldConfig::default();
    c.bench_function("build_occupancy_64", |b| {
        b.iter(|| black_box(build_occupancy(&config).unwrap()))
    });
}

fn bench_surface_nets(c: &mut Criterion) {
    let adapter = IsosurfaceAdapter::new(SurfaceNets);
    let params = LevelSetParams::default();
    c.bench_function("surface_nets_default_sphere", |b| {
        b.iter(|| black_box(adapter.generate(&params).unwrap()))
    });
}

criterion_group!(benches, bench_face_cull, bench_build_grid, bench_surface_nets);
criterion_main!(benches);
