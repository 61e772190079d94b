use criterion::{black_box, criterion_group, criterion_main, Criterion};
use curve_extraction::{segment, Connectivity, Grid, Settings, Shape, VoxelPoint};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn synthetic_problem(side: usize) -> (Grid<f64>, Grid<u8>, Connectivity) {
    let shape = Shape::new(side, side, side);
    let mut rng = StdRng::seed_from_u64(7);
    let data: Vec<f64> = (0..shape.num_cells()).map(|_| rng.gen_range(0.0..1.0)).collect();
    let data = Grid::from_vec(shape, data).unwrap();

    let mut mesh_map = Grid::filled(shape, 0u8);
    let start = shape.sub2ind(VoxelPoint::new(0, 0, 0));
    let end = shape.sub2ind(VoxelPoint::new(side - 1, side - 1, side - 1));
    mesh_map.set_ind(start, 2);
    mesh_map.set_ind(end, 3);

    let connectivity = Connectivity::new(vec![
        [1, 0, 0],
        [-1, 0, 0],
        [0, 1, 0],
        [0, -1, 0],
        [0, 0, 1],
        [0, 0, -1],
    ]);

    (data, mesh_map, connectivity)
}

fn bench_segment(c: &mut Criterion) {
    let (data, mesh_map, connectivity) = synthetic_problem(8);
    let mut settings = Settings::default();
    settings.length_penalty = 1.0;
    settings.curvature_penalty = 0.5;

    c.bench_function("segment_8x8x8_linear_interpolation", |b| {
        b.iter(|| {
            let out = segment(
                "linear_interpolation",
                black_box(&data),
                black_box(&mesh_map),
                black_box(&connectivity),
                black_box(&settings),
            )
            .unwrap();
            black_box(out.cost)
        })
    });
}

fn bench_segment_with_a_star(c: &mut Criterion) {
    let (data, mesh_map, connectivity) = synthetic_problem(8);
    let mut settings = Settings::default();
    settings.length_penalty = 1.0;
    settings.use_a_star = true;

    c.bench_function("segment_8x8x8_a_star", |b| {
        b.iter(|| {
            let out = segment(
                "linear_interpolation",
                black_box(&data),
                black_box(&mesh_map),
                black_box(&connectivity),
                black_box(&settings),
            )
            .unwrap();
            black_box(out.cost)
        })
    });
}

criterion_group!(benches, bench_segment, bench_segment_with_a_star);
criterion_main!(benches);
