use criterion::{black_box, criterion_group, criterion_main, Criterion};
use highway_editor::components::map_canvas::hit_detection::{find_segment_at_position, hit_test};
use highway_editor::components::map_canvas::{StagingBuffer, Viewport};
use highway_editor::models::{Dataset, LineKey};

/// A grid of stations joined by long zig-zag lines, roughly the size of a
/// busy server network.
fn synthetic_dataset(lines: usize, vertices_per_branch: usize) -> Dataset {
    let mut dataset = Dataset::new();
    for i in 0..lines * 10 {
        let x = (i % 100) as f64 * 40.0;
        let z = (i / 100) as f64 * 40.0;
        dataset.add_station((x, z)).expect("station id");
    }

    for l in 0..lines {
        let key = LineKey::new(format!("Category {}", l % 8), format!("Line {l}"));
        if dataset.add_line(&key).is_err() {
            continue;
        }
        let Some(line) = dataset.line_mut(&key) else { continue };
        let branch = line.branch_mut_or_create("Main line");
        branch.vertices = (0..vertices_per_branch)
            .map(|v| {
                let x = v as f64 * 25.0;
                let z = l as f64 * 30.0 + if v % 2 == 0 { 0.0 } else { 15.0 };
                (x, z)
            })
            .collect();
    }
    dataset
}

fn benchmark_hit_testing(c: &mut Criterion) {
    let dataset = synthetic_dataset(200, 100);
    let mut viewport = Viewport::new(1200.0, 800.0);
    viewport.center_on((1250.0, 3000.0));

    // A point far from anything walks every station and segment
    c.bench_function("hit_test_miss", |b| {
        b.iter(|| hit_test(black_box(&dataset), black_box(&viewport), black_box((5.0, 5.0))));
    });

    c.bench_function("hit_test_center", |b| {
        b.iter(|| hit_test(black_box(&dataset), black_box(&viewport), black_box((600.0, 400.0))));
    });

    let key = LineKey::new("Category 3", "Line 99");
    let staging = dataset.line(&key).map(StagingBuffer::from_line).unwrap_or_default();
    c.bench_function("find_segment", |b| {
        b.iter(|| find_segment_at_position(black_box(&staging), black_box(&viewport), black_box((600.0, 400.0))));
    });
}

criterion_group!(benches, benchmark_hit_testing);
criterion_main!(benches);
