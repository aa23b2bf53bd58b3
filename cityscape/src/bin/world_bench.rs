#[cfg(feature = "bench_world")]
use cityscape::{Graph, Point, Segment, World, WorldParams};
#[cfg(feature = "bench_world")]
use std::time::Instant;

#[cfg(not(feature = "bench_world"))]
fn main() {
    panic!("world_bench requires --features bench_world");
}

#[cfg(feature = "bench_world")]
fn build_grid_graph(w: usize, h: usize, cell: f64) -> Graph {
    let mut g = Graph::new();
    let at = |i: usize, j: usize| Point::new(i as f64 * cell, j as f64 * cell);
    for j in 0..=h {
        for i in 0..=w {
            g.try_add_point(at(i, j));
        }
    }
    for j in 0..=h {
        for i in 0..w {
            g.try_add_segment(Segment::new(at(i, j), at(i + 1, j)));
        }
    }
    for i in 0..=w {
        for j in 0..h {
            g.try_add_segment(Segment::new(at(i, j), at(i, j + 1)));
        }
    }
    g
}

#[cfg(feature = "bench_world")]
fn main() {
    let args: Vec<String> = std::env::args().collect();
    let mut w = 4usize;
    let mut h = 4usize;
    let mut cell = 600.0f64;
    let mut iters = 3usize;
    for a in &args[1..] {
        if let Some(val) = a.strip_prefix("--w=") {
            if let Ok(v) = val.parse() {
                w = v;
            }
        } else if let Some(val) = a.strip_prefix("--h=") {
            if let Ok(v) = val.parse() {
                h = v;
            }
        } else if let Some(val) = a.strip_prefix("--cell=") {
            if let Ok(v) = val.parse() {
                cell = v;
            }
        } else if let Some(val) = a.strip_prefix("--iters=") {
            if let Ok(v) = val.parse() {
                iters = v;
            }
        }
    }

    let graph = build_grid_graph(w, h, cell);
    let segments = graph.segment_count();
    let mut world = World::new(graph, WorldParams::default());
    let mut times_ms = Vec::with_capacity(iters);
    for _ in 0..iters {
        let t0 = Instant::now();
        world.generate();
        times_ms.push(t0.elapsed().as_secs_f64() * 1000.0);
    }
    times_ms.sort_by(|a, b| a.total_cmp(b));
    let med = times_ms.get(times_ms.len() / 2).copied().unwrap_or(0.0);
    println!(
        "grid={}x{} segments={} borders={} buildings={} trees={} median_ms={:.3}",
        w,
        h,
        segments,
        world.road_borders.len(),
        world.buildings.len(),
        world.trees.len(),
        med
    );
}
