use criterion::{black_box, criterion_group, criterion_main, Criterion};
use maze::{Algorithm, Maze, PathFinderState};

fn load_default_maze() -> Maze {
    std::fs::read_to_string("../data/maze2.txt")
        .unwrap()
        .parse()
        .unwrap()
}

fn bench_algorithm(c: &mut Criterion, algorithm: Algorithm) {
    let maze = load_default_maze();

    c.bench_function(&format!("maze2_{}", algorithm), |b| {
        b.iter(|| {
            let report = black_box(&maze).solve(black_box(algorithm)).unwrap();
            assert!(!report.solution.is_empty());
        })
    });
}

fn bench_stepping(c: &mut Criterion) {
    let maze = load_default_maze();

    c.bench_function("maze2_astar_stepped", |b| {
        b.iter(|| {
            let mut finder = maze.path_finder(black_box(Algorithm::AStar));
            while !finder.step(&maze).unwrap().is_done() {}
            assert!(matches!(finder.state(), PathFinderState::PathFound(_)));
        })
    });
}

pub fn depth_first(c: &mut Criterion) {
    bench_algorithm(c, Algorithm::DepthFirst);
}

pub fn a_star(c: &mut Criterion) {
    bench_algorithm(c, Algorithm::AStar);
}

criterion_group!(benches, depth_first, a_star, bench_stepping);
criterion_main!(benches);
