use std::hint::black_box;
use std::time::Instant;

use ndarray::Array2;
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;
use rayon::ThreadPool;
use rayon::ThreadPoolBuilder;
use repdist_ecdf::ecdf::distance_ecdf;
use repdist_ecdf::matrix::DistanceMatrix;

fn median_ms(samples: &mut [f64]) -> f64 {
  samples.sort_by(f64::total_cmp);
  samples[samples.len() / 2]
}

fn bench_pool(pool: &ThreadPool, pw: &Array2<f64>, warmup: usize, runs: usize) -> f64 {
  for _ in 0..warmup {
    pool.install(|| {
      let out = distance_ecdf(DistanceMatrix::from(pw), None, None, 0.0, false)
        .expect("ecdf failed");
      black_box(out);
    });
  }
  let mut samples = Vec::with_capacity(runs);
  for _ in 0..runs {
    let start = Instant::now();
    pool.install(|| {
      let out = distance_ecdf(DistanceMatrix::from(pw), None, None, 0.0, false)
        .expect("ecdf failed");
      black_box(out);
    });
    samples.push(start.elapsed().as_secs_f64() * 1e3);
  }
  median_ms(&mut samples)
}

fn run_case(name: &str, rows: usize, cols: usize, single: &ThreadPool, multi: &ThreadPool) {
  let mut rng = StdRng::seed_from_u64(7);
  let pw = Array2::from_shape_fn((rows, cols), |_| rng.gen_range(0..64) as f64);

  let t1 = bench_pool(single, &pw, 1, 5);
  let tn = bench_pool(multi, &pw, 1, 5);
  let speedup = t1 / tn;
  println!(
    "{name:>12} | rows={rows:<5} cols={cols:<5} | 1T={t1:>8.2} ms | MT={tn:>8.2} ms | speedup={speedup:>5.2}x"
  );
}

fn main() {
  let threads = std::thread::available_parallelism()
    .map(|v| v.get())
    .unwrap_or(1);
  let mt_threads = threads.max(2);
  let single = ThreadPoolBuilder::new()
    .num_threads(1)
    .build()
    .expect("failed to build single-thread pool");
  let multi = ThreadPoolBuilder::new()
    .num_threads(mt_threads)
    .build()
    .expect("failed to build multi-thread pool");

  println!("distance_ecdf per-row parallelism benchmark");
  println!("Using MT threads: {mt_threads}");
  println!();

  run_case("small", 256, 1024, &single, &multi);
  run_case("wide", 256, 8192, &single, &multi);
  run_case("tall", 2048, 1024, &single, &multi);
}
