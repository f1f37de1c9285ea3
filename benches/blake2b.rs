use core::hint::black_box;

use blake2b::{Engine, Params};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

/// Deterministic, fast pseudo-random generator suitable for benchmarks.
#[inline]
fn xorshift64star(state: &mut u64) -> u64 {
  let mut x = *state;
  x ^= x >> 12;
  x ^= x << 25;
  x ^= x >> 27;
  *state = x;
  x.wrapping_mul(0x2545F4914F6CDD1D)
}

fn pseudo_random_bytes(len: usize, seed: u64) -> Vec<u8> {
  let mut state = seed ^ (len as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
  let mut out = vec![0u8; len];
  for b in &mut out {
    *b = (xorshift64star(&mut state) >> 56) as u8;
  }
  black_box(&out);
  out
}

fn sized_inputs() -> Vec<(usize, Vec<u8>)> {
  let sizes = [0usize, 64, 128, 256, 1024, 16 * 1024, 64 * 1024, 1024 * 1024];
  sizes
    .into_iter()
    .map(|len| (len, pseudo_random_bytes(len, 0xD1CE_B00C_D15C_0FFE)))
    .collect()
}

fn set_throughput(group: &mut criterion::BenchmarkGroup<'_, criterion::measurement::WallTime>, len: usize) {
  if len == 0 {
    group.throughput(criterion::Throughput::Elements(1));
  } else {
    group.throughput(criterion::Throughput::Bytes(len as u64));
  }
}

fn engine(c: &mut Criterion) {
  let inputs = sized_inputs();
  let mut group = c.benchmark_group("blake2b");

  let params = Params::new();
  let keyed = {
    let mut p = Params::new();
    p.set_key(b"bench key: thirty-two bytes long").unwrap();
    p
  };

  for (len, data) in &inputs {
    set_throughput(&mut group, *len);

    group.bench_with_input(BenchmarkId::new("oneshot/ours", len), data, |b, d| {
      b.iter(|| black_box(Engine::hash(&params, black_box(d))))
    });
    group.bench_with_input(BenchmarkId::new("oneshot/blake2", len), data, |b, d| {
      b.iter(|| {
        use blake2::Digest as _;
        let out = blake2::Blake2b512::digest(black_box(d));
        black_box(out)
      })
    });

    group.bench_with_input(BenchmarkId::new("streaming_1k/ours", len), data, |b, d| {
      b.iter(|| {
        let mut h = Engine::new(&params);
        for chunk in d.chunks(1024) {
          h.update(chunk);
        }
        black_box(h.finalize())
      })
    });

    group.bench_with_input(BenchmarkId::new("oneshot_keyed/ours", len), data, |b, d| {
      b.iter(|| black_box(Engine::hash(&keyed, black_box(d))))
    });
  }

  group.finish();
}

criterion_group!(benches, engine);
criterion_main!(benches);
