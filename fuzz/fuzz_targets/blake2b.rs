#![no_main]

use blake2b::{Engine, Params};
use libfuzzer_sys::fuzz_target;

fn split_point(input: &[u8]) -> usize {
  if input.is_empty() {
    return 0;
  }
  (input[0] as usize) % (input.len() + 1)
}

fuzz_target!(|input: &[u8]| {
  let split = split_point(input);
  let (a, b) = input.split_at(split);
  let params = Params::new();

  let ours = Engine::hash(&params, input);

  // Streaming over any split must match the one-shot digest.
  let mut h = Engine::new(&params);
  h.update(a);
  h.update(b);
  assert_eq!(ours, h.finalize());

  // Pausing at the split and resuming must too.
  let mut paused = Engine::new(&params);
  paused.update(a);
  let snapshot = paused.snapshot();
  let mut resumed = Engine::resume(&snapshot, &params).unwrap();
  resumed.update(b);
  assert_eq!(ours, resumed.finalize());

  {
    use blake2::Digest as _;
    let expected = blake2::Blake2b512::digest(input);
    assert_eq!(ours.as_bytes(), &expected[..]);
  }

  // Keyed leg, key derived from the input itself.
  let key_len = split_point(input).min(64);
  if key_len > 0 {
    use blake2::digest::Mac;
    let key = &input[..key_len];
    let mut keyed_params = Params::new();
    keyed_params.set_key(key).unwrap();

    let mut mac = Engine::keyed(&keyed_params).unwrap();
    mac.update(input);

    let mut oracle = blake2::Blake2bMac512::new_from_slice(key).unwrap();
    Mac::update(&mut oracle, input);
    assert_eq!(mac.finalize().as_bytes(), &oracle.finalize().into_bytes()[..]);
  }
});
