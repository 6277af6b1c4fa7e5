//! Input patterns for testing and benchmarking sorts. All patterns produce `i32` values that the
//! callers map into the type under test.
//!
//! Every call draws from a generator seeded with [`random_init_seed`], which stays fixed for the
//! whole process unless overridden with `OVERRIDE_SEED=<u64>` or switched off with
//! [`use_random_seed_each_time`].

use std::env;
use std::sync::atomic::{AtomicBool, Ordering};

use once_cell::sync::OnceCell;
use rand::distributions::Uniform;
use rand::prelude::*;
use zipf::ZipfDistribution;

// --- Public ---

pub fn random(len: usize) -> Vec<i32> {
    //     .
    // : . : :
    // :.:::.::

    let mut rng = new_rng();
    (0..len).map(|_| rng.gen::<i32>()).collect()
}

pub fn random_uniform<R>(len: usize, range: R) -> Vec<i32>
where
    R: Into<Uniform<i32>>,
{
    // :.:.:.::

    let dist: Uniform<i32> = range.into();
    let mut rng = new_rng();
    (0..len).map(|_| dist.sample(&mut rng)).collect()
}

/// Values `0..distinct` in random order, every value present at least once if `len` allows it.
///
/// Useful to pin down exactly how many distinct keys an input offers.
pub fn random_distinct(len: usize, distinct: usize) -> Vec<i32> {
    let distinct = distinct.max(1);
    let mut v: Vec<i32> = (0..len).map(|i| (i % distinct) as i32).collect();
    v.shuffle(&mut new_rng());
    v
}

pub fn random_zipf(len: usize, exponent: f64) -> Vec<i32> {
    // https://en.wikipedia.org/wiki/Zipf's_law

    if len == 0 {
        return Vec::new();
    }

    let dist = ZipfDistribution::new(len, exponent)
        .unwrap_or_else(|()| panic!("invalid zipf parameters len: {len} exponent: {exponent}"));
    let mut rng = new_rng();
    (0..len).map(|_| dist.sample(&mut rng) as i32).collect()
}

pub fn random_sorted(len: usize, sorted_percent: f64) -> Vec<i32> {
    //     .:
    //   .:::. :
    // .::::::.::
    // [----][--]
    // sorted  unsorted

    let mut v = random(len);
    let sorted_len = ((len as f64) * (sorted_percent / 100.0)).round() as usize;
    v[..sorted_len.min(len)].sort_unstable();
    v
}

pub fn all_equal(len: usize) -> Vec<i32> {
    // ......
    // ::::::

    vec![66; len]
}

pub fn ascending(len: usize) -> Vec<i32> {
    //     .:
    //   .:::
    // .:::::

    (0..len as i32).collect()
}

pub fn descending(len: usize) -> Vec<i32> {
    // :.
    // :::.
    // :::::.

    (0..len as i32).rev().collect()
}

pub fn saw_mixed(len: usize, saw_count: usize) -> Vec<i32> {
    // :.  :.    .::.    .:
    // :::.:::..::::::..:::

    if len == 0 {
        return Vec::new();
    }

    let mut v = random(len);
    let chunk_len = (len / saw_count.max(1)).max(1);
    let directions = random_uniform(len / chunk_len + 1, 0..=1);

    for (chunk, direction) in v.chunks_mut(chunk_len).zip(directions) {
        sort_chunk(chunk, direction == 0);
    }

    v
}

pub fn saw_mixed_range(len: usize, range: std::ops::Range<usize>) -> Vec<i32> {
    //     :.
    // :.  :::.    .::.      .:
    // :::.:::::..::::::..:.:::
    // with every saw length picked from `range`.

    if len == 0 {
        return Vec::new();
    }

    let mut v = random(len);
    let max_chunks = len / range.start.max(1) + 1;
    let directions = random_uniform(max_chunks, 0..=1);
    let chunk_lens = random_uniform(max_chunks, (range.start as i32)..(range.end as i32));

    let mut offset = 0;
    for (chunk_len, direction) in chunk_lens.into_iter().zip(directions) {
        if offset >= len {
            break;
        }

        let end = (offset + chunk_len as usize).min(len);
        sort_chunk(&mut v[offset..end], direction == 0);
        offset = end;
    }

    v
}

pub fn pipe_organ(len: usize) -> Vec<i32> {
    //   .:.
    // .:::::.

    let mut v = random(len);
    let (first_half, second_half) = v.split_at_mut(len / 2);
    sort_chunk(first_half, true);
    sort_chunk(second_half, false);
    v
}

/// Makes every later call to a random pattern use a fresh seed. Meant for benchmarks.
///
/// # Panics
///
/// Panics if the seed was pinned with `OVERRIDE_SEED`.
pub fn use_random_seed_each_time() {
    if env::var("OVERRIDE_SEED").is_ok() {
        panic!("Using use_random_seed_each_time conflicts with the external seed override.");
    }

    RANDOM_EACH_TIME.store(true, Ordering::Release);
}

/// The seed random patterns are generated from.
pub fn random_init_seed() -> u64 {
    if RANDOM_EACH_TIME.load(Ordering::Acquire) {
        return thread_rng().gen();
    }

    static SEED: OnceCell<u64> = OnceCell::new();
    *SEED.get_or_init(|| match env::var("OVERRIDE_SEED") {
        Ok(seed) => seed
            .parse()
            .unwrap_or_else(|err| panic!("OVERRIDE_SEED={seed} is not a valid u64: {err}")),
        Err(_) => thread_rng().gen(),
    })
}

// --- Private ---

static RANDOM_EACH_TIME: AtomicBool = AtomicBool::new(false);

fn new_rng() -> StdRng {
    StdRng::seed_from_u64(random_init_seed())
}

fn sort_chunk(chunk: &mut [i32], ascending: bool) {
    if ascending {
        chunk.sort_unstable();
    } else {
        chunk.sort_unstable_by(|a, b| b.cmp(a));
    }
}
