#![no_main]

use libfuzzer_sys::fuzz_target;

// First byte picks the buffer, the rest is sorted as little endian u16 keys.
fuzz_target!(|data: &[u8]| {
    let Some((&strategy, rest)) = data.split_first() else {
        return;
    };

    let mut v: Vec<(u16, usize)> = rest
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .zip(0..)
        .collect();
    let mut expected = v.clone();

    let compare = |a: &(u16, usize), b: &(u16, usize)| a.0.cmp(&b.0);
    if strategy % 2 == 0 {
        grailsort::sort_by_with_static_buffer(&mut v, compare);
    } else {
        grailsort::sort_by_with_dynamic_buffer(&mut v, compare);
    }
    expected.sort_by(compare);

    assert_eq!(v, expected);
});
