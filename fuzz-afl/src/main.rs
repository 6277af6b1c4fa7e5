#[macro_use]
extern crate afl;

fn main() {
    fuzz!(|data: &[u8]| {
        let mut in_place: Vec<(u8, usize)> = data.iter().copied().zip(0..).collect();
        let mut expected = in_place.clone();
        let mut buffered = in_place.clone();

        grailsort::sort_by(&mut in_place, |a, b| a.0.cmp(&b.0));
        grailsort::sort_by_with_dynamic_buffer(&mut buffered, |a, b| a.0.cmp(&b.0));
        expected.sort_by(|a, b| a.0.cmp(&b.0));

        assert_eq!(in_place, expected);
        assert_eq!(buffered, expected);
    });
}
