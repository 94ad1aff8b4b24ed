use packed_bitvec::BitVector;

fn main() {
    let mut used = BitVector::new();
    used.set_range(0..130).unwrap();
    used.clear(5);
    used.clear(64);

    // walk the free slots from the top of the used region down to zero
    let mut free = Vec::new();
    let mut from = Some(used.len() - 1);
    while let Some(idx) = from.and_then(|from| used.previous_clear_bit(from)) {
        free.push(idx);
        from = idx.checked_sub(1);
    }

    assert_eq!(free, [64, 5]);
}
