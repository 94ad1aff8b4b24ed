use packed_bitvec::BitVector;

fn print_free_slots(used: &BitVector, slots: usize) {
    let mut free = Vec::new();
    let mut idx = used.next_clear_bit(0);
    while idx < slots {
        free.push(idx);
        idx = used.next_clear_bit(idx + 1);
    }
    println!("free slots below {slots}: {free:?}");
}

fn main() {
    const SLOTS: usize = 80;

    let mut used = BitVector::new();
    used.set_range(0..10).unwrap();
    used.set(42);
    used.set(70);
    println!("used: {used}");
    print_free_slots(&used, SLOTS);

    let mut reserved = BitVector::new();
    reserved.set_range(60..72).unwrap();
    let claimed = &used | &reserved;
    println!("used or reserved: {claimed:?}");
    print_free_slots(&claimed, SLOTS);

    used.clear_range(0..5).unwrap();
    println!("after releasing 0..5: {used}, highest: {:?}", used.previous_set_bit(usize::MAX));
}
