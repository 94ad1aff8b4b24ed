use std::collections::BTreeSet;

use packed_bitvec::BitVector;
use proptest::prelude::*;

const MAX_BIT: usize = 400;

fn bits() -> impl Strategy<Value = BTreeSet<usize>> {
    prop::collection::btree_set(0..MAX_BIT, 0..48)
}

fn ordered_range() -> impl Strategy<Value = (usize, usize)> {
    (0..MAX_BIT + 50, 0..MAX_BIT + 50).prop_map(|(a, b)| (a.min(b), a.max(b)))
}

fn to_vector(model: &BTreeSet<usize>) -> BitVector {
    model.iter().copied().collect()
}

fn to_model(bv: &BitVector) -> BTreeSet<usize> {
    bv.iter_ones().collect()
}

proptest! {
    #[test]
    fn queries_agree_with_model(model in bits()) {
        let bv = to_vector(&model);

        prop_assert_eq!(bv.cardinality(), model.len());
        prop_assert_eq!(bv.len(), model.last().map_or(0, |max| max + 1));
        prop_assert_eq!(bv.is_empty(), model.is_empty());
        for idx in 0..MAX_BIT {
            prop_assert_eq!(bv.get(idx), model.contains(&idx));
        }
    }

    #[test]
    fn set_grows_and_reads_back(model in bits(), idx in 0usize..5000) {
        let mut bv = to_vector(&model);
        bv.set(idx);
        prop_assert!(bv.get(idx));
        prop_assert!(bv.size() > idx);

        bv.clear(idx);
        prop_assert!(!bv.get(idx));
    }

    #[test]
    fn cardinality_inclusion_exclusion(a in bits(), b in bits()) {
        let a = to_vector(&a);
        let b = to_vector(&b);
        prop_assert_eq!(
            a.cardinality() + b.cardinality(),
            (&a | &b).cardinality() + (&a & &b).cardinality()
        );
    }

    #[test]
    fn set_algebra_agrees_with_model(a in bits(), b in bits()) {
        let (va, vb) = (to_vector(&a), to_vector(&b));

        prop_assert_eq!(to_model(&(&va & &vb)), &a & &b);
        prop_assert_eq!(to_model(&(&va | &vb)), &a | &b);
        prop_assert_eq!(to_model(&(&va ^ &vb)), &a ^ &b);
        prop_assert_eq!(to_model(&(&va - &vb)), &a - &b);
        prop_assert_eq!(va.intersects(&vb), !a.is_disjoint(&b));
        prop_assert_eq!(va.contains_all(&vb), b.is_subset(&a));
    }

    #[test]
    fn and_not_then_and_is_empty(a in bits(), b in bits()) {
        let mut va = to_vector(&a);
        let vb = to_vector(&b);
        va.and_not(&vb);
        va.and(&vb);
        prop_assert!(va.is_empty());
    }

    #[test]
    fn word_array_round_trip(model in bits(), capacity in 0usize..1000) {
        let mut bv = BitVector::with_capacity(capacity);
        bv.extend(model.iter().copied());
        let copy = BitVector::copy_of_words(&bv.to_word_array());

        prop_assert_eq!(&copy, &bv);
        prop_assert_eq!(copy.hash_value(), bv.hash_value());
    }

    #[test]
    fn scan_chain_matches_set_notation(model in bits()) {
        let bv = to_vector(&model);

        let mut chained = Vec::new();
        let mut next = bv.next_set_bit(0);
        while let Some(idx) = next {
            chained.push(idx.to_string());
            next = bv.next_set_bit(idx + 1);
        }
        prop_assert_eq!(bv.to_set_notation(), format!("{{{}}}", chained.join(", ")));
    }

    #[test]
    fn scans_agree_with_model(model in bits(), from in 0usize..MAX_BIT + 100) {
        let bv = to_vector(&model);

        prop_assert_eq!(bv.next_set_bit(from), model.range(from..).next().copied());
        prop_assert_eq!(
            bv.next_clear_bit(from),
            (from..).find(|idx| !model.contains(idx)).unwrap()
        );
        prop_assert_eq!(bv.previous_set_bit(from), model.range(..=from).next_back().copied());
        prop_assert_eq!(
            bv.previous_clear_bit(from),
            (0..=from).rev().find(|idx| !model.contains(idx))
        );
    }

    #[test]
    fn range_ops_agree_with_model(model in bits(), range in ordered_range()) {
        let (start, end) = range;
        let mut set = to_vector(&model);
        set.set_range(start..end).unwrap();
        let expected: BTreeSet<usize> = model.iter().copied().chain(start..end).collect();
        prop_assert_eq!(to_model(&set), expected);

        let mut cleared = to_vector(&model);
        cleared.clear_range(start..end).unwrap();
        let expected: BTreeSet<usize> =
            model.iter().copied().filter(|idx| !(start..end).contains(idx)).collect();
        prop_assert_eq!(to_model(&cleared), expected);

        let mut flipped = to_vector(&model);
        flipped.flip_range(start..end).unwrap();
        let toggled: BTreeSet<usize> = (start..end).collect();
        prop_assert_eq!(to_model(&flipped), &model ^ &toggled);
    }

    #[test]
    fn slice_agrees_with_model(model in bits(), range in ordered_range()) {
        let (start, end) = range;
        let bv = to_vector(&model);
        let slice = bv.slice(start..end).unwrap();
        let expected: BTreeSet<usize> = model.range(start..end).map(|idx| idx - start).collect();
        prop_assert_eq!(to_model(&slice), expected);
    }

    #[test]
    fn equality_ignores_capacity(model in bits(), capacity in 0usize..2000) {
        let mut roomy = BitVector::with_capacity(capacity);
        roomy.extend(model.iter().copied());
        let mut tight = to_vector(&model);
        tight.trim_to_size();

        prop_assert_eq!(&roomy, &tight);
        prop_assert_eq!(roomy.hash_value(), tight.hash_value());
    }
}
