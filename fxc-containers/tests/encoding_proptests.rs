//! Property-based tests for the colour-in-index packing and the two node
//! link encodings.

use fxc_containers::rbtree::{DedicatedColor, EmbeddedColor, NodeLinks};
use fxc_containers::{IndexWithEmbeddedColor, NodeColor, NULL_INDEX};
use proptest::prelude::*;

/// Any index the packing accepts, including the null sentinel.
fn packable_index() -> impl Strategy<Value = usize> {
    prop_oneof![
        8 => 0..IndexWithEmbeddedColor::INDEX_LIMIT,
        1 => Just(IndexWithEmbeddedColor::INDEX_LIMIT - 1),
        1 => Just(NULL_INDEX),
    ]
}

fn color() -> impl Strategy<Value = NodeColor> {
    prop_oneof![Just(NodeColor::Black), Just(NodeColor::Red)]
}

#[derive(Debug, Clone)]
enum Write {
    Left(usize),
    Right(usize),
    Parent(usize),
    Color(NodeColor),
}

fn writes() -> impl Strategy<Value = Vec<Write>> {
    prop::collection::vec(
        prop_oneof![
            packable_index().prop_map(Write::Left),
            packable_index().prop_map(Write::Right),
            packable_index().prop_map(Write::Parent),
            color().prop_map(Write::Color),
        ],
        0..32,
    )
}

fn apply<L: NodeLinks>(links: &mut L, write: &Write) {
    match *write {
        Write::Left(i) => links.set_left(i),
        Write::Right(i) => links.set_right(i),
        Write::Parent(i) => links.set_parent(i),
        Write::Color(c) => links.set_color(c),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1024))]

    /// Setting the index then the colour (or the reverse) reads both back.
    #[test]
    fn index_and_color_round_trip(index in packable_index(), c in color(), index_first: bool) {
        let mut packed = IndexWithEmbeddedColor::default();
        if index_first {
            packed.set_index(index);
            packed.set_color(c);
        } else {
            packed.set_color(c);
            packed.set_index(index);
        }
        prop_assert_eq!(packed.index(), index);
        prop_assert_eq!(packed.color(), c);
    }

    /// Overwriting one field never perturbs the other.
    #[test]
    fn fields_are_independent(a in packable_index(), b in packable_index(), c1 in color(), c2 in color()) {
        let mut packed = IndexWithEmbeddedColor::new(a, c1);
        packed.set_color(c2);
        prop_assert_eq!(packed.index(), a);
        packed.set_index(b);
        prop_assert_eq!(packed.color(), c2);
        prop_assert_eq!(packed.index(), b);
    }

    /// Both link encodings present identical logical state after the same
    /// sequence of writes.
    #[test]
    fn encodings_agree(writes in writes()) {
        let mut dedicated = DedicatedColor::default();
        let mut embedded = EmbeddedColor::default();
        for write in &writes {
            apply(&mut dedicated, write);
            apply(&mut embedded, write);
        }
        prop_assert_eq!(dedicated.left(), embedded.left());
        prop_assert_eq!(dedicated.right(), embedded.right());
        prop_assert_eq!(dedicated.parent(), embedded.parent());
        prop_assert_eq!(dedicated.color(), embedded.color());
    }
}
