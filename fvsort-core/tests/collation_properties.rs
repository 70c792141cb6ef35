//! Property tests for collation and confusable normalization

use fvsort_core::{
    nfc, normalize_confusables, Alphabet, CollationEngine, ConfusableMap, GraphemeTokenizer,
    MAX_ALPHABET_LENGTH, OOV_BASE,
};
use proptest::prelude::*;

const LETTERS: [&str; 8] = ["a", "b", "c", "ch", "k", "kw", "ł", "ʔ"];

fn sorter() -> CollationEngine {
    let alphabet = Alphabet::from_ordered_graphemes(LETTERS).unwrap();
    CollationEngine::new(alphabet, ["-"]).unwrap()
}

/// Words built mostly from alphabet letters, with some unknown characters
fn word() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            4 => prop::sample::select(LETTERS.to_vec()).prop_map(str::to_string),
            1 => prop::sample::select(vec![" ", "-", "x", "é", "ŋ"]).prop_map(str::to_string),
        ],
        0..10,
    )
    .prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn rank_word_is_deterministic(w in word()) {
        let sorter = sorter();
        prop_assert_eq!(sorter.rank_word(&w), sorter.rank_word(&w));
        prop_assert_eq!(sorter.to_custom_order_string(&w), sorter.to_custom_order_string(&w));
    }

    #[test]
    fn custom_order_string_matches_rank_order(a in word(), b in word()) {
        let sorter = sorter();
        let by_ranks = sorter.rank_word(&a).cmp(&sorter.rank_word(&b));
        let by_string = sorter
            .to_custom_order_string(&a)
            .cmp(&sorter.to_custom_order_string(&b));
        prop_assert_eq!(by_ranks, by_string);
    }

    #[test]
    fn tokens_cover_the_input(w in word()) {
        let tokenizer = GraphemeTokenizer::from_alphabet(sorter().alphabet()).unwrap();
        let joined: String = tokenizer.tokenize(&w).collect();
        prop_assert_eq!(joined, w);
    }

    #[test]
    fn ignorables_contribute_nothing(w in word()) {
        let sorter = sorter();
        prop_assert_eq!(sorter.rank_word(&w), sorter.rank_word(&w.replace('-', "")));
    }

    #[test]
    fn known_ranks_stay_below_oov(w in word()) {
        let sorter = sorter();
        for rank in sorter.rank_word(&w) {
            let known = (rank as usize) < sorter.alphabet().len();
            prop_assert!(known || rank >= OOV_BASE);
        }
    }

    #[test]
    fn custom_order_string_is_nfc_stable(text in "\\PC{0,16}") {
        let sorter = sorter();
        let order = sorter.to_custom_order_string(&nfc(&text));
        prop_assert_eq!(nfc(&order), order);
    }

    #[test]
    fn values_round_trip(w in word()) {
        let sorter = sorter();
        let values = sorter.rank_word(&w);
        let decoded = sorter.values_as_word(&values).unwrap();
        prop_assert_eq!(sorter.rank_word(&decoded), values);
    }

    #[test]
    fn table_round_trips_every_known_rank(rank in 0..MAX_ALPHABET_LENGTH as u32) {
        let graphemes: Vec<String> = (1..MAX_ALPHABET_LENGTH).map(|i| format!("<{i}>")).collect();
        let alphabet = Alphabet::from_ordered_graphemes(graphemes).unwrap();
        let sorter = CollationEngine::new(alphabet, Vec::<String>::new()).unwrap();
        let ch = sorter.table().encode(rank).unwrap();
        prop_assert_eq!(sorter.decode_custom_char(ch), Some(rank));
    }

    #[test]
    fn confusables_without_rules_only_normalize(text in "\\PC{0,16}") {
        let empty = ConfusableMap::new();
        prop_assert_eq!(normalize_confusables(&text, &empty), nfc(&text));
    }

    #[test]
    fn confusable_output_is_never_rescanned(n in 1usize..12) {
        // "AA" -> "A" then a leftover "A" -> "a"
        let map = ConfusableMap::from_pairs([("AA", "A"), ("A", "a")]).unwrap();
        let input = "A".repeat(n);
        let expected = format!("{}{}", "A".repeat(n / 2), "a".repeat(n % 2));
        prop_assert_eq!(normalize_confusables(&input, &map), expected);
    }
}
