//! End-to-end tests: confusable cleanup, collation and custom order strings

use fvsort_core::{
    normalize_confusables, Alphabet, CollationEngine, ConfusableMap, GraphemeTokenizer,
    SiteAlphabet, SiteConfig, OOV_BASE, OOV_FLAG,
};

fn engine(graphemes: &[&str], ignorable: &[&str]) -> CollationEngine {
    let alphabet = Alphabet::from_ordered_graphemes(graphemes.iter().copied()).unwrap();
    CollationEngine::new(alphabet, ignorable.iter().copied()).unwrap()
}

#[test]
fn test_abc_scenario() {
    let sorter = engine(&["a", "b", "c"], &[]);
    let confusables = ConfusableMap::new();

    let word = normalize_confusables("abc", &confusables);
    assert_eq!(sorter.rank_word(&word).as_slice(), &[1, 2, 3]);

    let order: Vec<char> = sorter.to_custom_order_string(&word).chars().collect();
    assert_eq!(order.len(), 3);
    assert!(order.windows(2).all(|pair| pair[0] < pair[1]));
    for (rank, ch) in (1..).zip(&order) {
        assert_eq!(sorter.decode_custom_char(*ch), Some(rank));
    }

    assert_eq!(
        sorter.rank_word("abcd").as_slice(),
        &[1, 2, 3, OOV_BASE + u32::from('d')]
    );
    assert!(sorter
        .to_custom_order_string("abcd")
        .ends_with(&format!("{OOV_FLAG}d")));
}

#[test]
fn test_sorting_a_word_list() {
    // Digraph alphabet where "ch" follows "c" and "kw" follows "k"
    let sorter = engine(&["a", "c", "ch", "e", "k", "kw", "ł", "ʔ"], &["-"]);
    let mut words = vec![
        "kwaʔ", "chek", "ʔac", "cak", "ka-ł", "łe", "ka", "zebra", "che",
    ];
    sorter.sort_by_key(&mut words, |w| *w);
    assert_eq!(
        words,
        vec!["cak", "che", "chek", "ka", "ka-ł", "kwaʔ", "łe", "ʔac", "zebra"]
    );

    // custom order strings give the same order
    let mut by_string = words.clone();
    by_string.sort_by_key(|w| sorter.to_custom_order_string(w));
    assert_eq!(by_string, words);
}

#[test]
fn test_confusables_then_collation() {
    let sorter = engine(&["a", "ch"], &[]);
    let confusables = ConfusableMap::from_pairs([("č", "ch"), ("á", "a")]).unwrap();

    let cleaned = normalize_confusables("čá", &confusables);
    assert_eq!(cleaned, "cha");
    assert_eq!(sorter.rank_word(&cleaned).as_slice(), &[2, 1]);
    assert_eq!(GraphemeTokenizer::split(&cleaned, sorter.alphabet()).unwrap(), vec!["ch", "a"]);
}

#[test]
fn test_decomposed_confusable_input_is_composed() {
    let confusables = ConfusableMap::from_pairs([("x", "y")]).unwrap();
    // c + combining caron becomes č
    assert_eq!(normalize_confusables("c\u{030c}x", &confusables), "\u{010d}y");
}

#[test]
fn test_site_workflow_from_config() {
    let config = SiteConfig::from_toml_str(
        r#"
[metadata]
code = "fv-demo"
name = "FV Demo"

[ignorables]
chars = ["'"]

[[characters]]
title = "a"
variants = ["A"]
confusables = ["á"]

[[characters]]
title = "tł"
variants = ["Tł", "TŁ"]

[[characters]]
title = "t"
variants = ["T"]
"#,
    )
    .unwrap();
    let site = SiteAlphabet::from_config(&config).unwrap();

    let title = site.clean_confusables("Tłá't");
    assert_eq!(title, "Tła't");
    assert_eq!(site.custom_order(&title), site.custom_order("tłat"));
    assert_eq!(site.base_form(&title), "tła't");
    assert_eq!(site.character_list(&title), vec!["Tł", "a", "'", "t"]);

    // tł is ranked before t in this alphabet
    assert!(site.custom_order("tła") < site.custom_order("ta"));
}

#[test]
fn test_engine_shared_across_threads() {
    use std::sync::Arc;
    use std::thread;

    let sorter = Arc::new(engine(&["a"], &[]));
    let handles: Vec<_> = ['x', 'y', 'z']
        .into_iter()
        .map(|ch| {
            let sorter = Arc::clone(&sorter);
            thread::spawn(move || sorter.rank_word(&format!("a{ch}")))
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap().len(), 2);
    }

    assert_eq!(sorter.registered_oov(), vec!['x', 'y', 'z']);
    let rank = OOV_BASE + u32::from('y');
    assert_eq!(sorter.values_as_word(&[1, rank]).unwrap(), "ay");
}
