use titlematch::{
    find_fuzzy_matches, levenshtein_similarity, search, FuzzyMatcher, SearchOrder, SearchRequest,
    DEFAULT_THRESHOLD,
};

const FORUM_TITLES: [&str; 8] = [
    "Welcome to the forum",
    "How do I reset my password?",
    "Password reset not working",
    "Weekly photo contest",
    "Photo contest results",
    "Pasword reset help",
    "Off-topic chat",
    "Password reset not working",
];

#[test]
fn similarity_properties() {
    let samples = ["", "a", "forum", "photo contest", "pasword"];
    for a in samples {
        assert_eq!(levenshtein_similarity(a, a), 1.0);
        for b in samples {
            let ab = levenshtein_similarity(a, b);
            assert_eq!(ab, levenshtein_similarity(b, a));
            assert!((0.0..=1.0).contains(&ab), "{a:?} vs {b:?} gave {ab}");
        }
    }
    assert_eq!(levenshtein_similarity("abc", "xyz"), 0.0);
}

#[test]
fn typo_in_query_still_finds_titles() {
    let found = find_fuzzy_matches("pasword", &FORUM_TITLES, DEFAULT_THRESHOLD);
    assert_eq!(
        found,
        vec![
            "Pasword reset help",
            "How do I reset my password?",
            "Password reset not working",
        ]
    );
}

#[test]
fn raising_threshold_never_grows_results() {
    let loose = find_fuzzy_matches("photo", &FORUM_TITLES, 0.3);
    let strict = find_fuzzy_matches("photo", &FORUM_TITLES, 0.9);
    assert!(strict.len() <= loose.len());
    assert!(strict.iter().all(|title| loose.contains(title)));
}

#[test]
fn post_listing_filter_keeps_every_post() {
    let request = SearchRequest::new("Password")
        .order(SearchOrder::Input)
        .page(1, 2);
    let page = search(&FORUM_TITLES, &request).unwrap();

    // "password?" and "Pasword" are close enough; the duplicate title stays.
    assert_eq!(page.total, 4);
    assert_eq!(page.total_pages, 2);
    assert!(page.has_next());
    let indices: Vec<usize> = page.items.iter().map(|h| h.index).collect();
    assert_eq!(indices, vec![1, 2]);

    let next = search(&FORUM_TITLES, &request.clone().page(2, 2)).unwrap();
    let indices: Vec<usize> = next.items.iter().map(|h| h.index).collect();
    assert_eq!(indices, vec![5, 7]);
    assert!(!next.has_next());
}

#[test]
fn matcher_is_shareable_across_threads() {
    let matcher = FuzzyMatcher::default();
    let expected = matcher.find_matches("contest", &FORUM_TITLES);

    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| assert_eq!(matcher.find_matches("contest", &FORUM_TITLES), expected));
        }
    });
}
