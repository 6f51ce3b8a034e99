use linkwise::engine::{CancelFlag, SimilarityMatrix, TfIdfVectorizer};
use linkwise::refinery::{KeywordExtractor, TextNormalizer};

// * Test Suite for the text pipeline and the similarity matrix

fn matrix(documents: &[&str]) -> SimilarityMatrix {
    let model = TfIdfVectorizer::new(1000).fit_transform(documents);
    SimilarityMatrix::build(model.vectors(), &CancelFlag::new()).unwrap()
}

#[test]
fn test_normalizer_strips_noise() {
    let normalizer = TextNormalizer::new();
    let text = "Visit https://example.com/x or www.example.org! <b>Internal</b> links, the BEST links.";

    assert_eq!(normalizer.normalize(text), "visit internal link best link");
}

#[test]
fn test_normalizer_handles_empty_input() {
    let normalizer = TextNormalizer::new();
    assert_eq!(normalizer.normalize(""), "");
    assert!(normalizer.tokens("a an to of").is_empty());
}

#[test]
fn test_keywords_and_bigrams() {
    let extractor = KeywordExtractor::new();
    let text = "Internal linking matters. Internal linking helps crawlers. Linking pages.";

    assert_eq!(
        extractor.extract_keywords(text, 3),
        vec!["linking", "internal", "matter"]
    );
    assert_eq!(
        extractor.extract_ngrams(text, 2, 2),
        vec!["internal linking", "linking matter"]
    );
    assert!(extractor.extract_ngrams("single", 2, 5).is_empty());
}

#[test]
fn test_matrix_is_symmetric_with_unit_diagonal() {
    let documents = [
        "seo internal linking strategy",
        "internal linking best practice",
        "unrelated recipe soup",
        "soup recipe winter",
        "",
    ];
    let matrix = matrix(&documents);

    for i in 0..documents.len() {
        assert_eq!(matrix.get(i, i), Some(1.0));
        for j in 0..documents.len() {
            let (ij, ji) = (matrix.get(i, j).unwrap(), matrix.get(j, i).unwrap());
            assert_eq!(ij, ji);
            assert!((0.0..=1.0).contains(&ij));
        }
    }
}

#[test]
fn test_nearest_is_sorted_and_excludes_self() {
    let matrix = matrix(&[
        "seo linking",
        "seo linking guide",
        "seo",
        "soup",
    ]);
    let nearest = matrix.nearest(0, 3);

    assert_eq!(nearest.len(), 3);
    assert!(nearest.iter().all(|(j, _)| *j != 0));
    assert!(nearest.windows(2).all(|w| w[0].1 >= w[1].1));
    assert_eq!(nearest[2].0, 3);
}

#[test]
fn test_cancelled_matrix_build() {
    let model = TfIdfVectorizer::new(1000).fit_transform(&["seo linking", "seo guide"]);
    let cancel = CancelFlag::new();
    let observer = cancel.clone();
    observer.cancel();

    assert!(SimilarityMatrix::build(model.vectors(), &cancel).is_none());
}
