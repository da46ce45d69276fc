use cocktail_core::config::EmbeddingConfig;
use cocktail_embed::{build_embedder, FakeEmbedder, DEFAULT_DIM};
use cocktail_core::traits::Embedder;

fn cosine(a: &[f32], b: &[f32]) -> f32 { a.iter().zip(b).map(|(x, y)| x * y).sum() }

#[test]
fn fake_embedder_shapes_and_determinism() {
    let embedder = build_embedder(&EmbeddingConfig { fake: true, ..Default::default() }).expect("embedder");
    let texts = vec!["hello world".to_string(), "hello world".to_string()];
    let embs = embedder.embed_batch(&texts).expect("embed_batch");
    let v1 = &embs[0];
    let v2 = &embs[1];

    assert_eq!(v1.len(), DEFAULT_DIM);
    assert_eq!(embedder.dim(), DEFAULT_DIM);

    let norm: f32 = v1.iter().map(|x| x * x).sum::<f32>().sqrt();
    assert!((norm - 1.0).abs() <= 1e-3, "vector is L2-normalized (norm={norm})");

    for (a, b) in v1.iter().zip(v2.iter()) { assert!((a - b).abs() <= 1e-6); }
}

#[test]
fn fake_embedder_ranks_shared_words_higher() {
    let embedder = FakeEmbedder::new(DEFAULT_DIM);
    let texts = vec![
        "How do I make a Margarita?".to_string(),
        "Cocktail name: Margarita Ingredients: Tequila, Lime".to_string(),
        "Cocktail name: Negroni Ingredients: Gin, Campari".to_string(),
    ];
    let embs = embedder.embed_batch(&texts).unwrap();
    assert!(cosine(&embs[0], &embs[1]) > cosine(&embs[0], &embs[2]));
}

#[test]
fn empty_text_does_not_produce_nan() {
    let embs = FakeEmbedder::new(8).embed_batch(&[String::new()]).unwrap();
    assert!(embs[0].iter().all(|x| x.is_finite()));
}
