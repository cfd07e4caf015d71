use omnipost_ai::GeminiClient;

#[tokio::test]
#[ignore = "requires GEMINI_API_KEY and network access"]
async fn live_enhance_and_tags_flow() {
    let client = GeminiClient::from_env();
    assert!(client.is_enabled(), "GEMINI_API_KEY must be configured");

    let enhanced = client
        .try_enhance("went hiking today, saw a deer")
        .await
        .expect("enhance must succeed");
    assert!(!enhanced.is_empty());

    let tags = client
        .try_suggest_tags("went hiking today, saw a deer")
        .await
        .expect("suggest_tags must succeed");
    assert!(tags.iter().all(|tag| !tag.is_empty()));
}
