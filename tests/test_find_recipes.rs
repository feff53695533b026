use mockito::{Matcher, Server};
use recipe_finder::{find_recipes_with, FinderError, LookupError, SearchPolicy, SpoonacularClient};

#[tokio::test]
async fn test_ingredients_are_normalized_and_deduplicated() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/recipes/findByIngredients")
        .match_query(Matcher::UrlEncoded(
            "ingredients".into(),
            "Apples,Flour,Sugar".into(),
        ))
        .with_status(200)
        .with_body(r#"[{"id": 641803, "title": "Apple Crumble"}]"#)
        .create_async()
        .await;

    let client = SpoonacularClient::with_base_url("test_key".to_string(), server.url());
    let recipes = find_recipes_with(
        &client,
        SearchPolicy::default(),
        &["apples", " FLOUR", "Apples", "", "sugar "],
    )
    .await
    .unwrap();

    assert_eq!(recipes.len(), 1);
    assert_eq!(recipes[0].title, "Apple Crumble");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_no_ingredients_skips_lookup() {
    let mut server = Server::new_async().await;
    let never = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let client = SpoonacularClient::with_base_url("test_key".to_string(), server.url());
    let recipes = find_recipes_with(&client, SearchPolicy::default(), &["  ", ""])
        .await
        .unwrap();

    assert!(recipes.is_empty());
    never.assert_async().await;
}

#[tokio::test]
async fn test_lookup_errors_are_returned() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/recipes/findByIngredients")
        .match_query(Matcher::Any)
        .with_status(402)
        .with_body(r#"{"status":"failure","code":402}"#)
        .create_async()
        .await;

    let client = SpoonacularClient::with_base_url("test_key".to_string(), server.url());
    let result = find_recipes_with(&client, SearchPolicy::default(), &["egg"]).await;

    assert!(matches!(
        result,
        Err(FinderError::Lookup(LookupError::Status { status: 402, .. }))
    ));
}
