use mockito::{Matcher, Server};
use recipe_finder::{
    Effect, FinderConfig, FinderError, Ingredient, IngredientSearchWorkflow, Msg,
    RankingStrategy, RecordingNotifier, ValidationError,
};

const THREE_RECIPES: &str = r#"[
    {"id": 1, "title": "Tomato Milk Soup", "image": "https://img.example/1.jpg",
     "usedIngredientCount": 2, "missedIngredientCount": 1, "likes": 4},
    {"id": 2, "title": "Creamy Tomato Pasta", "usedIngredientCount": 2, "missedIngredientCount": 3},
    {"id": 3, "title": "Panna Cotta", "usedIngredientCount": 1, "missedIngredientCount": 2}
]"#;

fn session_for(server: &Server, notifier: &RecordingNotifier) -> IngredientSearchWorkflow {
    IngredientSearchWorkflow::builder()
        .config(FinderConfig::default())
        .api_key("test_key")
        .base_url(server.url())
        .notifier(Box::new(notifier.clone()))
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_search_then_failure_keeps_results() {
    let mut server = Server::new_async().await;
    let ok = server
        .mock("GET", "/recipes/findByIngredients")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("apiKey".into(), "test_key".into()),
            Matcher::UrlEncoded("ingredients".into(), "Tomato,Milk".into()),
            Matcher::UrlEncoded("number".into(), "15".into()),
            Matcher::UrlEncoded("ranking".into(), "1".into()),
            Matcher::UrlEncoded("ignorePantry".into(), "true".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(THREE_RECIPES)
        .expect(1)
        .create_async()
        .await;

    let notifier = RecordingNotifier::new();
    let mut workflow = session_for(&server, &notifier);
    workflow.start().await;

    workflow.submit_ingredient("tomato").await.unwrap();
    workflow.submit_ingredient("Milk").await.unwrap();
    assert_eq!(workflow.search().await.len(), 3);
    ok.assert_async().await;

    ok.remove_async().await;
    let failing = server
        .mock("GET", "/recipes/findByIngredients")
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body("upstream unavailable")
        .create_async()
        .await;

    let search = Msg::SearchRequested(workflow.ingredients().to_vec());
    let effects = workflow
        .dispatch(search)
        .await
        .unwrap();
    assert!(matches!(
        effects.as_slice(),
        [Effect::ReportLookupFailure { message, .. }] if message.contains("500")
    ));

    let results = workflow.results();
    assert_eq!(results.len(), 3);
    assert_eq!(results[0].title, "Tomato Milk Soup");
    failing.assert_async().await;
    assert!(notifier.notifications().is_empty());
}

#[tokio::test]
async fn test_start_and_empty_search_make_no_requests() {
    let mut server = Server::new_async().await;
    let never = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let notifier = RecordingNotifier::new();
    let mut workflow = session_for(&server, &notifier);
    workflow.start().await;
    assert!(workflow.search().await.is_empty());

    never.assert_async().await;
}

#[tokio::test]
async fn test_empty_input_warns_user() {
    let server = Server::new_async().await;
    let notifier = RecordingNotifier::new();
    let mut workflow = session_for(&server, &notifier);

    workflow.set_input("").await;
    let result = workflow.submit_pending().await;

    assert!(matches!(
        result,
        Err(FinderError::Validation(ValidationError::EmptyIngredient))
    ));
    assert_eq!(notifier.notifications().len(), 1);
    assert!(workflow.ingredients().is_empty());
}

#[tokio::test]
async fn test_clear_results_keeps_ingredients() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/recipes/findByIngredients")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(THREE_RECIPES)
        .create_async()
        .await;

    let notifier = RecordingNotifier::new();
    let mut workflow = session_for(&server, &notifier);
    workflow.submit_ingredient("tomato").await.unwrap();
    workflow.search().await;
    workflow.clear_results().await;

    assert!(workflow.results().is_empty());
    assert_eq!(workflow.ingredients(), &[Ingredient::new("tomato").unwrap()]);
}

#[tokio::test]
async fn test_builder_policy_overrides() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/recipes/findByIngredients")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("number".into(), "5".into()),
            Matcher::UrlEncoded("ranking".into(), "2".into()),
        ]))
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let mut workflow = IngredientSearchWorkflow::builder()
        .config(FinderConfig::default())
        .api_key("test_key")
        .base_url(server.url())
        .max_results(5)
        .ranking(RankingStrategy::MinimizeMissingIngredients)
        .build()
        .unwrap();

    workflow.submit_ingredient("egg").await.unwrap();
    assert!(workflow.search().await.is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_scanned_product_joins_search() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/recipes/findByIngredients")
        .match_query(Matcher::UrlEncoded(
            "ingredients".into(),
            "Egg,Peanut butter".into(),
        ))
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let notifier = RecordingNotifier::new();
    let mut workflow = session_for(&server, &notifier);
    workflow.submit_ingredient("egg").await.unwrap();

    let mut scan = Some("PEANUT BUTTER".to_string());
    workflow.consume_scanned(&mut scan).await.unwrap();
    assert!(scan.is_none());

    workflow.search().await;
    mock.assert_async().await;
}
