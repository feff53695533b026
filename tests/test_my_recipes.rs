use recipe_finder::{
    Collection, FinderError, InMemoryUserStore, LoadState, MyRecipes, MyRecipesView,
    RecipeSummary, StoreError,
};

fn recipe(id: u64, title: &str) -> RecipeSummary {
    RecipeSummary {
        id,
        title: title.to_string(),
        used_ingredient_count: 2,
        ..Default::default()
    }
}

#[tokio::test]
async fn test_new_account_shows_no_recipes() {
    let store = InMemoryUserStore::new();
    store.register_user("alex").unwrap();

    let mut my_recipes = MyRecipes::new(Some("alex".to_string()));
    assert_eq!(my_recipes.view(), MyRecipesView::Loading);

    my_recipes.load(&store).await;
    assert_eq!(my_recipes.view(), MyRecipesView::NoRecipes);
}

#[tokio::test]
async fn test_saving_updates_view() {
    let store = InMemoryUserStore::new();
    store.register_user("alex").unwrap();

    let mut my_recipes = MyRecipes::new(Some("alex".to_string()));
    my_recipes.load(&store).await;

    let saved = my_recipes
        .save(&store, Collection::WishList, recipe(42, "Shakshuka"))
        .await
        .unwrap();
    assert_eq!(saved.doc_id, "recipe1");
    assert_eq!(my_recipes.view(), MyRecipesView::WishListOnly);

    my_recipes
        .save(&store, Collection::PastRecipes, recipe(7, "Pancakes"))
        .await
        .unwrap();
    assert_eq!(my_recipes.view(), MyRecipesView::Both);
    assert_eq!(my_recipes.recipes(Collection::PastRecipes)[0].recipe.title, "Pancakes");
}

#[tokio::test]
async fn test_saved_recipes_survive_a_fresh_load() {
    let store = InMemoryUserStore::new();
    store.register_user("alex").unwrap();

    let mut first = MyRecipes::new(Some("alex".to_string()));
    first.load(&store).await;
    first
        .save(&store, Collection::PastRecipes, recipe(7, "Pancakes"))
        .await
        .unwrap();

    let mut second = MyRecipes::new(Some("alex".to_string()));
    second.load(&store).await;
    assert_eq!(second.view(), MyRecipesView::PastRecipesOnly);
}

#[tokio::test]
async fn test_unknown_user_fails_to_load() {
    let store = InMemoryUserStore::new();
    let mut my_recipes = MyRecipes::new(Some("nobody".to_string()));
    my_recipes.load(&store).await;

    assert!(matches!(my_recipes.view(), MyRecipesView::LoadFailed(_)));
    assert!(matches!(
        my_recipes.state(Collection::WishList),
        LoadState::Failed(_)
    ));
}

#[tokio::test]
async fn test_logged_out_cannot_save() {
    let store = InMemoryUserStore::new();
    let mut my_recipes = MyRecipes::new(None);

    my_recipes.load(&store).await;
    assert_eq!(my_recipes.view(), MyRecipesView::LoginRequired);

    let result = my_recipes
        .save(&store, Collection::WishList, recipe(1, "Toast"))
        .await;
    assert!(matches!(
        result,
        Err(FinderError::Store(StoreError::LoginRequired))
    ));
}
