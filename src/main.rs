use log::{error, info};
use std::env;

use recipe_finder::{
    Effect, FinderConfig, IngredientSearchWorkflow, Msg, ProductLookup, SpoonacularClient,
};

const USAGE: &str = "Usage: recipe-finder <ingredient>... [--upc <barcode>]";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Ingredients are positional; --upc adds a scanned product
    let mut ingredients = Vec::new();
    let mut barcodes = Vec::new();
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--upc" => barcodes.push(args.next().ok_or(USAGE)?),
            "-h" | "--help" => {
                println!("{}", USAGE);
                return Ok(());
            }
            _ => ingredients.push(arg),
        }
    }

    if ingredients.is_empty() && barcodes.is_empty() {
        return Err(USAGE.into());
    }

    let config = FinderConfig::load()?;
    let mut workflow = IngredientSearchWorkflow::builder()
        .config(config.clone())
        .build()?;
    workflow.start().await;

    for raw in &ingredients {
        if let Err(e) = workflow.submit_ingredient(raw).await {
            error!("Skipping '{}': {}", raw, e);
        }
    }

    if !barcodes.is_empty() {
        let products = SpoonacularClient::new(&config)?;
        for upc in &barcodes {
            let mut scanned = products.product_name(upc).await?;
            if scanned.is_none() {
                error!("No product found for barcode {}", upc);
            }
            workflow.consume_scanned(&mut scanned).await?;
        }
    }

    let names: Vec<&str> = workflow.ingredients().iter().map(|i| i.as_str()).collect();
    info!("Searching recipes for {}", names.join(", "));

    let search = Msg::SearchRequested(workflow.ingredients().to_vec());
    for effect in workflow.dispatch(search).await? {
        if let Effect::ReportLookupFailure { message, .. } = effect {
            return Err(format!("Recipe search failed: {}", message).into());
        }
    }

    let recipes = workflow.results();
    if recipes.is_empty() {
        println!("No recipes found.");
    }
    for recipe in recipes {
        println!(
            "{} (uses {}, missing {})",
            recipe.title, recipe.used_ingredient_count, recipe.missed_ingredient_count
        );
    }

    Ok(())
}
