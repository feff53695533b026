use crate::error::ValidationError;
use crate::model::Ingredient;
use crate::workflow::{Effect, Msg, WorkflowState};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: WorkflowState, msg: Msg) -> (WorkflowState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(text) => {
            state.set_pending_input(text);
            Vec::new()
        }
        Msg::IngredientSubmitted(raw) => submit(&mut state, &raw),
        Msg::PendingSubmitted => {
            let raw = state.pending_input().to_string();
            submit(&mut state, &raw)
        }
        Msg::ExternalIngredient(None) => Vec::new(),
        Msg::ExternalIngredient(Some(name)) => {
            let present = Ingredient::new(&name).is_some_and(|c| state.contains(&c));
            // An empty scan result is dropped rather than rejected
            let mut effects = if name.is_empty() || present {
                Vec::new()
            } else {
                submit(&mut state, &name)
            };
            effects.push(Effect::ReleaseExternalInput);
            effects
        }
        Msg::IngredientRemoved(target) => {
            state.remove_ingredient(&target);
            vec![Effect::ReleaseExternalInput]
        }
        Msg::SearchRequested(ingredients) => {
            let search_id = state.issue_search_id();
            if ingredients.is_empty() {
                // Nothing to look up: zero results without a network call
                state.apply_search(search_id, Vec::new());
                Vec::new()
            } else {
                vec![Effect::Lookup {
                    search_id,
                    ingredients,
                }]
            }
        }
        Msg::SearchCompleted { search_id, outcome } => match outcome {
            Ok(recipes) => {
                state.apply_search(search_id, recipes);
                Vec::new()
            }
            Err(message) => vec![Effect::ReportLookupFailure { search_id, message }],
        },
        Msg::ResultsCleared => {
            state.clear_results();
            Vec::new()
        }
    };

    (state, effects)
}

fn submit(state: &mut WorkflowState, raw: &str) -> Vec<Effect> {
    // Checked before trimming: whitespace-only input is silently dropped below
    if raw.is_empty() {
        return vec![Effect::RejectInput(ValidationError::EmptyIngredient)];
    }

    if let Some(candidate) = Ingredient::new(raw) {
        state.add_ingredient(candidate);
    }
    state.clear_pending_input();
    Vec::new()
}
