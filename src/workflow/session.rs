use log::{debug, error, info, warn};
use std::collections::VecDeque;
use std::mem;

use crate::builder::SearchSessionBuilder;
use crate::error::{FinderError, ValidationError};
use crate::lookup::{RecipeLookup, SearchPolicy};
use crate::model::{Ingredient, RecipeSummary};
use crate::workflow::{update, Effect, Msg, Notification, Notifier, WorkflowState};

/// One ingredient search screen session.
///
/// Operations run one at a time (`&mut self`); lookups are awaited to
/// completion before the next operation starts.
pub struct IngredientSearchWorkflow {
    state: WorkflowState,
    lookup: Box<dyn RecipeLookup>,
    notifier: Box<dyn Notifier>,
    policy: SearchPolicy,
}

impl IngredientSearchWorkflow {
    pub fn new(
        lookup: Box<dyn RecipeLookup>,
        notifier: Box<dyn Notifier>,
        policy: SearchPolicy,
    ) -> Self {
        IngredientSearchWorkflow {
            state: WorkflowState::new(),
            lookup,
            notifier,
            policy,
        }
    }

    /// Creates a new builder for a workflow
    pub fn builder() -> SearchSessionBuilder {
        SearchSessionBuilder::default()
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    pub fn ingredients(&self) -> &[Ingredient] {
        self.state.ingredients()
    }

    pub fn results(&self) -> &[RecipeSummary] {
        self.state.results()
    }

    /// Runs the initial empty search, establishing the zero-results baseline.
    pub async fn start(&mut self) {
        info!("Starting ingredient search session");
        // An empty search cannot be rejected
        let _ = self.dispatch(Msg::SearchRequested(Vec::new())).await;
    }

    pub async fn set_input(&mut self, text: impl Into<String>) {
        let _ = self.dispatch(Msg::InputChanged(text.into())).await;
    }

    /// Adds a typed ingredient. Duplicates are ignored without error.
    pub async fn submit_ingredient(&mut self, raw: &str) -> Result<(), FinderError> {
        self.dispatch(Msg::IngredientSubmitted(raw.to_string()))
            .await
            .map(|_| ())
    }

    /// Adds whatever is in the input box.
    pub async fn submit_pending(&mut self) -> Result<(), FinderError> {
        self.dispatch(Msg::PendingSubmitted).await.map(|_| ())
    }

    /// Adds a name produced outside the input box, e.g. a resolved barcode.
    pub async fn submit_external(&mut self, name: Option<String>) -> Result<(), FinderError> {
        self.dispatch(Msg::ExternalIngredient(name)).await.map(|_| ())
    }

    /// Takes the value out of the caller's slot and submits it, so the same
    /// scan is never submitted twice.
    pub async fn consume_scanned(&mut self, slot: &mut Option<String>) -> Result<(), FinderError> {
        let name = slot.take();
        self.submit_external(name).await
    }

    pub async fn remove_ingredient(&mut self, target: &Ingredient) {
        let _ = self.dispatch(Msg::IngredientRemoved(target.clone())).await;
    }

    /// Looks up recipes for the current ingredient list.
    pub async fn search(&mut self) -> &[RecipeSummary] {
        let ingredients = self.state.ingredients().to_vec();
        self.search_with(ingredients).await
    }

    /// Looks up recipes for an explicit ingredient list. A failed lookup leaves
    /// the previous results in place.
    pub async fn search_with(&mut self, ingredients: Vec<Ingredient>) -> &[RecipeSummary] {
        let _ = self.dispatch(Msg::SearchRequested(ingredients)).await;
        self.state.results()
    }

    pub async fn clear_results(&mut self) {
        let _ = self.dispatch(Msg::ResultsCleared).await;
    }

    /// Applies `msg` and runs its effects to completion.
    ///
    /// Returns the effects the host still has to act on:
    /// `Effect::ReleaseExternalInput` and `Effect::ReportLookupFailure`.
    pub async fn dispatch(&mut self, msg: Msg) -> Result<Vec<Effect>, FinderError> {
        let mut queue: VecDeque<Effect> = self.apply(msg).into();
        let mut host_effects = Vec::new();
        let mut rejected: Option<ValidationError> = None;

        while let Some(effect) = queue.pop_front() {
            match effect {
                Effect::Lookup {
                    search_id,
                    ingredients,
                } => {
                    let request = self.policy.request(&ingredients);
                    debug!(
                        "Search #{} via {}: {}",
                        search_id.0,
                        self.lookup.lookup_name(),
                        request.joined_ingredients()
                    );
                    let outcome = self
                        .lookup
                        .find_by_ingredients(&request)
                        .await
                        .map_err(|e| e.to_string());
                    queue.extend(self.apply(Msg::SearchCompleted { search_id, outcome }));
                }
                Effect::RejectInput(reason) => {
                    warn!("Rejected ingredient input: {}", reason);
                    self.notifier.notify(&Notification::from(&reason));
                    rejected = Some(reason);
                }
                Effect::ReportLookupFailure { search_id, message } => {
                    error!(
                        "Recipe search #{} failed, keeping previous results: {}",
                        search_id.0, message
                    );
                    host_effects.push(Effect::ReportLookupFailure { search_id, message });
                }
                Effect::ReleaseExternalInput => host_effects.push(effect),
            }
        }

        match rejected {
            Some(reason) => Err(reason.into()),
            None => Ok(host_effects),
        }
    }

    fn apply(&mut self, msg: Msg) -> Vec<Effect> {
        let (next, effects) = update(mem::take(&mut self.state), msg);
        self.state = next;
        effects
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LookupError;
    use crate::lookup::SearchRequest;
    use crate::workflow::RecordingNotifier;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct ScriptedLookup {
        requests: Arc<Mutex<Vec<SearchRequest>>>,
        fail: bool,
    }

    #[async_trait]
    impl RecipeLookup for ScriptedLookup {
        fn lookup_name(&self) -> &str {
            "scripted"
        }

        async fn find_by_ingredients(
            &self,
            request: &SearchRequest,
        ) -> Result<Vec<RecipeSummary>, LookupError> {
            self.requests.lock().unwrap().push(request.clone());
            if self.fail {
                return Err(LookupError::Parse("boom".to_string()));
            }
            Ok(request
                .ingredients
                .iter()
                .enumerate()
                .map(|(i, name)| RecipeSummary {
                    id: i as u64,
                    title: format!("{} surprise", name),
                    ..Default::default()
                })
                .collect())
        }
    }

    fn workflow(lookup: &ScriptedLookup) -> (IngredientSearchWorkflow, RecordingNotifier) {
        let notifier = RecordingNotifier::new();
        let workflow = IngredientSearchWorkflow::new(
            Box::new(lookup.clone()),
            Box::new(notifier.clone()),
            SearchPolicy::default(),
        );
        (workflow, notifier)
    }

    #[tokio::test]
    async fn test_start_does_not_call_lookup() {
        let lookup = ScriptedLookup::default();
        let (mut workflow, _) = workflow(&lookup);

        workflow.start().await;

        assert!(workflow.results().is_empty());
        assert!(lookup.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_submission_notifies_once() {
        let lookup = ScriptedLookup::default();
        let (mut workflow, notifier) = workflow(&lookup);

        let result = workflow.submit_ingredient("").await;

        assert!(matches!(
            result,
            Err(FinderError::Validation(ValidationError::EmptyIngredient))
        ));
        assert_eq!(notifier.notifications().len(), 1);
        assert!(workflow.ingredients().is_empty());
    }

    #[tokio::test]
    async fn test_search_sends_policy_request() {
        let lookup = ScriptedLookup::default();
        let (mut workflow, _) = workflow(&lookup);

        workflow.submit_ingredient("tomato").await.unwrap();
        workflow.submit_ingredient("basil").await.unwrap();
        let count = workflow.search().await.len();

        assert_eq!(count, 2);
        let requests = lookup.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].joined_ingredients(), "Tomato,Basil");
        assert_eq!(requests[0].max_results, 15);
    }

    #[tokio::test]
    async fn test_failed_lookup_is_absorbed() {
        let lookup = ScriptedLookup {
            fail: true,
            ..Default::default()
        };
        let (mut workflow, notifier) = workflow(&lookup);

        workflow.submit_ingredient("egg").await.unwrap();
        assert!(workflow.search().await.is_empty());
        assert_eq!(lookup.requests.lock().unwrap().len(), 1);
        assert!(notifier.notifications().is_empty());
    }

    #[tokio::test]
    async fn test_dispatch_reports_lookup_failure() {
        let lookup = ScriptedLookup {
            fail: true,
            ..Default::default()
        };
        let (mut workflow, _) = workflow(&lookup);

        let effects = workflow
            .dispatch(Msg::SearchRequested(vec![Ingredient::new("egg").unwrap()]))
            .await
            .unwrap();

        assert!(matches!(
            effects.as_slice(),
            [Effect::ReportLookupFailure { message, .. }] if message.contains("boom")
        ));
    }

    #[tokio::test]
    async fn test_consume_scanned_clears_slot() {
        let lookup = ScriptedLookup::default();
        let (mut workflow, _) = workflow(&lookup);
        let mut slot = Some("PEANUT BUTTER".to_string());

        workflow.consume_scanned(&mut slot).await.unwrap();
        workflow.consume_scanned(&mut slot).await.unwrap();

        assert!(slot.is_none());
        assert_eq!(workflow.ingredients(), &[Ingredient::new("peanut butter").unwrap()]);
    }

    #[tokio::test]
    async fn test_dispatch_returns_host_effects() {
        let lookup = ScriptedLookup::default();
        let (mut workflow, _) = workflow(&lookup);

        let effects = workflow
            .dispatch(Msg::ExternalIngredient(Some("Oats".to_string())))
            .await
            .unwrap();

        assert_eq!(effects, vec![Effect::ReleaseExternalInput]);
    }
}
