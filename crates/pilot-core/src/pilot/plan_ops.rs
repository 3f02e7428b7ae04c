//! Todo list operations for the Pilot.

use std::sync::Arc;

use super::{blocking, Pilot};
use crate::{
    display::SessionStatus,
    error::{PilotError, Result},
    params::{apply_edits, PlanEdit},
    plan::Plan,
};

impl Pilot {
    /// Reads the todo list, or `None` when no interactive rebase is in
    /// progress.
    pub async fn load_plan(&self) -> Result<Option<Plan>> {
        let store = Arc::clone(&self.store);

        blocking(move || {
            let mut plan = Plan::new();
            Ok(plan.parse(store.as_ref())?.then_some(plan))
        })
        .await
    }

    /// Applies `edits` to the current todo list and writes it back.
    ///
    /// Nothing is written unless every edit is valid.
    pub async fn edit_plan(&self, edits: Vec<PlanEdit>) -> Result<Plan> {
        let store = Arc::clone(&self.store);

        blocking(move || {
            let mut plan = Plan::new();
            if !plan.parse(store.as_ref())? {
                return Err(PilotError::NotRebasing);
            }
            apply_edits(&mut plan, &edits)?;
            plan.persist(store.as_ref())?;
            Ok(plan)
        })
        .await
    }

    /// Writes `plan` back to the store. Returns `false` when no rebase is in
    /// progress.
    pub async fn save_plan(&self, plan: Plan) -> Result<bool> {
        let store = Arc::clone(&self.store);

        blocking(move || plan.persist(store.as_ref())).await
    }

    /// Accepts the store's current todo list as the one the next
    /// conflict-checked continue compares against.
    pub async fn force_update_last_step_list_to_current(&self) -> Result<()> {
        let runner = Arc::clone(&self.runner);

        blocking(move || runner.coordinator().force_update_last_step_list_to_current()).await
    }

    /// Current state of the session and, while rebasing, its todo list.
    pub async fn status(&self) -> Result<SessionStatus> {
        let store = Arc::clone(&self.store);
        let state = self.runner.state();

        blocking(move || {
            let rebasing = store.is_interactive_rebase()?;
            let started_at = if rebasing { store.started_at()? } else { None };
            let mut plan = Plan::new();
            let plan = plan.parse(store.as_ref())?.then_some(plan);
            Ok(SessionStatus {
                state,
                rebasing,
                started_at,
                plan,
            })
        })
        .await
    }
}
