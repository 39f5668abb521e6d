//! ---
//! mv_section: "02-grid-walker"
//! mv_subsection: "module"
//! mv_type: "source"
//! mv_scope: "code"
//! mv_description: "Goal-map walker, plans and run reports."
//! mv_version: "v0.1.0"
//! mv_owner: "tbd"
//! ---
use megaverse_api::{EntityKind, GoalMap, MegaverseApi, MegaverseError};
use megaverse_logging::{
    log_system_event, mv_error, mv_info, mv_warn, LogContext, SystemEventOutcome,
};

use crate::plan::{plan, PlannedAction, Target, WalkMode};
use crate::report::{CellFailure, WalkReport};

const RESET_PROGRESS_EVERY: usize = 10;

/// Drives apply/reset walks against a [`MegaverseApi`].
pub struct GridWalker<'a, A: MegaverseApi + ?Sized> {
    api: &'a A,
}

impl<'a, A: MegaverseApi + ?Sized> GridWalker<'a, A> {
    pub fn new(api: &'a A) -> Self {
        Self { api }
    }

    /// Create every non-space goal entity.
    pub async fn apply(&self) -> Result<WalkReport, MegaverseError> {
        self.run(WalkMode::Apply).await
    }

    /// Delete every non-space goal entity.
    pub async fn reset(&self) -> Result<WalkReport, MegaverseError> {
        self.run(WalkMode::Reset).await
    }

    /// Fetch the goal map once and walk it. Only the fetch can fail the run.
    pub async fn run(&self, mode: WalkMode) -> Result<WalkReport, MegaverseError> {
        let goal = self.fetch_goal(mode).await?;
        Ok(self.walk(&goal, mode).await)
    }

    pub async fn fetch_goal(&self, mode: WalkMode) -> Result<GoalMap, MegaverseError> {
        let ctx = LogContext::new().with_phase(mode.as_ref());
        match self.api.goal_map().await {
            Ok(goal) => {
                log_system_event(
                    Some(&ctx),
                    "goal.fetch",
                    &format!("goal map fetched ({}x{})", goal.rows(), goal.columns()),
                    SystemEventOutcome::Success,
                );
                Ok(goal)
            }
            Err(err) => {
                log_system_event(
                    Some(&ctx),
                    "goal.fetch",
                    &format!("error fetching goal map: {}", err),
                    SystemEventOutcome::Fault,
                );
                Err(err)
            }
        }
    }

    /// Walk an already fetched goal map. Per-cell failures are recorded and
    /// logged; the walk always visits every cell. A reset logs progress every
    /// ten visited positions, spaces included.
    pub async fn walk(&self, goal: &GoalMap, mode: WalkMode) -> WalkReport {
        let plan = plan(goal, mode);
        let phase = mode.as_ref();
        let mut report = WalkReport::new(mode);
        report.unrecognised = plan.unrecognised.len();

        for skipped in &plan.unrecognised {
            let ctx = LogContext::new()
                .with_cell(skipped.position.row, skipped.position.column)
                .with_phase(phase);
            mv_warn!(context = ctx, "skipping cell: {}", skipped.reason);
        }

        log_system_event(
            Some(&LogContext::new().with_phase(phase)),
            "walk.start",
            &format!(
                "{} walk over {} cells with {} actions",
                mode,
                plan.cells,
                plan.actions.len()
            ),
            SystemEventOutcome::Success,
        );

        let mut visited = 0;
        for action in &plan.actions {
            advance(mode, &mut visited, action.ordinal - 1, phase);
            let kind = action.kind;
            let ctx = LogContext::new()
                .with_cell(action.position.row, action.position.column)
                .with_entity(kind.as_ref())
                .with_phase(phase);

            match self.dispatch(action, mode).await {
                Ok(()) => {
                    report.record_success(kind);
                    mv_info!(
                        context = ctx,
                        "{} {} at row {}, column {}",
                        mode.past_tense(),
                        action.subject(),
                        action.position.row,
                        action.position.column
                    );
                }
                Err(err) => {
                    mv_error!(
                        context = ctx,
                        "failed at row {}, column {}: {}",
                        action.position.row,
                        action.position.column,
                        err
                    );
                    report.record_failure(CellFailure {
                        position: action.position,
                        kind,
                        status: err.status(),
                        message: err.to_string(),
                    });
                }
            }
            advance(mode, &mut visited, action.ordinal, phase);
        }
        advance(mode, &mut visited, plan.cells, phase);
        if mode == WalkMode::Reset {
            mv_info!(
                context = LogContext::new().with_phase(phase),
                "reset complete, processed {} positions",
                plan.cells
            );
        }

        let outcome = if report.all_succeeded() {
            SystemEventOutcome::Success
        } else {
            SystemEventOutcome::Partial
        };
        log_system_event(
            Some(&LogContext::new().with_phase(phase)),
            "walk.complete",
            &format!(
                "{} {}/{} objects",
                mode.past_tense(),
                report.total_success(),
                report.total()
            ),
            outcome,
        );
        report
    }

    async fn dispatch(&self, action: &PlannedAction, mode: WalkMode) -> Result<(), MegaverseError> {
        let position = action.position;
        match mode {
            // Deletes only need the kind, so off-palette labels are still cleared.
            WalkMode::Reset => match action.kind {
                EntityKind::Polyanet => self.api.delete_polyanet(position).await,
                EntityKind::Soloon => self.api.delete_soloon(position).await,
                EntityKind::Cometh => self.api.delete_cometh(position).await,
            },
            WalkMode::Apply => match &action.target {
                Ok(Target::Polyanet) => self.api.create_polyanet(position).await,
                Ok(Target::Soloon(color)) => self.api.create_soloon(position, *color).await,
                Ok(Target::Cometh(direction)) => {
                    self.api.create_cometh(position, *direction).await
                }
                Err(reason) => Err(MegaverseError::Unexpected {
                    message: format!("no request sent: {}", reason),
                }),
            },
        }
    }
}

/// Move the visited-position counter up to `upto`, logging reset progress.
fn advance(mode: WalkMode, visited: &mut usize, upto: usize, phase: &str) {
    while *visited < upto {
        *visited += 1;
        if mode == WalkMode::Reset && *visited % RESET_PROGRESS_EVERY == 0 {
            mv_info!(
                context = LogContext::new().with_phase(phase),
                "processed {} positions...",
                *visited
            );
        }
    }
}
