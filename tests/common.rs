//! Common test utilities: workflow definition builders and an in-memory
//! recording persistence adapter.
use ahash::AHashMap;
use flowcanvas::prelude::*;

/// Creates a bare step with empty configuration and no layout hint.
#[allow(dead_code)]
pub fn step(id: &str, kind: &str, name: &str) -> Step {
    Step::new(id, kind, name)
}

/// Creates a step pinned to a canvas position.
#[allow(dead_code)]
pub fn positioned_step(id: &str, kind: &str, name: &str, x: f64, y: f64) -> Step {
    let mut step = Step::new(id, kind, name);
    step.position = Some(Position::new(x, y));
    step
}

/// Builds a linear chain `ids[0] -> ids[1] -> ...` laid out top to
/// bottom, each step linked to its successor.
#[allow(dead_code)]
pub fn chain_definition(ids: &[&str]) -> WorkflowDefinition {
    let steps = ids
        .iter()
        .enumerate()
        .map(|(index, id)| {
            let mut step = positioned_step(id, "task", id, 250.0, 50.0 + index as f64 * 120.0);
            if let Some(successor) = ids.get(index + 1) {
                step.next = Some(vec![successor.to_string()]);
            }
            step
        })
        .collect();
    WorkflowDefinition {
        steps,
        variables: AHashMap::new(),
    }
}

/// Opens an editor over an empty workflow.
#[allow(dead_code)]
pub fn open_empty() -> InteractionController {
    InteractionController::open("wf-test", "Test workflow", "", WorkflowDefinition::default())
        .unwrap()
}

/// Persistence adapter that records save requests in memory and can be
/// told to fail the next calls.
#[allow(dead_code)]
#[derive(Default)]
pub struct RecordingAdapter {
    pub definitions: AHashMap<String, WorkflowDefinition>,
    pub saves: Vec<SaveRequest>,
    pub fail_save: Option<PersistenceError>,
    pub fail_publish: Option<PersistenceError>,
}

impl PersistenceAdapter for RecordingAdapter {
    fn load(&self, workflow_id: &str) -> Result<WorkflowDefinition, PersistenceError> {
        self.definitions
            .get(workflow_id)
            .cloned()
            .ok_or_else(|| PersistenceError::NotFound(workflow_id.to_string()))
    }

    fn save(&mut self, request: &SaveRequest) -> Result<WorkflowMetadata, PersistenceError> {
        if let Some(error) = self.fail_save.clone() {
            return Err(error);
        }
        self.saves.push(request.clone());
        Ok(WorkflowMetadata {
            id: request.workflow_id.clone(),
            name: request.name.clone(),
            description: request.description.clone(),
            status: WorkflowStatus::Draft,
        })
    }

    fn publish(&mut self, workflow_id: &str) -> Result<WorkflowMetadata, PersistenceError> {
        if let Some(error) = self.fail_publish.clone() {
            return Err(error);
        }
        Ok(WorkflowMetadata {
            id: workflow_id.to_string(),
            name: self
                .saves
                .last()
                .map(|r| r.name.clone())
                .unwrap_or_default(),
            description: String::new(),
            status: WorkflowStatus::Published,
        })
    }

    fn execute(&mut self, workflow_id: &str) -> Result<ExecutionHandle, PersistenceError> {
        Ok(ExecutionHandle(format!("run-{}", workflow_id)))
    }
}
