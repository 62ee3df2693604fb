//! Reference option loading

use super::WorkflowEvent;
use crate::api::RegistrationApi;
use crate::state::Resource;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

/// Loads in flight for one mounted form. Dropping the handle aborts them.
#[derive(Debug)]
pub struct LoadHandle {
    tasks: Vec<JoinHandle<()>>,
}

impl LoadHandle {
    #[cfg(test)]
    pub fn is_finished(&self) -> bool {
        self.tasks.iter().all(|t| t.is_finished())
    }
}

impl Drop for LoadHandle {
    fn drop(&mut self) {
        for task in &self.tasks {
            task.abort();
        }
    }
}

/// Start one independent fetch per resource
pub fn spawn_option_loads(
    api: Arc<dyn RegistrationApi>,
    resources: &[Resource],
    generation: u64,
    events: UnboundedSender<WorkflowEvent>,
) -> LoadHandle {
    let tasks = resources
        .iter()
        .map(|&resource| {
            let api = Arc::clone(&api);
            let events = events.clone();
            tokio::spawn(async move {
                let result = api.list_options(resource).await;
                // Receiver is gone once the session has been dropped
                let _ = events.send(WorkflowEvent::OptionsLoaded {
                    generation,
                    resource,
                    result,
                });
            })
        })
        .collect();

    LoadHandle { tasks }
}

/// Notification text for a reference list that could not be loaded
pub fn load_failed_message(resource: Resource) -> String {
    format!("Failed to load {resource}")
}
