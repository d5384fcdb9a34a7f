//! Inventory reconstruction from raw executor records.
//!
//! An agent reports its running containers as records carrying an
//! `executor_id` of the form `<prefix>_<suffix...>.<runtime-tag>`; app and
//! task identities are carved back out of that string.

use std::collections::{HashMap, HashSet};

use serde::Deserialize;

use crate::models::{App, Task};

/// One entry of an agent's `/containers` listing. Everything except the
/// executor id is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ContainerRecord {
    pub executor_id: String,
}

/// App id encoded in an executor id: the portion before the first `.`,
/// split on `_`, first token dropped, rest rejoined with `/`.
///
/// `"hm_foo.c9de6033"` -> `"foo"`. The scheduler reports these without the
/// leading path separator; the reconstructed id keeps that form verbatim.
pub fn app_id(executor_id: &str) -> String {
    let head = executor_id.split('.').next().unwrap_or(executor_id);
    head.split('_').skip(1).collect::<Vec<_>>().join("/")
}

/// Task name encoded in an executor id: the whole id split on `_`, first
/// token dropped, rest rejoined with `_`.
///
/// `"hm_foo_task1"` -> `"foo_task1"`.
pub fn task_name(executor_id: &str) -> String {
    executor_id.split('_').skip(1).collect::<Vec<_>>().join("_")
}

/// Distinct apps present in a container listing, first-occurrence order.
pub fn apps_of(records: &[ContainerRecord]) -> Vec<App> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut apps = Vec::new();
    for record in records {
        let id = app_id(&record.executor_id);
        if seen.insert(id.clone()) {
            apps.push(App { id });
        }
    }
    apps
}

/// Tasks grouped by owning app id, record order preserved inside each group.
pub fn tasks_by_app(records: &[ContainerRecord]) -> HashMap<String, Vec<Task>> {
    let mut groups: HashMap<String, Vec<Task>> = HashMap::new();
    for record in records {
        groups
            .entry(app_id(&record.executor_id))
            .or_default()
            .push(Task {
                name: task_name(&record.executor_id),
            });
    }
    groups
}
