//! Scenario tests for reconciliation, prefabs and scenes

mod prefab_workflow;
mod scene_documents;
