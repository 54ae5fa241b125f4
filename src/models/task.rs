//! Modelo de Task
//!
//! Una task es una unidad de trabajo operativo (lavado, repostaje, servicio...)
//! asociada a un único vehículo.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::utils::validation::null_as_default;

/// Valor por defecto de `tasks.assigned`
pub const UNASSIGNED: &str = "Unassigned";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    Wash,
    Delivery,
    Pickup,
    Service,
    Fuel,
    Inspection,
    Photos,
    Other,
    #[serde(other)]
    Unknown,
}

impl TaskType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskType::Wash => "wash",
            TaskType::Delivery => "delivery",
            TaskType::Pickup => "pickup",
            TaskType::Service => "service",
            TaskType::Fuel => "fuel",
            TaskType::Inspection => "inspection",
            TaskType::Photos => "photos",
            TaskType::Other => "other",
            TaskType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    #[default]
    Normal,
    High,
    Urgent,
    #[serde(other)]
    Unknown,
}

impl TaskPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Normal => "normal",
            TaskPriority::High => "high",
            TaskPriority::Urgent => "urgent",
            TaskPriority::Unknown => "unknown",
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Los payloads de escritura no pueden llevar tipo ni prioridad fuera del schema
fn known_task_type(task_type: &TaskType) -> Result<(), ValidationError> {
    match task_type {
        TaskType::Unknown => Err(ValidationError::new("unknown_task_type")),
        _ => Ok(()),
    }
}

fn known_priority(priority: &TaskPriority) -> Result<(), ValidationError> {
    match priority {
        TaskPriority::Unknown => Err(ValidationError::new("unknown_priority")),
        _ => Ok(()),
    }
}

fn default_assigned() -> String {
    UNASSIGNED.to_string()
}

/// Task tal como la devuelve `/api/tasks`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: i32,
    pub vehicle_id: i32,
    /// Copia desnormalizada de `Vehicle.name`
    pub vehicle_name: String,
    #[serde(rename = "type")]
    pub task_type: TaskType,
    #[serde(default, deserialize_with = "null_as_default")]
    pub priority: TaskPriority,
    #[serde(default = "default_assigned")]
    pub assigned: String,
    pub description: String,
    #[serde(default)]
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    pub fn is_urgent_pending(&self) -> bool {
        self.priority == TaskPriority::Urgent && !self.completed
    }

    pub fn status_label(&self) -> &'static str {
        if self.completed {
            "Completed"
        } else {
            "Pending"
        }
    }
}

/// Payload de creación (`POST /api/tasks`): sin id, createdAt ni completedAt
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    #[validate(range(min = 1))]
    pub vehicle_id: i32,

    #[validate(length(min = 1, max = 100))]
    pub vehicle_name: String,

    #[serde(rename = "type")]
    #[validate(custom = "known_task_type")]
    pub task_type: TaskType,

    #[serde(default)]
    #[validate(custom = "known_priority")]
    pub priority: TaskPriority,

    #[serde(default = "default_assigned")]
    #[validate(length(min = 1, max = 100))]
    pub assigned: String,

    #[validate(length(min = 1, max = 500))]
    pub description: String,

    #[serde(default)]
    pub completed: bool,
}

/// Update parcial de una task (`PUT /api/tasks/{id}`)
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaskUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1))]
    pub vehicle_id: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_name: Option<String>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    #[validate(custom = "known_task_type")]
    pub task_type: Option<TaskType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom = "known_priority")]
    pub priority: Option<TaskPriority>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 100))]
    pub assigned: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 500))]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl TaskUpdate {
    /// `completed = true` sin `completedAt`: el record store no sella la fecha
    pub fn completes_without_timestamp(&self) -> bool {
        self.completed == Some(true) && self.completed_at.is_none()
    }

    pub fn is_empty(&self) -> bool {
        *self == TaskUpdate::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_task_defaults() {
        let task: Task = serde_json::from_value(json!({
            "id": 3,
            "vehicleId": 1,
            "vehicleName": "Rolls-Royce Cullinan",
            "type": "wash",
            "description": "Full detail",
            "createdAt": "2024-06-28T10:00:00Z"
        }))
        .unwrap();

        assert_eq!(task.priority, TaskPriority::Normal);
        assert_eq!(task.assigned, UNASSIGNED);
        assert!(!task.completed);
        assert_eq!(task.status_label(), "Pending");
    }

    #[test]
    fn test_unknown_priority_is_never_urgent() {
        let task: Task = serde_json::from_value(json!({
            "id": 4,
            "vehicleId": 1,
            "vehicleName": "McLaren 720S",
            "type": "detailing",
            "priority": "critical",
            "description": "Ceramic coat",
            "createdAt": "2024-06-28T10:00:00Z"
        }))
        .unwrap();

        assert_eq!(task.task_type, TaskType::Unknown);
        assert_eq!(task.priority, TaskPriority::Unknown);
        assert!(!task.is_urgent_pending());
    }

    #[test]
    fn test_completes_without_timestamp() {
        let update = TaskUpdate {
            completed: Some(true),
            ..Default::default()
        };
        assert!(update.completes_without_timestamp());

        let stamped = TaskUpdate {
            completed: Some(true),
            completed_at: Some(Utc::now()),
            ..Default::default()
        };
        assert!(!stamped.completes_without_timestamp());
    }

    #[test]
    fn test_write_payloads_reject_unknown_values() {
        let task: NewTask = serde_json::from_value(json!({
            "vehicleId": 1,
            "vehicleName": "McLaren 720S",
            "type": "detailing",
            "description": "Ceramic coat"
        }))
        .unwrap();
        assert!(task.validate().is_err());

        let update: TaskUpdate = serde_json::from_value(json!({ "priority": "critical" })).unwrap();
        assert!(update.validate().is_err());

        let update: TaskUpdate = serde_json::from_value(json!({ "type": "wash", "priority": "urgent" })).unwrap();
        assert!(update.validate().is_ok());
    }

    #[test]
    fn test_new_task_requires_description() {
        let task = NewTask {
            vehicle_id: 1,
            vehicle_name: "Ferrari 488 GTB".to_string(),
            task_type: TaskType::Fuel,
            priority: TaskPriority::High,
            assigned: "Auto-generated".to_string(),
            description: String::new(),
            completed: false,
        };
        assert!(task.validate().is_err());
    }
}
