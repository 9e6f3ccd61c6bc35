//! Conversions between request DTOs, stored entities, and responses.
//!
//! Every function is a pure structural copy and cannot fail. Absent sources
//! map through `Option::map` at the call site.

use taskboard_db::models::{
    Category, CreateCategory, NewCategory, NewTask, Task, TaskRequest, UpdateCategory,
};

use crate::response::{CategoryResponse, TaskResponse};

pub fn category_response(category: &Category) -> CategoryResponse {
    CategoryResponse {
        id: category.id,
        name: category.name.clone(),
        description: category.description.clone(),
        color: category.color.clone(),
        created_at: category.created_at,
    }
}

pub fn task_response(task: &Task) -> TaskResponse {
    TaskResponse {
        id: task.id,
        name: task.name.clone(),
        description: task.description.clone(),
        status: task.status.clone(),
        category: category_response(&task.category),
    }
}

/// Color is not part of the create DTO and starts out empty.
pub fn new_category(input: CreateCategory) -> NewCategory {
    NewCategory {
        name: input.name,
        description: input.description,
        color: String::new(),
    }
}

/// Partial merge: only fields present in `input` overwrite `category`.
pub fn merge_category(input: UpdateCategory, category: &mut Category) {
    if let Some(name) = input.name {
        category.name = name;
    }
    if let Some(description) = input.description {
        category.description = description;
    }
    if let Some(color) = input.color {
        category.color = color;
    }
}

pub fn new_task(input: TaskRequest) -> NewTask {
    NewTask {
        name: input.name,
        description: input.description,
        status: input.status,
        category_id: input.category_id,
    }
}

/// Full overwrite of every mutable task field.
pub fn overwrite_task(input: TaskRequest, category: Category, task: &mut Task) {
    task.name = input.name;
    task.description = input.description;
    task.status = input.status;
    task.category = category;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn category() -> Category {
        Category {
            id: 1,
            name: "Work".into(),
            description: "Work related tasks".into(),
            color: "blue".into(),
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap(),
        }
    }

    fn task() -> Task {
        Task {
            id: 3,
            name: "Task 1".into(),
            description: "Description of Task 1".into(),
            status: "Pending".into(),
            category: category(),
        }
    }

    #[test]
    fn category_response_copies_every_field() {
        let response = category_response(&category());
        assert_eq!(response.id, 1);
        assert_eq!(response.name, "Work");
        assert_eq!(response.description, "Work related tasks");
        assert_eq!(response.color, "blue");
        assert_eq!(response.created_at, category().created_at);
    }

    #[test]
    fn task_response_embeds_full_category() {
        let response = task_response(&task());
        assert_eq!(response.status, "Pending");
        assert_eq!(response.category, category_response(&category()));
    }

    #[test]
    fn missing_entity_maps_to_missing_response() {
        let none: Option<Category> = None;
        assert_eq!(none.as_ref().map(category_response), None);
    }

    #[test]
    fn new_category_leaves_color_empty() {
        let new = new_category(CreateCategory {
            name: "Work".into(),
            description: "desc".into(),
        });
        assert_eq!(new.color, "");
        assert_eq!(new.description, "desc");
    }

    #[test]
    fn merge_only_overwrites_present_fields() {
        let mut target = category();
        merge_category(
            UpdateCategory {
                name: Some("X".into()),
                ..UpdateCategory::default()
            },
            &mut target,
        );
        assert_eq!(target.name, "X");
        assert_eq!(target.description, "Work related tasks");
        assert_eq!(target.color, "blue");
    }

    #[test]
    fn merge_with_nothing_changes_nothing() {
        let mut target = category();
        merge_category(UpdateCategory::default(), &mut target);
        assert_eq!(target, category());
    }

    #[test]
    fn task_overwrite_replaces_all_fields_even_empty_ones() {
        let mut target = task();
        let mut other = category();
        other.id = 2;
        other.name = "Home".into();

        overwrite_task(
            TaskRequest {
                name: "Renamed".into(),
                description: String::new(),
                status: "Completed".into(),
                category_id: 2,
            },
            other.clone(),
            &mut target,
        );

        assert_eq!(target.id, 3);
        assert_eq!(target.name, "Renamed");
        assert_eq!(target.description, "");
        assert_eq!(target.status, "Completed");
        assert_eq!(target.category, other);
    }
}
