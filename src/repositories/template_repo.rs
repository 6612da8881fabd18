//! Template, named exercise and set rows, scoped to one user.
//!
//! These functions take a borrowed connection so the snapshot service can run
//! them inside its own transaction.

use std::collections::HashMap;

use rusqlite::{params, Connection};

use crate::models::{ExerciseSet, FromSqliteRow, NamedExercise, Scalar, Template};

/// Loads every template the user owns with exercises and sets nested in order.
pub fn find_nested_by_user(conn: &Connection, user_id: i64) -> rusqlite::Result<Vec<Template>> {
    let mut stmt = conn.prepare("SELECT * FROM templates WHERE user_id = ? ORDER BY id")?;
    let mut templates = stmt
        .query_map([user_id], Template::from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    let mut stmt = conn.prepare(
        "SELECT ne.* FROM named_exercises ne
         JOIN templates t ON t.id = ne.template_id
         WHERE t.user_id = ?
         ORDER BY ne.template_id, ne.order_num, ne.id",
    )?;
    let exercises = stmt
        .query_map([user_id], |row| {
            Ok((row.get::<_, i64>("template_id")?, NamedExercise::from_row(row)?))
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    let mut stmt = conn.prepare(
        "SELECT es.* FROM exercise_sets es
         JOIN named_exercises ne ON ne.id = es.exercise_id
         JOIN templates t ON t.id = ne.template_id
         WHERE t.user_id = ?
         ORDER BY es.exercise_id, es.set_order, es.id",
    )?;
    let sets = stmt
        .query_map([user_id], |row| {
            Ok((row.get::<_, i64>("exercise_id")?, ExerciseSet::from_row(row)?))
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    let mut sets_by_exercise: HashMap<i64, Vec<ExerciseSet>> = HashMap::new();
    for (exercise_id, set) in sets {
        sets_by_exercise.entry(exercise_id).or_default().push(set);
    }

    let mut exercises_by_template: HashMap<i64, Vec<NamedExercise>> = HashMap::new();
    for (template_id, mut exercise) in exercises {
        if let Some(id) = exercise.id {
            exercise.sets = sets_by_exercise.remove(&id).unwrap_or_default();
        }
        exercises_by_template
            .entry(template_id)
            .or_default()
            .push(exercise);
    }

    for template in &mut templates {
        if let Some(id) = template.id {
            template.exercises = exercises_by_template.remove(&id).unwrap_or_default();
        }
    }

    Ok(templates)
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DeletedTemplates {
    pub templates: usize,
    pub exercises: usize,
    pub sets: usize,
}

/// Deletes the user's sets, then exercises, then templates.
pub fn delete_by_user(conn: &Connection, user_id: i64) -> rusqlite::Result<DeletedTemplates> {
    let sets = conn.execute(
        "DELETE FROM exercise_sets WHERE exercise_id IN (
            SELECT ne.id FROM named_exercises ne
            JOIN templates t ON t.id = ne.template_id
            WHERE t.user_id = ?
        )",
        [user_id],
    )?;
    let exercises = conn.execute(
        "DELETE FROM named_exercises WHERE template_id IN (
            SELECT id FROM templates WHERE user_id = ?
        )",
        [user_id],
    )?;
    let templates = conn.execute("DELETE FROM templates WHERE user_id = ?", [user_id])?;

    Ok(DeletedTemplates {
        templates,
        exercises,
        sets,
    })
}

/// Inserts one template and its children, relinking each child to the id
/// storage just assigned to its parent. Field values are bound as sent.
/// Returns the new template id.
pub fn insert_nested(conn: &Connection, user_id: i64, template: &Template) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO templates (user_id, name, description) VALUES (?, ?, ?)",
        params![user_id, template.name, template.description],
    )?;
    let template_id = conn.last_insert_rowid();

    for (position, exercise) in template.exercises.iter().enumerate() {
        conn.execute(
            "INSERT INTO named_exercises (template_id, exercise_name, notes, order_num)
             VALUES (?, ?, ?, ?)",
            params![
                template_id,
                exercise.exercise_name,
                exercise.notes,
                exercise
                    .order_num
                    .clone()
                    .unwrap_or(Scalar::Integer(position as i64))
            ],
        )?;
        let exercise_id = conn.last_insert_rowid();

        for (position, set) in exercise.sets.iter().enumerate() {
            conn.execute(
                "INSERT INTO exercise_sets (exercise_id, set_order, kg, reps, completed)
                 VALUES (?, ?, ?, ?, ?)",
                params![
                    exercise_id,
                    set.set_order
                        .clone()
                        .unwrap_or(Scalar::Integer(position as i64)),
                    set.kg,
                    set.reps,
                    set.completed
                ],
            )?;
        }
    }

    Ok(template_id)
}
