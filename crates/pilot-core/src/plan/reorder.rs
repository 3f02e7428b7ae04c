//! Reorder and mark operations on the todo list.

use super::Plan;
use crate::{
    error::{PilotError, Result},
    models::Action,
};

#[derive(Clone, Copy)]
enum Direction {
    Up,
    Down,
}

impl Plan {
    /// Swap the step at `index` with the nearest non-dropped step before it.
    pub fn move_up(&mut self, index: usize) {
        if let Some(neighbour) = self.neighbour(index, Direction::Up) {
            self.todo.swap(index, neighbour);
        }
    }

    /// Swap the step at `index` with the nearest non-dropped step after it.
    pub fn move_down(&mut self, index: usize) {
        if let Some(neighbour) = self.neighbour(index, Direction::Down) {
            self.todo.swap(index, neighbour);
        }
    }

    /// Relocate the step at `source` to `target`.
    ///
    /// The steps between the two indices shift by one position; everything
    /// else keeps its place. Moving a drop marker, or onto one, is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`PilotError::IndexOutOfRange`] if either index is outside the
    /// todo list.
    pub fn move_step(&mut self, source: usize, target: usize) -> Result<()> {
        self.check_index(source)?;
        self.check_index(target)?;

        if source == target || self.todo[source].is_drop() || self.todo[target].is_drop() {
            return Ok(());
        }

        if source < target {
            self.todo[source..=target].rotate_left(1);
        } else {
            self.todo[target..=source].rotate_right(1);
        }
        Ok(())
    }

    /// Set the action of the step at `index`; `None` drops it.
    pub fn mark(&mut self, index: usize, action: Option<Action>) -> Result<()> {
        self.mark_all(&[index], action)
    }

    /// Set the action of every step in `indices`.
    ///
    /// All indices are validated before anything is changed.
    pub fn mark_all(&mut self, indices: &[usize], action: Option<Action>) -> Result<()> {
        for &index in indices {
            self.check_index(index)?;
        }
        for &index in indices {
            self.todo[index].action = action;
        }
        Ok(())
    }

    pub(crate) fn check_index(&self, index: usize) -> Result<()> {
        if index < self.todo.len() {
            Ok(())
        } else {
            Err(PilotError::IndexOutOfRange {
                index,
                len: self.todo.len(),
            })
        }
    }

    fn neighbour(&self, index: usize, direction: Direction) -> Option<usize> {
        if self.todo.get(index)?.is_drop() {
            return None;
        }
        match direction {
            Direction::Up => (0..index).rev().find(|&i| !self.todo[i].is_drop()),
            Direction::Down => (index + 1..self.todo.len()).find(|&i| !self.todo[i].is_drop()),
        }
    }
}
