// Copyright 2025 the Batchboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Category selection state.

use batchboard_data::{DataType, OTHER};

/// What a category chart shows, and what it is transitioning from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChartViewState {
    /// Active category family.
    pub data_type: DataType,
    /// Focused category, or `None` for the stacked view.
    pub selected: Option<String>,
    /// Category the view is leaving. Only set while a transition is running.
    pub previous: Option<String>,
}

impl ChartViewState {
    /// Creates the stacked view for `data_type`.
    pub fn stacked(data_type: DataType) -> Self {
        Self {
            data_type,
            selected: None,
            previous: None,
        }
    }

    /// Returns `true` if a category is focused.
    pub fn is_focused(&self) -> bool {
        self.selected.is_some()
    }
}

/// Receives selection requests raised by chart clicks.
pub trait CategoryObserver {
    /// A category (never [`OTHER`]) was clicked.
    fn category_selected(&mut self, category: &str);
}

/// The `Stacked` / `Focused(category)` state machine.
///
/// | from            | event              | to              | previous |
/// |-----------------|--------------------|-----------------|----------|
/// | Stacked         | `select(c)`        | Focused(c)      | none     |
/// | Focused(c)      | `select(c)`        | Stacked         | c        |
/// | Focused(a)      | `select(b)`        | Focused(b)      | a        |
/// | any             | `select(Other)`    | unchanged       |          |
/// | any             | `set_data_type(t)` | Stacked         | none     |
/// | any             | `settle()`         | unchanged       | none     |
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionMachine {
    state: ChartViewState,
}

impl SelectionMachine {
    /// Creates a machine in the stacked view.
    pub fn new(data_type: DataType) -> Self {
        Self {
            state: ChartViewState::stacked(data_type),
        }
    }

    /// Returns the current view state.
    pub fn state(&self) -> &ChartViewState {
        &self.state
    }

    /// Applies a click on `category`. Returns `true` if the state changed.
    pub fn select(&mut self, category: &str) -> bool {
        if category == OTHER {
            return false;
        }
        match self.state.selected.take() {
            Some(current) if current == category => {
                self.state.previous = Some(current);
            }
            Some(current) => {
                self.state.previous = Some(current);
                self.state.selected = Some(category.to_owned());
            }
            None => {
                self.state.previous = None;
                self.state.selected = Some(category.to_owned());
            }
        }
        tracing::debug!(
            selected = ?self.state.selected,
            previous = ?self.state.previous,
            "category selection changed"
        );
        true
    }

    /// Switches the category family and returns to the stacked view.
    ///
    /// Returns `true` if the state changed.
    pub fn set_data_type(&mut self, data_type: DataType) -> bool {
        let next = ChartViewState::stacked(data_type);
        if self.state == next {
            return false;
        }
        self.state = next;
        true
    }

    /// Marks the running transition as complete.
    pub fn settle(&mut self) {
        self.state.previous = None;
    }
}

impl CategoryObserver for SelectionMachine {
    fn category_selected(&mut self, category: &str) {
        self.select(category);
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn select_then_deselect_returns_to_stacked() {
        let mut m = SelectionMachine::new(DataType::Industries);
        assert!(m.select("FinTech"));
        assert_eq!(m.state().selected.as_deref(), Some("FinTech"));
        assert_eq!(m.state().previous, None);

        assert!(m.select("FinTech"));
        assert_eq!(m.state().selected, None);
        assert_eq!(m.state().previous.as_deref(), Some("FinTech"));

        m.settle();
        assert_eq!(m.state(), &ChartViewState::stacked(DataType::Industries));
    }

    #[test]
    fn focus_moves_directly_between_categories() {
        let mut m = SelectionMachine::new(DataType::Tags);
        m.select("AI");
        m.select("B2B");
        assert_eq!(m.state().selected.as_deref(), Some("B2B"));
        assert_eq!(m.state().previous.as_deref(), Some("AI"));
    }

    #[test]
    fn data_type_switch_clears_focus() {
        let mut m = SelectionMachine::new(DataType::Industries);
        m.select("AI");
        assert!(m.set_data_type(DataType::Tags));
        assert_eq!(m.state(), &ChartViewState::stacked(DataType::Tags));
        assert!(!m.set_data_type(DataType::Tags), "already stacked tags");
    }

    proptest! {
        #[test]
        fn clicking_other_never_changes_state(
            clicks in proptest::collection::vec(0_usize..4, 0..12),
        ) {
            let names = ["AI", "B2B", "Gov", OTHER];
            let mut m = SelectionMachine::new(DataType::Industries);
            for i in clicks {
                m.select(names[i]);
                let before = m.state().clone();
                prop_assert!(!m.select(OTHER));
                prop_assert_eq!(m.state(), &before);
            }
        }

        #[test]
        fn select_deselect_is_idempotent(cat in "[A-Z][a-z]{1,8}") {
            prop_assume!(cat != OTHER);
            let mut m = SelectionMachine::new(DataType::Industries);
            m.select(&cat);
            m.select(&cat);
            prop_assert_eq!(m.state().selected.clone(), None);
            prop_assert_eq!(m.state().previous.clone(), Some(cat));
            m.settle();
            prop_assert_eq!(m.state(), &ChartViewState::stacked(DataType::Industries));
        }
    }
}
