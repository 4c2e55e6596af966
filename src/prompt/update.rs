//! Pure state transitions: (SelectionState, Action) → Transition.
//!
//! The core logic of the list prompts. Fully testable without a terminal.
//! Navigation wraps around in both directions.

use crate::types::Item;

use super::state::{Action, Selection, SelectionState, Transition};

/// Pure state transition function for radio and checkbox lists.
pub fn update<S: Selection>(
    state: SelectionState<S>,
    action: Action,
    items: &[Item],
) -> Transition<S> {
    let SelectionState {
        cursor,
        len,
        mut selection,
    } = state;

    match action {
        Action::MoveUp => Transition::Continue(SelectionState {
            cursor: cursor_up(cursor, len),
            len,
            selection,
        }),
        Action::MoveDown => Transition::Continue(SelectionState {
            cursor: cursor_down(cursor, len),
            len,
            selection,
        }),
        Action::Toggle => {
            selection.toggle(cursor, items);
            Transition::Continue(SelectionState {
                cursor,
                len,
                selection,
            })
        }
        Action::Submit => Transition::Submit(SelectionState {
            cursor,
            len,
            selection,
        }),
        Action::Abort => Transition::Abort,
    }
}

/// `(cursor - 1 + len) mod len`. `len` must be non-zero.
pub fn cursor_up(cursor: usize, len: usize) -> usize {
    if cursor == 0 { len - 1 } else { cursor - 1 }
}

/// `(cursor + 1) mod len`. `len` must be non-zero.
pub fn cursor_down(cursor: usize, len: usize) -> usize {
    (cursor + 1) % len
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::state::{Checkbox, CheckboxState, Radio, RadioState};
    use proptest::prelude::*;
    use serde_json::json;

    fn two_items() -> Vec<Item> {
        vec![Item::new("A", 1), Item::new("B", 2)]
    }

    fn three_items() -> Vec<Item> {
        vec![Item::new("A", 1), Item::new("B", 2), Item::new("C", 3)]
    }

    fn continued<S: Selection>(t: Transition<S>) -> SelectionState<S> {
        match t {
            Transition::Continue(s) => s,
            other => panic!("Expected Continue, got {:?}", other),
        }
    }

    fn run<S: Selection>(
        mut state: SelectionState<S>,
        actions: &[Action],
        items: &[Item],
    ) -> Transition<S> {
        let (last, init) = actions.split_last().expect("at least one action");
        for a in init {
            state = continued(update(state, *a, items));
        }
        update(state, *last, items)
    }

    // -- Navigation --

    #[test]
    fn up_from_top_wraps_to_bottom() {
        let items = three_items();
        let state = RadioState::new("", &items).unwrap();
        assert_eq!(continued(update(state, Action::MoveUp, &items)).cursor, 2);
    }

    #[test]
    fn down_from_bottom_wraps_to_top() {
        let items = three_items();
        let mut state = RadioState::new("", &items).unwrap();
        state.cursor = 2;
        assert_eq!(continued(update(state, Action::MoveDown, &items)).cursor, 0);
    }

    #[test]
    fn single_item_cursor_stays_put() {
        assert_eq!(cursor_up(0, 1), 0);
        assert_eq!(cursor_down(0, 1), 0);
    }

    // -- Radio --

    #[test]
    fn radio_moving_does_not_change_active() {
        let items = two_items();
        let state = RadioState::new("", &items).unwrap();
        let state = continued(update(state, Action::MoveDown, &items));
        assert_eq!(state.selection, Radio { active: 0 });
    }

    #[test]
    fn radio_down_space_enter_resolves_second() {
        let items = two_items();
        let state = RadioState::new("Pick:", &items).unwrap();
        match run(state, &[Action::MoveDown, Action::Toggle, Action::Submit], &items) {
            Transition::Submit(s) => assert_eq!(s.selection.resolve(&items), json!(2)),
            other => panic!("Expected Submit, got {:?}", other),
        }
    }

    #[test]
    fn radio_enter_without_space_resolves_first() {
        let items = two_items();
        let state = RadioState::new("Pick:", &items).unwrap();
        match run(state, &[Action::MoveDown, Action::Submit], &items) {
            Transition::Submit(s) => assert_eq!(s.selection.resolve(&items), json!(1)),
            other => panic!("Expected Submit, got {:?}", other),
        }
    }

    // -- Checkbox --

    #[test]
    fn checkbox_space_down_down_space_enter() {
        let items = three_items();
        let state = CheckboxState::new("Pick:", &items).unwrap();
        let actions = [
            Action::Toggle,
            Action::MoveDown,
            Action::MoveDown,
            Action::Toggle,
            Action::Submit,
        ];
        match run(state, &actions, &items) {
            Transition::Submit(s) => {
                let mut got = s.selection.resolve(&items);
                got.sort_by_key(|v| v.as_i64());
                assert_eq!(got, vec![json!(1), json!(3)]);
            }
            other => panic!("Expected Submit, got {:?}", other),
        }
    }

    #[test]
    fn checkbox_enter_with_nothing_checked_is_empty() {
        let items = three_items();
        let state = CheckboxState::new("Pick:", &items).unwrap();
        match update(state, Action::Submit, &items) {
            Transition::Submit(s) => assert!(s.selection.resolve(&items).is_empty()),
            other => panic!("Expected Submit, got {:?}", other),
        }
    }

    #[test]
    fn abort_short_circuits() {
        let items = three_items();
        let state = CheckboxState::new("Pick:", &items).unwrap();
        assert_eq!(update(state, Action::Abort, &items), Transition::Abort);
    }

    // -- Laws --

    proptest! {
        #[test]
        fn cursor_stays_in_range(len in 1usize..20, moves in proptest::collection::vec(any::<bool>(), 0..64)) {
            let mut cursor = 0;
            for up in moves {
                cursor = if up { cursor_up(cursor, len) } else { cursor_down(cursor, len) };
                prop_assert!(cursor < len);
            }
        }

        #[test]
        fn n_moves_return_to_start(len in 1usize..20, start_seed in 0usize..20) {
            let start = start_seed % len;
            let (mut up, mut down) = (start, start);
            for _ in 0..len {
                up = cursor_up(up, len);
                down = cursor_down(down, len);
            }
            prop_assert_eq!(up, start);
            prop_assert_eq!(down, start);
        }

        #[test]
        fn toggle_is_involutive(values in proptest::collection::vec(0i64..5, 1..10), pick_seed in 0usize..10) {
            let items: Vec<Item> = values.iter().map(|v| Item::new(v.to_string(), *v)).collect();
            let pick = pick_seed % items.len();
            let mut cb = Checkbox::default();
            cb.toggle(pick, &items);
            prop_assert!(cb.is_marked(pick, &items));
            cb.toggle(pick, &items);
            prop_assert!(cb.checked.is_empty());
        }

        #[test]
        fn checked_set_never_has_duplicates(values in proptest::collection::vec(0i64..4, 1..8), toggles in proptest::collection::vec(0usize..8, 0..32)) {
            let items: Vec<Item> = values.iter().map(|v| Item::new(v.to_string(), *v)).collect();
            let mut cb = Checkbox::default();
            for t in toggles {
                cb.toggle(t % items.len(), &items);
            }
            let mut seen = cb.checked.clone();
            seen.sort_by_key(|v| v.as_i64());
            seen.dedup();
            prop_assert_eq!(seen.len(), cb.checked.len());
        }
    }
}
