mod common;

use funnel_tables::editor::Editor;
use proptest::prelude::*;

use common::funnel_dataset;

#[derive(Debug, Clone)]
enum Action {
    Commit,
    Undo,
    Redo,
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        3 => Just(Action::Commit),
        2 => Just(Action::Undo),
        1 => Just(Action::Redo),
    ]
}

/// Reference timeline: dataset names plus a cursor.
struct Model {
    names: Vec<String>,
    index: usize,
    capacity: usize,
}

impl Model {
    fn commit(&mut self, name: String) {
        self.names.truncate(self.index + 1);
        self.names.push(name);
        if self.names.len() > self.capacity {
            self.names.remove(0);
        }
        self.index = self.names.len() - 1;
    }
}

proptest! {
    #[test]
    fn editor_matches_linear_timeline(
        actions in prop::collection::vec(action(), 0..120),
        capacity in 1usize..12,
    ) {
        let mut editor = Editor::with_capacity(capacity).unwrap();
        let mut dataset = funnel_dataset();
        dataset.name = "v0".to_string();
        editor.load(Some(dataset.clone()));
        let mut model = Model { names: vec!["v0".to_string()], index: 0, capacity };

        for (step, action) in actions.iter().enumerate() {
            match action {
                Action::Commit => {
                    let name = format!("v{}", step + 1);
                    dataset.name = name.clone();
                    editor.commit(dataset.clone(), name.clone());
                    model.commit(name);
                    prop_assert!(editor.history_length() <= capacity);
                    prop_assert_eq!(editor.current_history_index() + 1, editor.history_length());
                }
                Action::Undo => {
                    let moved = editor.undo();
                    prop_assert_eq!(moved, model.index > 0);
                    if moved {
                        model.index -= 1;
                    }
                }
                Action::Redo => {
                    let moved = editor.redo();
                    prop_assert_eq!(moved, model.index + 1 < model.names.len());
                    if moved {
                        model.index += 1;
                    }
                }
            }
            prop_assert_eq!(editor.history_length(), model.names.len());
            prop_assert_eq!(editor.current_history_index(), model.index);
            prop_assert_eq!(&editor.dataset().unwrap().name, &model.names[model.index]);
            prop_assert_eq!(editor.can_undo(), model.index > 0);
            prop_assert_eq!(editor.can_redo(), model.index + 1 < model.names.len());
        }
    }

    #[test]
    fn undo_redo_round_trip(rows_to_drop in prop::collection::vec(0usize..5, 1..5)) {
        let mut editor = Editor::new();
        let d0 = funnel_dataset();
        editor.load(Some(d0.clone()));
        let mut d1 = d0.clone();
        for idx in rows_to_drop {
            if idx < d1.data.len() {
                d1.data.remove(idx);
            }
        }
        editor.commit(d1.clone(), "x");
        prop_assert!(editor.undo());
        prop_assert_eq!(editor.dataset(), Some(&d0));
        prop_assert!(editor.redo());
        prop_assert_eq!(editor.dataset(), Some(&d1));
    }
}
