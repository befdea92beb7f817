use checklist_core::{
    FilterMode, ItemId, ItemStore, ListController, MemorySlotStorage, NoChange, Outcome, UiEvent,
};

fn controller_with(texts: &[&str]) -> ListController<MemorySlotStorage> {
    let mut controller = ListController::open(ItemStore::new(MemorySlotStorage::new()));
    for text in texts {
        controller.create(text).unwrap();
    }
    controller
}

fn visible_titles(controller: &ListController<MemorySlotStorage>) -> Vec<String> {
    controller
        .visible()
        .map(|node| node.title.clone())
        .collect()
}

fn id_of(controller: &ListController<MemorySlotStorage>, title: &str) -> ItemId {
    controller
        .view()
        .nodes()
        .iter()
        .find(|node| node.title == title)
        .map(|node| node.id.clone())
        .unwrap()
}

#[test]
fn filter_modes_follow_done_markers() {
    let mut controller = controller_with(&["A", "B"]);

    controller.filter(FilterMode::Done);
    assert!(visible_titles(&controller).is_empty());

    let a = id_of(&controller, "A");
    controller.toggle_done(&a).unwrap();

    controller.filter(FilterMode::Done);
    assert_eq!(visible_titles(&controller), vec!["A"]);

    controller.filter(FilterMode::Todo);
    assert_eq!(visible_titles(&controller), vec!["B"]);

    controller.filter(FilterMode::All);
    assert_eq!(visible_titles(&controller), vec!["A", "B"]);
}

#[test]
fn search_is_case_insensitive_and_hides_without_removing() {
    let mut controller = controller_with(&["Buy milk", "Walk dog", "MILK the cow"]);

    controller.search("milk");
    assert_eq!(visible_titles(&controller), vec!["Buy milk", "MILK the cow"]);
    assert_eq!(controller.view().len(), 3);
    assert_eq!(controller.store().load().len(), 3);

    controller.search("zzz");
    assert!(visible_titles(&controller).is_empty());

    controller.search("");
    assert_eq!(visible_titles(&controller).len(), 3);
}

#[test]
fn empty_search_after_any_filter_shows_everything() {
    for mode in [FilterMode::All, FilterMode::Done, FilterMode::Todo] {
        let mut controller = controller_with(&["A", "B", "C"]);
        let b = id_of(&controller, "B");
        controller.toggle_done(&b).unwrap();

        controller.filter(mode);
        controller.search("");
        assert_eq!(visible_titles(&controller), vec!["A", "B", "C"], "mode {mode}");
    }
}

#[test]
fn last_pass_wins_between_search_and_filter() {
    let mut controller = controller_with(&["alpha", "beta"]);
    let alpha = id_of(&controller, "alpha");
    controller.toggle_done(&alpha).unwrap();

    controller.search("beta");
    controller.filter(FilterMode::Done);
    assert_eq!(visible_titles(&controller), vec!["alpha"]);

    controller.search("a");
    assert_eq!(visible_titles(&controller), vec!["alpha", "beta"]);
}

#[test]
fn clear_search_resets_field_and_ignores_filter() {
    let mut controller = controller_with(&["one", "two"]);
    let one = id_of(&controller, "one");
    controller.toggle_done(&one).unwrap();

    controller.handle(UiEvent::FilterSelected("todo".to_string()));
    controller.handle(UiEvent::SearchInput("tw".to_string()));
    assert_eq!(controller.visibility().search_text(), "tw");

    assert_eq!(controller.handle(UiEvent::ClearSearch), Outcome::Applied);
    assert_eq!(controller.visibility().search_text(), "");
    assert_eq!(controller.visibility().filter(), FilterMode::Todo);
    assert_eq!(visible_titles(&controller), vec!["one", "two"]);
}

#[test]
fn unknown_filter_value_keeps_visibility() {
    let mut controller = controller_with(&["x", "y"]);
    controller.search("x");

    let outcome = controller.handle(UiEvent::FilterSelected("urgent".to_string()));
    assert_eq!(outcome, Outcome::Unchanged(NoChange::UnknownFilter));
    assert_eq!(visible_titles(&controller), vec!["x"]);
    assert_eq!(controller.visibility().filter(), FilterMode::All);
}

#[test]
fn hidden_nodes_stay_hidden_across_edits_and_new_items_show() {
    let mut controller = controller_with(&["apple", "banana"]);
    controller.search("apple");
    let banana = id_of(&controller, "banana");

    controller.toggle_done(&banana).unwrap();
    assert!(!controller.view().get(&banana).unwrap().is_visible());

    controller.create("cherry").unwrap();
    assert_eq!(visible_titles(&controller), vec!["apple", "cherry"]);
}
