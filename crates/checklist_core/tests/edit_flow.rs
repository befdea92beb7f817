use checklist_core::{
    ItemAction, ItemStore, ListController, MemorySlotStorage, NoChange, Outcome, UiEvent, ViewMode,
};

fn controller_with_item(text: &str) -> ListController<MemorySlotStorage> {
    let mut controller = ListController::open(ItemStore::new(MemorySlotStorage::new()));
    controller.create(text).unwrap();
    controller
}

#[test]
fn submit_applies_update_and_returns_to_browsing() {
    let mut controller = controller_with_item("Buy milk");
    let id = controller.view().nodes()[0].id.clone();

    controller.handle(UiEvent::Item(ItemAction::Edit, id.clone()));
    assert_eq!(controller.session().mode(), ViewMode::Editing);
    assert_eq!(controller.session().edit_field(), "Buy milk");
    assert!(!controller.session().list_visible());

    let outcome = controller.handle(UiEvent::SubmitEdit(" Buy oat milk ".to_string()));
    assert_eq!(outcome, Outcome::Applied);
    assert_eq!(controller.session().mode(), ViewMode::Browsing);
    assert_eq!(controller.store().load()[0].text, "Buy oat milk");
    assert_eq!(controller.view().get(&id).unwrap().title, "Buy oat milk");
}

#[test]
fn cancel_discards_input() {
    let mut controller = controller_with_item("Keep me");
    let id = controller.view().nodes()[0].id.clone();

    controller.begin_edit(&id);
    assert_eq!(controller.handle(UiEvent::CancelEdit), Outcome::Applied);
    assert_eq!(controller.session().mode(), ViewMode::Browsing);
    assert_eq!(controller.session().pending(), None);
    assert_eq!(controller.store().load()[0].text, "Keep me");
}

#[test]
fn blank_submit_closes_session_without_update() {
    let mut controller = controller_with_item("Original");
    let id = controller.view().nodes()[0].id.clone();

    controller.begin_edit(&id);
    let outcome = controller.handle(UiEvent::SubmitEdit("   ".to_string()));
    assert_eq!(outcome, Outcome::Unchanged(NoChange::BlankText));
    assert!(!controller.session().is_editing());
    assert_eq!(controller.store().load()[0].text, "Original");
}

#[test]
fn submit_or_cancel_while_browsing_is_ignored() {
    let mut controller = controller_with_item("x");

    assert_eq!(
        controller.handle(UiEvent::SubmitEdit("y".to_string())),
        Outcome::Unchanged(NoChange::NotEditing)
    );
    assert_eq!(
        controller.handle(UiEvent::CancelEdit),
        Outcome::Unchanged(NoChange::NotEditing)
    );
    assert_eq!(controller.store().load()[0].text, "x");
}

#[test]
fn second_edit_action_retargets_pending_item() {
    let mut controller = controller_with_item("first");
    controller.create("second").unwrap();
    let first = controller.view().nodes()[0].id.clone();
    let second = controller.view().nodes()[1].id.clone();

    controller.begin_edit(&first);
    controller.begin_edit(&second);
    assert_eq!(controller.session().pending(), Some(&second));
    assert_eq!(controller.session().edit_field(), "second");

    controller.submit_edit("second edited").unwrap();
    let texts: Vec<String> = controller
        .store()
        .load()
        .into_iter()
        .map(|item| item.text)
        .collect();
    assert_eq!(texts, vec!["first", "second edited"]);
}

#[test]
fn edit_action_for_unknown_item_stays_browsing() {
    let mut controller = controller_with_item("x");

    let outcome = controller.handle(UiEvent::Item(ItemAction::Edit, "nope".into()));
    assert_eq!(outcome, Outcome::Unchanged(NoChange::UnknownItem));
    assert_eq!(controller.session().mode(), ViewMode::Browsing);
}
