use super::*;
use crate::headless::HeadlessInterfaceFactory;
use crate::interface::BackendKind;
use crate::item::Item;
use crate::model::ComponentKind;
use crate::platform::Platform;
use crate::TestRuntime;

fn numbered(count: usize) -> Vec<Item> {
    (1..=count).map(|n| Item::new(format!("Item {n}"))).collect()
}

fn list(count: usize) -> ComponentModel {
    ComponentModel::new(ComponentKind::List, 0.0).with_items(numbered(count))
}

fn grid_of_lists(counts: &[usize]) -> ComponentModel {
    let mut model = ComponentModel::new(ComponentKind::Grid, 2.0);
    for &count in counts {
        model.add(list(count));
    }
    model
}

fn prepared(models: Vec<ComponentModel>) -> Controller {
    let mut controller = Controller::new(models, Configuration::new(Platform::Desktop).into_shared());
    controller.prepare(Size::new(640.0, 480.0));
    controller
}

fn counter() -> (Rc<Cell<usize>>, impl FnOnce() + 'static) {
    let fired = Rc::new(Cell::new(0));
    let handle = Rc::clone(&fired);
    (fired, move || handle.set(handle.get() + 1))
}

#[test]
fn unchanged_models_complete_without_touching_components() {
    let models = vec![grid_of_lists(&[10, 10]), grid_of_lists(&[10, 10])];
    let mut controller = prepared(models.clone());
    let ids: Vec<_> = controller.components().iter().map(Component::id).collect();

    let (fired, callback) = counter();
    controller.reload_if_needed(models, callback);

    assert_eq!(fired.get(), 1);
    assert!(!controller.is_reloading());
    let after: Vec<_> = controller.components().iter().map(Component::id).collect();
    assert_eq!(ids, after);
}

#[test]
fn kind_change_replaces_component() {
    let mut controller = prepared(vec![grid_of_lists(&[10, 10]), list(3)]);
    let stale = controller.component(1).cloned().expect("component 1");

    let new_models = vec![
        grid_of_lists(&[10, 10]),
        ComponentModel::new(ComponentKind::Carousel, 0.0).with_items(numbered(3)),
    ];
    let (fired, callback) = counter();
    controller.reload_if_needed(new_models.clone(), callback);

    assert_eq!(fired.get(), 1);
    assert_eq!(controller.models(), new_models);
    let replacement = controller.component(1).expect("component 1");
    assert_ne!(replacement.id(), stale.id());
    assert_eq!(replacement.backend(), BackendKind::Collection);
    assert!(replacement.is_attached());
    assert!(!stale.is_attached());
}

#[test]
fn span_change_reloads_in_place() {
    let mut controller = prepared(vec![grid_of_lists(&[10, 10])]);
    let id = controller.component(0).map(Component::id);
    let child = controller.component(0).expect("grid").composites_at(0)[0].component.id();

    let mut model = grid_of_lists(&[10, 10]);
    model.layout.span = 1.0;
    controller.reload_if_needed(vec![model], || {});

    let grid = controller.component(0).expect("grid");
    assert_eq!(Some(grid.id()), id);
    let composite = &grid.composites_at(0)[0];
    assert_eq!(composite.component.id(), child);
    assert_eq!(composite.component.view_frame().width(), 640.0);
}

#[test]
fn reload_from_empty_builds_new_components() {
    let mut controller = prepared(Vec::new());
    assert_eq!(controller.content_size().height, 0.0);

    let models = vec![grid_of_lists(&[10, 10]), grid_of_lists(&[10, 10])];
    let (fired, callback) = counter();
    controller.reload_if_needed(models.clone(), callback);

    assert_eq!(fired.get(), 1);
    assert_eq!(controller.components().len(), 2);
    for component in controller.components() {
        assert!(component.is_setup());
        assert!(component.is_attached());
        assert_eq!(component.composite_components().len(), 2);
    }
    assert_eq!(controller.models(), models);
}

#[test]
fn growth_adds_components_and_items() {
    let mut controller = prepared(vec![grid_of_lists(&[10, 10])]);

    let new_models = vec![
        grid_of_lists(&[11, 10]),
        grid_of_lists(&[11, 11]),
        grid_of_lists(&[11, 11]),
    ];
    controller.reload_if_needed(new_models.clone(), || {});

    assert_eq!(controller.components().len(), 3);
    let counts: Vec<Vec<usize>> = controller
        .components()
        .iter()
        .map(|component| {
            component
                .composite_components()
                .iter()
                .map(|composite| composite.component.item_count())
                .collect()
        })
        .collect();
    assert_eq!(counts, vec![vec![11, 10], vec![11, 11], vec![11, 11]]);
    assert_eq!(controller.models(), new_models);
}

#[test]
fn shrink_removes_trailing_components() {
    let mut controller = prepared(vec![
        grid_of_lists(&[10, 10]),
        grid_of_lists(&[10, 10]),
        list(4),
    ]);
    let removed: Vec<Component> = controller.components()[1..].to_vec();

    controller.reload_if_needed(vec![grid_of_lists(&[10, 10])], || {});

    assert_eq!(controller.components().len(), 1);
    for component in removed {
        assert!(!component.is_attached());
        assert!(component.composite_components().is_empty());
    }
}

#[test]
fn components_stack_vertically() {
    let controller = prepared(vec![list(2), list(3)]);
    let first = controller.component(0).expect("first").view_frame();
    let second = controller.component(1).expect("second").view_frame();
    assert_eq!(first.origin.y, 0.0);
    assert_eq!(second.origin.y, 2.0 * 46.0);
    assert_eq!(controller.content_size(), Size::new(640.0, 5.0 * 46.0));
}

#[test]
fn resize_relayouts_without_rebuilding() {
    let mut controller = prepared(vec![grid_of_lists(&[1, 1])]);
    let ids: Vec<_> = controller.components()[0]
        .composite_components()
        .iter()
        .map(|composite| composite.component.id())
        .collect();

    controller.resize(Size::new(320.0, 480.0));

    let grid = &controller.components()[0];
    let after: Vec<_> = grid
        .composite_components()
        .iter()
        .map(|composite| composite.component.id())
        .collect();
    assert_eq!(ids, after);
    assert_eq!(grid.composites_at(1)[0].component.view_frame().width(), 160.0);
    assert_eq!(controller.size(), Size::new(320.0, 480.0));
}

#[test]
fn deferred_completion_fires_once_after_drain() {
    let runtime = TestRuntime::new();
    let configuration = Configuration::new(Platform::Desktop)
        .with_interfaces(HeadlessInterfaceFactory::with_runtime(runtime.handle()))
        .into_shared();
    let mut controller = Controller::new(vec![grid_of_lists(&[10, 10])], configuration);
    controller.prepare(Size::new(640.0, 480.0));
    runtime.drain();

    let (fired, callback) = counter();
    controller.reload_if_needed(
        vec![grid_of_lists(&[11, 10]), grid_of_lists(&[11, 11])],
        callback,
    );
    assert_eq!(fired.get(), 0);
    assert!(controller.is_reloading());

    runtime.drain();
    assert_eq!(fired.get(), 1);
    assert!(!controller.is_reloading());
    assert_eq!(runtime.drain(), 0);
    assert_eq!(fired.get(), 1);
}

#[test]
fn reload_before_prepare_defers_rendering() {
    let mut controller = Controller::new(vec![list(1)], Configuration::default().into_shared());
    let (fired, callback) = counter();
    controller.reload_if_needed(vec![list(2), list(1)], callback);
    assert_eq!(fired.get(), 1);
    assert!(controller.components().iter().all(|component| !component.is_setup()));

    controller.prepare(Size::new(320.0, 480.0));
    assert_eq!(controller.component(0).expect("first").user_interface().row_count(), 2);
    assert_eq!(controller.content_size().height, 3.0 * 44.0);
}
