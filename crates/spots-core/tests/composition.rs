use spots_core::{
    BackendKind, ComponentKind, ComponentModel, Configuration, Controller, DefaultScheduler, Item,
    Platform, Runtime,
};
use spots_testing::{
    composite_grid, composite_item_counts, desktop_configuration, list_model, numbered_items,
    prepared_controller, CompletionCounter, Mutation, RecordingInterfaceFactory, VIEWPORT,
};
use std::rc::Rc;

fn initial_models() -> Vec<ComponentModel> {
    vec![composite_grid(2.0, &[10, 10]), composite_grid(2.0, &[10, 10])]
}

#[test]
fn initial_composition_mounts_lists_in_grid_rows() {
    let controller = prepared_controller(initial_models());

    for component in controller.components() {
        assert_eq!(component.backend(), BackendKind::Collection);
        assert_eq!(component.composite_components().len(), 2);
        for index in 0..2 {
            let row = component.ui(index).expect("composite row");
            let view = row.as_composite().expect("composite view");
            assert_eq!(view.subviews().len(), 1);

            let child = &component.composites_at(index)[0];
            assert_eq!(child.component.backend(), BackendKind::Table);
            let parent = child.parent().expect("parent");
            assert_eq!(parent.model(), component.model());

            let row_height = child
                .component
                .ui(0)
                .expect("child row")
                .preferred_view_size()
                .height;
            assert_eq!(child.component.view_frame().height(), (row_height + 2.0) * 10.0);
        }
        assert!(component.ui(2).is_none());
    }
}

#[test]
fn reload_with_growth_matches_new_models() {
    let mut controller = prepared_controller(initial_models());
    let new_models = vec![
        composite_grid(2.0, &[11, 10]),
        composite_grid(2.0, &[11, 11]),
        composite_grid(2.0, &[11, 11]),
    ];
    let counter = CompletionCounter::new();
    controller.reload_if_needed(new_models.clone(), counter.completion());

    assert_eq!(counter.count(), 1);
    assert_eq!(controller.components().len(), 3);
    assert_eq!(
        composite_item_counts(&controller),
        vec![vec![11, 10], vec![11, 11], vec![11, 11]]
    );
    assert_eq!(controller.models(), new_models);
}

#[test]
fn reload_with_shrink_keeps_first_component() {
    let mut controller = prepared_controller(initial_models());
    let first = controller.components()[0].id();

    let counter = CompletionCounter::new();
    controller.reload_if_needed(vec![composite_grid(2.0, &[10, 10])], counter.completion());

    assert_eq!(counter.count(), 1);
    assert_eq!(controller.components().len(), 1);
    assert_eq!(controller.components()[0].id(), first);
    assert_eq!(composite_item_counts(&controller), vec![vec![10, 10]]);
}

#[test]
fn reload_with_replaced_kind_rebuilds_component() {
    let mut controller = prepared_controller(initial_models());
    let mut new_models = initial_models();
    new_models[1] = ComponentModel::new(ComponentKind::List, 0.0).with_items(numbered_items(3));

    controller.reload_if_needed(new_models.clone(), || {});

    let replaced = &controller.components()[1];
    assert_eq!(replaced.backend(), BackendKind::Table);
    assert!(replaced.composite_components().is_empty());
    assert_eq!(replaced.view_frame().height(), 3.0 * 46.0);
    assert_eq!(controller.models(), new_models);
}

#[test]
fn reload_from_empty_creates_everything() {
    let mut controller = prepared_controller(Vec::new());
    let counter = CompletionCounter::new();
    controller.reload_if_needed(initial_models(), counter.completion());

    assert_eq!(counter.count(), 1);
    assert_eq!(composite_item_counts(&controller), vec![vec![10, 10], vec![10, 10]]);
    let expected = controller.components()[0].view_frame().height()
        + controller.components()[1].view_frame().height();
    assert_eq!(controller.content_size().height, expected);
}

#[test]
fn nested_changes_are_committed_child_first() {
    let interfaces = RecordingInterfaceFactory::new();
    let configuration = Configuration::new(Platform::Desktop)
        .with_interfaces(interfaces.clone())
        .into_shared();
    let mut controller = Controller::new(vec![composite_grid(2.0, &[2])], configuration);
    controller.prepare(VIEWPORT);
    interfaces.take();

    let grid = controller.components()[0].clone();
    let child = grid.composites_at(0)[0].component.interface_id();
    controller.reload_if_needed(vec![composite_grid(2.0, &[4])], || {});

    let log = interfaces.take();
    assert_eq!(
        &log[..3],
        &[
            Mutation::Insert { interface: child, index: 2 },
            Mutation::Insert { interface: child, index: 3 },
            Mutation::Batch { interface: child },
        ]
    );
    assert!(log.contains(&Mutation::Reload {
        interface: grid.interface_id(),
        index: 0
    }));
    assert_eq!(
        log.last(),
        Some(&Mutation::Batch {
            interface: grid.interface_id()
        })
    );
}

#[test]
fn removed_components_are_detached() {
    let interfaces = RecordingInterfaceFactory::new();
    let configuration = Configuration::new(Platform::Desktop)
        .with_interfaces(interfaces.clone())
        .into_shared();
    let mut controller = Controller::new(vec![list_model(1), composite_grid(2.0, &[1])], configuration);
    controller.prepare(VIEWPORT);
    let grid = controller.components()[1].clone();
    let child = grid.composites_at(0)[0].component.interface_id();
    interfaces.take();

    controller.reload_if_needed(vec![list_model(1)], || {});

    let log = interfaces.take();
    assert!(log.contains(&Mutation::Attached {
        interface: grid.interface_id(),
        attached: false
    }));
    assert!(log.contains(&Mutation::Attached {
        interface: child,
        attached: false
    }));
}

#[test]
fn deferred_completion_runs_once_on_drain() {
    let runtime = Runtime::new(Rc::new(DefaultScheduler));
    let configuration = Configuration::new(Platform::Desktop)
        .with_interfaces(RecordingInterfaceFactory::with_runtime(runtime.handle()))
        .into_shared();
    let mut controller = Controller::new(initial_models(), configuration);
    controller.prepare(VIEWPORT);
    runtime.drain_tasks();

    let counter = CompletionCounter::new();
    controller.reload_if_needed(
        vec![composite_grid(2.0, &[11, 10]), composite_grid(2.0, &[11, 11])],
        counter.completion(),
    );
    assert_eq!(counter.count(), 0);
    assert!(runtime.has_pending_tasks());

    runtime.drain_tasks();
    assert_eq!(counter.count(), 1);
    runtime.drain_tasks();
    assert_eq!(counter.count(), 1);
}

#[test]
fn unchanged_reload_leaves_interfaces_untouched() {
    let interfaces = RecordingInterfaceFactory::new();
    let configuration = desktop_configuration()
        .with_interfaces(interfaces.clone())
        .into_shared();
    let mut controller = Controller::new(initial_models(), configuration);
    controller.prepare(VIEWPORT);
    interfaces.take();

    let counter = CompletionCounter::new();
    controller.reload_if_needed(initial_models(), counter.completion());

    assert!(interfaces.take().is_empty());
    assert_eq!(counter.count(), 1);
    assert!(!controller.is_reloading());
}

#[test]
fn child_edit_restacks_top_level_components() {
    let controller = prepared_controller(vec![composite_grid(2.0, &[2]), list_model(1)]);
    let grid = controller.components()[0].clone();
    let list = controller.components()[1].clone();
    let child = grid.composites_at(0)[0].component.clone();

    let counter = CompletionCounter::new();
    child.append(numbered_items(2), counter.completion());

    assert_eq!(counter.count(), 1);
    assert_eq!(grid.view_frame().height(), 4.0 * 46.0);
    assert_eq!(list.view_frame().origin.y, 4.0 * 46.0);
    assert_eq!(controller.content_size().height, 5.0 * 46.0);

    list.append(numbered_items(1), || {});
    assert_eq!(list.view_frame().origin.y, 4.0 * 46.0);
    assert_eq!(controller.content_size().height, 6.0 * 46.0);
}

#[test]
fn child_edit_completes_after_hosting_interface() {
    let interfaces = RecordingInterfaceFactory::holding_batches();
    let configuration = desktop_configuration()
        .with_interfaces(interfaces.clone())
        .into_shared();
    let mut controller = Controller::new(vec![composite_grid(2.0, &[1])], configuration);
    controller.prepare(VIEWPORT);
    let grid = controller.components()[0].clone();
    let child = grid.composites_at(0)[0].component.clone();
    interfaces.release(child.interface_id());
    interfaces.release(grid.interface_id());

    let counter = CompletionCounter::new();
    child.append(vec![Item::new("b")], counter.completion());
    assert_eq!(interfaces.held(child.interface_id()), 1);
    assert_eq!(interfaces.held(grid.interface_id()), 1);

    interfaces.release(child.interface_id());
    assert_eq!(counter.count(), 0);
    interfaces.release(grid.interface_id());
    assert_eq!(counter.count(), 1);
}

#[test]
fn overlapping_reloads_stay_reloading_until_both_complete() {
    let interfaces = RecordingInterfaceFactory::holding_batches();
    let configuration = desktop_configuration()
        .with_interfaces(interfaces.clone())
        .into_shared();
    let mut controller = Controller::new(vec![list_model(1), list_model(1)], configuration);
    controller.prepare(VIEWPORT);
    let first = controller.components()[0].interface_id();
    let second = controller.components()[1].interface_id();
    interfaces.release(first);
    interfaces.release(second);

    let earlier = CompletionCounter::new();
    controller.reload_if_needed(vec![list_model(2), list_model(1)], earlier.completion());
    let later = CompletionCounter::new();
    controller.reload_if_needed(vec![list_model(2), list_model(3)], later.completion());
    assert!(controller.is_reloading());

    interfaces.release(first);
    assert_eq!(earlier.count(), 1);
    assert_eq!(later.count(), 0);
    assert!(controller.is_reloading());

    interfaces.release(second);
    assert_eq!(later.count(), 1);
    assert!(!controller.is_reloading());
}
