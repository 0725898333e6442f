use super::*;
use crate::component::Component;
use crate::configuration::Configuration;
use crate::model::{ComponentKind, ComponentModel};
use std::rc::Rc;

fn mounted_lists(counts: &[usize]) -> (Component, Vec<CompositeComponent>) {
    let mut model = ComponentModel::new(ComponentKind::Grid, 1.0);
    model.items.push(Item::composite(
        counts
            .iter()
            .map(|&count| {
                ComponentModel::new(ComponentKind::List, 0.0)
                    .with_items((0..count).map(|n| Item::new(format!("Item {n}"))).collect())
            })
            .collect(),
    ));
    let parent = Component::new(model, Rc::new(Configuration::default()));
    parent.setup(Size::new(320.0, 0.0));
    let composites = parent.composites_at(0);
    (parent, composites)
}

#[test]
fn default_view_keeps_item_and_reports_preferred_height() {
    let mut view = DefaultItemView::new();
    let configured = view.configure(&Item::new("Title").with_subtitle("Sub"));
    assert_eq!(view.title(), "Title");
    assert_eq!(view.subtitle(), "Sub");
    assert_eq!(configured.size.height, 0.0);
    assert_eq!(view.preferred_view_size().height, DefaultItemView::DEFAULT_HEIGHT);

    view.prepare_for_reuse();
    assert!(view.title().is_empty());
}

#[test]
fn composite_view_stacks_children() {
    let (_parent, composites) = mounted_lists(&[2, 3]);
    let mut view = CompositeView::new();
    let configured = view.configure(&Item::composite(Vec::new()), Some(&composites));

    assert_eq!(view.subviews().len(), 2);
    let first = view.subviews()[0];
    let second = view.subviews()[1];
    assert_eq!(first.interface, composites[0].component.interface_id());
    assert_eq!(first.backend, BackendKind::Table);
    assert_eq!(first.frame.origin.y, 0.0);
    assert_eq!(second.frame.origin.y, 88.0);
    assert_eq!(configured.size.height, 88.0 + 132.0);
    assert_eq!(view.preferred_view_size(), configured.size);
}

#[test]
fn reconfigure_replaces_previous_mounts() {
    let (_first_parent, first) = mounted_lists(&[1, 1]);
    let (_second_parent, second) = mounted_lists(&[4]);
    let mut view = CompositeView::new();

    view.configure(&Item::composite(Vec::new()), Some(&first));
    view.configure(&Item::composite(Vec::new()), Some(&second));

    let interfaces: Vec<InterfaceId> = view.subviews().iter().map(|s| s.interface).collect();
    assert_eq!(interfaces, vec![second[0].component.interface_id()]);
    assert_eq!(view.preferred_view_size().height, 4.0 * 44.0);
}

#[test]
fn reuse_keeps_foreign_subviews() {
    let (_parent, composites) = mounted_lists(&[1]);
    let mut view = CompositeView::new();
    let badge = Subview::foreign(InterfaceId::next(), BackendKind::Collection, Rect::new(0.0, 0.0, 10.0, 10.0));
    view.add_subview(badge);
    view.configure(&Item::composite(Vec::new()), Some(&composites));
    assert_eq!(view.subviews().len(), 2);

    view.prepare_for_reuse();
    assert_eq!(view.subviews(), &[badge]);
    assert!(!view.subviews()[0].is_mounted_component());
}

#[test]
fn configure_without_composites_is_empty() {
    let mut view = CompositeView::new();
    let configured = view.configure(&Item::composite(Vec::new()), None);
    assert!(view.subviews().is_empty());
    assert_eq!(configured.size.height, 0.0);
}

#[test]
fn row_view_accessors() {
    let row = RowView::Item(Box::new(DefaultItemView::new()));
    assert!(!row.is_composite());
    assert!(row.as_composite().is_none());
    assert!(row.as_item_configurable().is_some());

    let row = RowView::Composite(CompositeView::new());
    assert!(row.is_composite());
    assert!(row.as_item_configurable().is_none());
}
