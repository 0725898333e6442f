use std::cell::Cell;
use std::rc::Rc;

use spots_core::{
    Component, ComponentKind, ComponentModel, Configuration, Controller, Item, ItemConfigurable,
    Layout, Platform,
};
use spots_runtime_std::StdRuntime;
use spots_ui_graphics::{EdgeInsets, Size};

const VIEWPORT: Size = Size {
    width: 375.0,
    height: 667.0,
};

/// Topic tile: fixed preferred size, title truncated to four lines.
struct TopicCell {
    size: Size,
    label: String,
    color: Option<String>,
}

impl TopicCell {
    const MAX_LINES: usize = 4;

    fn new() -> Self {
        Self {
            size: Size::new(125.0, 160.0),
            label: String::new(),
            color: None,
        }
    }
}

impl ItemConfigurable for TopicCell {
    fn configure(&mut self, item: &Item) -> Item {
        self.label = item
            .title
            .split_whitespace()
            .take(Self::MAX_LINES)
            .collect::<Vec<_>>()
            .join("\n");
        self.color = item.meta_text("color").map(str::to_owned);
        let mut configured = item.clone();
        configured.size.height = self.size.height - 5.0;
        configured
    }

    fn preferred_view_size(&self) -> Size {
        self.size
    }

    fn prepare_for_reuse(&mut self) {
        self.label.clear();
        self.color = None;
    }
}

fn topic(title: &str, color: &str) -> Item {
    Item::new(title).with_kind("topic").with_meta("color", color)
}

fn headlines(section: &str, count: usize) -> ComponentModel {
    ComponentModel::new(ComponentKind::List, 0.0).with_items(
        (1..=count)
            .map(|n| Item::new(format!("{section} headline {n}")).with_subtitle("Spots News"))
            .collect(),
    )
}

fn topics() -> ComponentModel {
    let layout = Layout::default().mutate(|layout| {
        layout.item_spacing = 8.0;
        layout.inset = EdgeInsets::symmetric(10.0, 10.0);
    });
    ComponentModel::with_layout(ComponentKind::Carousel, layout)
        .with_identifier("topics")
        .with_items(vec![
            topic("Science", "0A84FF"),
            topic("Politics", "FF453A"),
            topic("Technology", "30D158"),
            topic("Arts and Culture", "FFD60A"),
        ])
}

fn sections(names: &[(&str, usize)]) -> ComponentModel {
    let mut model = ComponentModel::new(ComponentKind::Grid, 2.0).with_identifier("sections");
    model.add_children(names.iter().map(|(name, count)| headlines(name, *count)));
    model
}

fn dump(component: &Component, depth: usize) {
    let frame = component.view_frame();
    log::info!(
        "{:indent$}{} {} items {}x{} at y={}",
        "",
        component.kind(),
        component.item_count(),
        frame.width(),
        frame.height(),
        frame.origin.y,
        indent = depth * 2
    );
    let composites = component.composite_components().to_vec();
    for composite in composites {
        dump(&composite.component, depth + 1);
    }
}

fn dump_tree(controller: &Controller) {
    log::info!("content size {:?}", controller.content_size());
    for component in controller.components() {
        dump(component, 0);
    }
}

fn main() {
    env_logger::init();

    println!("=== Spots News Example ===");
    println!("Builds a topic carousel and a grid of headline lists, then");
    println!("reloads new models and prints the component tree after each pass.");
    println!("Run with RUST_LOG=debug for reconciliation details.");
    println!();

    let runtime = StdRuntime::new();
    let configuration = Configuration::new(Platform::Desktop)
        .with_interfaces(runtime.interface_factory())
        .register_view("topic", TopicCell::new)
        .into_shared();

    let mut controller = Controller::new(
        vec![topics(), sections(&[("World", 3), ("Business", 3)])],
        configuration,
    );
    controller.prepare(VIEWPORT);
    runtime.pump();
    dump_tree(&controller);

    let reloads = Rc::new(Cell::new(0));
    let passes: Vec<Vec<ComponentModel>> = vec![
        vec![topics(), sections(&[("World", 4), ("Business", 3)])],
        vec![
            topics(),
            sections(&[("World", 4), ("Business", 3), ("Sport", 2)]),
            headlines("Latest", 5),
        ],
        vec![topics()],
    ];
    for models in passes {
        let counter = Rc::clone(&reloads);
        controller.reload_if_needed(models, move || counter.set(counter.get() + 1));
        while controller.is_reloading() {
            if runtime.pump() == 0 {
                break;
            }
        }
        dump_tree(&controller);
    }

    log::info!("{} reloads completed", reloads.get());
    println!("Completed {} reloads.", reloads.get());
}
