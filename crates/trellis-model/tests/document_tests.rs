//! Tests for panel models, the document's change events and declarations.

use std::cell::RefCell;
use std::rc::Rc;
use std::str::FromStr;

use strum::IntoEnumIterator;
use trellis_model::{
    Arrangement, Document, ModelError, ModelId, PanelDecl, PanelModel, SizingMode,
    SizingModeChanged,
};

#[test]
fn test_sizing_mode_names_round_trip() {
    for mode in SizingMode::iter() {
        let name = mode.to_string();
        assert_eq!(SizingMode::from_str(&name), Ok(mode));
    }
    assert_eq!(SizingMode::ScaleBoth.to_string(), "scale_both");
    assert!(SizingMode::from_str("stretch_everything").is_err());
}

#[test]
fn test_sizing_mode_classification() {
    assert!(SizingMode::StretchBoth.stretches_width());
    assert!(SizingMode::StretchBoth.stretches_height());
    assert!(!SizingMode::StretchWidth.stretches_height());
    assert!(SizingMode::ScaleHeight.is_scaling());
    assert!(!SizingMode::Fixed.is_scaling());
}

#[test]
fn test_aspect_ratio_requires_both_dimensions() {
    assert_eq!(PanelModel::new("Plot").with_size(600.0, 300.0).aspect_ratio(), Some(2.0));
    assert_eq!(PanelModel::new("Plot").with_width(600.0).aspect_ratio(), None);
    assert_eq!(PanelModel::new("Plot").with_size(600.0, 0.0).aspect_ratio(), None);
}

#[test]
fn test_add_assigns_sequential_ids() {
    let mut doc = Document::new();
    let a = doc.add(PanelModel::new("A"));
    let b = doc.add(PanelModel::new("B"));

    assert_eq!((a, b), (ModelId(0), ModelId(1)));
    assert_eq!(doc.model(b).map(PanelModel::kind), Ok("B"));
    assert_eq!(doc.model(ModelId(9)), Err(ModelError::UnknownModel(ModelId(9))));
}

#[test]
fn test_set_sizing_mode_emits_only_on_change() {
    let mut doc = Document::new();
    let id = doc.add(PanelModel::new("Plot"));
    let events = Rc::new(RefCell::new(Vec::new()));

    let sink = Rc::clone(&events);
    let _connection = doc.on_sizing_mode_change(move |e| sink.borrow_mut().push(*e));

    assert_eq!(doc.set_sizing_mode(id, SizingMode::ScaleWidth), Ok(true));
    assert_eq!(doc.set_sizing_mode(id, SizingMode::ScaleWidth), Ok(false));

    assert_eq!(
        *events.borrow(),
        vec![SizingModeChanged {
            model: id,
            old: SizingMode::Fixed,
            new: SizingMode::ScaleWidth,
        }]
    );
}

#[test]
fn test_set_children_emits_only_on_change() {
    let mut doc = Document::new();
    let a = doc.add(PanelModel::new("A"));
    let b = doc.add(PanelModel::new("B"));
    let parent = doc.add(PanelModel::new("Row").with_children(vec![a, b]));
    let count = Rc::new(RefCell::new(0));

    let sink = Rc::clone(&count);
    let _connection = doc.on_children_change(move |_| *sink.borrow_mut() += 1);

    assert_eq!(doc.set_children(parent, vec![a, b]), Ok(false));
    assert_eq!(doc.set_children(parent, vec![b, a]), Ok(true));

    assert_eq!(*count.borrow(), 1);
    assert_eq!(doc.model(parent).map(PanelModel::layoutable_children), Ok(&[b, a][..]));
}

#[test]
fn test_add_root_rejects_unknown_model() {
    let mut doc = Document::new();
    let id = doc.add(PanelModel::new("Plot"));

    assert_eq!(doc.add_root(id), Ok(()));
    assert_eq!(doc.add_root(id), Ok(()));
    assert_eq!(doc.add_root(ModelId(5)), Err(ModelError::UnknownModel(ModelId(5))));
    assert_eq!(doc.roots(), &[id]);
}

#[test]
fn test_notify_idle_reaches_listener() {
    let doc = Document::new();
    let seen = Rc::new(RefCell::new(Vec::new()));

    let sink = Rc::clone(&seen);
    let _connection = doc.on_idle(move |root| sink.borrow_mut().push(*root));
    doc.notify_idle(ModelId(3));

    assert_eq!(*seen.borrow(), vec![ModelId(3)]);
}

#[test]
fn test_decl_defaults_and_insert_tree() {
    let json = r#"{
        "kind": "Column",
        "arrangement": "column",
        "sizing_mode": "stretch_both",
        "children": [
            { "kind": "Plot", "width": 600, "height": 300, "sizing_mode": "scale_width" },
            { "css_classes": ["slider"] }
        ]
    }"#;
    let decl: PanelDecl = serde_json::from_str(json).unwrap();

    let mut doc = Document::new();
    let root = doc.insert_tree(&decl);
    let column = doc.model(root).unwrap();

    assert_eq!(column.kind(), "Column");
    assert_eq!(column.arrangement(), Arrangement::Column);
    assert_eq!(column.sizing_mode(), SizingMode::StretchBoth);

    let children = column.layoutable_children();
    assert_eq!(children.len(), 2);

    let plot = doc.model(children[0]).unwrap();
    assert_eq!(plot.aspect_ratio(), Some(2.0));
    assert_eq!(plot.sizing_mode(), SizingMode::ScaleWidth);

    let panel = doc.model(children[1]).unwrap();
    assert_eq!(panel.kind(), "Panel");
    assert_eq!(panel.css_classes(), &["slider".to_string()]);
    assert_eq!(panel.sizing_mode(), SizingMode::Fixed);
}
