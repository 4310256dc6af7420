//! Tests for the layout pass and its triggers.

mod common;

use common::Harness;
use trellis_common::{Rect, Size};
use trellis_layout::{LayoutBBox, LayoutError, Variable};
use trellis_model::{Arrangement, ModelId, PanelModel, SizingMode};

fn bbox(h: &Harness, model: ModelId) -> LayoutBBox {
    h.tree.view(h.view_of(model)).unwrap().layout_bbox()
}

// ========== root ==========

#[test]
fn test_stretched_root_fills_body() {
    let mut h = Harness::new(1280.0, 720.0);
    let root = h.add(PanelModel::new("Panel").with_sizing_mode(SizingMode::StretchBoth));
    let view = h.mount(root);

    assert_eq!(
        bbox(&h, root),
        LayoutBBox {
            top: 0.0,
            left: 0.0,
            right: 1264.0,
            bottom: 704.0,
            width: 1264.0,
            height: 704.0,
        }
    );

    let el = h.tree.view(view).unwrap().element();
    let style = h.dom.style(el).unwrap();
    assert_eq!(style.position.as_deref(), Some("relative"));
    assert_eq!(style.width.as_deref(), Some("1264px"));
    assert_eq!(h.dom.bounding_client_rect(el), Rect::new(8.0, 8.0, 1264.0, 704.0));
}

#[test]
fn test_scaled_root_keeps_aspect_ratio() {
    let mut h = Harness::new(1280.0, 720.0);
    let root = h.add(
        PanelModel::new("Plot")
            .with_size(600.0, 300.0)
            .with_sizing_mode(SizingMode::ScaleBoth),
    );
    let _ = h.mount(root);

    let bbox = bbox(&h, root);
    assert_eq!((bbox.width, bbox.height), (1264.0, 632.0));
}

#[test]
fn test_mount_into_container() {
    let mut h = Harness::new(1280.0, 720.0);
    let body = h.dom.body();
    let container = h.dom.create_element("section");
    h.dom.append_child(body, container);
    h.dom.set_border_box(container, Rect::new(8.0, 8.0, 500.0, 400.0));
    let root = h.add(PanelModel::new("Panel").with_sizing_mode(SizingMode::StretchBoth));

    let (tree, mut cx) = h.parts();
    let view = tree.mount(root, Some(container), &mut cx).unwrap();

    let el = h.tree.view(view).unwrap().element();
    assert_eq!(h.dom.parent(el), Some(container));
    assert_eq!((bbox(&h, root).width, bbox(&h, root).height), (500.0, 400.0));
}

#[test]
fn test_mount_into_detached_container_fails() {
    let mut h = Harness::new(1280.0, 720.0);
    let container = h.dom.create_element("div");
    let root = h.add(
        PanelModel::new("Plot")
            .with_size(600.0, 300.0)
            .with_sizing_mode(SizingMode::ScaleWidth),
    );

    let (tree, mut cx) = h.parts();
    let error = tree.mount(root, Some(container), &mut cx).unwrap_err();

    assert!(error.is_detached());
    assert!(h.tree.is_empty());
    assert!(h.dom.children(container).is_empty());
    assert_eq!(h.dom.resize_listener_count(), 0);
}

#[test]
fn test_scaled_root_without_size_fails() {
    let mut h = Harness::new(1280.0, 720.0);
    let root = h.add(PanelModel::new("Plot").with_sizing_mode(SizingMode::ScaleHeight));

    let (tree, mut cx) = h.parts();
    assert_eq!(
        tree.mount(root, None, &mut cx),
        Err(LayoutError::MissingAspectRatio {
            view: "PlotView(0)".to_string()
        })
    );
}

// ========== arrangements ==========

#[test]
fn test_row_places_children_side_by_side() {
    let mut h = Harness::new(1280.0, 720.0);
    let a = h.add(PanelModel::new("A").with_size(100.0, 50.0));
    let b = h.add(PanelModel::new("B").with_size(200.0, 50.0));
    let row = h.add(
        PanelModel::new("Row")
            .with_arrangement(Arrangement::Row)
            .with_sizing_mode(SizingMode::StretchBoth)
            .with_children(vec![a, b]),
    );
    let _ = h.mount(row);

    assert_eq!((bbox(&h, a).left, bbox(&h, a).right), (0.0, 100.0));
    assert_eq!((bbox(&h, b).left, bbox(&h, b).right), (100.0, 300.0));
    assert_eq!(bbox(&h, b).top, 0.0);

    let b_el = h.tree.view(h.view_of(b)).unwrap().element();
    assert_eq!(h.dom.style(b_el).unwrap().position.as_deref(), Some("absolute"));
    assert_eq!(h.dom.bounding_client_rect(b_el), Rect::new(108.0, 8.0, 200.0, 50.0));
}

#[test]
fn test_column_stacks_stretched_children() {
    let mut h = Harness::new(1280.0, 720.0);
    let a = h.add(
        PanelModel::new("A")
            .with_height(100.0)
            .with_sizing_mode(SizingMode::StretchWidth),
    );
    let b = h.add(
        PanelModel::new("B")
            .with_height(60.0)
            .with_sizing_mode(SizingMode::StretchWidth),
    );
    let column = h.add(
        PanelModel::new("Column")
            .with_size(400.0, 300.0)
            .with_arrangement(Arrangement::Column)
            .with_children(vec![a, b]),
    );
    let _ = h.mount(column);

    assert_eq!(
        bbox(&h, b),
        LayoutBBox {
            top: 100.0,
            left: 0.0,
            right: 400.0,
            bottom: 160.0,
            width: 400.0,
            height: 60.0,
        }
    );
}

#[test]
fn test_row_child_stretches_into_remaining_width() {
    let mut h = Harness::new(1280.0, 720.0);
    let fixed = h.add(PanelModel::new("Fixed").with_size(200.0, 100.0));
    let stretched = h.add(
        PanelModel::new("Stretched")
            .with_height(100.0)
            .with_sizing_mode(SizingMode::StretchWidth),
    );
    let row = h.add(
        PanelModel::new("Row")
            .with_size(500.0, 100.0)
            .with_arrangement(Arrangement::Row)
            .with_children(vec![fixed, stretched]),
    );
    let _ = h.mount(row);

    assert_eq!((bbox(&h, stretched).left, bbox(&h, stretched).width), (200.0, 300.0));
}

#[test]
fn test_overlay_children_share_origin() {
    let mut h = Harness::new(1280.0, 720.0);
    let plot = h.add(
        PanelModel::new("Plot")
            .with_size(600.0, 300.0)
            .with_sizing_mode(SizingMode::ScaleWidth),
    );
    let legend = h.add(PanelModel::new("Legend").with_size(80.0, 40.0));
    let root = h.add(PanelModel::new("Panel").with_size(400.0, 300.0).with_children(vec![plot, legend]));
    let _ = h.mount(root);

    assert_eq!((bbox(&h, plot).width, bbox(&h, plot).height), (400.0, 200.0));
    assert_eq!((bbox(&h, legend).left, bbox(&h, legend).top), (0.0, 0.0));
}

#[test]
fn test_get_width_height_fits_parent_content_box() {
    let mut h = Harness::new(1280.0, 720.0);
    let plot = h.add(PanelModel::new("Plot").with_size(600.0, 300.0));
    let root = h.add(PanelModel::new("Panel").with_size(400.0, 300.0).with_children(vec![plot]));
    let _ = h.mount(root);
    let plot_view = h.view_of(plot);

    let (tree, cx) = h.parts();
    assert_eq!(tree.get_width_height(plot_view, &cx), Ok(Size::new(400.0, 200.0)));
}

// ========== delegation and triggers ==========

#[test]
fn test_layout_on_child_runs_from_root() {
    let mut h = Harness::new(1280.0, 720.0);
    let child = h.add(PanelModel::new("Leaf").with_sizing_mode(SizingMode::StretchBoth));
    let root = h.add(PanelModel::new("Panel").with_size(400.0, 300.0).with_children(vec![child]));
    let _ = h.mount(root);
    let child_view = h.view_of(child);

    h.doc.set_size(root, Some(200.0), Some(100.0)).unwrap();
    let (tree, mut cx) = h.parts();
    tree.layout(child_view, &mut cx).unwrap();

    assert_eq!(bbox(&h, root).width, 200.0);
    assert_eq!((bbox(&h, child).width, bbox(&h, child).height), (200.0, 100.0));
}

#[test]
fn test_resize_relayouts_root() {
    let mut h = Harness::new(1280.0, 720.0);
    let root = h.add(PanelModel::new("Panel").with_sizing_mode(SizingMode::StretchBoth));
    let view = h.mount(root);
    assert!(h.tree.view(view).unwrap().listens_for_resize());

    h.dom.resize_viewport(Size::new(1024.0, 768.0));
    h.dom.resize_viewport(Size::new(1024.0, 768.0));
    assert_eq!(h.tree.pending_triggers(), 1);
    assert_eq!(h.process(), 1);

    assert_eq!((bbox(&h, root).width, bbox(&h, root).height), (1008.0, 752.0));
    assert_eq!(h.tree.pending_triggers(), 0);
}

#[test]
fn test_only_roots_listen_for_resize() {
    let mut h = Harness::new(1280.0, 720.0);
    let child = h.add(PanelModel::new("Leaf").with_size(10.0, 10.0));
    let root = h.add(PanelModel::new("Panel").with_children(vec![child]));
    let _ = h.mount(root);

    assert_eq!(h.dom.resize_listener_count(), 1);
    assert!(!h.tree.view(h.view_of(child)).unwrap().listens_for_resize());
}

#[test]
fn test_sizing_mode_change_triggers_layout() {
    let mut h = Harness::new(1280.0, 720.0);
    let child = h.add(PanelModel::new("Leaf").with_size(100.0, 50.0));
    let root = h.add(PanelModel::new("Panel").with_size(400.0, 300.0).with_children(vec![child]));
    let _ = h.mount(root);
    assert_eq!(bbox(&h, child).width, 100.0);

    assert_eq!(h.doc.set_sizing_mode(child, SizingMode::StretchBoth), Ok(true));
    assert_eq!(h.tree.pending_triggers(), 1);
    assert_eq!(h.process(), 1);

    assert_eq!((bbox(&h, child).width, bbox(&h, child).height), (400.0, 300.0));
}

#[test]
fn test_unchanged_sizing_mode_queues_nothing() {
    let mut h = Harness::new(1280.0, 720.0);
    let root = h.add(PanelModel::new("Panel").with_size(400.0, 300.0));
    let _ = h.mount(root);

    assert_eq!(h.doc.set_sizing_mode(root, SizingMode::Fixed), Ok(false));
    assert_eq!(h.tree.pending_triggers(), 0);
}

#[test]
fn test_triggers_for_removed_views_are_skipped() {
    let mut h = Harness::new(1280.0, 720.0);
    let root = h.add(PanelModel::new("Panel").with_sizing_mode(SizingMode::StretchBoth));
    let view = h.mount(root);

    h.dom.resize_viewport(Size::new(1024.0, 768.0));
    let (tree, mut cx) = h.parts();
    tree.remove(view, &mut cx);

    assert_eq!(h.tree.pending_triggers(), 1);
    assert_eq!(h.process(), 0);
    assert_eq!(h.dom.resize_listener_count(), 0);
}

#[test]
fn test_variables_cover_every_view() {
    let mut h = Harness::new(1280.0, 720.0);
    let a = h.add(PanelModel::new("A").with_size(10.0, 10.0));
    let root = h.add(PanelModel::new("Panel").with_size(40.0, 30.0).with_children(vec![a]));
    let _ = h.mount(root);

    let width = h
        .tree
        .variables()
        .find(|v| v.name() == "PanelView(1).width")
        .map(Variable::value);
    assert_eq!(width, Some(40.0));
    assert_eq!(h.tree.variables().count(), 12);
}
