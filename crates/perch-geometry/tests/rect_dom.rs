//! Rect tests against DOM snapshots
//!
//! Measuring, visibility clipping, scrollbar/border exclusion and absolute
//! coordinates.

use perch_dom::{DOMRect, Direction, Document, NodeId, Overflow, Position, Range, Window};
use perch_geometry::*;

fn doc() -> Document {
    Document::new(Window::new(1000.0, 800.0))
}

fn data(left: f64, top: f64, width: f64, height: f64) -> RectData {
    RectData::from_xywh(left, top, width, height)
}

fn rect(left: f64, top: f64, width: f64, height: f64) -> Rect {
    Rect::from_data(data(left, top, width, height))
}

fn child_of(doc: &mut Document, parent: NodeId, rect: DOMRect) -> NodeId {
    let id = doc.append_element(parent, "div").unwrap();
    doc.set_rect(id, rect);
    id
}

// ============================================================================
// MEASURING
// ============================================================================

#[test]
fn test_rect_from_element() {
    let mut doc = doc();
    let body = doc.body();
    let div = child_of(&mut doc, body, DOMRect::from_xywh(10.0, 20.0, 30.0, 40.0));

    let r = Rect::new(&doc, div);

    assert_eq!(
        r.to_data(),
        RectData { top: 20.0, right: 40.0, bottom: 60.0, left: 10.0, width: 30.0, height: 40.0 }
    );
    assert_eq!(r.source(), Some(&RectSourceHandle::Element(div)));
}

#[test]
fn test_rect_from_detached_element_is_empty() {
    let mut doc = doc();
    let div = doc.tree_mut().create_element("div");
    doc.set_rect(div, DOMRect::from_xywh(10.0, 20.0, 30.0, 40.0));

    assert_eq!(Rect::new(&doc, div).to_data(), RectData::default());
}

#[test]
fn test_rect_from_window() {
    let doc = doc();

    let r = Rect::new(&doc, RectSource::Window);

    assert_eq!(r.to_data(), data(0.0, 0.0, 1000.0, 800.0));
    assert_eq!(r.source(), Some(&RectSourceHandle::Window));
}

#[test]
fn test_rect_from_rect_and_data() {
    let doc = doc();
    let original = Rect::new(&doc, RectSource::Window);

    let copy = Rect::new(&doc, original.clone());
    assert!(copy.is_equal(&original));
    assert_eq!(copy.source(), original.source());

    let plain = Rect::new(&doc, data(1.0, 2.0, 3.0, 4.0));
    assert_eq!(plain.to_data(), data(1.0, 2.0, 3.0, 4.0));
    assert_eq!(plain.source(), None);
}

#[test]
fn test_range_rects() {
    let mut doc = doc();
    let body = doc.body();
    let p = child_of(&mut doc, body, DOMRect::from_xywh(0.0, 0.0, 500.0, 100.0));
    let text = doc.tree_mut().create_text("abc");
    doc.tree_mut().append_child(p, text).unwrap();

    let range = Range::new(text, 0, text, 3).with_client_rects([
        DOMRect::from_xywh(10.0, 10.0, 100.0, 20.0),
        DOMRect::from_xywh(0.0, 30.0, 40.0, 20.0),
    ]);

    let rects = Rect::get_dom_range_rects(&doc, &range);
    assert_eq!(rects.len(), 2);
    assert_eq!(rects[1].to_data(), data(0.0, 30.0, 40.0, 20.0));

    let bounding = Rect::new(&doc, range);
    assert_eq!(bounding.to_data(), data(0.0, 10.0, 110.0, 40.0));
    assert!(matches!(bounding.source(), Some(RectSourceHandle::Range(_))));
}

#[test]
fn test_collapsed_range_without_client_rects() {
    let mut doc = doc();
    let body = doc.body();
    let p = child_of(&mut doc, body, DOMRect::from_xywh(10.0, 20.0, 100.0, 30.0));
    let text = doc.tree_mut().create_text("abc");
    doc.tree_mut().append_child(p, text).unwrap();

    let rects = Rect::get_dom_range_rects(&doc, &Range::collapsed(text, 1));

    assert_eq!(rects.len(), 1);
    assert_eq!(
        rects[0].to_data(),
        RectData { top: 20.0, right: 10.0, bottom: 50.0, left: 10.0, width: 0.0, height: 30.0 }
    );

    // Element containers are used directly.
    let rects = Rect::get_dom_range_rects(&doc, &Range::collapsed(p, 0));
    assert_eq!(rects[0].left, 10.0);
    assert_eq!(rects[0].width, 0.0);
}

// ============================================================================
// VISIBILITY
// ============================================================================

#[test]
fn test_visible_without_clipping_ancestors() {
    let mut doc = doc();
    let body = doc.body();
    let wrapper = child_of(&mut doc, body, DOMRect::from_xywh(0.0, 0.0, 10.0, 10.0));
    let div = child_of(&mut doc, wrapper, DOMRect::from_xywh(0.0, 0.0, 100.0, 100.0));

    let visible = Rect::new(&doc, div).get_visible(&doc).unwrap();

    assert_eq!(visible.to_data(), data(0.0, 0.0, 100.0, 100.0));
}

#[test]
fn test_visible_clipped_by_overflow() {
    let mut doc = doc();
    let body = doc.body();
    let outer = child_of(&mut doc, body, DOMRect::from_xywh(0.0, 0.0, 80.0, 80.0));
    let inner = child_of(&mut doc, outer, DOMRect::from_xywh(20.0, 20.0, 100.0, 100.0));
    let div = child_of(&mut doc, inner, DOMRect::from_xywh(10.0, 10.0, 200.0, 200.0));
    doc.tree_mut().style_mut(outer).unwrap().set_overflow(Overflow::Hidden);
    doc.tree_mut().style_mut(inner).unwrap().overflow_y = Overflow::Auto;

    let visible = Rect::new(&doc, div).get_visible(&doc).unwrap();

    assert_eq!(visible.to_data(), data(20.0, 20.0, 60.0, 60.0));
    assert_eq!(visible.source(), Some(&RectSourceHandle::Element(div)));
}

#[test]
fn test_fully_clipped_is_not_visible() {
    let mut doc = doc();
    let body = doc.body();
    let clipper = child_of(&mut doc, body, DOMRect::from_xywh(0.0, 0.0, 50.0, 50.0));
    let div = child_of(&mut doc, clipper, DOMRect::from_xywh(100.0, 100.0, 10.0, 10.0));
    doc.tree_mut().style_mut(clipper).unwrap().set_overflow(Overflow::Hidden);

    assert!(Rect::new(&doc, div).get_visible(&doc).is_none());
}

#[test]
fn test_absolute_child_escapes_static_clipper() {
    let mut doc = doc();
    let body = doc.body();
    let clipper = child_of(&mut doc, body, DOMRect::from_xywh(0.0, 0.0, 50.0, 50.0));
    let div = child_of(&mut doc, clipper, DOMRect::from_xywh(100.0, 100.0, 10.0, 10.0));
    doc.tree_mut().style_mut(clipper).unwrap().set_overflow(Overflow::Hidden);
    doc.tree_mut().style_mut(div).unwrap().position = Position::Absolute;

    let visible = Rect::new(&doc, div).get_visible(&doc).unwrap();
    assert_eq!(visible.to_data(), data(100.0, 100.0, 10.0, 10.0));

    doc.tree_mut().style_mut(clipper).unwrap().position = Position::Relative;
    assert!(Rect::new(&doc, div).get_visible(&doc).is_none());
}

#[test]
fn test_body_rect_is_visible_as_is() {
    let doc = doc();

    let visible = Rect::new(&doc, doc.body()).get_visible(&doc).unwrap();

    assert_eq!(visible.to_data(), data(0.0, 0.0, 1000.0, 800.0));
}

#[test]
fn test_range_visibility_uses_common_ancestor() {
    let mut doc = doc();
    let body = doc.body();
    let clipper = child_of(&mut doc, body, DOMRect::from_xywh(0.0, 0.0, 50.0, 50.0));
    doc.tree_mut().style_mut(clipper).unwrap().set_overflow(Overflow::Hidden);
    let text = doc.tree_mut().create_text("abc");
    doc.tree_mut().append_child(clipper, text).unwrap();

    let line = DOMRect::from_xywh(40.0, 40.0, 30.0, 30.0);
    let range = Range::new(text, 0, text, 3).with_client_rects([line]);
    let visible = Rect::new(&doc, range).get_visible(&doc).unwrap();

    assert_eq!(visible.to_data(), data(40.0, 40.0, 10.0, 10.0));
}

#[test]
fn test_plain_rect_is_visible_as_is() {
    let doc = doc();
    let r = rect(-10.0, -10.0, 5.0, 5.0);

    assert_eq!(r.get_visible(&doc), Some(r));
}

// ============================================================================
// SCROLLBARS AND BORDERS
// ============================================================================

fn scrolled_box(doc: &mut Document, direction: Direction) -> NodeId {
    let body = doc.body();
    let div = child_of(doc, body, DOMRect::from_xywh(0.0, 0.0, 100.0, 100.0));
    {
        let style = doc.tree_mut().style_mut(div).unwrap();
        style.set_border_width("10px");
        style.direction = direction;
    }
    let geometry = doc.tree_mut().geometry_mut(div).unwrap();
    // 15px vertical scrollbar, 10px horizontal scrollbar.
    geometry.client_width = 65.0;
    geometry.client_height = 70.0;
    div
}

#[test]
fn test_exclude_scrollbars_and_borders_ltr() {
    let mut doc = doc();
    let div = scrolled_box(&mut doc, Direction::Ltr);

    let mut r = Rect::new(&doc, div);
    r.exclude_scrollbars_and_borders(&doc);

    assert_eq!(
        r.to_data(),
        RectData { top: 10.0, right: 75.0, bottom: 80.0, left: 10.0, width: 65.0, height: 70.0 }
    );
}

#[test]
fn test_exclude_scrollbars_and_borders_rtl() {
    let mut doc = doc();
    let div = scrolled_box(&mut doc, Direction::Rtl);

    let mut r = Rect::new(&doc, div);
    r.exclude_scrollbars_and_borders(&doc);

    assert_eq!(
        r.to_data(),
        RectData { top: 10.0, right: 90.0, bottom: 80.0, left: 25.0, width: 65.0, height: 70.0 }
    );
}

#[test]
fn test_exclude_window_scrollbars() {
    let mut doc = doc();
    let html = doc.document_element();
    {
        let geometry = doc.tree_mut().geometry_mut(html).unwrap();
        geometry.client_width = 985.0;
        geometry.client_height = 790.0;
    }

    let mut r = Rect::new(&doc, RectSource::Window);
    r.exclude_scrollbars_and_borders(&doc);
    assert_eq!(r.to_data(), data(0.0, 0.0, 985.0, 790.0));

    doc.tree_mut().style_mut(html).unwrap().direction = Direction::Rtl;
    let mut r = Rect::new(&doc, RectSource::Window);
    r.exclude_scrollbars_and_borders(&doc);
    assert_eq!(
        r.to_data(),
        RectData { top: 0.0, right: 1000.0, bottom: 790.0, left: 15.0, width: 985.0, height: 790.0 }
    );
}

#[test]
fn test_malformed_border_widths_count_as_zero() {
    let mut doc = doc();
    let div = scrolled_box(&mut doc, Direction::Ltr);
    doc.tree_mut().style_mut(div).unwrap().border_left_width = "thick".to_string();

    let mut r = Rect::new(&doc, div);
    r.exclude_scrollbars_and_borders(&doc);

    assert!(r.to_data().width.is_finite());
    assert_eq!(r.left, 0.0);
    // The unparsed border now reads as extra scrollbar width.
    assert_eq!(r.right, 65.0);
}

#[test]
fn test_moved_box_keeps_its_scrollbar() {
    let mut doc = doc();
    let div = scrolled_box(&mut doc, Direction::Ltr);

    doc.set_rect(div, DOMRect::from_xywh(10.0, 0.0, 100.0, 100.0));
    let mut r = Rect::new(&doc, div);
    r.exclude_scrollbars_and_borders(&doc);
    assert_eq!(
        r.to_data(),
        RectData { top: 10.0, right: 85.0, bottom: 80.0, left: 20.0, width: 65.0, height: 70.0 }
    );

    doc.set_rect(div, DOMRect::from_xywh(10.0, 0.0, 120.0, 100.0));
    let mut r = Rect::new(&doc, div);
    r.exclude_scrollbars_and_borders(&doc);
    assert_eq!(r.width, 85.0);
    assert_eq!(r.right, 105.0);
}

#[test]
fn test_resized_window_has_no_phantom_scrollbar() {
    let mut doc = doc();

    doc.set_window(Window::new(1200.0, 800.0));
    let mut r = Rect::new(&doc, RectSource::Window);
    r.exclude_scrollbars_and_borders(&doc);
    assert_eq!(r.to_data(), data(0.0, 0.0, 1200.0, 800.0));
    assert_eq!(
        doc.bounding_client_rect(doc.body()),
        Some(DOMRect::from_xywh(0.0, 0.0, 1200.0, 800.0))
    );
}

#[test]
fn test_resized_window_keeps_real_scrollbar() {
    let mut doc = doc();
    let html = doc.document_element();
    doc.tree_mut().geometry_mut(html).unwrap().client_width = 985.0;

    doc.set_window(Window::new(600.0, 400.0));
    let mut r = Rect::new(&doc, RectSource::Window);
    r.exclude_scrollbars_and_borders(&doc);

    assert_eq!(r.to_data(), data(0.0, 0.0, 585.0, 400.0));
}

// ============================================================================
// ABSOLUTE COORDINATES
// ============================================================================

#[test]
fn test_to_absolute_rect_adds_page_scroll() {
    let mut doc = doc();
    let body = doc.body();
    let div = child_of(&mut doc, body, DOMRect::from_xywh(10.0, 20.0, 30.0, 40.0));
    doc.window_mut().scroll_to(5.0, 100.0);

    let absolute = Rect::new(&doc, div).to_absolute_rect(&doc);

    assert_eq!(absolute.to_data(), data(15.0, 120.0, 30.0, 40.0));
}

#[test]
fn test_to_absolute_rect_in_positioned_ancestor() {
    let mut doc = doc();
    let body = doc.body();
    let container = child_of(&mut doc, body, DOMRect::from_xywh(100.0, 200.0, 300.0, 300.0));
    let div = child_of(&mut doc, container, DOMRect::from_xywh(150.0, 250.0, 30.0, 40.0));
    {
        let style = doc.tree_mut().style_mut(container).unwrap();
        style.position = Position::Absolute;
        style.border_left_width = "3px".to_string();
        style.border_top_width = "4px".to_string();
    }
    doc.tree_mut().geometry_mut(container).unwrap().scroll_top = 60.0;
    doc.window_mut().scroll_to(0.0, 500.0);

    let absolute = Rect::new(&doc, div).to_absolute_rect(&doc);

    assert_eq!(absolute.left, 150.0 - 100.0 - 3.0);
    assert_eq!(absolute.top, 250.0 - 200.0 + 60.0 - 4.0);
    assert_eq!(absolute.width, 30.0);
}

#[test]
fn test_to_absolute_rect_without_element_source() {
    let mut doc = doc();
    doc.window_mut().scroll_to(7.0, 9.0);

    let absolute = rect(1.0, 2.0, 3.0, 4.0).to_absolute_rect(&doc);

    assert_eq!(absolute.to_data(), data(8.0, 11.0, 3.0, 4.0));
}

// ============================================================================
// PROPERTIES
// ============================================================================

fn sample_rects() -> Vec<Rect> {
    vec![
        rect(0.0, 0.0, 100.0, 100.0),
        rect(50.0, 50.0, 100.0, 100.0),
        rect(100.0, 0.0, 10.0, 10.0),
        rect(200.0, 200.0, 1.0, 1.0),
        rect(-20.0, 30.0, 200.0, 5.0),
        rect(25.0, 25.0, 0.0, 0.0),
    ]
}

#[test]
fn test_intersection_is_symmetric() {
    let rects = sample_rects();
    for a in &rects {
        for b in &rects {
            let ab = a.get_intersection(b).map(|r| r.to_data());
            let ba = b.get_intersection(a).map(|r| r.to_data());
            assert_eq!(ab, ba);
        }
    }
}

#[test]
fn test_intersection_area_non_negative() {
    let rects = sample_rects();
    for a in &rects {
        for b in &rects {
            let area = a.get_intersection_area(b);
            assert!(area >= 0.0);
            if a.get_intersection(b).is_none() {
                assert_eq!(area, 0.0);
            }
        }
    }
}

#[test]
fn test_containment_means_full_area() {
    let rects = sample_rects();
    for a in &rects {
        for b in &rects {
            if a.contains(b) {
                assert_eq!(a.get_intersection_area(b), b.get_area());
            }
        }
    }
}

#[test]
fn test_clone_is_independent() {
    let original = rect(1.0, 2.0, 3.0, 4.0);
    let mut copy = original.clone();
    assert!(copy.is_equal(&original));

    copy.move_to(50.0, 60.0);

    assert_eq!((copy.left, copy.top, copy.width, copy.height), (50.0, 60.0, 3.0, 4.0));
    assert_eq!(original.to_data(), data(1.0, 2.0, 3.0, 4.0));
}
