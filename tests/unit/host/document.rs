use super::*;

#[test]
fn fresh_surface_only_holds_passthrough() {
    let s = Surface::default();
    assert!(s.figure().is_none());
    assert!(s.style().is_none());
    assert_eq!(s.to_markup(), "<content></content>");
}

#[test]
fn mount_then_clear_restores_passthrough_only() {
    let mut s = Surface::default();
    s.mount(
        ScopedStyle {
            opacity: 0.7,
            border_radius_pct: 0.0,
        },
        Figure::new(2, "259"),
    );
    let markup = s.to_markup();
    assert!(markup.starts_with("<style>figure.heatveil {"));
    assert!(markup.contains("opacity: 0.7;"));
    assert!(markup.contains("data-rank=\"2\" data-score=\"259\""));
    assert!(markup.ends_with("<content></content>"));

    s.clear();
    assert_eq!(s, Surface::default());
}

#[test]
fn figure_opacity_prefers_inline_declaration() {
    let mut s = Surface::default();
    assert_eq!(s.figure_opacity(), None);
    s.mount(
        ScopedStyle {
            opacity: 0.4,
            border_radius_pct: 0.0,
        },
        Figure::new(1, "1"),
    );
    assert_eq!(s.figure_opacity(), Some(0.4));
    s.figure_mut().unwrap().style.set("opacity", "0.9");
    assert_eq!(s.figure_opacity(), Some(0.9));
}

#[test]
fn inline_style_renders_declarations() {
    let mut st = InlineStyle::default();
    st.set("display", "none");
    st.set("background-color", "rgb(1, 2, 3)");
    assert_eq!(st.to_css(), "background-color: rgb(1, 2, 3); display: none;");
    assert_eq!(st.remove("display").as_deref(), Some("none"));
    assert_eq!(st.get("display"), None);
}
